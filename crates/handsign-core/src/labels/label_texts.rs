use std::collections::HashMap;
use std::path::Path;

use crate::errors::ConfigError;

/// Static label -> human-readable text lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelTexts {
    texts: HashMap<String, String>,
}

impl LabelTexts {
    pub fn new(texts: HashMap<String, String>) -> Self {
        Self { texts }
    }

    /// Load `label_to_text.json`. A missing file yields an empty lookup.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no label text file, labels shown verbatim");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let texts = serde_json::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { texts })
    }

    /// Display text for `label`, falling back to the label itself.
    pub fn text_for<'a>(&'a self, label: &'a str) -> &'a str {
        self.texts.get(label).map(String::as_str).unwrap_or(label)
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LabelTexts {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            texts: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
