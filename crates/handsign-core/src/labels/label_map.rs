//! Canonical bidirectional index <-> label map.
//!
//! Accepted inputs:
//! - `{"0": "WORD00001", ...}` (index -> label)
//! - `{"WORD00001": 0, ...}` (label -> index)
//! - either of the above wrapped as `{"label2id": {...}}`
//!
//! Maps whose direction cannot be told apart, or whose indices are not a
//! dense `0..n` range, are rejected.

use std::collections::HashMap;
use std::path::Path;

use serde_json::{Map, Value};

use crate::errors::{ConfigError, LabelMapError};

const WRAPPER_KEY: &str = "label2id";

/// Dense index <-> label mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelMap {
    labels: Vec<String>,
    index: HashMap<String, usize>,
}

impl LabelMap {
    /// Build from labels listed in index order.
    pub fn from_labels<S: Into<String>>(
        labels: impl IntoIterator<Item = S>,
    ) -> Result<Self, LabelMapError> {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(LabelMapError::Empty);
        }
        let mut index = HashMap::with_capacity(labels.len());
        for (i, label) in labels.iter().enumerate() {
            if index.insert(label.clone(), i).is_some() {
                return Err(LabelMapError::DuplicateLabel {
                    label: label.clone(),
                });
            }
        }
        Ok(Self { labels, index })
    }

    /// Load and normalize a label map file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let map = Self::from_json_str(&content).map_err(|source| ConfigError::LabelMap {
            path: path.display().to_string(),
            source,
        })?;
        tracing::info!(path = %path.display(), classes = map.len(), "label map loaded");
        Ok(map)
    }

    pub fn from_json_str(json: &str) -> Result<Self, LabelMapError> {
        let value: Value = serde_json::from_str(json).map_err(|e| LabelMapError::Json {
            message: e.to_string(),
        })?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<Self, LabelMapError> {
        let mut obj = value.as_object().ok_or(LabelMapError::NotAnObject)?;
        if let Some(inner) = obj.get(WRAPPER_KEY).and_then(Value::as_object) {
            obj = inner;
        }
        if obj.is_empty() {
            return Err(LabelMapError::Empty);
        }

        let keys_are_indices = obj.keys().all(|k| parse_index_str(k).is_some());
        let values_are_indices = obj.values().all(|v| parse_index_value(v).is_some());

        match (keys_are_indices, values_are_indices) {
            (true, true) => Err(LabelMapError::AmbiguousDirection {
                sample: sample(obj),
            }),
            (true, false) => {
                let mut pairs = Vec::with_capacity(obj.len());
                for (k, v) in obj {
                    let label = v.as_str().ok_or_else(|| LabelMapError::UnsupportedFormat {
                        sample: sample(obj),
                    })?;
                    // keys_are_indices guarantees this parses
                    let idx = parse_index_str(k).unwrap_or_default();
                    pairs.push((idx, label.to_string()));
                }
                Self::from_indexed(pairs)
            }
            (false, true) => {
                let pairs = obj
                    .iter()
                    .map(|(k, v)| (parse_index_value(v).unwrap_or_default(), k.clone()))
                    .collect();
                Self::from_indexed(pairs)
            }
            (false, false) => Err(LabelMapError::UnsupportedFormat {
                sample: sample(obj),
            }),
        }
    }

    fn from_indexed(mut pairs: Vec<(usize, String)>) -> Result<Self, LabelMapError> {
        pairs.sort_by_key(|(idx, _)| *idx);
        for (expected, (idx, _)) in pairs.iter().enumerate() {
            if *idx < expected {
                return Err(LabelMapError::DuplicateIndex { index: *idx });
            }
            if *idx > expected {
                return Err(LabelMapError::IndexGap { missing: expected });
            }
        }
        Self::from_labels(pairs.into_iter().map(|(_, label)| label))
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Label for `index`, or the index itself in decimal when unmapped.
    pub fn label_or_index(&self, index: usize) -> String {
        self.label(index)
            .map(str::to_string)
            .unwrap_or_else(|| index.to_string())
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

fn parse_index_str(s: &str) -> Option<usize> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn parse_index_value(v: &Value) -> Option<usize> {
    match v {
        Value::Number(n) => n.as_u64().and_then(|n| usize::try_from(n).ok()),
        Value::String(s) => parse_index_str(s),
        _ => None,
    }
}

fn sample(obj: &Map<String, Value>) -> String {
    obj.iter()
        .take(3)
        .map(|(k, v)| format!("{k}: {v}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_to_label_form() {
        let map = LabelMap::from_json_str(r#"{"1": "BYE", "0": "HELLO"}"#).unwrap();
        assert_eq!(map.label(0), Some("HELLO"));
        assert_eq!(map.index_of("BYE"), Some(1));
    }

    #[test]
    fn label_to_index_form() {
        let map = LabelMap::from_json_str(r#"{"HELLO": 0, "BYE": "1"}"#).unwrap();
        assert_eq!(map.labels(), &["HELLO".to_string(), "BYE".to_string()]);
    }

    #[test]
    fn wrapped_form() {
        let map = LabelMap::from_json_str(r#"{"label2id": {"HELLO": 0}}"#).unwrap();
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn both_directions_numeric_is_ambiguous() {
        let err = LabelMap::from_json_str(r#"{"0": 1, "1": 0}"#).unwrap_err();
        assert!(matches!(err, LabelMapError::AmbiguousDirection { .. }));
    }

    #[test]
    fn mixed_map_is_unsupported() {
        let err = LabelMap::from_json_str(r#"{"0": "HELLO", "BYE": 1}"#).unwrap_err();
        assert!(matches!(err, LabelMapError::UnsupportedFormat { .. }));
    }

    #[test]
    fn gaps_and_duplicates_are_rejected() {
        assert_eq!(
            LabelMap::from_json_str(r#"{"0": "A", "2": "B"}"#).unwrap_err(),
            LabelMapError::IndexGap { missing: 1 }
        );
        assert_eq!(
            LabelMap::from_json_str(r#"{"A": 0, "B": 0}"#).unwrap_err(),
            LabelMapError::DuplicateIndex { index: 0 }
        );
        assert_eq!(
            LabelMap::from_json_str(r#"{"0": "A", "1": "A"}"#).unwrap_err(),
            LabelMapError::DuplicateLabel {
                label: "A".to_string()
            }
        );
    }

    #[test]
    fn unmapped_index_falls_back_to_decimal() {
        let map = LabelMap::from_labels(["A"]).unwrap();
        assert_eq!(map.label_or_index(7), "7");
    }
}
