use serde::{Deserialize, Serialize};

use super::defaults;

/// Label map file locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    /// Index <-> label map (either direction, optionally under `label2id`).
    pub label_map_path: String,
    /// Label -> display text. A missing file means labels are shown as-is.
    pub label_text_path: String,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            label_map_path: defaults::DEFAULT_LABEL_MAP_PATH.to_string(),
            label_text_path: defaults::DEFAULT_LABEL_TEXT_PATH.to_string(),
        }
    }
}
