use serde::{Deserialize, Serialize};

use super::defaults;

/// Landmark feature extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Frames per feature sequence (T).
    pub sequence_len: usize,
    /// Append face landmarks to the hand features.
    pub use_face: bool,
    /// Normalize each hand by wrist position and palm size.
    pub hand_norm: bool,
    /// Input comes from a mirrored (selfie) camera; swap hand slots.
    pub mirrored: bool,
    /// Fraction of hand-less frames above which input is rejected.
    pub max_zero_ratio: f64,
}

impl FeatureConfig {
    /// Width of one feature row.
    pub fn feature_dim(&self) -> usize {
        let hands = 2 * defaults::HAND_POINTS * 3;
        if self.use_face {
            hands + defaults::FACE_POINTS * 3
        } else {
            hands
        }
    }

    /// Largest number of hand-less frames still accepted.
    pub fn max_empty_frames(&self) -> usize {
        (self.sequence_len as f64 * self.max_zero_ratio).floor() as usize
    }
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            sequence_len: defaults::DEFAULT_SEQUENCE_LEN,
            use_face: defaults::DEFAULT_USE_FACE,
            hand_norm: defaults::DEFAULT_HAND_NORM,
            mirrored: defaults::DEFAULT_MIRRORED,
            max_zero_ratio: defaults::DEFAULT_MAX_ZERO_RATIO,
        }
    }
}
