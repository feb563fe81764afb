use crate::errors::InsufficientInput;
use crate::models::{FeatureSequence, Frame};

/// Converts raw landmark frames into a fixed-shape feature sequence.
pub trait IFeatureExtractor: Send + Sync {
    /// Extract features, or report why the frames are unusable.
    fn extract(&self, frames: &[Frame]) -> Result<FeatureSequence, InsufficientInput>;

    /// Width of one feature row.
    fn feature_dim(&self) -> usize;

    /// Rows per sequence.
    fn sequence_len(&self) -> usize;
}
