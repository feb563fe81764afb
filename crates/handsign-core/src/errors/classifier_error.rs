/// Classifier failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClassifierError {
    #[error("feature shape mismatch: expected {expected_frames}x{expected_dim}, got {frames}x{dim}")]
    ShapeMismatch {
        expected_frames: usize,
        expected_dim: usize,
        frames: usize,
        dim: usize,
    },

    #[error("inference failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("classifier returned an empty distribution")]
    EmptyDistribution,
}
