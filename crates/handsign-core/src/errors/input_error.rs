/// Feature extraction could not produce a usable sequence.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InsufficientInput {
    #[error("received {received} frames, need at least {required}")]
    TooFewFrames { received: usize, required: usize },

    #[error("{empty} frames without hands, at most {allowed} allowed")]
    TooManyEmptyFrames { empty: usize, allowed: usize },
}
