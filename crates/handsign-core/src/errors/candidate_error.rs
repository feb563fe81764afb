/// Errors raised while building a `CandidateSet`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CandidateError {
    #[error("probability {value} for '{label}' is outside [0, 1]")]
    ProbabilityOutOfRange { label: String, value: f64 },

    #[error("candidate at rank {rank} outranks its predecessor")]
    NotRanked { rank: usize },

    #[error("top-k size must be at least 1")]
    ZeroTopK,
}
