use super::InsufficientInput;

/// Decision path failures. Every variant is surfaced to callers as an
/// `error` verdict, never as a propagated error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecisionError {
    #[error("insufficient input: {0}")]
    InsufficientInput(#[from] InsufficientInput),

    #[error("candidate set is empty")]
    EmptyCandidates,

    #[error("representation fault in session {session_id}: {detail}")]
    RepresentationFault { session_id: String, detail: String },
}

impl DecisionError {
    /// Whether this error indicates an implementation bug rather than bad input.
    pub fn is_fault(&self) -> bool {
        matches!(self, DecisionError::RepresentationFault { .. })
    }
}
