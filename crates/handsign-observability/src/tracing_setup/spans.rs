//! Span definitions per pipeline stage.

/// Create a span covering one recognition request.
#[macro_export]
macro_rules! recognize_span {
    ($session_id:expr, $frames:expr) => {
        tracing::info_span!("handsign.recognize", session_id = %$session_id, frames = $frames)
    };
}

/// Create a span covering one decision.
#[macro_export]
macro_rules! decision_span {
    ($session_id:expr, $policy:expr) => {
        tracing::debug_span!("handsign.decision", session_id = %$session_id, policy = %$policy)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const RECOGNIZE: &str = "handsign.recognize";
    pub const DECISION: &str = "handsign.decision";
}
