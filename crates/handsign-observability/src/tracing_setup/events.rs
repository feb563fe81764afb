//! Structured log events for the recognition pipeline.
//!
//! Each function emits a `tracing` event with structured fields.

use handsign_core::{Verdict, VerdictMode};

/// Log a verdict leaving the pipeline. Finals at info, the rest at debug.
pub fn verdict_emitted(session_id: &str, verdict: &Verdict, frames_received: usize) {
    match verdict.mode {
        VerdictMode::Final => tracing::info!(
            event = "verdict_emitted",
            session_id = %session_id,
            mode = verdict.mode.as_str(),
            label = %verdict.label,
            confidence = verdict.confidence,
            evidence = verdict.streak_or_window_size,
            frames_received = frames_received,
            "final verdict emitted"
        ),
        _ => tracing::debug!(
            event = "verdict_emitted",
            session_id = %session_id,
            mode = verdict.mode.as_str(),
            label = %verdict.label,
            confidence = verdict.confidence,
            evidence = verdict.streak_or_window_size,
            frames_received = frames_received,
            "verdict emitted"
        ),
    }
}

/// Log a request whose frames could not be turned into features.
pub fn insufficient_input(session_id: &str, frames_received: usize, reason: &str) {
    tracing::warn!(
        event = "insufficient_input",
        session_id = %session_id,
        frames_received = frames_received,
        reason = %reason,
        "insufficient input"
    );
}

/// Log a classifier failure.
pub fn classifier_failed(session_id: &str, error: &str) {
    tracing::warn!(
        event = "classifier_failed",
        session_id = %session_id,
        error = %error,
        "classifier failed"
    );
}

/// Log a decision fault that reset a session.
pub fn representation_fault(session_id: &str, detail: &str) {
    tracing::error!(
        event = "representation_fault",
        session_id = %session_id,
        detail = %detail,
        "decision state fault"
    );
}

/// Log idle sessions removed by a sweep.
pub fn sessions_evicted(count: usize, remaining: usize) {
    tracing::info!(
        event = "sessions_evicted",
        count = count,
        remaining = remaining,
        "idle sessions evicted"
    );
}
