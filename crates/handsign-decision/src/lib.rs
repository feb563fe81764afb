//! # handsign-decision
//!
//! Turns noisy per-request classifications into stable `pending` / `final` /
//! `error` verdicts per session.
//!
//! ## Modules
//!
//! - `engine`: `DecisionEngine`, the entry point the transport calls
//! - `policies`: window-voting (default) and consecutive-streak policies

pub mod engine;
pub mod policies;

pub use engine::DecisionEngine;
pub use policies::{DecisionPolicy, PendingReason, PolicyOutcome, StreakPolicy, WindowPolicy};
