//! Decision policies. One is active per engine, selected by configuration.

pub mod streak;
pub mod window;

pub use streak::StreakPolicy;
pub use window::WindowPolicy;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use handsign_core::config::{DecisionConfig, PolicyKind};
use handsign_core::errors::DecisionError;
use handsign_core::{CandidateSet, VerdictMode};
use handsign_session::SessionState;

/// Why a request did not finalize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingReason {
    /// Top-1 probability below the base threshold.
    BelowThreshold,
    /// A final was emitted moments ago.
    CoolingDown,
    /// Not enough evidence collected yet.
    Accumulating,
    /// Evidence collected but the vote was not convincing.
    WeakVote,
}

/// What a policy decided for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyOutcome {
    pub mode: VerdictMode,
    pub label: String,
    pub confidence: f64,
    /// Streak length or window size backing the decision.
    pub evidence: usize,
    pub reason: Option<PendingReason>,
}

impl PolicyOutcome {
    pub fn pending(label: &str, confidence: f64, evidence: usize, reason: PendingReason) -> Self {
        Self {
            mode: VerdictMode::Pending,
            label: label.to_string(),
            confidence,
            evidence,
            reason: Some(reason),
        }
    }

    pub fn finalized(label: &str, confidence: f64, evidence: usize) -> Self {
        Self {
            mode: VerdictMode::Final,
            label: label.to_string(),
            confidence,
            evidence,
            reason: None,
        }
    }
}

/// A rule that reads and updates one session's state for one request.
///
/// Implementations run under the session's entry lock and must not touch
/// the store.
pub trait DecisionPolicy: Send + Sync {
    fn kind(&self) -> PolicyKind;

    /// Decide for a non-empty candidate set.
    fn evaluate(
        &self,
        state: &mut SessionState,
        candidates: &CandidateSet,
        now: DateTime<Utc>,
    ) -> Result<PolicyOutcome, DecisionError>;

    /// Evidence counter reported for a session without deciding anything.
    fn evidence(&self, state: &SessionState) -> usize;
}

/// Build the policy named by the config.
pub fn from_config(config: &DecisionConfig) -> Box<dyn DecisionPolicy> {
    match config.policy {
        PolicyKind::Window => Box::new(WindowPolicy::new(config.clone())),
        PolicyKind::Streak => Box::new(StreakPolicy::new(config.clone())),
    }
}
