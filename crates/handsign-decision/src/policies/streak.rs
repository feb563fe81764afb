//! Consecutive-streak policy.
//!
//! Kept for configurations that predate window voting. It has no cooldown
//! and never clears: once the streak reaches `streak_n`, every further
//! qualifying request for the same label is reported `final` again until the
//! streak breaks.

use chrono::{DateTime, Utc};

use handsign_core::config::{DecisionConfig, PolicyKind};
use handsign_core::errors::DecisionError;
use handsign_core::CandidateSet;
use handsign_session::SessionState;

use super::{DecisionPolicy, PendingReason, PolicyOutcome};

#[derive(Debug, Clone)]
pub struct StreakPolicy {
    config: DecisionConfig,
}

impl StreakPolicy {
    pub fn new(config: DecisionConfig) -> Self {
        Self { config }
    }
}

impl DecisionPolicy for StreakPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Streak
    }

    fn evaluate(
        &self,
        state: &mut SessionState,
        candidates: &CandidateSet,
        _now: DateTime<Utc>,
    ) -> Result<PolicyOutcome, DecisionError> {
        let top = candidates.top().ok_or(DecisionError::EmptyCandidates)?;
        let qualifies = top.probability >= self.config.base_threshold;

        if qualifies && state.last_label.as_deref() == Some(top.label.as_str()) {
            state.streak = state.streak.saturating_add(1);
        } else {
            state.last_label = Some(top.label.clone());
            state.streak = u32::from(qualifies);
        }

        let evidence = state.streak as usize;
        if state.streak >= self.config.streak_n {
            return Ok(PolicyOutcome::finalized(&top.label, top.probability, evidence));
        }

        let reason = if qualifies {
            PendingReason::Accumulating
        } else {
            PendingReason::BelowThreshold
        };
        Ok(PolicyOutcome::pending(&top.label, top.probability, evidence, reason))
    }

    fn evidence(&self, state: &SessionState) -> usize {
        state.streak as usize
    }
}
