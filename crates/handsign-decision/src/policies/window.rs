//! Window-voting policy with post-final cooldown.

use chrono::{DateTime, Utc};

use handsign_core::config::{DecisionConfig, PolicyKind};
use handsign_core::errors::DecisionError;
use handsign_core::CandidateSet;
use handsign_session::SessionState;

use super::{DecisionPolicy, PendingReason, PolicyOutcome};

/// Admits confident requests into the session window and finalizes when a
/// full window agrees on a label by both vote share and mean probability.
#[derive(Debug, Clone)]
pub struct WindowPolicy {
    config: DecisionConfig,
}

impl WindowPolicy {
    pub fn new(config: DecisionConfig) -> Self {
        Self { config }
    }
}

impl DecisionPolicy for WindowPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Window
    }

    fn evaluate(
        &self,
        state: &mut SessionState,
        candidates: &CandidateSet,
        now: DateTime<Utc>,
    ) -> Result<PolicyOutcome, DecisionError> {
        let top = candidates.top().ok_or(DecisionError::EmptyCandidates)?;

        state
            .window
            .check_integrity()
            .map_err(|detail| DecisionError::RepresentationFault {
                session_id: state.session_id.clone(),
                detail,
            })?;

        // Sub-threshold requests are not evidence.
        if top.probability < self.config.base_threshold {
            return Ok(PolicyOutcome::pending(
                &top.label,
                top.probability,
                state.window.len(),
                PendingReason::BelowThreshold,
            ));
        }

        state.window.push(candidates.clone());

        if state.cooldown.is_active(now) {
            return Ok(PolicyOutcome::pending(
                &top.label,
                top.probability,
                state.window.len(),
                PendingReason::CoolingDown,
            ));
        }

        if !state.window.is_full() {
            return Ok(PolicyOutcome::pending(
                &top.label,
                top.probability,
                state.window.len(),
                PendingReason::Accumulating,
            ));
        }

        let vote = state.window.vote_aggregate(&self.config.rank_weights);
        if !vote.is_finite() {
            return Err(DecisionError::RepresentationFault {
                session_id: state.session_id.clone(),
                detail: format!(
                    "non-finite vote: ratio {}, average {}",
                    vote.vote_ratio, vote.average_probability
                ),
            });
        }

        let Some(winner) = vote.winner else {
            return Ok(PolicyOutcome::pending(
                &top.label,
                top.probability,
                state.window.len(),
                PendingReason::WeakVote,
            ));
        };

        if vote.vote_ratio >= self.config.vote_min_ratio
            && vote.average_probability >= self.config.min_avg_prob
        {
            let evidence = state.window.capacity();
            state.window.clear();
            state.cooldown.arm(now, self.config.cooldown());
            return Ok(PolicyOutcome::finalized(
                &winner,
                vote.average_probability,
                evidence,
            ));
        }

        tracing::trace!(
            session_id = %state.session_id,
            winner = %winner,
            vote_ratio = vote.vote_ratio,
            average_probability = vote.average_probability,
            "vote below bar"
        );
        Ok(PolicyOutcome::pending(
            &winner,
            vote.average_probability,
            state.window.len(),
            PendingReason::WeakVote,
        ))
    }

    fn evidence(&self, state: &SessionState) -> usize {
        state.window.len()
    }
}
