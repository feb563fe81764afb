//! DecisionEngine: per-request verdicts over per-session state.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use handsign_core::config::{DecisionConfig, HandsignConfig, PolicyKind};
use handsign_core::errors::DecisionError;
use handsign_core::{CandidateSet, LabelTexts, Verdict, VerdictMode};
use handsign_session::{SessionState, SessionStore};

use crate::policies::{self, DecisionPolicy, PolicyOutcome};

/// Session decision engine.
///
/// Holds its configuration and an injected `SessionStore`; engines built
/// with different stores share nothing.
pub struct DecisionEngine {
    config: DecisionConfig,
    store: Arc<SessionStore>,
    policy: Box<dyn DecisionPolicy>,
    texts: LabelTexts,
}

impl DecisionEngine {
    /// Create an engine over an existing store.
    pub fn new(config: DecisionConfig, store: Arc<SessionStore>) -> Self {
        let policy = policies::from_config(&config);
        Self {
            config,
            store,
            policy,
            texts: LabelTexts::default(),
        }
    }

    /// Create an engine and a matching store from the full config.
    pub fn from_config(config: &HandsignConfig) -> Self {
        let store = SessionStore::with_config(config.session.clone(), config.decision.window_size);
        Self::new(config.decision.clone(), Arc::new(store))
    }

    /// Attach a label -> text lookup used to fill `Verdict::text`.
    pub fn with_texts(mut self, texts: LabelTexts) -> Self {
        self.texts = texts;
        self
    }

    pub fn config(&self) -> &DecisionConfig {
        &self.config
    }

    pub fn policy_kind(&self) -> PolicyKind {
        self.policy.kind()
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// Evict idle sessions if the sweep interval has elapsed. Returns how
    /// many were removed.
    pub fn sweep_idle(&self, now: DateTime<Utc>) -> usize {
        self.store.maybe_sweep(now)
    }

    /// Decide one request for `session_id`, sweeping idle sessions first.
    ///
    /// Never fails: empty input and internal faults come back as `error`
    /// verdicts. A fault also resets the session to a fresh state.
    pub fn decide(
        &self,
        session_id: &str,
        candidates: &CandidateSet,
        force_final: bool,
        now: DateTime<Utc>,
    ) -> Verdict {
        // Sweep before taking the session lock; the sweep waits on it.
        self.sweep_idle(now);
        match self.try_decide(session_id, candidates, force_final, now) {
            Ok(verdict) => verdict,
            Err(_) => Verdict::error(self.evidence(session_id)),
        }
    }

    /// Like [`decide`](Self::decide), but hands the error back instead of
    /// folding it into an `error` verdict. Faults have already reset the
    /// session by the time this returns. Does not sweep; callers drive
    /// eviction through [`sweep_idle`](Self::sweep_idle).
    pub fn try_decide(
        &self,
        session_id: &str,
        candidates: &CandidateSet,
        force_final: bool,
        now: DateTime<Utc>,
    ) -> Result<Verdict, DecisionError> {
        let candidates = candidates.truncated(self.config.top_k);
        if candidates.is_empty() {
            let err = DecisionError::EmptyCandidates;
            tracing::warn!(session_id = %session_id, reason = %err, "request rejected");
            return Err(err);
        }

        let mut state = self
            .store
            .get_or_create_with(session_id, self.config.window_size, now);
        state.requests += 1;

        if force_final {
            return self.force_final(&mut state, &candidates);
        }

        let evaluated = panic::catch_unwind(AssertUnwindSafe(|| {
            self.policy.evaluate(&mut state, &candidates, now)
        }));

        let outcome = match evaluated {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(err)) => return Err(self.fail(&mut state, err)),
            Err(payload) => {
                let detail = panic_message(payload.as_ref());
                let err = DecisionError::RepresentationFault {
                    session_id: session_id.to_string(),
                    detail: format!("decision panicked: {detail}"),
                };
                return Err(self.fail(&mut state, err));
            }
        };

        if outcome.mode == VerdictMode::Final {
            state.finals += 1;
            tracing::info!(
                session_id = %session_id,
                label = %outcome.label,
                confidence = outcome.confidence,
                evidence = outcome.evidence,
                policy = %self.policy.kind(),
                "final verdict"
            );
        } else {
            tracing::debug!(
                session_id = %session_id,
                label = %outcome.label,
                confidence = outcome.confidence,
                evidence = outcome.evidence,
                reason = ?outcome.reason,
                "pending verdict"
            );
        }

        Ok(self.verdict(outcome, &candidates))
    }

    /// Error verdict for input that never reached a policy (insufficient
    /// frames, empty candidates). Session state is left untouched.
    pub fn reject(&self, session_id: &str, reason: &DecisionError) -> Verdict {
        tracing::debug!(session_id = %session_id, reason = %reason, "request rejected");
        Verdict::error(self.evidence(session_id))
    }

    /// Current evidence count for a session, 0 when it does not exist.
    pub fn evidence(&self, session_id: &str) -> usize {
        self.store
            .peek(session_id, |state| self.policy.evidence(state))
            .unwrap_or(0)
    }

    fn force_final(
        &self,
        state: &mut SessionState,
        candidates: &CandidateSet,
    ) -> Result<Verdict, DecisionError> {
        let Some(top) = candidates.top() else {
            return Err(DecisionError::EmptyCandidates);
        };
        state.finals += 1;
        tracing::info!(
            session_id = %state.session_id,
            label = %top.label,
            confidence = top.probability,
            "forced final verdict"
        );
        Ok(self.verdict(
            PolicyOutcome::finalized(&top.label, top.probability, 1),
            candidates,
        ))
    }

    fn fail(&self, state: &mut SessionState, err: DecisionError) -> DecisionError {
        if err.is_fault() {
            tracing::error!(session_id = %state.session_id, error = %err, "decision fault, session reset");
            state.reset();
        } else {
            tracing::warn!(session_id = %state.session_id, error = %err, "decision rejected");
        }
        err
    }

    fn verdict(&self, outcome: PolicyOutcome, candidates: &CandidateSet) -> Verdict {
        let text = self.texts.text_for(&outcome.label).to_string();
        let verdict = match outcome.mode {
            VerdictMode::Final => Verdict::finalized(&outcome.label, outcome.confidence, outcome.evidence, candidates),
            _ => Verdict::pending(&outcome.label, outcome.confidence, outcome.evidence, candidates),
        };
        verdict.with_text(text)
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
