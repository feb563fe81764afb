use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{Candidate, CandidateSet};

/// Decision outcome for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum VerdictMode {
    Pending,
    Final,
    Error,
}

impl VerdictMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictMode::Pending => "pending",
            VerdictMode::Final => "final",
            VerdictMode::Error => "error",
        }
    }
}

/// The engine's decision for one request plus supporting evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Verdict {
    pub mode: VerdictMode,
    pub label: String,
    /// Display text; falls back to `label`.
    pub text: String,
    /// Engine belief in `label`. Always 0 for errors.
    pub confidence: f64,
    /// Corroborating evidence: streak length or window size.
    #[serde(rename = "streak")]
    pub streak_or_window_size: usize,
    /// Top-k candidates of the current request.
    pub candidates: Vec<Candidate>,
}

impl Verdict {
    pub fn pending(label: &str, confidence: f64, evidence: usize, candidates: &CandidateSet) -> Self {
        Self::with_mode(VerdictMode::Pending, label, confidence, evidence, candidates)
    }

    pub fn finalized(label: &str, confidence: f64, evidence: usize, candidates: &CandidateSet) -> Self {
        Self::with_mode(VerdictMode::Final, label, confidence, evidence, candidates)
    }

    /// Error verdict: empty label, zero confidence, no candidates.
    pub fn error(evidence: usize) -> Self {
        Self {
            mode: VerdictMode::Error,
            label: String::new(),
            text: String::new(),
            confidence: 0.0,
            streak_or_window_size: evidence,
            candidates: Vec::new(),
        }
    }

    fn with_mode(
        mode: VerdictMode,
        label: &str,
        confidence: f64,
        evidence: usize,
        candidates: &CandidateSet,
    ) -> Self {
        Self {
            mode,
            label: label.to_string(),
            text: label.to_string(),
            confidence,
            streak_or_window_size: evidence,
            candidates: candidates.to_vec(),
        }
    }

    /// Replace the display text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn is_final(&self) -> bool {
        self.mode == VerdictMode::Final
    }

    pub fn is_pending(&self) -> bool {
        self.mode == VerdictMode::Pending
    }

    pub fn is_error(&self) -> bool {
        self.mode == VerdictMode::Error
    }
}
