//! Verdict counts by mode, failure causes, evictions, final-label distribution.

use std::collections::HashMap;

use handsign_core::{Verdict, VerdictMode};
use serde::{Deserialize, Serialize};

/// Decision-level metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecisionMetrics {
    pub pending: u64,
    pub finals: u64,
    pub errors: u64,
    /// Requests rejected before classification.
    pub insufficient_inputs: u64,
    pub classifier_failures: u64,
    /// Decision faults that reset a session.
    pub representation_faults: u64,
    pub evictions: u64,
    /// Final verdicts per label.
    pub label_distribution: HashMap<String, u64>,
}

impl DecisionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a verdict returned to a caller.
    pub fn record_verdict(&mut self, verdict: &Verdict) {
        match verdict.mode {
            VerdictMode::Pending => self.pending += 1,
            VerdictMode::Final => {
                self.finals += 1;
                *self
                    .label_distribution
                    .entry(verdict.label.clone())
                    .or_default() += 1;
            }
            VerdictMode::Error => self.errors += 1,
        }
    }

    pub fn record_insufficient_input(&mut self) {
        self.insufficient_inputs += 1;
    }

    pub fn record_classifier_failure(&mut self) {
        self.classifier_failures += 1;
    }

    pub fn record_fault(&mut self) {
        self.representation_faults += 1;
    }

    pub fn record_evictions(&mut self, count: usize) {
        self.evictions += count as u64;
    }

    /// Verdicts recorded so far.
    pub fn total(&self) -> u64 {
        self.pending + self.finals + self.errors
    }

    /// Finals as a fraction of all verdicts (0.0–1.0).
    pub fn final_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.finals as f64 / total as f64
    }

    /// Most frequent final label, ties broken alphabetically.
    pub fn top_label(&self) -> Option<(&str, u64)> {
        self.label_distribution
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(label, count)| (label.as_str(), *count))
    }
}
