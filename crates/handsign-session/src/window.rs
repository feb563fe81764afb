//! Bounded, time-ordered history of candidate sets with weighted voting.

use std::collections::{HashMap, VecDeque};

use handsign_core::CandidateSet;
use serde::{Deserialize, Serialize};

/// Result of aggregating the votes in a window.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VoteOutcome {
    /// Label with the highest weighted score. `None` for an empty window
    /// or one where every score is zero.
    pub winner: Option<String>,
    /// Winner score over the sum of all scores.
    pub vote_ratio: f64,
    /// Mean probability each entry assigned to the winner.
    pub average_probability: f64,
    /// Number of entries the vote covered.
    pub entries: usize,
}

impl VoteOutcome {
    fn empty(entries: usize) -> Self {
        Self {
            entries,
            ..Self::default()
        }
    }

    pub fn is_finite(&self) -> bool {
        self.vote_ratio.is_finite() && self.average_probability.is_finite()
    }
}

/// Strict sliding window over the last `capacity` candidate sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VotingWindow {
    capacity: usize,
    entries: VecDeque<CandidateSet>,
}

impl VotingWindow {
    /// Create an empty window. A zero capacity is raised to 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// Append a set, dropping the oldest entries beyond capacity.
    pub fn push(&mut self, set: CandidateSet) {
        self.entries.push_back(set);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &CandidateSet> {
        self.entries.iter()
    }

    /// Weighted vote over every entry.
    ///
    /// Each `(label, p)` at rank `r` adds `weight(r) * p` to the label's
    /// score, where `weight(r)` is `rank_weights[r]` or 1.0 past its end.
    /// Ties go to the label first seen, scanning oldest entry first and
    /// rank order within an entry.
    pub fn vote_aggregate(&self, rank_weights: &[f64]) -> VoteOutcome {
        if self.entries.is_empty() {
            return VoteOutcome::empty(0);
        }

        let mut scores: Vec<(&str, f64)> = Vec::new();
        let mut slots: HashMap<&str, usize> = HashMap::new();
        for set in &self.entries {
            for (rank, c) in set.iter().enumerate() {
                let weight = rank_weights.get(rank).copied().unwrap_or(1.0);
                let slot = *slots.entry(c.label.as_str()).or_insert_with(|| {
                    scores.push((c.label.as_str(), 0.0));
                    scores.len() - 1
                });
                scores[slot].1 += weight * c.probability;
            }
        }

        let total: f64 = scores.iter().map(|(_, s)| s).sum();
        if total <= 0.0 {
            return VoteOutcome::empty(self.entries.len());
        }

        let mut best = 0;
        for (i, (_, score)) in scores.iter().enumerate().skip(1) {
            if *score > scores[best].1 {
                best = i;
            }
        }
        let (winner, winner_score) = scores[best];

        let average_probability = self
            .entries
            .iter()
            .map(|set| set.probability_of(winner))
            .sum::<f64>()
            / self.entries.len() as f64;

        VoteOutcome {
            winner: Some(winner.to_string()),
            vote_ratio: winner_score / total,
            average_probability,
            entries: self.entries.len(),
        }
    }

    /// Check the structural invariants a decision relies on.
    pub fn check_integrity(&self) -> Result<(), String> {
        if self.capacity == 0 {
            return Err("window capacity is zero".to_string());
        }
        if self.entries.len() > self.capacity {
            return Err(format!(
                "window holds {} entries, capacity {}",
                self.entries.len(),
                self.capacity
            ));
        }
        for (i, set) in self.entries.iter().enumerate() {
            if let Some(c) = set
                .iter()
                .find(|c| !c.probability.is_finite() || !(0.0..=1.0).contains(&c.probability))
            {
                return Err(format!(
                    "entry {i} holds probability {} for '{}'",
                    c.probability, c.label
                ));
            }
        }
        Ok(())
    }
}
