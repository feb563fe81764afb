use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::ClassDistribution;
use crate::errors::CandidateError;
use crate::labels::LabelMap;

/// One ranked (label, probability) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Candidate {
    pub label: String,
    /// Probability in [0, 1].
    pub probability: f64,
}

impl Candidate {
    pub fn new(label: impl Into<String>, probability: f64) -> Self {
        Self {
            label: label.into(),
            probability,
        }
    }
}

/// Ranked top-k output of one classifier invocation.
///
/// Ordered by descending probability; every probability is in [0, 1].
/// Probabilities need not sum to 1 since the list is a truncation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Candidate>", into = "Vec<Candidate>")]
pub struct CandidateSet {
    candidates: Vec<Candidate>,
}

impl CandidateSet {
    /// Build a set from candidates already ranked by the caller.
    pub fn new(candidates: Vec<Candidate>) -> Result<Self, CandidateError> {
        for (rank, c) in candidates.iter().enumerate() {
            if !c.probability.is_finite() || !(0.0..=1.0).contains(&c.probability) {
                return Err(CandidateError::ProbabilityOutOfRange {
                    label: c.label.clone(),
                    value: c.probability,
                });
            }
            if rank > 0 && c.probability > candidates[rank - 1].probability {
                return Err(CandidateError::NotRanked { rank });
            }
        }
        Ok(Self { candidates })
    }

    /// Convenience constructor from `(label, probability)` pairs.
    pub fn from_pairs<L: Into<String>>(
        pairs: impl IntoIterator<Item = (L, f64)>,
    ) -> Result<Self, CandidateError> {
        Self::new(
            pairs
                .into_iter()
                .map(|(label, p)| Candidate::new(label, p))
                .collect(),
        )
    }

    /// Take the top `k` classes of a full distribution, resolving indices
    /// through the label map. Unknown indices keep their decimal form.
    pub fn from_distribution(
        distribution: &ClassDistribution,
        labels: &LabelMap,
        k: usize,
    ) -> Result<Self, CandidateError> {
        if k == 0 {
            return Err(CandidateError::ZeroTopK);
        }
        let candidates = distribution
            .top_k(k)
            .into_iter()
            .map(|(idx, p)| Candidate::new(labels.label_or_index(idx), p))
            .collect();
        Self::new(candidates)
    }

    /// Keep only the first `k` candidates.
    pub fn truncated(&self, k: usize) -> Self {
        Self {
            candidates: self.candidates.iter().take(k).cloned().collect(),
        }
    }

    /// The top-1 candidate, if any.
    pub fn top(&self) -> Option<&Candidate> {
        self.candidates.first()
    }

    /// Probability this set assigned to `label` (0 if absent).
    pub fn probability_of(&self, label: &str) -> f64 {
        self.candidates
            .iter()
            .find(|c| c.label == label)
            .map(|c| c.probability)
            .unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.iter()
    }

    pub fn as_slice(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn to_vec(&self) -> Vec<Candidate> {
        self.candidates.clone()
    }
}

impl TryFrom<Vec<Candidate>> for CandidateSet {
    type Error = CandidateError;

    fn try_from(candidates: Vec<Candidate>) -> Result<Self, Self::Error> {
        Self::new(candidates)
    }
}

impl From<CandidateSet> for Vec<Candidate> {
    fn from(set: CandidateSet) -> Self {
        set.candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_probability_above_one() {
        let err = CandidateSet::from_pairs([("A", 1.2)]).unwrap_err();
        assert!(matches!(err, CandidateError::ProbabilityOutOfRange { .. }));
    }

    #[test]
    fn rejects_nan() {
        assert!(CandidateSet::from_pairs([("A", f64::NAN)]).is_err());
    }

    #[test]
    fn rejects_unranked_input() {
        let err = CandidateSet::from_pairs([("A", 0.2), ("B", 0.5)]).unwrap_err();
        assert_eq!(err, CandidateError::NotRanked { rank: 1 });
    }

    #[test]
    fn equal_probabilities_are_ranked() {
        assert!(CandidateSet::from_pairs([("A", 0.4), ("B", 0.4)]).is_ok());
    }

    #[test]
    fn probability_of_missing_label_is_zero() {
        let set = CandidateSet::from_pairs([("A", 0.7), ("B", 0.2)]).unwrap();
        assert_eq!(set.probability_of("B"), 0.2);
        assert_eq!(set.probability_of("Z"), 0.0);
    }

    #[test]
    fn deserialization_validates() {
        let bad = r#"[{"label":"A","probability":0.1},{"label":"B","probability":0.9}]"#;
        assert!(serde_json::from_str::<CandidateSet>(bad).is_err());
        let good = r#"[{"label":"A","probability":0.9}]"#;
        let set: CandidateSet = serde_json::from_str(good).unwrap();
        assert_eq!(set.top().unwrap().label, "A");
    }
}
