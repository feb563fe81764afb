use crate::errors::ClassifierError;

/// Full probability distribution over the classifier's label indices.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDistribution {
    probs: Vec<f64>,
}

impl ClassDistribution {
    /// Wrap probabilities indexed by class. Non-finite values are clamped to 0.
    pub fn new(probs: Vec<f64>) -> Result<Self, ClassifierError> {
        if probs.is_empty() {
            return Err(ClassifierError::EmptyDistribution);
        }
        let probs = probs
            .into_iter()
            .map(|p| if p.is_finite() { p.clamp(0.0, 1.0) } else { 0.0 })
            .collect();
        Ok(Self { probs })
    }

    /// Softmax over raw logits.
    pub fn from_logits(logits: &[f64]) -> Result<Self, ClassifierError> {
        if logits.is_empty() {
            return Err(ClassifierError::EmptyDistribution);
        }
        let max = logits
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(f64::NEG_INFINITY, f64::max);
        if !max.is_finite() {
            return Err(ClassifierError::InferenceFailed {
                reason: "all logits are non-finite".to_string(),
            });
        }
        let exps: Vec<f64> = logits
            .iter()
            .map(|v| if v.is_finite() { (v - max).exp() } else { 0.0 })
            .collect();
        let sum: f64 = exps.iter().sum();
        Self::new(exps.into_iter().map(|e| e / sum).collect())
    }

    /// The `k` most probable classes as `(index, probability)`, descending.
    /// Ties keep the lower index first.
    pub fn top_k(&self, k: usize) -> Vec<(usize, f64)> {
        let mut ranked: Vec<(usize, f64)> = self.probs.iter().copied().enumerate().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked.truncate(k);
        ranked
    }

    pub fn num_classes(&self) -> usize {
        self.probs.len()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.probs
    }
}
