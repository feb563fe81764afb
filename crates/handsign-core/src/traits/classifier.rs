use crate::errors::ClassifierError;
use crate::models::{ClassDistribution, FeatureSequence};

/// Sign classifier: fixed-length feature sequence in, distribution over the
/// label set out.
pub trait IClassifier: Send + Sync {
    /// Classify one feature sequence.
    fn classify(&self, features: &FeatureSequence) -> Result<ClassDistribution, ClassifierError>;

    /// Size of the label set.
    fn num_classes(&self) -> usize;
}
