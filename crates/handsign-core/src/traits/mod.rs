//! Seams to the collaborators that surround the decision engine.

pub mod classifier;
pub mod feature_extractor;

pub use classifier::IClassifier;
pub use feature_extractor::IFeatureExtractor;
