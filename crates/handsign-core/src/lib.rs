//! # handsign-core
//!
//! Foundation crate for the handsign recognizer.
//! Defines the candidate and verdict models, collaborator traits, errors,
//! config, and label maps. Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod labels;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::{DecisionConfig, HandsignConfig, PolicyKind, SessionConfig};
pub use errors::{HandsignError, HandsignResult};
pub use labels::{LabelMap, LabelTexts};
pub use models::{Candidate, CandidateSet, ClassDistribution, FeatureSequence, Frame, Verdict, VerdictMode};
