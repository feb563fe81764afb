//! Value types exchanged between the extractor, classifier, engine and transport.

pub mod candidate;
pub mod distribution;
pub mod frame;
pub mod verdict;

pub use candidate::{Candidate, CandidateSet};
pub use distribution::ClassDistribution;
pub use frame::{FeatureSequence, Frame, Point};
pub use verdict::{Verdict, VerdictMode};
