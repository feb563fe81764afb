//! # handsign-features
//!
//! Reference `IFeatureExtractor` over hand and face landmarks.

pub mod hand;
pub mod landmark;

pub use landmark::LandmarkExtractor;
