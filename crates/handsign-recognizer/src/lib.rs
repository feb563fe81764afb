//! # handsign-recognizer
//!
//! The request path: landmark frames are turned into features, classified,
//! mapped to a top-k candidate set and handed to the session decision
//! engine. Every outcome, including bad input, comes back as a verdict.

pub mod dto;
pub mod recognizer;

pub use dto::{HealthReport, RecognizeRequest, RecognizeResponse};
pub use recognizer::Recognizer;
