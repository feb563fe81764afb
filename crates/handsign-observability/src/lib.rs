//! # handsign-observability
//!
//! Structured tracing setup with span and event helpers, plus verdict
//! metrics for the recognition pipeline.

pub mod metrics;
pub mod tracing_setup;

pub use metrics::DecisionMetrics;
pub use tracing_setup::{init_tracing, init_tracing_with_filter};
