//! # vitals-observability
//!
//! Tracing subscriber setup, the structured events emitted across the
//! workspace, and lock-free evaluation counters.

pub mod metrics;
pub mod tracing_setup;

pub use metrics::{EvaluationMetrics, MetricsSnapshot};
pub use tracing_setup::{init_tracing, init_tracing_with_filter};
