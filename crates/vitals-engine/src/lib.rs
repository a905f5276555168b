//! # vitals-engine
//!
//! Runs the rule registry over patient snapshots, turns findings into
//! annotated alerts, and hands them to a sink. The [`monitor`] module
//! drives evaluation on a fixed interval.

pub mod annotate;
pub mod evaluator;
pub mod monitor;
pub mod sink;

pub use annotate::{
    AnnotatedAlert, AnnotationLayer, AnnotationPipeline, Annotator, PriorityAnnotator,
    RepeatAnnotator,
};
pub use evaluator::{AlertEvaluator, CycleSummary, EvaluationReport};
pub use monitor::{recent_readings, Monitor, MonitorHandle, MonitorStats};
pub use sink::{ChannelSink, FanoutSink, MemorySink, TracingSink};
