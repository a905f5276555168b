//! # vitals-core
//!
//! Foundation crate for the vital-sign alert engine.
//! Defines records, patients, alerts, the sink seam, errors, and config.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::VitalsConfig;
pub use errors::{
    ConfigError, EvaluationError, FactoryError, IngestError, RuleError, StoreError,
    VitalsErrorCode,
};
pub use models::{
    Alert, AlertCategory, IncomingRecord, Patient, PatientId, Record, RecordType, TimestampMs,
};
pub use traits::{AlertDelivery, AlertSink};
