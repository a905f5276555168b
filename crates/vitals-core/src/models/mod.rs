pub mod alert;
pub mod patient;
pub mod record;

pub use alert::{Alert, AlertCategory};
pub use patient::Patient;
pub use record::{IncomingRecord, Record, RecordType};

/// Identifier of a monitored patient. Always positive once ingested.
pub type PatientId = u32;

/// Milliseconds since the Unix epoch.
pub type TimestampMs = i64;
