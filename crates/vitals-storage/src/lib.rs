//! # vitals-storage
//!
//! Thread-safe in-memory record store keyed by patient id, plus a
//! line-oriented ingestion path that feeds it.

pub mod ingest;
pub mod store;

pub use ingest::{ingest_file, ingest_reader, parse_line, IngestReport};
pub use store::RecordStore;
