//! Ingestion errors. Malformed lines are raised by line parsing, never by the store.

use super::error_code::{self, VitalsErrorCode};
use super::StoreError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IngestError {
    #[error("malformed record `{line}`: {reason}")]
    MalformedRecord { line: String, reason: String },

    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl VitalsErrorCode for IngestError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MalformedRecord { .. } => error_code::MALFORMED_RECORD,
            Self::Io { .. } => error_code::IO_ERROR,
            Self::Store(e) => e.error_code(),
        }
    }
}
