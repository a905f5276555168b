//! Record store errors.

use super::error_code::{self, VitalsErrorCode};
use crate::models::TimestampMs;

/// Errors raised by record store operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("invalid range: start {start} is after end {end}")]
    InvalidRange { start: TimestampMs, end: TimestampMs },

    #[error("store lock poisoned: {reason}")]
    LockPoisoned { reason: String },
}

impl VitalsErrorCode for StoreError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRange { .. } => error_code::INVALID_RANGE,
            Self::LockPoisoned { .. } => error_code::LOCK_POISONED,
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
