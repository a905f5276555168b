//! Evaluation cycle errors.

use super::error_code::{self, VitalsErrorCode};
use super::{FactoryError, RuleError, StoreError};
use crate::models::PatientId;

/// Errors that can occur during one evaluation cycle.
/// Aggregates subsystem errors via `From` conversions.
///
/// `Store` and `AlreadyEvaluating` abort the cycle; `Rule` and `Factory`
/// are collected as non-fatal failures of the pass.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvaluationError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),

    #[error("Factory error: {0}")]
    Factory(#[from] FactoryError),

    #[error("patient {patient_id} is already being evaluated")]
    AlreadyEvaluating { patient_id: PatientId },
}

impl VitalsErrorCode for EvaluationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Store(e) => e.error_code(),
            Self::Rule(e) => e.error_code(),
            Self::Factory(e) => e.error_code(),
            Self::AlreadyEvaluating { .. } => error_code::EVALUATION_BUSY,
        }
    }
}
