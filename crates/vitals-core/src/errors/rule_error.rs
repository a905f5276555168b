//! Rule strategy errors.

use super::error_code::{self, VitalsErrorCode};

/// Errors a rule strategy can report for one evaluation pass.
/// Always scoped to the failing rule; other rules keep running.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RuleError {
    #[error("rule {rule} failed: {reason}")]
    Failed { rule: String, reason: String },

    #[error("rule {rule} panicked: {message}")]
    Panicked { rule: String, message: String },
}

impl RuleError {
    /// Id of the rule that failed.
    pub fn rule(&self) -> &str {
        match self {
            Self::Failed { rule, .. } | Self::Panicked { rule, .. } => rule,
        }
    }
}

impl VitalsErrorCode for RuleError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Failed { .. } => error_code::RULE_FAILED,
            Self::Panicked { .. } => error_code::RULE_PANICKED,
        }
    }
}

pub type RuleResult<T> = Result<T, RuleError>;
