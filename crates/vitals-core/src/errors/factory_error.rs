//! Alert factory errors.

use super::error_code::{self, VitalsErrorCode};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FactoryError {
    #[error("unknown alert category: {category}")]
    UnknownCategory { category: String },
}

impl VitalsErrorCode for FactoryError {
    fn error_code(&self) -> &'static str {
        error_code::UNKNOWN_CATEGORY
    }
}
