//! VitalsErrorCode trait for the operational log.

/// Structured error code attached to every error enum in the workspace.
/// Log lines and reports carry the code so failures can be grouped
/// without parsing messages.
pub trait VitalsErrorCode {
    /// Returns the error code string (e.g., "INVALID_RANGE").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const INVALID_RANGE: &str = "INVALID_RANGE";
pub const LOCK_POISONED: &str = "LOCK_POISONED";
pub const RULE_FAILED: &str = "RULE_FAILED";
pub const RULE_PANICKED: &str = "RULE_PANICKED";
pub const UNKNOWN_CATEGORY: &str = "UNKNOWN_CATEGORY";
pub const MALFORMED_RECORD: &str = "MALFORMED_RECORD";
pub const IO_ERROR: &str = "IO_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const EVALUATION_BUSY: &str = "EVALUATION_BUSY";
