//! Error handling for the alert engine.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod error_code;
pub mod evaluation_error;
pub mod factory_error;
pub mod ingest_error;
pub mod rule_error;
pub mod store_error;

pub use config_error::ConfigError;
pub use error_code::VitalsErrorCode;
pub use evaluation_error::EvaluationError;
pub use factory_error::FactoryError;
pub use ingest_error::IngestError;
pub use rule_error::{RuleError, RuleResult};
pub use store_error::{StoreError, StoreResult};
