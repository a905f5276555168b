//! # vitals-rules
//!
//! Rule strategies over one patient's record snapshot, the ordered
//! registry that holds them, and the category-keyed alert factory.

pub mod context;
pub mod factory;
pub mod registry;
pub mod strategies;
pub mod traits;

pub use context::EvaluationContext;
pub use factory::{AlertConstructor, AlertFactory};
pub use registry::RuleRegistry;
pub use traits::{RuleFinding, RuleStrategy};
