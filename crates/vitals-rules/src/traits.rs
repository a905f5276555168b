//! RuleStrategy trait and the finding it produces.

use serde::{Deserialize, Serialize};
use vitals_core::errors::RuleResult;
use vitals_core::models::{AlertCategory, TimestampMs};

use crate::context::EvaluationContext;

/// Trait that every alert rule must implement.
pub trait RuleStrategy: Send + Sync {
    /// Stable identifier, used in logs, metrics, and failure reports.
    fn id(&self) -> &str;

    /// Alert family this rule reports under.
    fn category(&self) -> AlertCategory;

    /// Run the rule over one patient's snapshot.
    ///
    /// Must not mutate shared state; the same context is handed to every
    /// registered rule in turn.
    fn evaluate(&self, ctx: &EvaluationContext) -> RuleResult<Vec<RuleFinding>>;
}

/// One condition a rule detected, not yet turned into an alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleFinding {
    pub category: AlertCategory,
    pub condition: String,
    pub timestamp: TimestampMs,
}

impl RuleFinding {
    pub fn new(
        category: AlertCategory,
        condition: impl Into<String>,
        timestamp: TimestampMs,
    ) -> Self {
        Self {
            category,
            condition: condition.into(),
            timestamp,
        }
    }
}
