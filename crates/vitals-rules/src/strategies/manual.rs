use vitals_core::config::ManualRules;
use vitals_core::errors::RuleResult;
use vitals_core::models::{AlertCategory, RecordType};

use crate::context::EvaluationContext;
use crate::traits::{RuleFinding, RuleStrategy};

/// Turns every manual-alert record into a finding.
pub struct ManualAlertPassThrough {
    config: ManualRules,
}

impl ManualAlertPassThrough {
    pub const ID: &'static str = "manual_alert";

    pub fn new(config: ManualRules) -> Self {
        Self { config }
    }
}

impl RuleStrategy for ManualAlertPassThrough {
    fn id(&self) -> &str {
        Self::ID
    }

    fn category(&self) -> AlertCategory {
        AlertCategory::Manual
    }

    fn evaluate(&self, ctx: &EvaluationContext) -> RuleResult<Vec<RuleFinding>> {
        Ok(ctx
            .measurements(&RecordType::ManualAlert)
            .into_iter()
            .map(|r| {
                let condition = if r.value() == self.config.trigger_value {
                    "Manual Alert: Triggered"
                } else {
                    "Manual Alert: Untriggered"
                };
                RuleFinding::new(self.category(), condition, r.timestamp())
            })
            .collect())
    }
}
