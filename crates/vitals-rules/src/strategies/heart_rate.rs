use vitals_core::config::HeartRateRules;
use vitals_core::errors::RuleResult;
use vitals_core::models::{AlertCategory, RecordType};

use crate::context::EvaluationContext;
use crate::traits::{RuleFinding, RuleStrategy};

/// Fires on heart-rate readings outside `[low, high]`. Reported under the
/// ECG family.
pub struct HeartRateThreshold {
    config: HeartRateRules,
}

impl HeartRateThreshold {
    pub const ID: &'static str = "heart_rate_threshold";

    pub fn new(config: HeartRateRules) -> Self {
        Self { config }
    }
}

impl RuleStrategy for HeartRateThreshold {
    fn id(&self) -> &str {
        Self::ID
    }

    fn category(&self) -> AlertCategory {
        AlertCategory::Ecg
    }

    fn evaluate(&self, ctx: &EvaluationContext) -> RuleResult<Vec<RuleFinding>> {
        let mut findings = Vec::new();
        for record in ctx.measurements(&RecordType::HeartRate) {
            let bpm = record.value();
            // Debug formatting keeps the decimal point: "45.0 bpm".
            let condition = if bpm < self.config.low {
                format!("Abnormal Heart Rate: Low heart rate {bpm:?} bpm")
            } else if bpm > self.config.high {
                format!("Abnormal Heart Rate: High heart rate {bpm:?} bpm")
            } else {
                continue;
            };
            findings.push(RuleFinding::new(self.category(), condition, record.timestamp()));
        }
        Ok(findings)
    }
}
