use vitals_core::config::CorrelationRules;
use vitals_core::errors::RuleResult;
use vitals_core::models::{AlertCategory, RecordType};

use crate::context::EvaluationContext;
use crate::traits::{RuleFinding, RuleStrategy};

const CONDITION: &str = "Hypotensive Hypoxemia: Low BP and Low Saturation";

/// Pairs low systolic readings with low saturation readings taken within
/// `window_ms` of each other. One finding per qualifying pair, stamped
/// with the blood-pressure timestamp.
pub struct HypotensiveHypoxemia {
    config: CorrelationRules,
}

impl HypotensiveHypoxemia {
    pub const ID: &'static str = "hypotensive_hypoxemia";

    pub fn new(config: CorrelationRules) -> Self {
        Self { config }
    }
}

impl RuleStrategy for HypotensiveHypoxemia {
    fn id(&self) -> &str {
        Self::ID
    }

    fn category(&self) -> AlertCategory {
        AlertCategory::BloodOxygen
    }

    fn evaluate(&self, ctx: &EvaluationContext) -> RuleResult<Vec<RuleFinding>> {
        let window = u64::try_from(self.config.window_ms).unwrap_or(0);
        let saturation = ctx.measurements(&RecordType::Saturation);

        let mut findings = Vec::new();
        for bp in ctx.measurements(&RecordType::SystolicBloodPressure) {
            if bp.value() >= self.config.systolic_low {
                continue;
            }
            for sat in &saturation {
                if bp.timestamp().abs_diff(sat.timestamp()) < window
                    && sat.value() < self.config.saturation_low
                {
                    findings.push(RuleFinding::new(self.category(), CONDITION, bp.timestamp()));
                }
            }
        }
        Ok(findings)
    }
}
