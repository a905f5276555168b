//! Blood-pressure rules: absolute thresholds and three-point trends.

use vitals_core::config::BloodPressureRules;
use vitals_core::errors::RuleResult;
use vitals_core::models::{AlertCategory, RecordType};

use crate::context::EvaluationContext;
use crate::traits::{RuleFinding, RuleStrategy};

/// Fires on every systolic or diastolic reading outside its bounds.
/// Comparisons are strict: a reading equal to a bound does not fire.
pub struct BloodPressureThreshold {
    config: BloodPressureRules,
}

impl BloodPressureThreshold {
    pub const ID: &'static str = "blood_pressure_threshold";

    pub fn new(config: BloodPressureRules) -> Self {
        Self { config }
    }
}

impl RuleStrategy for BloodPressureThreshold {
    fn id(&self) -> &str {
        Self::ID
    }

    fn category(&self) -> AlertCategory {
        AlertCategory::BloodPressure
    }

    fn evaluate(&self, ctx: &EvaluationContext) -> RuleResult<Vec<RuleFinding>> {
        let c = &self.config;
        let bounds = [
            (RecordType::SystolicBloodPressure, "Systolic", c.systolic_high, c.systolic_low),
            (RecordType::DiastolicBloodPressure, "Diastolic", c.diastolic_high, c.diastolic_low),
        ];

        let mut findings = Vec::new();
        for (record_type, label, high, low) in bounds {
            for record in ctx.measurements(&record_type) {
                let condition = if record.value() > high {
                    format!("Critical: {label} BP above {high} mmHg")
                } else if record.value() < low {
                    format!("Critical: {label} BP below {low} mmHg")
                } else {
                    continue;
                };
                findings.push(RuleFinding::new(self.category(), condition, record.timestamp()));
            }
        }
        Ok(findings)
    }
}

/// Fires when three consecutive readings of one subtype move the same way
/// by more than `trend_delta` at each step.
pub struct BloodPressureTrend {
    config: BloodPressureRules,
}

impl BloodPressureTrend {
    pub const ID: &'static str = "blood_pressure_trend";

    pub fn new(config: BloodPressureRules) -> Self {
        Self { config }
    }
}

impl RuleStrategy for BloodPressureTrend {
    fn id(&self) -> &str {
        Self::ID
    }

    fn category(&self) -> AlertCategory {
        AlertCategory::BloodPressure
    }

    fn evaluate(&self, ctx: &EvaluationContext) -> RuleResult<Vec<RuleFinding>> {
        let delta = self.config.trend_delta;
        let mut findings = Vec::new();

        for (record_type, label) in [
            (RecordType::SystolicBloodPressure, "systolic"),
            (RecordType::DiastolicBloodPressure, "diastolic"),
        ] {
            let series = ctx.series(&record_type);
            for triple in series.windows(3) {
                let (v1, v2, v3) = (triple[0].value(), triple[1].value(), triple[2].value());
                let timestamp = triple[2].timestamp();

                if v2 - v1 > delta && v3 - v2 > delta {
                    findings.push(RuleFinding::new(
                        self.category(),
                        format!("Trend: Three consecutive {label} BP increases > {delta} mmHg"),
                        timestamp,
                    ));
                }
                if v1 - v2 > delta && v2 - v3 > delta {
                    findings.push(RuleFinding::new(
                        self.category(),
                        format!("Trend: Three consecutive {label} BP decreases > {delta} mmHg"),
                        timestamp,
                    ));
                }
            }
        }
        Ok(findings)
    }
}
