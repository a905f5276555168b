//! Blood-oxygen rules: low saturation and rapid drops.

use vitals_core::config::SaturationRules;
use vitals_core::errors::RuleResult;
use vitals_core::models::{AlertCategory, RecordType};

use crate::context::EvaluationContext;
use crate::traits::{RuleFinding, RuleStrategy};

pub struct SaturationThreshold {
    config: SaturationRules,
}

impl SaturationThreshold {
    pub const ID: &'static str = "saturation_threshold";

    pub fn new(config: SaturationRules) -> Self {
        Self { config }
    }
}

impl RuleStrategy for SaturationThreshold {
    fn id(&self) -> &str {
        Self::ID
    }

    fn category(&self) -> AlertCategory {
        AlertCategory::BloodOxygen
    }

    fn evaluate(&self, ctx: &EvaluationContext) -> RuleResult<Vec<RuleFinding>> {
        let low = self.config.low_threshold;
        Ok(ctx
            .measurements(&RecordType::Saturation)
            .into_iter()
            .filter(|r| r.value() < low)
            .map(|r| {
                RuleFinding::new(
                    self.category(),
                    format!("Low Blood Saturation: Below {low}%"),
                    r.timestamp(),
                )
            })
            .collect())
    }
}

/// Fires on adjacent readings, in timestamp order, that fall by at least
/// `rapid_drop_points` within `rapid_drop_window_ms`.
pub struct SaturationRapidDrop {
    config: SaturationRules,
}

impl SaturationRapidDrop {
    pub const ID: &'static str = "saturation_rapid_drop";

    pub fn new(config: SaturationRules) -> Self {
        Self { config }
    }
}

impl RuleStrategy for SaturationRapidDrop {
    fn id(&self) -> &str {
        Self::ID
    }

    fn category(&self) -> AlertCategory {
        AlertCategory::BloodOxygen
    }

    fn evaluate(&self, ctx: &EvaluationContext) -> RuleResult<Vec<RuleFinding>> {
        let points = self.config.rapid_drop_points;
        let window = self.config.rapid_drop_window_ms;
        let condition = format!(
            "Rapid Blood Saturation Drop: {points}% or more in {}",
            describe_window(window)
        );

        Ok(ctx
            .series(&RecordType::Saturation)
            .windows(2)
            .filter(|pair| {
                let (earlier, later) = (pair[0], pair[1]);
                later.timestamp() - earlier.timestamp() <= window
                    && earlier.value() - later.value() >= points
            })
            .map(|pair| RuleFinding::new(self.category(), condition.clone(), pair[1].timestamp()))
            .collect())
    }
}

fn describe_window(window_ms: i64) -> String {
    if window_ms % 60_000 == 0 {
        format!("{} minutes", window_ms / 60_000)
    } else if window_ms % 1_000 == 0 {
        format!("{} seconds", window_ms / 1_000)
    } else {
        format!("{window_ms} ms")
    }
}
