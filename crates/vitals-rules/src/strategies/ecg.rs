//! ECG sliding-window peak detection.

use vitals_core::config::{EcgFallbackPolicy, EcgRules};
use vitals_core::errors::RuleResult;
use vitals_core::models::{AlertCategory, RecordType};

use crate::context::EvaluationContext;
use crate::traits::{RuleFinding, RuleStrategy};

const CONDITION: &str = "Abnormal ECG Peak";

/// Compares each ECG sample against the mean of the trailing window that
/// ends at it (inclusive). Every qualifying index fires.
///
/// With fewer samples than the window, behaviour follows the configured
/// [`EcgFallbackPolicy`].
pub struct EcgSlidingWindow {
    config: EcgRules,
}

impl EcgSlidingWindow {
    pub const ID: &'static str = "ecg_sliding_window";

    pub fn new(config: EcgRules) -> Self {
        Self { config }
    }
}

impl RuleStrategy for EcgSlidingWindow {
    fn id(&self) -> &str {
        Self::ID
    }

    fn category(&self) -> AlertCategory {
        AlertCategory::Ecg
    }

    fn evaluate(&self, ctx: &EvaluationContext) -> RuleResult<Vec<RuleFinding>> {
        let series = ctx.series(&RecordType::Ecg);
        let window = self.config.window_size.max(1);

        if series.is_empty() {
            return Ok(Vec::new());
        }

        if series.len() < window {
            return Ok(match self.config.fallback {
                EcgFallbackPolicy::None => Vec::new(),
                EcgFallbackPolicy::LargestObserved => {
                    // First occurrence wins on ties.
                    let mut peak = series[0];
                    for &record in &series[1..] {
                        if record.value() > peak.value() {
                            peak = record;
                        }
                    }
                    vec![RuleFinding::new(self.category(), CONDITION, peak.timestamp())]
                }
            });
        }

        let findings = series
            .windows(window)
            .filter(|w| {
                let mean = w.iter().map(|r| r.value()).sum::<f64>() / window as f64;
                w[window - 1].value() > self.config.peak_factor * mean
            })
            .map(|w| RuleFinding::new(self.category(), CONDITION, w[window - 1].timestamp()))
            .collect();
        Ok(findings)
    }
}
