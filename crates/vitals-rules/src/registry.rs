//! RuleRegistry: the ordered set of strategies run by every cycle.

use vitals_core::config::RulesConfig;

use crate::strategies::{
    BloodPressureThreshold, BloodPressureTrend, EcgSlidingWindow, HeartRateThreshold,
    HypotensiveHypoxemia, ManualAlertPassThrough, SaturationRapidDrop, SaturationThreshold,
};
use crate::traits::RuleStrategy;

/// Ordered list of rule strategies. Rules run in registration order.
#[derive(Default)]
pub struct RuleRegistry {
    rules: Vec<Box<dyn RuleStrategy>>,
}

impl RuleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with every built-in rule.
    pub fn with_defaults(config: &RulesConfig) -> Self {
        let rules: Vec<Box<dyn RuleStrategy>> = vec![
            Box::new(BloodPressureThreshold::new(config.blood_pressure.clone())),
            Box::new(BloodPressureTrend::new(config.blood_pressure.clone())),
            Box::new(SaturationThreshold::new(config.saturation.clone())),
            Box::new(SaturationRapidDrop::new(config.saturation.clone())),
            Box::new(HeartRateThreshold::new(config.heart_rate.clone())),
            Box::new(EcgSlidingWindow::new(config.ecg.clone())),
            Box::new(HypotensiveHypoxemia::new(config.correlation.clone())),
            Box::new(ManualAlertPassThrough::new(config.manual.clone())),
        ];
        Self { rules }
    }

    /// Append a rule after the ones already registered.
    pub fn register(&mut self, rule: Box<dyn RuleStrategy>) {
        self.rules.push(rule);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Box<dyn RuleStrategy>> {
        self.rules.iter()
    }

    /// Rule ids in execution order.
    pub fn ids(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.ids())
            .finish()
    }
}
