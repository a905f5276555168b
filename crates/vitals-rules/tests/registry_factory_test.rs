//! Tests for the rule registry and the alert factory.

use vitals_core::config::RulesConfig;
use vitals_core::errors::{FactoryError, RuleResult};
use vitals_core::models::{Alert, AlertCategory, RecordType};
use vitals_rules::{AlertFactory, EvaluationContext, RuleFinding, RuleRegistry, RuleStrategy};
use vitals_storage::RecordStore;

struct AlwaysFires;

impl RuleStrategy for AlwaysFires {
    fn id(&self) -> &str {
        "always_fires"
    }

    fn category(&self) -> AlertCategory {
        AlertCategory::Manual
    }

    fn evaluate(&self, ctx: &EvaluationContext) -> RuleResult<Vec<RuleFinding>> {
        Ok(vec![RuleFinding::new(self.category(), "always", ctx.now())])
    }
}

#[test]
fn default_registry_has_eight_rules_in_order() {
    let registry = RuleRegistry::with_defaults(&RulesConfig::default());
    assert_eq!(
        registry.ids(),
        vec![
            "blood_pressure_threshold",
            "blood_pressure_trend",
            "saturation_threshold",
            "saturation_rapid_drop",
            "heart_rate_threshold",
            "ecg_sliding_window",
            "hypotensive_hypoxemia",
            "manual_alert",
        ]
    );
}

#[test]
fn register_appends_custom_rules() {
    let mut registry = RuleRegistry::new();
    assert!(registry.is_empty());
    registry.register(Box::new(AlwaysFires));
    assert_eq!(registry.len(), 1);

    let ctx = EvaluationContext::new(1, 42, Vec::new());
    let findings = registry.iter().next().unwrap().evaluate(&ctx).unwrap();
    assert_eq!(findings[0].timestamp, 42);
}

#[test]
fn context_load_snapshots_up_to_now() {
    let store = RecordStore::new();
    store.add_record(1, 80.0, RecordType::HeartRate, 100).unwrap();
    store.add_record(1, 81.0, RecordType::HeartRate, 200).unwrap();
    store.add_record(1, 82.0, RecordType::HeartRate, 300).unwrap();

    let ctx = EvaluationContext::load(&store, 1, 200).unwrap();
    assert_eq!(ctx.records().len(), 2);

    // Later writes do not leak into an existing snapshot.
    store.add_record(1, 83.0, RecordType::HeartRate, 150).unwrap();
    assert_eq!(ctx.records().len(), 2);
}

#[test]
fn default_factory_builds_every_category() {
    let factory = AlertFactory::default();
    for &category in AlertCategory::all() {
        let alert = factory.create(category, 3, "cond", 9).unwrap();
        assert_eq!(alert, Alert::new(3, category, "cond", 9));
    }
}

#[test]
fn tags_resolve_case_insensitively() {
    let factory = AlertFactory::default();
    let alert = factory.create_by_tag("BloodOxygen", 1, "x", 1).unwrap();
    assert_eq!(alert.category(), AlertCategory::BloodOxygen);
    let alert = factory.create_by_tag("ECG", 1, "x", 1).unwrap();
    assert_eq!(alert.category(), AlertCategory::Ecg);
}

#[test]
fn unknown_tag_fails_with_typed_error() {
    let factory = AlertFactory::default();
    let err = factory.create_by_tag("temperature", 1, "x", 1).unwrap_err();
    assert_eq!(
        err,
        FactoryError::UnknownCategory {
            category: "temperature".to_string()
        }
    );
}

#[test]
fn custom_factory_rejects_unregistered_categories() {
    let mut factory = AlertFactory::empty();
    factory.register(AlertCategory::Manual, |patient_id, condition, timestamp| {
        Alert::new(patient_id, AlertCategory::Manual, format!("MANUAL {condition}"), timestamp)
    });

    assert!(factory.supports(AlertCategory::Manual));
    let alert = factory.create(AlertCategory::Manual, 1, "pressed", 5).unwrap();
    assert_eq!(alert.condition(), "MANUAL pressed");

    let err = factory.create(AlertCategory::Ecg, 1, "x", 5).unwrap_err();
    assert!(matches!(err, FactoryError::UnknownCategory { category } if category == "ecg"));
}
