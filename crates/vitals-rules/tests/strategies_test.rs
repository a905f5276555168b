//! Behavioural tests for every built-in rule strategy.

use proptest::prelude::*;
use vitals_core::config::{EcgFallbackPolicy, RulesConfig};
use vitals_core::models::{AlertCategory, Record, RecordType};
use vitals_rules::strategies::*;
use vitals_rules::{EvaluationContext, RuleFinding, RuleStrategy};

const MINUTE: i64 = 60_000;

fn ctx(records: &[(RecordType, f64, i64)]) -> EvaluationContext {
    let records = records
        .iter()
        .map(|(t, v, ts)| Record::new(1, *v, t.clone(), *ts))
        .collect();
    EvaluationContext::new(1, i64::MAX, records)
}

fn run(rule: &dyn RuleStrategy, records: &[(RecordType, f64, i64)]) -> Vec<RuleFinding> {
    rule.evaluate(&ctx(records)).unwrap()
}

fn conditions(findings: &[RuleFinding]) -> Vec<&str> {
    findings.iter().map(|f| f.condition.as_str()).collect()
}

// ---- Blood pressure thresholds ----

#[test]
fn blood_pressure_bounds_are_strict() {
    use RecordType::*;
    let rule = BloodPressureThreshold::new(RulesConfig::default().blood_pressure);

    let quiet = run(
        &rule,
        &[
            (SystolicBloodPressure, 180.0, 1),
            (SystolicBloodPressure, 90.0, 2),
            (DiastolicBloodPressure, 110.0, 3),
            (DiastolicBloodPressure, 60.0, 4),
        ],
    );
    assert!(quiet.is_empty());

    let loud = run(
        &rule,
        &[
            (SystolicBloodPressure, 180.01, 1),
            (SystolicBloodPressure, 89.99, 2),
            (DiastolicBloodPressure, 110.5, 3),
            (DiastolicBloodPressure, 59.0, 4),
        ],
    );
    assert_eq!(
        conditions(&loud),
        vec![
            "Critical: Systolic BP above 180 mmHg",
            "Critical: Systolic BP below 90 mmHg",
            "Critical: Diastolic BP above 110 mmHg",
            "Critical: Diastolic BP below 60 mmHg",
        ]
    );
    assert!(loud.iter().all(|f| f.category == AlertCategory::BloodPressure));
    assert_eq!(loud[0].timestamp, 1);
}

proptest! {
    #[test]
    fn systolic_fires_iff_outside_bounds(value in 0.0f64..300.0) {
        let rule = BloodPressureThreshold::new(RulesConfig::default().blood_pressure);
        let findings = run(&rule, &[(RecordType::SystolicBloodPressure, value, 5)]);
        let expected = usize::from(value > 180.0 || value < 90.0);
        prop_assert_eq!(findings.len(), expected);
    }
}

// ---- Blood pressure trend ----

#[test]
fn trend_needs_three_points() {
    let rule = BloodPressureTrend::new(RulesConfig::default().blood_pressure);
    let findings = run(
        &rule,
        &[
            (RecordType::SystolicBloodPressure, 100.0, 1),
            (RecordType::SystolicBloodPressure, 150.0, 2),
        ],
    );
    assert!(findings.is_empty());
}

#[test]
fn increasing_trend_fires_once_at_third_timestamp() {
    let rule = BloodPressureTrend::new(RulesConfig::default().blood_pressure);
    // Inserted out of order; the rule sorts by timestamp.
    let findings = run(
        &rule,
        &[
            (RecordType::SystolicBloodPressure, 127.0, 3_000),
            (RecordType::SystolicBloodPressure, 100.0, 1_000),
            (RecordType::SystolicBloodPressure, 112.0, 2_000),
        ],
    );
    assert_eq!(findings.len(), 1);
    assert_eq!(
        findings[0].condition,
        "Trend: Three consecutive systolic BP increases > 10 mmHg"
    );
    assert_eq!(findings[0].timestamp, 3_000);
}

#[test]
fn decreasing_diastolic_trend_and_exact_delta() {
    let rule = BloodPressureTrend::new(RulesConfig::default().blood_pressure);
    let findings = run(
        &rule,
        &[
            (RecordType::DiastolicBloodPressure, 100.0, 1),
            (RecordType::DiastolicBloodPressure, 85.0, 2),
            (RecordType::DiastolicBloodPressure, 70.0, 3),
            // A step of exactly 10 does not count.
            (RecordType::DiastolicBloodPressure, 60.0, 4),
        ],
    );
    assert_eq!(
        conditions(&findings),
        vec!["Trend: Three consecutive diastolic BP decreases > 10 mmHg"]
    );
    assert_eq!(findings[0].timestamp, 3);
}

#[test]
fn trend_series_are_separate_per_subtype() {
    let rule = BloodPressureTrend::new(RulesConfig::default().blood_pressure);
    let findings = run(
        &rule,
        &[
            (RecordType::SystolicBloodPressure, 100.0, 1),
            (RecordType::DiastolicBloodPressure, 115.0, 2),
            (RecordType::SystolicBloodPressure, 130.0, 3),
        ],
    );
    assert!(findings.is_empty());
}

// ---- Saturation ----

#[test]
fn low_saturation_fires_below_threshold_only() {
    let rule = SaturationThreshold::new(RulesConfig::default().saturation);
    let findings = run(
        &rule,
        &[
            (RecordType::Saturation, 92.0, 1),
            (RecordType::Saturation, 91.9, 2),
        ],
    );
    assert_eq!(conditions(&findings), vec!["Low Blood Saturation: Below 92%"]);
    assert_eq!(findings[0].category, AlertCategory::BloodOxygen);
    assert_eq!(findings[0].timestamp, 2);
}

#[test]
fn rapid_drop_respects_the_ten_minute_window() {
    let rule = SaturationRapidDrop::new(RulesConfig::default().saturation);

    let within = run(
        &rule,
        &[
            (RecordType::Saturation, 96.0, 0),
            (RecordType::Saturation, 90.0, 9 * MINUTE),
        ],
    );
    assert_eq!(
        conditions(&within),
        vec!["Rapid Blood Saturation Drop: 5% or more in 10 minutes"]
    );
    assert_eq!(within[0].timestamp, 9 * MINUTE);

    let outside = run(
        &rule,
        &[
            (RecordType::Saturation, 96.0, 0),
            (RecordType::Saturation, 90.0, 11 * MINUTE),
        ],
    );
    assert!(outside.is_empty());
}

#[test]
fn rapid_drop_bounds_are_inclusive() {
    let rule = SaturationRapidDrop::new(RulesConfig::default().saturation);
    let pair = |earlier: f64, later: f64, gap: i64| {
        run(
            &rule,
            &[
                (RecordType::Saturation, earlier, 0),
                (RecordType::Saturation, later, gap),
            ],
        )
        .len()
    };

    assert_eq!(pair(96.0, 90.0, 10 * MINUTE), 1);
    assert_eq!(pair(96.0, 90.0, 10 * MINUTE + 1), 0);
    assert_eq!(pair(95.0, 90.0, MINUTE), 1);
    assert_eq!(pair(94.99, 90.0, MINUTE), 0);
}

#[test]
fn rapid_drop_compares_adjacent_readings_only() {
    let rule = SaturationRapidDrop::new(RulesConfig::default().saturation);
    let findings = run(
        &rule,
        &[
            (RecordType::Saturation, 98.0, 0),
            (RecordType::Saturation, 95.0, MINUTE),
            (RecordType::Saturation, 92.0, 2 * MINUTE),
        ],
    );
    assert!(findings.is_empty());
}

// ---- Heart rate ----

#[test]
fn heart_rate_reports_value_with_decimal() {
    let rule = HeartRateThreshold::new(RulesConfig::default().heart_rate);
    let findings = run(
        &rule,
        &[
            (RecordType::HeartRate, 45.0, 1),
            (RecordType::HeartRate, 50.0, 2),
            (RecordType::HeartRate, 100.0, 3),
            (RecordType::HeartRate, 120.5, 4),
        ],
    );
    assert_eq!(
        conditions(&findings),
        vec![
            "Abnormal Heart Rate: Low heart rate 45.0 bpm",
            "Abnormal Heart Rate: High heart rate 120.5 bpm",
        ]
    );
    assert!(findings.iter().all(|f| f.category == AlertCategory::Ecg));
}

// ---- ECG ----

fn ecg(values: &[f64]) -> Vec<(RecordType, f64, i64)> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| (RecordType::Ecg, *v, (i as i64 + 1) * 100))
        .collect()
}

#[test]
fn ecg_peak_fires_at_window_end() {
    let rule = EcgSlidingWindow::new(RulesConfig::default().ecg);
    let findings = run(&rule, &ecg(&[1.0, 1.0, 1.0, 1.0, 10.0]));
    assert_eq!(conditions(&findings), vec!["Abnormal ECG Peak"]);
    assert_eq!(findings[0].timestamp, 500);
}

#[test]
fn ecg_reports_every_qualifying_index() {
    let rule = EcgSlidingWindow::new(RulesConfig::default().ecg);
    let findings = run(&rule, &ecg(&[1.0, 1.0, 1.0, 1.0, 10.0, 1.0, 1.0, 1.0, 1.0, 20.0]));
    let stamps: Vec<i64> = findings.iter().map(|f| f.timestamp).collect();
    assert_eq!(stamps, vec![500, 1_000]);
}

#[test]
fn short_ecg_series_is_silent_by_default() {
    let rule = EcgSlidingWindow::new(RulesConfig::default().ecg);
    assert!(run(&rule, &ecg(&[1.0, 1.0, 1.0, 10.0])).is_empty());
}

#[test]
fn largest_observed_fallback_reports_the_peak() {
    let mut config = RulesConfig::default().ecg;
    config.fallback = EcgFallbackPolicy::LargestObserved;
    let rule = EcgSlidingWindow::new(config);

    let findings = run(&rule, &ecg(&[3.0, 9.0, 9.0, 2.0]));
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].timestamp, 200);

    assert!(run(&rule, &[]).is_empty());
}

#[test]
fn non_finite_ecg_samples_are_skipped() {
    let rule = EcgSlidingWindow::new(RulesConfig::default().ecg);
    let mut records = ecg(&[1.0, 1.0, 1.0, 1.0, 10.0]);
    records.insert(2, (RecordType::Ecg, f64::NAN, 250));
    let findings = run(&rule, &records);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].timestamp, 500);
}

// ---- Hypotensive hypoxemia ----

#[test]
fn correlation_window_is_exclusive() {
    let rule = HypotensiveHypoxemia::new(RulesConfig::default().correlation);

    let inside = run(
        &rule,
        &[
            (RecordType::SystolicBloodPressure, 85.0, 100_000),
            (RecordType::Saturation, 90.0, 100_000 + 59_999),
        ],
    );
    assert_eq!(
        conditions(&inside),
        vec!["Hypotensive Hypoxemia: Low BP and Low Saturation"]
    );
    assert_eq!(inside[0].timestamp, 100_000);
    assert_eq!(inside[0].category, AlertCategory::BloodOxygen);

    let outside = run(
        &rule,
        &[
            (RecordType::SystolicBloodPressure, 85.0, 100_000),
            (RecordType::Saturation, 90.0, 100_000 + 60_001),
        ],
    );
    assert!(outside.is_empty());
}

#[test]
fn correlation_emits_one_finding_per_pair() {
    let rule = HypotensiveHypoxemia::new(RulesConfig::default().correlation);
    let findings = run(
        &rule,
        &[
            (RecordType::SystolicBloodPressure, 80.0, 10_000),
            (RecordType::Saturation, 88.0, 5_000),
            (RecordType::Saturation, 91.0, 20_000),
            (RecordType::Saturation, 95.0, 15_000),
        ],
    );
    assert_eq!(findings.len(), 2);
}

// ---- Manual ----

#[test]
fn manual_records_pass_through() {
    let rule = ManualAlertPassThrough::new(RulesConfig::default().manual);
    let findings = run(
        &rule,
        &[
            (RecordType::ManualAlert, 1.0, 1),
            (RecordType::ManualAlert, 0.0, 2),
            (RecordType::HeartRate, 1.0, 3),
        ],
    );
    assert_eq!(
        conditions(&findings),
        vec!["Manual Alert: Triggered", "Manual Alert: Untriggered"]
    );
    assert!(findings.iter().all(|f| f.category == AlertCategory::Manual));
}

#[test]
fn unknown_record_types_are_ignored_by_every_rule() {
    let registry = vitals_rules::RuleRegistry::with_defaults(&RulesConfig::default());
    let context = ctx(&[(RecordType::Other("Temperature".into()), 41.0, 1)]);
    for rule in registry.iter() {
        assert!(rule.evaluate(&context).unwrap().is_empty(), "{}", rule.id());
    }
}
