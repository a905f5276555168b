//! Tests for error display and error codes.

use vitals_core::errors::{
    ConfigError, EvaluationError, FactoryError, IngestError, RuleError, StoreError,
    VitalsErrorCode,
};

#[test]
fn store_errors_carry_codes() {
    let err = StoreError::InvalidRange { start: 10, end: 5 };
    assert_eq!(err.error_code(), "INVALID_RANGE");
    assert_eq!(
        err.coded_string(),
        "[INVALID_RANGE] invalid range: start 10 is after end 5"
    );

    let err = StoreError::LockPoisoned {
        reason: "writer panicked".into(),
    };
    assert_eq!(err.error_code(), "LOCK_POISONED");
}

#[test]
fn evaluation_error_delegates_codes_to_inner_errors() {
    let err: EvaluationError = StoreError::InvalidRange { start: 1, end: 0 }.into();
    assert_eq!(err.error_code(), "INVALID_RANGE");

    let err: EvaluationError = FactoryError::UnknownCategory {
        category: "temperature".into(),
    }
    .into();
    assert_eq!(err.error_code(), "UNKNOWN_CATEGORY");
    assert!(err.to_string().contains("temperature"));

    let err: EvaluationError = RuleError::Panicked {
        rule: "ecg_sliding_window".into(),
        message: "boom".into(),
    }
    .into();
    assert_eq!(err.error_code(), "RULE_PANICKED");

    let err = EvaluationError::AlreadyEvaluating { patient_id: 4 };
    assert_eq!(err.error_code(), "EVALUATION_BUSY");
}

#[test]
fn rule_error_reports_failing_rule() {
    let err = RuleError::Failed {
        rule: "heart_rate_threshold".into(),
        reason: "bad data".into(),
    };
    assert_eq!(err.rule(), "heart_rate_threshold");
    assert_eq!(err.to_string(), "rule heart_rate_threshold failed: bad data");
}

#[test]
fn ingest_and_config_errors_have_codes() {
    let err = IngestError::MalformedRecord {
        line: "1,abc".into(),
        reason: "expected 4 fields, got 2".into(),
    };
    assert_eq!(err.error_code(), "MALFORMED_RECORD");

    let err = IngestError::Io {
        path: "/missing".into(),
        message: "not found".into(),
    };
    assert_eq!(err.error_code(), "IO_ERROR");

    let err = ConfigError::ValidationFailed {
        field: "monitor.interval_ms".into(),
        message: "must be greater than 0".into(),
    };
    assert_eq!(err.error_code(), "CONFIG_ERROR");
}
