//! Structured log events for key engine operations.
//!
//! Each function emits a `tracing` event with structured fields. The
//! `event` field carries the event name so log processors can filter on it.

/// Log a record accepted into the store.
pub fn record_ingested(patient_id: u32, record_type: &str, timestamp: i64) {
    tracing::debug!(
        event = "record_ingested",
        patient_id = patient_id,
        record_type = %record_type,
        timestamp = timestamp,
        "record ingested"
    );
}

/// Log a line the ingestion layer could not parse.
pub fn ingest_rejected(line: &str, reason: &str) {
    tracing::warn!(
        event = "ingest_rejected",
        line = %line,
        reason = %reason,
        "malformed record rejected"
    );
}

/// Log a repeat-counter increment with the annotated condition text.
pub fn alert_repeated(patient_id: u32, repeat_count: u32, condition: &str) {
    tracing::info!(
        event = "alert_repeated",
        patient_id = patient_id,
        repeat_count = repeat_count,
        condition = %condition,
        "alert repeated"
    );
}

/// Log an alert handed to the sink.
pub fn alert_delivered(patient_id: u32, label: &str, condition: &str, timestamp: i64) {
    tracing::info!(
        event = "alert_delivered",
        patient_id = patient_id,
        label = %label,
        condition = %condition,
        timestamp = timestamp,
        "alert delivered"
    );
}

/// Log a rule strategy that failed for one pass.
pub fn rule_failed(patient_id: u32, rule: &str, error: &str) {
    tracing::warn!(
        event = "rule_failed",
        patient_id = patient_id,
        rule = %rule,
        error = %error,
        "rule failed"
    );
}

/// Log a finding the alert factory could not turn into an alert.
pub fn alert_construction_failed(patient_id: u32, category: &str, error: &str) {
    tracing::warn!(
        event = "alert_construction_failed",
        patient_id = patient_id,
        category = %category,
        error = %error,
        "alert construction failed"
    );
}

/// Log an alert the sink panicked on; the cycle carries on without it.
pub fn sink_failed(patient_id: u32, label: &str, error: &str) {
    tracing::error!(
        event = "sink_failed",
        patient_id = patient_id,
        label = %label,
        error = %error,
        "alert sink failed"
    );
}

/// Log the end of one patient's evaluation cycle.
pub fn evaluation_completed(patient_id: u32, records: usize, alerts: usize, failures: usize) {
    tracing::debug!(
        event = "evaluation_completed",
        patient_id = patient_id,
        records = records,
        alerts = alerts,
        failures = failures,
        "evaluation completed"
    );
}

/// Log a bulk clear of the record store.
pub fn store_cleared(removed_patients: usize) {
    tracing::info!(
        event = "store_cleared",
        removed_patients = removed_patients,
        "record store cleared"
    );
}

/// Log the periodic monitor status summary.
pub fn monitor_status(cycle: u64, patients: usize, recent_readings: usize) {
    tracing::info!(
        event = "monitor_status",
        cycle = cycle,
        patients = patients,
        recent_readings = recent_readings,
        "monitoring status"
    );
}
