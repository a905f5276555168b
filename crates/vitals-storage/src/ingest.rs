//! Line-oriented ingestion: `patientId,value,recordType,timestamp`.
//!
//! Parsing is strict per line and lenient per stream: a malformed line is
//! logged and counted, and the remaining lines still load.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Serialize;
use vitals_core::errors::IngestError;
use vitals_core::models::{IncomingRecord, PatientId, TimestampMs};
use vitals_observability::tracing_setup::events;

use crate::store::RecordStore;

const FIELD_COUNT: usize = 4;

/// Outcome of one ingestion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub accepted: usize,
    pub rejected: usize,
}

/// Parse one wire line into an [`IncomingRecord`].
pub fn parse_line(line: &str) -> Result<IncomingRecord, IngestError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != FIELD_COUNT {
        return Err(malformed(
            line,
            format!("expected {FIELD_COUNT} fields, got {}", fields.len()),
        ));
    }

    let patient_id: PatientId = fields[0]
        .parse()
        .map_err(|_| malformed(line, format!("invalid patient id `{}`", fields[0])))?;
    if patient_id == 0 {
        return Err(malformed(line, "patient id must be positive".to_string()));
    }

    let value: f64 = fields[1]
        .parse()
        .map_err(|_| malformed(line, format!("invalid measurement `{}`", fields[1])))?;

    let record_type = fields[2];
    if record_type.is_empty() {
        return Err(malformed(line, "record type is empty".to_string()));
    }

    let timestamp: TimestampMs = fields[3]
        .parse()
        .map_err(|_| malformed(line, format!("invalid timestamp `{}`", fields[3])))?;

    Ok(IncomingRecord {
        patient_id,
        value,
        record_type: record_type.to_string(),
        timestamp,
    })
}

/// Load every line of `reader` into `store`. Blank lines are skipped.
///
/// Only read and store failures abort the run; malformed lines are
/// counted in the report.
pub fn ingest_reader<R: BufRead>(
    reader: R,
    store: &RecordStore,
) -> Result<IngestReport, IngestError> {
    ingest_lines(reader, store, "<reader>")
}

/// Load a record file into `store`.
pub fn ingest_file(path: &Path, store: &RecordStore) -> Result<IngestReport, IngestError> {
    let file = File::open(path).map_err(|e| IngestError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let report = ingest_lines(BufReader::new(file), store, &path.display().to_string())?;
    tracing::info!(
        path = %path.display(),
        accepted = report.accepted,
        rejected = report.rejected,
        "record file ingested"
    );
    Ok(report)
}

fn ingest_lines<R: BufRead>(
    reader: R,
    store: &RecordStore,
    source: &str,
) -> Result<IngestReport, IngestError> {
    let mut report = IngestReport::default();

    for line in reader.lines() {
        let line = line.map_err(|e| IngestError::Io {
            path: source.to_string(),
            message: e.to_string(),
        })?;
        if line.trim().is_empty() {
            continue;
        }

        match parse_line(&line) {
            Ok(incoming) => {
                store.submit(incoming)?;
                report.accepted += 1;
            }
            Err(IngestError::MalformedRecord { line, reason }) => {
                events::ingest_rejected(&line, &reason);
                report.rejected += 1;
            }
            Err(other) => return Err(other),
        }
    }

    Ok(report)
}

fn malformed(line: &str, reason: String) -> IngestError {
    IngestError::MalformedRecord {
        line: line.to_string(),
        reason,
    }
}
