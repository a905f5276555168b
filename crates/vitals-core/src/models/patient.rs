use serde::{Deserialize, Serialize};

use super::{PatientId, Record, RecordType, TimestampMs};

/// All records received for one patient, in insertion order.
///
/// Records are append-only; nothing removes a single record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    id: PatientId,
    records: Vec<Record>,
}

impl Patient {
    pub fn new(id: PatientId) -> Self {
        Self {
            id,
            records: Vec::new(),
        }
    }

    pub fn id(&self) -> PatientId {
        self.id
    }

    /// Append a measurement. Timestamp order is not enforced.
    pub fn add_record(&mut self, value: f64, record_type: RecordType, timestamp: TimestampMs) {
        self.records
            .push(Record::new(self.id, value, record_type, timestamp));
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Records with `start <= timestamp <= end`, in insertion order.
    pub fn records_between(&self, start: TimestampMs, end: TimestampMs) -> Vec<Record> {
        self.records
            .iter()
            .filter(|r| r.timestamp() >= start && r.timestamp() <= end)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
