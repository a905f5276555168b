//! EvaluationContext: the immutable record snapshot for one pass.

use vitals_core::errors::StoreResult;
use vitals_core::models::{PatientId, Record, RecordType, TimestampMs};
use vitals_storage::RecordStore;

/// Everything a rule may look at for one patient in one cycle.
///
/// The snapshot is taken once; writers appending to the store during the
/// pass are not visible to any rule.
#[derive(Debug, Clone)]
pub struct EvaluationContext {
    patient_id: PatientId,
    now: TimestampMs,
    records: Vec<Record>,
}

impl EvaluationContext {
    pub fn new(patient_id: PatientId, now: TimestampMs, records: Vec<Record>) -> Self {
        Self {
            patient_id,
            now,
            records,
        }
    }

    /// Snapshot `[0, now]` of the patient's records.
    pub fn load(
        store: &RecordStore,
        patient_id: PatientId,
        now: TimestampMs,
    ) -> StoreResult<Self> {
        let records = store.get_records(patient_id, 0, now)?;
        Ok(Self::new(patient_id, now, records))
    }

    pub fn patient_id(&self) -> PatientId {
        self.patient_id
    }

    pub fn now(&self) -> TimestampMs {
        self.now
    }

    /// All records in store order, including non-finite values.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Records of one type in store order. Non-finite values are dropped.
    pub fn measurements(&self, record_type: &RecordType) -> Vec<&Record> {
        self.records
            .iter()
            .filter(|r| r.is(record_type))
            .filter(|r| {
                let finite = r.value().is_finite();
                if !finite {
                    tracing::debug!(
                        patient_id = self.patient_id,
                        record_type = %record_type,
                        timestamp = r.timestamp(),
                        "skipping non-finite measurement"
                    );
                }
                finite
            })
            .collect()
    }

    /// Like [`measurements`](Self::measurements), stably sorted by timestamp.
    pub fn series(&self, record_type: &RecordType) -> Vec<&Record> {
        let mut series = self.measurements(record_type);
        series.sort_by_key(|r| r.timestamp());
        series
    }
}
