//! RecordStore: per-patient record history behind a single RwLock.
//!
//! Readers never observe a half-applied write: every mutation takes the
//! write lock for the whole map update. Poisoned locks surface as
//! `StoreError::LockPoisoned` instead of panicking.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use vitals_core::errors::{StoreError, StoreResult};
use vitals_core::models::{IncomingRecord, Patient, PatientId, Record, RecordType, TimestampMs};
use vitals_observability::tracing_setup::events;

/// Shared store of every patient's records.
#[derive(Debug, Default)]
pub struct RecordStore {
    patients: RwLock<HashMap<PatientId, Patient>>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, creating the patient on first sight.
    pub fn add_record(
        &self,
        patient_id: PatientId,
        value: f64,
        record_type: RecordType,
        timestamp: TimestampMs,
    ) -> StoreResult<()> {
        let tag = record_type.tag().to_string();
        let mut patients = self.write()?;
        patients
            .entry(patient_id)
            .or_insert_with(|| Patient::new(patient_id))
            .add_record(value, record_type, timestamp);
        drop(patients);

        events::record_ingested(patient_id, &tag, timestamp);
        Ok(())
    }

    /// Store a record handed over by an ingestion collaborator.
    pub fn submit(&self, incoming: IncomingRecord) -> StoreResult<()> {
        let record = incoming.into_record();
        self.add_record(
            record.patient_id(),
            record.value(),
            record.record_type().clone(),
            record.timestamp(),
        )
    }

    /// Records for `patient_id` with `start <= timestamp <= end`.
    /// Unknown patients yield an empty list.
    pub fn get_records(
        &self,
        patient_id: PatientId,
        start: TimestampMs,
        end: TimestampMs,
    ) -> StoreResult<Vec<Record>> {
        if start > end {
            return Err(StoreError::InvalidRange { start, end });
        }
        let patients = self.read()?;
        Ok(patients
            .get(&patient_id)
            .map(|p| p.records_between(start, end))
            .unwrap_or_default())
    }

    /// Snapshot of every known patient, ordered by id.
    pub fn get_all_patients(&self) -> StoreResult<Vec<Patient>> {
        let patients = self.read()?;
        let mut all: Vec<Patient> = patients.values().cloned().collect();
        all.sort_by_key(Patient::id);
        Ok(all)
    }

    /// Snapshot of one patient, if known.
    pub fn get_patient(&self, patient_id: PatientId) -> StoreResult<Option<Patient>> {
        Ok(self.read()?.get(&patient_id).cloned())
    }

    /// Known patient ids in ascending order.
    pub fn patient_ids(&self) -> StoreResult<Vec<PatientId>> {
        let mut ids: Vec<PatientId> = self.read()?.keys().copied().collect();
        ids.sort_unstable();
        Ok(ids)
    }

    pub fn patient_count(&self) -> StoreResult<usize> {
        Ok(self.read()?.len())
    }

    /// Total records across all patients.
    pub fn record_count(&self) -> StoreResult<usize> {
        Ok(self.read()?.values().map(Patient::len).sum())
    }

    /// Drop every patient and record.
    pub fn clear(&self) -> StoreResult<()> {
        let mut patients = self.write()?;
        let removed = patients.len();
        patients.clear();
        drop(patients);

        events::store_cleared(removed);
        Ok(())
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, HashMap<PatientId, Patient>>> {
        self.patients.read().map_err(|_| StoreError::LockPoisoned {
            reason: "read lock poisoned".to_string(),
        })
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, HashMap<PatientId, Patient>>> {
        self.patients.write().map_err(|_| StoreError::LockPoisoned {
            reason: "write lock poisoned".to_string(),
        })
    }
}
