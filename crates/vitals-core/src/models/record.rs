use std::fmt;

use serde::{Deserialize, Serialize};

use super::{PatientId, TimestampMs};

/// Kind of measurement carried by a [`Record`].
///
/// Tags the rules do not interpret are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecordType {
    SystolicBloodPressure,
    DiastolicBloodPressure,
    Saturation,
    Ecg,
    HeartRate,
    ManualAlert,
    Other(String),
}

impl RecordType {
    /// Resolve a wire tag, accepting the aliases older feeds still send.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim() {
            "SystolicBloodPressure" | "BloodPressure" | "SystolicPressure" => {
                Self::SystolicBloodPressure
            }
            "DiastolicBloodPressure" | "DiastolicPressure" => Self::DiastolicBloodPressure,
            "Saturation" | "BloodSaturation" => Self::Saturation,
            "ECG" => Self::Ecg,
            "HeartRate" => Self::HeartRate,
            "ManualAlert" | "Alert" => Self::ManualAlert,
            other => Self::Other(other.to_string()),
        }
    }

    /// Canonical tag for this type.
    pub fn tag(&self) -> &str {
        match self {
            Self::SystolicBloodPressure => "SystolicBloodPressure",
            Self::DiastolicBloodPressure => "DiastolicBloodPressure",
            Self::Saturation => "Saturation",
            Self::Ecg => "ECG",
            Self::HeartRate => "HeartRate",
            Self::ManualAlert => "ManualAlert",
            Self::Other(tag) => tag,
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl From<&str> for RecordType {
    fn from(tag: &str) -> Self {
        Self::from_tag(tag)
    }
}

impl From<String> for RecordType {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<RecordType> for String {
    fn from(record_type: RecordType) -> Self {
        record_type.tag().to_string()
    }
}

/// One timestamped measurement for one patient. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    patient_id: PatientId,
    record_type: RecordType,
    value: f64,
    timestamp: TimestampMs,
}

impl Record {
    pub fn new(
        patient_id: PatientId,
        value: f64,
        record_type: RecordType,
        timestamp: TimestampMs,
    ) -> Self {
        Self {
            patient_id,
            record_type,
            value,
            timestamp,
        }
    }

    pub fn patient_id(&self) -> PatientId {
        self.patient_id
    }

    pub fn record_type(&self) -> &RecordType {
        &self.record_type
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn timestamp(&self) -> TimestampMs {
        self.timestamp
    }

    /// True when this record is of the given type.
    pub fn is(&self, record_type: &RecordType) -> bool {
        &self.record_type == record_type
    }
}

/// An already-decoded record handed over by an ingestion collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomingRecord {
    pub patient_id: PatientId,
    pub value: f64,
    pub record_type: String,
    pub timestamp: TimestampMs,
}

impl IncomingRecord {
    /// Resolve the wire tag and build the stored record.
    pub fn into_record(self) -> Record {
        Record::new(
            self.patient_id,
            self.value,
            RecordType::from_tag(&self.record_type),
            self.timestamp,
        )
    }
}
