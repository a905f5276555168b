use std::fmt;

use serde::{Deserialize, Serialize};

use super::{PatientId, TimestampMs};

/// Alert family a rule reports under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertCategory {
    BloodPressure,
    BloodOxygen,
    Ecg,
    Manual,
}

impl AlertCategory {
    pub fn all() -> &'static [AlertCategory] {
        &[
            Self::BloodPressure,
            Self::BloodOxygen,
            Self::Ecg,
            Self::Manual,
        ]
    }

    /// Lookup tag used by the alert factory.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::BloodPressure => "bloodpressure",
            Self::BloodOxygen => "bloodoxygen",
            Self::Ecg => "ecg",
            Self::Manual => "manual",
        }
    }

    /// Label handed to sinks alongside the condition text.
    pub fn label(&self) -> &'static str {
        match self {
            Self::BloodPressure => "BloodPressure",
            Self::BloodOxygen => "BloodOxygen",
            Self::Ecg => "ECG",
            Self::Manual => "ManualAlert",
        }
    }

    /// Case-insensitive tag lookup.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim().to_ascii_lowercase();
        Self::all().iter().copied().find(|c| c.tag() == tag)
    }
}

impl fmt::Display for AlertCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A raw alert as produced by the alert factory, before annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    patient_id: PatientId,
    category: AlertCategory,
    condition: String,
    timestamp: TimestampMs,
}

impl Alert {
    pub fn new(
        patient_id: PatientId,
        category: AlertCategory,
        condition: impl Into<String>,
        timestamp: TimestampMs,
    ) -> Self {
        Self {
            patient_id,
            category,
            condition: condition.into(),
            timestamp,
        }
    }

    pub fn patient_id(&self) -> PatientId {
        self.patient_id
    }

    pub fn category(&self) -> AlertCategory {
        self.category
    }

    pub fn condition(&self) -> &str {
        &self.condition
    }

    pub fn timestamp(&self) -> TimestampMs {
        self.timestamp
    }
}
