use serde::{Deserialize, Serialize};

use crate::models::{PatientId, TimestampMs};

/// One finished, annotated alert as seen by a delivery layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertDelivery {
    pub patient_id: PatientId,
    pub timestamp: TimestampMs,
    /// Category label of the alert (e.g. "BloodPressure").
    pub label: String,
    /// Fully annotated condition text.
    pub condition: String,
}

/// Consumer of finished alerts.
///
/// Delivery is fire-and-forget: implementations must not block on
/// acknowledgement and the engine never retries.
pub trait AlertSink: Send + Sync {
    fn deliver(&self, delivery: &AlertDelivery);
}

impl<T: AlertSink + ?Sized> AlertSink for std::sync::Arc<T> {
    fn deliver(&self, delivery: &AlertDelivery) {
        (**self).deliver(delivery)
    }
}
