//! Alert sinks: in-memory, tracing, channel, and fan-out delivery.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;
use vitals_core::traits::{AlertDelivery, AlertSink};
use vitals_observability::tracing_setup::events;

/// Collects deliveries in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemorySink {
    deliveries: Mutex<Vec<AlertDelivery>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything delivered so far.
    pub fn deliveries(&self) -> Vec<AlertDelivery> {
        self.guard().clone()
    }

    /// Remove and return everything delivered so far.
    pub fn drain(&self) -> Vec<AlertDelivery> {
        std::mem::take(&mut *self.guard())
    }

    pub fn len(&self) -> usize {
        self.guard().len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard().is_empty()
    }

    // A panic while holding the lock cannot leave the Vec half-written.
    fn guard(&self) -> MutexGuard<'_, Vec<AlertDelivery>> {
        self.deliveries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AlertSink for MemorySink {
    fn deliver(&self, delivery: &AlertDelivery) {
        self.guard().push(delivery.clone());
    }
}

/// Writes each alert to the operational log as an `alert_delivered` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl AlertSink for TracingSink {
    fn deliver(&self, delivery: &AlertDelivery) {
        events::alert_delivered(
            delivery.patient_id,
            &delivery.label,
            &delivery.condition,
            delivery.timestamp,
        );
    }
}

/// Forwards alerts into an unbounded tokio channel.
///
/// Never blocks. Once the receiver is gone, alerts are dropped with a
/// warning.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<AlertDelivery>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<AlertDelivery>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl AlertSink for ChannelSink {
    fn deliver(&self, delivery: &AlertDelivery) {
        if self.tx.send(delivery.clone()).is_err() {
            tracing::warn!(
                patient_id = delivery.patient_id,
                condition = %delivery.condition,
                "alert dropped: channel receiver closed"
            );
        }
    }
}

/// Delivers every alert to each registered sink in order.
/// Sinks that panic are caught and do not prevent later sinks from
/// receiving the alert.
#[derive(Default)]
pub struct FanoutSink {
    sinks: Vec<Arc<dyn AlertSink>>,
}

impl FanoutSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sink(mut self, sink: Arc<dyn AlertSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn register(&mut self, sink: Arc<dyn AlertSink>) {
        self.sinks.push(sink);
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }
}

impl AlertSink for FanoutSink {
    fn deliver(&self, delivery: &AlertDelivery) {
        for (index, sink) in self.sinks.iter().enumerate() {
            let result = panic::catch_unwind(AssertUnwindSafe(|| sink.deliver(delivery)));
            if result.is_err() {
                tracing::error!(
                    sink_index = index,
                    patient_id = delivery.patient_id,
                    "alert sink panicked"
                );
            }
        }
    }
}
