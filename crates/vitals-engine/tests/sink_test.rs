//! Tests for the alert sinks.

mod common;

use std::sync::Arc;

use vitals_core::traits::{AlertDelivery, AlertSink};
use vitals_engine::{ChannelSink, FanoutSink, MemorySink, TracingSink};

fn delivery(condition: &str) -> AlertDelivery {
    AlertDelivery {
        patient_id: 11,
        timestamp: 123,
        label: "ECG".to_string(),
        condition: condition.to_string(),
    }
}

struct ExplodingSink;

impl AlertSink for ExplodingSink {
    fn deliver(&self, _delivery: &AlertDelivery) {
        panic!("sink exploded");
    }
}

#[test]
fn memory_sink_keeps_arrival_order_and_drains() {
    let sink = MemorySink::new();
    sink.deliver(&delivery("a"));
    sink.deliver(&delivery("b"));
    assert_eq!(sink.len(), 2);

    let drained = sink.drain();
    assert_eq!(drained[0].condition, "a");
    assert_eq!(drained[1].condition, "b");
    assert!(sink.is_empty());
}

#[test]
fn tracing_sink_emits_alert_delivered() {
    let (_, layer) = common::capture(|| TracingSink.deliver(&delivery("Abnormal ECG Peak")));
    let events = layer.named("alert_delivered");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].get("label"), Some("ECG"));
    assert_eq!(events[0].get("condition"), Some("Abnormal ECG Peak"));
}

#[test]
fn channel_sink_forwards_and_survives_closed_receiver() {
    let (sink, mut rx) = ChannelSink::new();
    sink.deliver(&delivery("first"));
    assert_eq!(rx.try_recv().unwrap().condition, "first");

    drop(rx);
    // Must not panic or block.
    sink.deliver(&delivery("dropped"));
}

#[test]
fn fanout_isolates_panicking_sinks() {
    let first = Arc::new(MemorySink::new());
    let last = Arc::new(MemorySink::new());
    let fanout = FanoutSink::new()
        .with_sink(first.clone())
        .with_sink(Arc::new(ExplodingSink))
        .with_sink(last.clone());
    assert_eq!(fanout.sink_count(), 3);

    fanout.deliver(&delivery("x"));
    fanout.deliver(&delivery("y"));

    assert_eq!(first.len(), 2);
    assert_eq!(last.len(), 2);
}
