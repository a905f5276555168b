//! Tests for the periodic monitor.

use std::sync::Arc;
use std::time::Duration;

use vitals_core::config::{MonitorConfig, VitalsConfig};
use vitals_core::models::RecordType;
use vitals_engine::{recent_readings, AlertEvaluator, MemorySink, Monitor};
use vitals_storage::RecordStore;

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn monitor_evaluates_until_stopped() {
    let store = Arc::new(RecordStore::new());
    let sink = Arc::new(MemorySink::new());
    store
        .add_record(1, 1.0, RecordType::ManualAlert, now_ms() - 1_000)
        .unwrap();

    let evaluator = Arc::new(AlertEvaluator::new(
        Arc::clone(&store),
        sink.clone(),
        &VitalsConfig::default(),
    ));
    let config = MonitorConfig {
        interval_ms: 10,
        status_every: 2,
        ..MonitorConfig::default()
    };
    let handle = Monitor::new(evaluator, config).spawn();

    tokio::time::sleep(Duration::from_millis(120)).await;
    assert!(handle.cycles() >= 1);

    let stats = handle.stop().await;
    assert!(stats.cycles >= 1);
    assert_eq!(stats.alerts_delivered, stats.cycles);
    assert_eq!(sink.len() as u64, stats.cycles);

    // Nothing runs after stop.
    let settled = sink.len();
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(sink.len(), settled);
}

#[tokio::test]
async fn dropping_the_handle_stops_the_monitor() {
    let store = Arc::new(RecordStore::new());
    let sink = Arc::new(MemorySink::new());
    let evaluator = Arc::new(AlertEvaluator::new(store, sink, &VitalsConfig::default()));
    let config = MonitorConfig {
        interval_ms: 5,
        ..MonitorConfig::default()
    };
    let handle = Monitor::new(Arc::clone(&evaluator), config).spawn();
    tokio::time::sleep(Duration::from_millis(30)).await;
    drop(handle);
    tokio::time::sleep(Duration::from_millis(30)).await;

    // The loop released its evaluator clone when it exited.
    assert_eq!(Arc::strong_count(&evaluator), 1);
}

#[test]
fn recent_readings_counts_the_status_window() {
    let store = RecordStore::new();
    store.add_record(1, 80.0, RecordType::HeartRate, 9_999).unwrap();
    store.add_record(1, 82.0, RecordType::HeartRate, 10_000).unwrap();
    store.add_record(1, 81.0, RecordType::HeartRate, 65_000).unwrap();
    store.add_record(2, 97.0, RecordType::Saturation, 70_000).unwrap();

    let (patients, readings) = recent_readings(&store, 70_000, 60_000).unwrap();
    assert_eq!(patients, 2);
    assert_eq!(readings, 3);
}
