//! Evaluation counters: cycles, alerts, failures, per-rule firings.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

/// Thread-safe counters shared by concurrent evaluation cycles.
#[derive(Debug, Default)]
pub struct EvaluationMetrics {
    cycles: AtomicU64,
    rejected_cycles: AtomicU64,
    alerts_delivered: AtomicU64,
    rule_failures: AtomicU64,
    factory_failures: AtomicU64,
    sink_failures: AtomicU64,
    rule_firings: DashMap<String, u64>,
}

impl EvaluationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_cycle(&self) {
        self.cycles.fetch_add(1, Ordering::Relaxed);
    }

    /// A cycle refused because the patient was already being evaluated.
    pub fn record_rejected_cycle(&self) {
        self.rejected_cycles.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_delivery(&self) {
        self.alerts_delivered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rule_failure(&self) {
        self.rule_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_factory_failure(&self) {
        self.factory_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// An alert the sink panicked on instead of accepting.
    pub fn record_sink_failure(&self) {
        self.sink_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Count findings produced by one rule in one pass.
    pub fn record_firings(&self, rule: &str, findings: usize) {
        if findings == 0 {
            return;
        }
        *self.rule_firings.entry(rule.to_string()).or_default() += findings as u64;
    }

    /// Get a point-in-time copy of every counter.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            cycles: self.cycles.load(Ordering::Relaxed),
            rejected_cycles: self.rejected_cycles.load(Ordering::Relaxed),
            alerts_delivered: self.alerts_delivered.load(Ordering::Relaxed),
            rule_failures: self.rule_failures.load(Ordering::Relaxed),
            factory_failures: self.factory_failures.load(Ordering::Relaxed),
            sink_failures: self.sink_failures.load(Ordering::Relaxed),
            rule_firings: self
                .rule_firings
                .iter()
                .map(|e| (e.key().clone(), *e.value()))
                .collect(),
        }
    }

    /// Reset all counters (useful for testing or periodic rotation).
    pub fn reset(&self) {
        self.cycles.store(0, Ordering::Relaxed);
        self.rejected_cycles.store(0, Ordering::Relaxed);
        self.alerts_delivered.store(0, Ordering::Relaxed);
        self.rule_failures.store(0, Ordering::Relaxed);
        self.factory_failures.store(0, Ordering::Relaxed);
        self.sink_failures.store(0, Ordering::Relaxed);
        self.rule_firings.clear();
    }
}

/// Serializable copy of [`EvaluationMetrics`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub cycles: u64,
    pub rejected_cycles: u64,
    pub alerts_delivered: u64,
    pub rule_failures: u64,
    pub factory_failures: u64,
    pub sink_failures: u64,
    /// Findings per rule id, sorted by id.
    pub rule_firings: BTreeMap<String, u64>,
}
