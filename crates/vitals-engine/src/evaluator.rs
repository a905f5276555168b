//! AlertEvaluator: one evaluation cycle per patient.
//!
//! A cycle snapshots the patient's records, runs every registered rule
//! over the snapshot, builds each finding through the alert factory,
//! annotates it, and delivers it. Rule and factory failures are isolated
//! and reported, a panicking sink drops only the alert it was handed, and
//! only a store failure aborts the cycle.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use dashmap::DashSet;
use rayon::prelude::*;
use serde::Serialize;
use vitals_core::config::VitalsConfig;
use vitals_core::errors::{EvaluationError, RuleError, VitalsErrorCode};
use vitals_core::models::{PatientId, TimestampMs};
use vitals_core::traits::AlertSink;
use vitals_observability::tracing_setup::events;
use vitals_observability::EvaluationMetrics;
use vitals_rules::{AlertFactory, EvaluationContext, RuleRegistry, RuleStrategy};
use vitals_storage::RecordStore;

use crate::annotate::{AnnotatedAlert, AnnotationPipeline};

/// Outcome of one patient's cycle.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub patient_id: PatientId,
    pub evaluated_at: TimestampMs,
    pub records_evaluated: usize,
    /// Alerts handed to the sink, in delivery order.
    pub delivered: Vec<AnnotatedAlert>,
    /// Non-fatal rule and factory failures of the pass.
    #[serde(skip)]
    pub failures: Vec<EvaluationError>,
}

impl EvaluationReport {
    fn new(patient_id: PatientId, evaluated_at: TimestampMs, records_evaluated: usize) -> Self {
        Self {
            patient_id,
            evaluated_at,
            records_evaluated,
            delivered: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Rendered condition text of every delivered alert.
    pub fn conditions(&self) -> Vec<String> {
        self.delivered.iter().map(AnnotatedAlert::condition).collect()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Outcome of evaluating every known patient once.
#[derive(Debug, Default)]
pub struct CycleSummary {
    pub reports: Vec<EvaluationReport>,
    /// Patients whose cycle aborted.
    pub errors: Vec<(PatientId, EvaluationError)>,
}

impl CycleSummary {
    pub fn alerts_delivered(&self) -> usize {
        self.reports.iter().map(|r| r.delivered.len()).sum()
    }
}

/// Removes the patient from the in-flight set when the cycle ends,
/// including by panic.
struct InFlightGuard<'a> {
    set: &'a DashSet<PatientId>,
    patient_id: PatientId,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.set.remove(&self.patient_id);
    }
}

/// Runs evaluation cycles against a shared record store.
///
/// Cycles for different patients run concurrently; a second cycle for a
/// patient already in flight is refused with
/// `EvaluationError::AlreadyEvaluating`.
pub struct AlertEvaluator {
    store: Arc<RecordStore>,
    registry: RuleRegistry,
    factory: AlertFactory,
    pipeline: AnnotationPipeline,
    sink: Arc<dyn AlertSink>,
    metrics: Arc<EvaluationMetrics>,
    in_flight: DashSet<PatientId>,
}

impl AlertEvaluator {
    /// Create an evaluator with the built-in rules, the default factory,
    /// and the configured annotation pipeline.
    pub fn new(
        store: Arc<RecordStore>,
        sink: Arc<dyn AlertSink>,
        config: &VitalsConfig,
    ) -> Self {
        Self {
            store,
            registry: RuleRegistry::with_defaults(&config.rules),
            factory: AlertFactory::default(),
            pipeline: AnnotationPipeline::from_config(&config.annotation),
            sink,
            metrics: Arc::new(EvaluationMetrics::new()),
            in_flight: DashSet::new(),
        }
    }

    /// Replace the rule registry.
    pub fn with_registry(mut self, registry: RuleRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Replace the alert factory.
    pub fn with_factory(mut self, factory: AlertFactory) -> Self {
        self.factory = factory;
        self
    }

    /// Replace the annotation pipeline.
    pub fn with_pipeline(mut self, pipeline: AnnotationPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    /// Share a metrics collector with other components.
    pub fn with_metrics(mut self, metrics: Arc<EvaluationMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn store(&self) -> &Arc<RecordStore> {
        &self.store
    }

    pub fn metrics(&self) -> &Arc<EvaluationMetrics> {
        &self.metrics
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Evaluate one patient against the wall clock.
    pub fn evaluate_patient(
        &self,
        patient_id: PatientId,
    ) -> Result<EvaluationReport, EvaluationError> {
        self.evaluate_patient_at(patient_id, now_ms())
    }

    /// Evaluate one patient over records with `timestamp <= now`.
    pub fn evaluate_patient_at(
        &self,
        patient_id: PatientId,
        now: TimestampMs,
    ) -> Result<EvaluationReport, EvaluationError> {
        if !self.in_flight.insert(patient_id) {
            self.metrics.record_rejected_cycle();
            return Err(EvaluationError::AlreadyEvaluating { patient_id });
        }
        let _guard = InFlightGuard {
            set: &self.in_flight,
            patient_id,
        };

        let ctx = EvaluationContext::load(&self.store, patient_id, now)?;
        self.metrics.record_cycle();

        let mut report = EvaluationReport::new(patient_id, now, ctx.records().len());
        for rule in self.registry.iter() {
            self.run_rule(&**rule, &ctx, &mut report);
        }

        events::evaluation_completed(
            patient_id,
            report.records_evaluated,
            report.delivered.len(),
            report.failures.len(),
        );
        Ok(report)
    }

    /// Evaluate every known patient once, in parallel.
    pub fn evaluate_all(&self) -> Result<CycleSummary, EvaluationError> {
        self.evaluate_all_at(now_ms())
    }

    pub fn evaluate_all_at(&self, now: TimestampMs) -> Result<CycleSummary, EvaluationError> {
        let ids = self.store.patient_ids()?;

        let results: Vec<(PatientId, Result<EvaluationReport, EvaluationError>)> = ids
            .par_iter()
            .map(|&id| (id, self.evaluate_patient_at(id, now)))
            .collect();

        let mut summary = CycleSummary::default();
        for (id, result) in results {
            match result {
                Ok(report) => summary.reports.push(report),
                Err(e) => {
                    tracing::warn!(
                        patient_id = id,
                        error = %e.coded_string(),
                        "evaluation cycle aborted"
                    );
                    summary.errors.push((id, e));
                }
            }
        }
        Ok(summary)
    }

    fn run_rule(
        &self,
        rule: &dyn RuleStrategy,
        ctx: &EvaluationContext,
        report: &mut EvaluationReport,
    ) {
        let patient_id = ctx.patient_id();

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| rule.evaluate(ctx)))
            .unwrap_or_else(|payload| {
                Err(RuleError::Panicked {
                    rule: rule.id().to_string(),
                    message: panic_message(&*payload),
                })
            });

        let findings = match outcome {
            Ok(findings) => findings,
            Err(e) => {
                events::rule_failed(patient_id, rule.id(), &e.coded_string());
                self.metrics.record_rule_failure();
                report.failures.push(e.into());
                return;
            }
        };
        self.metrics.record_firings(rule.id(), findings.len());

        for finding in findings {
            let alert = match self.factory.create(
                finding.category,
                patient_id,
                finding.condition,
                finding.timestamp,
            ) {
                Ok(alert) => alert,
                Err(e) => {
                    events::alert_construction_failed(
                        patient_id,
                        finding.category.tag(),
                        &e.coded_string(),
                    );
                    self.metrics.record_factory_failure();
                    report.failures.push(e.into());
                    continue;
                }
            };

            let annotated = self.pipeline.apply(alert);
            if self.deliver(&annotated) {
                self.metrics.record_delivery();
                report.delivered.push(annotated);
            }
        }
    }

    /// Hand one alert to the sink. A panicking sink loses that alert only.
    fn deliver(&self, annotated: &AnnotatedAlert) -> bool {
        let delivery = annotated.to_delivery();
        match panic::catch_unwind(AssertUnwindSafe(|| self.sink.deliver(&delivery))) {
            Ok(()) => true,
            Err(payload) => {
                events::sink_failed(
                    delivery.patient_id,
                    &delivery.label,
                    &panic_message(&*payload),
                );
                self.metrics.record_sink_failure();
                false
            }
        }
    }
}

impl std::fmt::Debug for AlertEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlertEvaluator")
            .field("registry", &self.registry)
            .field("factory", &self.factory)
            .field("pipeline", &self.pipeline)
            .finish_non_exhaustive()
    }
}

fn now_ms() -> TimestampMs {
    chrono::Utc::now().timestamp_millis()
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
