//! Alert annotation: repeat and priority layers over an owned alert.
//!
//! Annotators never touch the core alert fields. Each one pushes a layer,
//! and the rendered condition nests layers in application order, so a
//! repeat layer followed by a priority layer renders as
//! `"[Priority 2] [Repeated 1 times] <condition>"`.

use dashmap::DashMap;
use serde::Serialize;
use vitals_core::config::{AnnotationConfig, RepeatMode};
use vitals_core::models::{Alert, AlertCategory, PatientId, TimestampMs};
use vitals_core::traits::AlertDelivery;
use vitals_observability::tracing_setup::events;

/// One decoration applied to an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnnotationLayer {
    Repeated { count: u32 },
    Priority { level: u8 },
}

impl AnnotationLayer {
    fn render(&self, inner: &str) -> String {
        match self {
            Self::Repeated { count } => format!("[Repeated {count} times] {inner}"),
            Self::Priority { level } => format!("[Priority {level}] {inner}"),
        }
    }
}

/// A raw alert plus the layers applied to it so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotatedAlert {
    alert: Alert,
    layers: Vec<AnnotationLayer>,
}

impl AnnotatedAlert {
    pub fn new(alert: Alert) -> Self {
        Self {
            alert,
            layers: Vec::new(),
        }
    }

    pub fn with_layer(mut self, layer: AnnotationLayer) -> Self {
        self.layers.push(layer);
        self
    }

    /// The undecorated alert.
    pub fn alert(&self) -> &Alert {
        &self.alert
    }

    pub fn layers(&self) -> &[AnnotationLayer] {
        &self.layers
    }

    /// Condition text with every layer rendered, innermost first.
    pub fn condition(&self) -> String {
        self.layers
            .iter()
            .fold(self.alert.condition().to_string(), |inner, layer| {
                layer.render(&inner)
            })
    }

    pub fn patient_id(&self) -> PatientId {
        self.alert.patient_id()
    }

    pub fn category(&self) -> AlertCategory {
        self.alert.category()
    }

    pub fn timestamp(&self) -> TimestampMs {
        self.alert.timestamp()
    }

    /// Count from the outermost repeat layer, if any.
    pub fn repeat_count(&self) -> Option<u32> {
        self.layers.iter().rev().find_map(|l| match l {
            AnnotationLayer::Repeated { count } => Some(*count),
            _ => None,
        })
    }

    /// Level from the outermost priority layer, if any.
    pub fn priority(&self) -> Option<u8> {
        self.layers.iter().rev().find_map(|l| match l {
            AnnotationLayer::Priority { level } => Some(*level),
            _ => None,
        })
    }

    /// The record a sink receives.
    pub fn to_delivery(&self) -> AlertDelivery {
        AlertDelivery {
            patient_id: self.patient_id(),
            timestamp: self.timestamp(),
            label: self.category().label().to_string(),
            condition: self.condition(),
        }
    }
}

/// Adds one layer to an alert.
pub trait Annotator: Send + Sync {
    fn name(&self) -> &str;

    fn annotate(&self, alert: AnnotatedAlert) -> AnnotatedAlert;
}

/// Increment a repeat counter, saturating at `max`.
/// Returns the new count and whether it moved.
fn check_and_repeat(count: u32, max: u32) -> (u32, bool) {
    if count < max {
        (count + 1, true)
    } else {
        (count, false)
    }
}

/// Stamps `[Repeated n times]`.
///
/// In [`RepeatMode::PerAlert`] every alert starts a fresh counter that is
/// checked once, so `n` is always 1. In [`RepeatMode::Tracked`] the count
/// is kept per `(patient, condition)` across cycles, up to `max_repeats`.
#[derive(Debug)]
pub struct RepeatAnnotator {
    max_repeats: u32,
    mode: RepeatMode,
    tracker: DashMap<(PatientId, String), u32>,
}

impl RepeatAnnotator {
    pub fn new(max_repeats: u32, mode: RepeatMode) -> Self {
        Self {
            max_repeats,
            mode,
            tracker: DashMap::new(),
        }
    }

    pub fn mode(&self) -> RepeatMode {
        self.mode
    }

    /// Tracked count for a condition; always 0 in per-alert mode.
    pub fn tracked_count(&self, patient_id: PatientId, condition: &str) -> u32 {
        self.tracker
            .get(&(patient_id, condition.to_string()))
            .map(|c| *c)
            .unwrap_or(0)
    }

    /// Forget every tracked count.
    pub fn reset(&self) {
        self.tracker.clear();
    }

    fn next_count(&self, alert: &AnnotatedAlert) -> (u32, bool) {
        match self.mode {
            RepeatMode::PerAlert => check_and_repeat(0, self.max_repeats),
            RepeatMode::Tracked => {
                let key = (alert.patient_id(), alert.alert().condition().to_string());
                let mut count = self.tracker.entry(key).or_insert(0);
                let (next, moved) = check_and_repeat(*count, self.max_repeats);
                *count = next;
                (next, moved)
            }
        }
    }
}

impl Annotator for RepeatAnnotator {
    fn name(&self) -> &str {
        "repeat"
    }

    fn annotate(&self, alert: AnnotatedAlert) -> AnnotatedAlert {
        let (count, incremented) = self.next_count(&alert);
        let annotated = alert.with_layer(AnnotationLayer::Repeated { count });

        if incremented {
            events::alert_repeated(annotated.patient_id(), count, &annotated.condition());
        } else {
            tracing::debug!(
                patient_id = annotated.patient_id(),
                count,
                "repeat count at maximum"
            );
        }
        annotated
    }
}

/// Stamps `[Priority p]` with a fixed level.
#[derive(Debug, Clone, Copy)]
pub struct PriorityAnnotator {
    level: u8,
}

impl PriorityAnnotator {
    pub fn new(level: u8) -> Self {
        Self { level }
    }
}

impl Annotator for PriorityAnnotator {
    fn name(&self) -> &str {
        "priority"
    }

    fn annotate(&self, alert: AnnotatedAlert) -> AnnotatedAlert {
        alert.with_layer(AnnotationLayer::Priority { level: self.level })
    }
}

/// Ordered annotators applied to every alert of a cycle.
pub struct AnnotationPipeline {
    annotators: Vec<Box<dyn Annotator>>,
}

impl AnnotationPipeline {
    /// Create a pipeline with custom annotators.
    pub fn with_annotators(annotators: Vec<Box<dyn Annotator>>) -> Self {
        Self { annotators }
    }

    /// Repeat, then priority.
    pub fn from_config(config: &AnnotationConfig) -> Self {
        Self::with_annotators(vec![
            Box::new(RepeatAnnotator::new(config.max_repeats, config.repeat_mode)),
            Box::new(PriorityAnnotator::new(config.priority_level)),
        ])
    }

    pub fn apply(&self, alert: Alert) -> AnnotatedAlert {
        self.annotators
            .iter()
            .fold(AnnotatedAlert::new(alert), |acc, a| a.annotate(acc))
    }

    pub fn names(&self) -> Vec<&str> {
        self.annotators.iter().map(|a| a.name()).collect()
    }
}

impl Default for AnnotationPipeline {
    fn default() -> Self {
        Self::from_config(&AnnotationConfig::default())
    }
}

impl std::fmt::Debug for AnnotationPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnnotationPipeline")
            .field("annotators", &self.names())
            .finish()
    }
}
