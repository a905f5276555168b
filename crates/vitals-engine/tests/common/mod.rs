//! Shared helpers for engine integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::{Layer, Registry};

/// Fields of one captured tracing event.
#[derive(Debug, Clone, Default)]
pub struct CapturedEvent {
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

struct FieldVisitor<'a>(&'a mut HashMap<String, String>);

impl Visit for FieldVisitor<'_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0
            .insert(field.name().to_string(), format!("{value:?}"));
    }
}

/// Layer that records every event it sees.
#[derive(Clone, Default)]
pub struct CaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl CaptureLayer {
    /// Events whose `event` field equals `name`.
    pub fn named(&self, name: &str) -> Vec<CapturedEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.get("event") == Some(name))
            .cloned()
            .collect()
    }
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut captured = CapturedEvent::default();
        event.record(&mut FieldVisitor(&mut captured.fields));
        self.events.lock().unwrap().push(captured);
    }
}

/// Run `f` with a capturing subscriber installed on this thread.
pub fn capture<T>(f: impl FnOnce() -> T) -> (T, CaptureLayer) {
    let layer = CaptureLayer::default();
    let subscriber = Registry::default().with(layer.clone());
    let out = tracing::subscriber::with_default(subscriber, f);
    (out, layer)
}
