#![forbid(unsafe_code)]

//! Log level policy for the history engine.
//!
//! - Absorbed `InvalidPosition` reports are WARN events carrying `op` and
//!   `error` fields.
//! - Empty-stack conditions and routine execute/undo/redo are DEBUG only.
//! - Nothing the engine does is logged at ERROR.
//!
//! Run:
//!   cargo test -p quill-core --test log_levels

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

use quill_core::{HistoryConfig, HistoryEngine, Operation};

// ============================================================================
// Test Infrastructure
// ============================================================================

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    fields: HashMap<String, String>,
}

impl CapturedEvent {
    fn message(&self) -> &str {
        self.fields.get("message").map_or("", String::as_str)
    }
}

#[derive(Clone, Default)]
struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl EventCapture {
    fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().unwrap().clone()
    }

    fn at_level(&self, level: tracing::Level) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.level == level)
            .collect()
    }
}

struct FieldVisitor<'a>(&'a mut HashMap<String, String>);

impl tracing::field::Visit for FieldVisitor<'_> {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{value:?}"));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }
}

impl<S> tracing_subscriber::Layer<S> for EventCapture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut fields = HashMap::new();
        event.record(&mut FieldVisitor(&mut fields));
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            fields,
        });
    }
}

fn capture<F: FnOnce()>(f: F) -> EventCapture {
    let layer = EventCapture::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    tracing::subscriber::with_default(subscriber, f);
    layer
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn invalid_position_is_a_structured_warning() {
    let log = capture(|| {
        let mut engine = HistoryEngine::with_text("abc", HistoryConfig::default());
        assert!(engine.execute(Operation::delete(3, 1)).is_err());
    });

    let warnings = log.at_level(tracing::Level::WARN);
    assert_eq!(warnings.len(), 1, "events: {:?}", log.events());
    let warning = &warnings[0];
    assert!(warning.message().contains("no effect"));
    assert!(warning.fields.contains_key("op"));
    assert!(warning.fields["error"].contains("Delete: invalid position"));
}

#[test]
fn tracked_noop_warns_on_undo_and_redo() {
    let log = capture(|| {
        let mut engine = HistoryEngine::with_text("abc", HistoryConfig::default());
        assert!(engine.execute(Operation::replace(3, 0, "x")).is_err());
        assert!(engine.undo().is_err());
        assert!(engine.redo().is_err());
        assert_eq!(engine.current_text(), "abc");
    });

    let warnings = log.at_level(tracing::Level::WARN);
    let messages: Vec<_> = warnings.iter().map(|e| e.message()).collect();
    assert_eq!(
        messages,
        vec![
            "execute: operation had no effect",
            "undo: inverse had no effect",
            "redo: operation had no effect",
        ],
        "events: {:?}",
        log.events()
    );
    for warning in &warnings[1..] {
        assert!(warning.fields.contains_key("op"));
        assert!(warning.fields["error"].contains("Replace: invalid position 3"));
    }
    assert!(warnings[1].fields.contains_key("inverse"));
    assert!(warnings[2].fields.contains_key("forward"));
}

#[test]
fn empty_stacks_log_at_debug_only() {
    let log = capture(|| {
        let mut engine = HistoryEngine::default();
        assert!(engine.undo().is_err());
        assert!(engine.redo().is_err());
    });

    assert!(log.at_level(tracing::Level::WARN).is_empty());
    let debug: Vec<_> = log
        .at_level(tracing::Level::DEBUG)
        .iter()
        .map(|e| e.message().to_string())
        .collect();
    assert!(debug.iter().any(|m| m.contains("nothing to undo")));
    assert!(debug.iter().any(|m| m.contains("nothing to redo")));
}

#[test]
fn routine_editing_never_warns() {
    let log = capture(|| {
        let mut engine = HistoryEngine::default();
        engine.execute(Operation::insert(0, "hello")).unwrap();
        engine.execute(Operation::replace(0, 1, "J")).unwrap();
        engine.undo().unwrap();
        engine.redo().unwrap();
        engine.undo().unwrap();
        engine.execute(Operation::delete(0, 2)).unwrap();
    });

    assert!(log.at_level(tracing::Level::WARN).is_empty());
    assert!(log.at_level(tracing::Level::ERROR).is_empty());
    let debug = log.at_level(tracing::Level::DEBUG);
    assert!(debug.iter().any(|e| e.message() == "execute"));
    assert!(debug.iter().any(|e| e.message() == "undo"));
    assert!(debug.iter().any(|e| e.message() == "redo"));
    assert!(debug.iter().any(|e| e.message().contains("discarding redo")));
}
