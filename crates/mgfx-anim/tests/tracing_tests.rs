#![forbid(unsafe_code)]

//! Tracing instrumentation tests.
//!
//! Transition spans enabled:
//!   cargo test -p mgfx-anim --features tracing --test tracing_tests
//!
//! Without the feature only the no-subscriber smoke test runs.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use mgfx_anim::{TransitionConfig, TransitionKind};
use mgfx_core::geometry::{Dim, Point};
use mgfx_render::PackedBuffer;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

// ============================================================================
// Test Infrastructure
// ============================================================================

#[derive(Debug, Clone)]
#[allow(dead_code)]
struct CapturedSpan {
    name: String,
    fields: HashMap<String, String>,
}

struct SpanCapture {
    spans: Arc<Mutex<Vec<CapturedSpan>>>,
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for SpanCapture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        attrs.record(&mut visitor);
        self.spans.lock().unwrap().push(CapturedSpan {
            name: attrs.metadata().name().to_string(),
            fields: visitor.0.into_iter().collect(),
        });
    }
}

fn with_captured_spans<F: FnOnce()>(f: F) -> Vec<CapturedSpan> {
    let spans = Arc::new(Mutex::new(Vec::new()));
    let layer = SpanCapture {
        spans: spans.clone(),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    let captured = spans.lock().unwrap().clone();
    captured
}

fn run_push(kind: TransitionKind, steps: u16) {
    let mut screen = PackedBuffer::new(vec![0u8; 64], 32, 16).unwrap();
    let mut scratch = PackedBuffer::new(vec![0xFFu8; 64], 32, 16).unwrap();
    let mut state = TransitionConfig::new()
        .kind(kind)
        .steps(steps)
        .start(Point::ZERO, Dim::new(32, 16))
        .unwrap();
    while state.advance(&mut screen, &mut scratch) {}
}

// ============================================================================
// Tests
// ============================================================================

#[test]
#[cfg(feature = "tracing")]
fn one_span_per_frame() {
    let spans = with_captured_spans(|| run_push(TransitionKind::PushLeft, 4));
    let frames: Vec<_> = spans
        .iter()
        .filter(|s| s.name == "transition_frame")
        .collect();
    assert_eq!(frames.len(), 4);
    for (i, span) in frames.iter().enumerate() {
        assert_eq!(span.fields.get("step"), Some(&i.to_string()));
        assert_eq!(span.fields.get("motion"), Some(&"8".to_string()));
        assert_eq!(span.fields.get("kind"), Some(&"PushLeft".to_string()));
    }
}

#[test]
#[cfg(feature = "tracing")]
fn bounce_frames_cover_both_phases() {
    let spans = with_captured_spans(|| run_push(TransitionKind::BounceUp, 3));
    let frames = spans
        .iter()
        .filter(|s| s.name == "transition_frame")
        .count();
    assert_eq!(frames, 6);
}

#[test]
#[cfg(feature = "tracing")]
fn none_transition_opens_no_frame_span() {
    let spans = with_captured_spans(|| run_push(TransitionKind::None, 4));
    assert!(spans.iter().all(|s| s.name != "transition_frame"));
}

#[test]
fn zero_overhead_without_subscriber() {
    let spans = with_captured_spans(|| {});
    assert!(spans.is_empty());
    run_push(TransitionKind::SlideDown, 5);
}
