//! Stress tests for shared layouts and resolvers
//!
//! These tests verify:
//! - One layout renders identical bytes from many threads at once
//! - Message resolution is stable under concurrent use
//! - Large messages, wide contexts and deep cause chains render completely

use rust_logger_layouts::prelude::*;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

const THREADS: usize = 8;
const EVENTS_PER_THREAD: usize = 500;

#[derive(Debug, thiserror::Error)]
#[error("layer {depth} failed")]
struct LayeredError {
    depth: usize,
    #[source]
    source: Option<Box<LayeredError>>,
}

fn layered(depth: usize) -> LayeredError {
    let source = if depth == 0 {
        None
    } else {
        Some(Box::new(layered(depth - 1)))
    };
    LayeredError { depth, source }
}

fn sample_event(i: usize) -> LogEvent {
    LogEvent::simple(format!("app.worker{}", i % 4), LogLevel::Warn, format!("<job {}> done", i))
        .with_thread_name("worker")
        .with_timestamp_millis(1_000 + i as i64)
        .with_context_stack(ContextStack::new().with_entry(format!("req-{}", i)))
        .with_context_map(ContextMap::new().with_entry("job", i.to_string()))
        .with_location("src/worker.rs", 88, "app::worker")
}

/// Every thread renders the same events and must see the same bytes
#[test]
fn test_concurrent_rendering_is_identical() {
    let layout = Arc::new(
        HtmlLayout::builder()
            .location_info(true)
            .session_start(SessionStart::from_millis(1_000))
            .build(),
    );
    let expected: Vec<Vec<u8>> = (0..EVENTS_PER_THREAD)
        .map(|i| layout.to_bytes(&sample_event(i)))
        .collect();
    let expected = Arc::new(expected);
    let mismatches = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let layout = Arc::clone(&layout);
            let expected = Arc::clone(&expected);
            let mismatches = Arc::clone(&mismatches);
            thread::spawn(move || {
                for (i, want) in expected.iter().enumerate() {
                    if layout.to_bytes(&sample_event(i)) != *want {
                        mismatches.fetch_add(1, Ordering::Relaxed);
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("render thread panicked");
    }

    assert_eq!(mismatches.load(Ordering::Relaxed), 0);
}

/// Both resolver strategies are shared across threads without divergence
#[test]
fn test_concurrent_message_resolution() {
    let structured = MessageResolver::default();
    let stringified = MessageResolver::new(&MessageResolverConfig { stringified: true });
    let event = LogEvent::new(
        "app",
        LogLevel::Info,
        MapMessage::new()
            .with_entry("user", "alice")
            .with_entry("attempts", 3i64),
    );

    let expected_structured = {
        let mut writer = JsonWriter::buffered();
        structured.resolve(&event, &mut writer).unwrap();
        writer.as_str().to_string()
    };
    let expected_stringified = {
        let mut writer = JsonWriter::buffered();
        stringified.resolve(&event, &mut writer).unwrap();
        writer.as_str().to_string()
    };

    thread::scope(|scope| {
        for _ in 0..THREADS {
            scope.spawn(|| {
                for _ in 0..EVENTS_PER_THREAD {
                    let mut writer = JsonWriter::buffered();
                    structured.resolve(&event, &mut writer).unwrap();
                    assert_eq!(writer.as_str(), expected_structured);

                    let mut writer = JsonWriter::buffered();
                    stringified.resolve(&event, &mut writer).unwrap();
                    assert_eq!(writer.as_str(), expected_stringified);
                }
            });
        }
    });

    let value: serde_json::Value = serde_json::from_str(&expected_structured).unwrap();
    assert_eq!(value["user"], "alice");
    assert_eq!(value["attempts"], 3);
}

/// Rendering from threads with distinct names labels each row correctly
#[test]
fn test_captured_thread_names() {
    let layout = HtmlLayout::builder().build();

    thread::scope(|scope| {
        for t in 0..THREADS {
            let layout = &layout;
            thread::Builder::new()
                .name(format!("render-{}", t))
                .spawn_scoped(scope, move || {
                    let event = LogEvent::simple("app", LogLevel::Info, "tick");
                    let html = String::from_utf8(layout.to_bytes(&event)).unwrap();
                    assert!(html.contains(&format!(">render-{}</td>", t)));
                })
                .expect("failed to spawn render thread");
        }
    });
}

/// A megabyte of markup is escaped in full
#[test]
fn test_large_message() {
    let layout = HtmlLayout::builder().build();
    let payload = "<&>".repeat(350_000);
    let event = LogEvent::simple("app", LogLevel::Info, payload);

    let html = String::from_utf8(layout.to_bytes(&event)).unwrap();

    assert_eq!(html.matches("&lt;&amp;&gt;").count(), 350_000);
    assert!(!html.contains("<&>"));
}

/// Wide context maps keep every entry in key order
#[test]
fn test_wide_context_map() {
    let layout = HtmlLayout::builder().build();
    let map: ContextMap = (0..1_000)
        .map(|i| (format!("key{:04}", i), i.to_string()))
        .collect();
    let event = LogEvent::simple("app", LogLevel::Info, "wide").with_context_map(map);

    let html = String::from_utf8(layout.to_bytes(&event)).unwrap();

    assert_eq!(html.matches("MDC: ").count(), 1);
    let first = html.find("key0000=0").unwrap();
    let last = html.find("key0999=999").unwrap();
    assert!(first < last);
}

/// Deep cause chains print one line per cause
#[test]
fn test_deep_cause_chain() {
    let layout = HtmlLayout::builder().build();
    let event = LogEvent::simple("app", LogLevel::Error, "failed")
        .with_thrown(ThrownError::new(layered(200)));

    let html = String::from_utf8(layout.to_bytes(&event)).unwrap();

    assert_eq!(html.matches("Caused by: ").count(), 200);
    assert!(html.contains("layer 200 failed"));
    assert!(html.contains("layer 0 failed"));
}

/// Structured objects with many nested entries resolve to valid JSON
#[test]
fn test_large_structured_object() {
    let mut fields = BTreeMap::new();
    for i in 0..5_000 {
        fields.insert(
            format!("field{}", i),
            FieldValue::Seq(vec![FieldValue::Int(i), FieldValue::from("x")]),
        );
    }
    let event = LogEvent::new("app", LogLevel::Info, ObjectMessage::new(FieldValue::Map(fields)));

    let mut writer = JsonWriter::buffered();
    MessageResolver::default().resolve(&event, &mut writer).unwrap();

    let value: serde_json::Value = serde_json::from_str(writer.as_str()).unwrap();
    assert_eq!(value.as_object().map(|o| o.len()), Some(5_000));
    assert_eq!(value["field42"][0], 42);
}
