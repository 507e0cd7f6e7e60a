//! Criterion benchmarks for rust_logger_layouts

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_logger_layouts::prelude::*;

fn plain_event() -> LogEvent {
    LogEvent::simple("com.example.Service", LogLevel::Info, "Request handled in 12ms")
        .with_thread_name("main")
        .with_timestamp_millis(1_700_000_000_000)
}

fn rich_event() -> LogEvent {
    plain_event()
        .with_context_stack(ContextStack::new().with_entry("req-42").with_entry("<tenant>"))
        .with_context_map(
            ContextMap::new()
                .with_entry("user", "alice")
                .with_entry("region", "eu-west"),
        )
        .with_location("src/service.rs", 128, "service")
        .with_thrown(ThrownError::new(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "upstream refused",
        )))
}

// ============================================================================
// Message Resolution Benchmarks
// ============================================================================

fn bench_message_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("message_resolution");
    group.throughput(Throughput::Elements(1));

    let events = [
        ("simple", plain_event()),
        (
            "parameterized",
            LogEvent::new(
                "app",
                LogLevel::Info,
                ParameterizedMessage::new("user {} logged in from {}", vec!["alice".into(), "10.0.0.1".into()]),
            ),
        ),
        (
            "map",
            LogEvent::new(
                "app",
                LogLevel::Info,
                MapMessage::new().with_entry("user", "alice").with_entry("count", 3i64),
            ),
        ),
        (
            "object",
            LogEvent::new("app", LogLevel::Info, ObjectMessage::new(vec![1i64, 2, 3])),
        ),
    ];

    for stringified in [false, true] {
        let resolver = MessageResolver::new(&MessageResolverConfig { stringified });
        let mode = if stringified { "stringified" } else { "structured" };
        for (name, event) in &events {
            group.bench_with_input(BenchmarkId::new(mode, name), event, |b, event| {
                b.iter(|| {
                    let mut writer = JsonWriter::new(Vec::with_capacity(256));
                    resolver.resolve(black_box(event), &mut writer).unwrap();
                    black_box(writer.into_inner())
                });
            });
        }
    }

    group.finish();
}

// ============================================================================
// HTML Rendering Benchmarks
// ============================================================================

fn bench_html_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("html_rendering");
    group.throughput(Throughput::Elements(1));

    let layout = HtmlLayout::builder()
        .location_info(true)
        .session_start(SessionStart::from_millis(1_699_999_999_000))
        .build();
    let plain = plain_event();
    let rich = rich_event();

    group.bench_function("plain_row", |b| {
        b.iter(|| black_box(layout.to_bytes(black_box(&plain))));
    });

    group.bench_function("rich_row", |b| {
        b.iter(|| black_box(layout.to_bytes(black_box(&rich))));
    });

    group.bench_function("header", |b| {
        b.iter(|| black_box(layout.header()));
    });

    group.finish();
}

fn bench_charset_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("charset_encoding");
    let event = rich_event();

    for charset in ["UTF-8", "UTF-16LE", "ISO-8859-1", "US-ASCII"] {
        let layout = HtmlLayout::builder().charset(charset).build();
        group.bench_function(charset, |b| {
            b.iter(|| black_box(layout.to_bytes(black_box(&event))));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_message_resolution,
    bench_html_rendering,
    bench_charset_encoding
);

criterion_main!(benches);
