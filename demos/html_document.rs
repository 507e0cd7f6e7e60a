//! HTML document example
//!
//! Renders a few events into a standalone HTML page and writes it to stdout,
//! then shows the same message resolved as JSON.
//!
//! Run with: cargo run --example html_document > log.html

use rust_logger_layouts::prelude::*;
use std::io::{self, Write};

#[derive(Debug, thiserror::Error)]
#[error("connection to {host} refused")]
struct ConnectError {
    host: String,
    #[source]
    source: io::Error,
}

fn main() -> Result<()> {
    let layout = HtmlLayout::builder()
        .title("Checkout Service")
        .location_info(true)
        .build();

    let events = vec![
        LogEvent::simple("checkout", LogLevel::Debug, "Loading cart")
            .with_location(file!(), line!(), module_path!()),
        LogEvent::new(
            "checkout.payment",
            LogLevel::Info,
            ParameterizedMessage::new("Charged {} for order {}", vec!["12.50 EUR".into(), 4711i64.into()]),
        )
        .with_context_stack(ContextStack::new().with_entry("req-7f3a"))
        .with_context_map(ContextMap::new().with_entry("user", "alice")),
        LogEvent::simple("checkout.inventory", LogLevel::Error, "Stock service unavailable")
            .with_thrown(ThrownError::capture(ConnectError {
                host: "stock.internal:8080".to_string(),
                source: io::Error::new(io::ErrorKind::ConnectionRefused, "os error 111"),
            })),
    ];

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(header) = layout.header() {
        out.write_all(&header)?;
    }
    for event in &events {
        out.write_all(&layout.to_bytes(event))?;
    }
    if let Some(footer) = layout.footer() {
        out.write_all(&footer)?;
    }
    out.flush()?;

    // The same message through the JSON resolver, on stderr
    let resolver = MessageResolver::default();
    let mut writer = JsonWriter::buffered();
    resolver.resolve(&events[1], &mut writer)?;
    eprintln!("{} ({}) -> {}", MessageResolver::name(), layout.content_type(), writer.as_str());

    Ok(())
}
