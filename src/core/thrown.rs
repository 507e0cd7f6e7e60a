//! Captured errors attached to log events

use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error;
use std::fmt::{self, Write};
use std::sync::Arc;

/// An error captured at the log call site
///
/// Holds the error itself, its type name, and optionally a backtrace. The
/// textual trace produced by [`print_stack_trace`](Self::print_stack_trace)
/// has the shape:
///
/// ```text
/// my_crate::DbError: query failed
///     at my_crate::db::query(./src/db.rs:42:9)
/// Caused by: connection refused
/// ```
#[derive(Clone)]
pub struct ThrownError {
    type_name: &'static str,
    error: Arc<dyn Error + Send + Sync>,
    backtrace: Option<Arc<Backtrace>>,
}

impl ThrownError {
    pub fn new<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self {
            type_name: std::any::type_name::<E>(),
            error: Arc::new(error),
            backtrace: None,
        }
    }

    /// Capture the current backtrace along with the error
    ///
    /// Frames are only recorded when `RUST_BACKTRACE` or `RUST_LIB_BACKTRACE`
    /// enables them.
    pub fn capture<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self::new(error).with_backtrace(Backtrace::capture())
    }

    pub fn with_backtrace(mut self, backtrace: Backtrace) -> Self {
        self.backtrace = Some(Arc::new(backtrace));
        self
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn error(&self) -> &(dyn Error + Send + Sync + 'static) {
        self.error.as_ref()
    }

    pub fn backtrace(&self) -> Option<&Backtrace> {
        self.backtrace.as_deref()
    }

    /// Write the full textual trace to `out`
    ///
    /// Fails if the error's own `Display` implementation fails.
    pub fn print_stack_trace(&self, out: &mut dyn Write) -> fmt::Result {
        writeln!(out, "{}: {}", self.type_name, self.error)?;

        if let Some(backtrace) = self.backtrace() {
            if backtrace.status() == BacktraceStatus::Captured {
                for frame in frame_entries(&backtrace.to_string()) {
                    writeln!(out, "    at {}", frame)?;
                }
            }
        }

        let mut source = self.error.source();
        while let Some(cause) = source {
            writeln!(out, "Caused by: {}", cause)?;
            source = cause.source();
        }
        Ok(())
    }
}

/// Collapse a rendered `Backtrace` into one `symbol(file:line)` entry per frame
///
/// The rendering puts each symbol, prefixed by its frame index, on one line
/// and its location, prefixed by `at `, on the next. Inlined symbols carry
/// no index.
fn frame_entries(rendered: &str) -> Vec<String> {
    let mut entries = Vec::new();
    let mut pending: Option<&str> = None;

    for line in rendered.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(location) = line.strip_prefix("at ") {
            match pending.take() {
                Some(symbol) => entries.push(format!("{}({})", symbol, location)),
                None => entries.push(location.to_string()),
            }
        } else if let Some(symbol) = pending.replace(strip_frame_index(line)) {
            entries.push(symbol.to_string());
        }
    }
    if let Some(symbol) = pending {
        entries.push(symbol.to_string());
    }
    entries
}

fn strip_frame_index(line: &str) -> &str {
    match line.split_once(": ") {
        Some((index, symbol)) if !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()) => {
            symbol
        }
        _ => line,
    }
}

impl fmt::Debug for ThrownError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThrownError")
            .field("type_name", &self.type_name)
            .field("error", &self.error)
            .field("has_backtrace", &self.backtrace.is_some())
            .finish()
    }
}

impl fmt::Display for ThrownError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.type_name, self.error)
    }
}
