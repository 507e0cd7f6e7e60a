//! Timestamp handling for layouts
//!
//! - `TimestampFormat`: how wall-clock times are printed in document headers
//! - `SessionStart`: the reference instant elapsed times are measured from

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

const CLASSIC_PATTERN: &str = "%a %b %d %H:%M:%S UTC %Y";

/// Timestamp format options
///
/// # Examples
///
/// ```
/// use rust_logger_layouts::core::TimestampFormat;
/// use chrono::Utc;
///
/// let format = TimestampFormat::Iso8601;
/// let timestamp = format.format(&Utc::now());
/// assert!(timestamp.ends_with('Z'));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// Human-readable date: `Wed Jan 08 10:30:45 UTC 2025`
    #[default]
    Classic,

    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    Iso8601,

    /// RFC 3339 format: `2025-01-08T10:30:45.123+00:00`
    Rfc3339,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_logger_layouts::core::TimestampFormat;
    ///
    /// // Apache log format
    /// let format = TimestampFormat::Custom("%d/%b/%Y:%H:%M:%S %z".to_string());
    /// ```
    Custom(String),
}

impl TimestampFormat {
    /// Format `datetime`
    ///
    /// A custom pattern chrono cannot render produces the classic form.
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Classic => datetime.format(CLASSIC_PATTERN).to_string(),
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => {
                let mut out = String::new();
                match write!(out, "{}", datetime.format(format_str)) {
                    Ok(()) => out,
                    Err(_) => datetime.format(CLASSIC_PATTERN).to_string(),
                }
            }
        }
    }

    /// Returns false for a custom pattern with unknown or malformed specifiers
    pub fn is_valid(&self) -> bool {
        match self {
            TimestampFormat::Custom(format_str) => {
                !StrftimeItems::new(format_str).any(|item| matches!(item, Item::Error))
            }
            _ => true,
        }
    }

    /// Replace an invalid custom pattern with [`TimestampFormat::Classic`]
    ///
    /// The replacement is reported as a warning; it never fails.
    pub fn resolve(self) -> Self {
        if self.is_valid() {
            return self;
        }
        tracing::warn!(
            format = ?self,
            "Timestamp format {:?} is not valid for layout, using classic format",
            self
        );
        TimestampFormat::Classic
    }
}

/// Reference instant for per-event elapsed times
///
/// Captured once when the owning logging context starts and passed to the
/// layouts that need it. Elapsed times are only meaningful within one
/// session; they restart from zero after a process restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SessionStart {
    millis: i64,
}

impl SessionStart {
    /// Start a session now
    pub fn now() -> Self {
        Self {
            millis: Utc::now().timestamp_millis(),
        }
    }

    /// Start a session at a fixed instant, in milliseconds since the Unix epoch
    pub const fn from_millis(millis: i64) -> Self {
        Self { millis }
    }

    pub const fn as_millis(&self) -> i64 {
        self.millis
    }

    /// Milliseconds between session start and `timestamp_millis`
    ///
    /// Negative if the event predates the session.
    #[inline]
    pub fn elapsed_millis(&self, timestamp_millis: i64) -> i64 {
        timestamp_millis.saturating_sub(self.millis)
    }
}

impl Default for SessionStart {
    fn default() -> Self {
        Self::now()
    }
}
