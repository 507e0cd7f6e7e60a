//! HTML table layout
//!
//! Renders each event as rows of an HTML table. The header and footer from
//! [`HtmlDocumentFramer`] wrap those rows into a standalone document:
//!
//! ```
//! use rust_logger_layouts::prelude::*;
//!
//! let layout = HtmlLayout::builder()
//!     .title("Service Log")
//!     .location_info(true)
//!     .build();
//!
//! let event = LogEvent::simple("com.example.Service", LogLevel::Warn, "Disk almost full")
//!     .with_location("src/disk.rs", 42, "service::disk");
//!
//! let mut document = layout.header().unwrap_or_default();
//! document.extend(layout.to_bytes(&event));
//! document.extend(layout.footer().unwrap_or_default());
//! assert!(String::from_utf8(document).unwrap().ends_with("</body></html>"));
//! ```

pub mod document;
pub mod escape;
pub mod row;
pub mod throwable;

pub use document::HtmlDocumentFramer;
pub use escape::escape_tags;
pub use row::{HtmlEventRenderer, ROOT_LOGGER_NAME};
pub use throwable::{ThrowableHtmlFormatter, TraceLines};

use super::Layout;
use crate::core::{Charset, LogEvent, SessionStart, TimestampFormat};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TITLE: &str = "Log4J Log Messages";
pub const DEFAULT_CONTENT_TYPE: &str = "text/html";

/// Configuration for [`HtmlLayout`]
///
/// Missing keys take their defaults. An unsupported `charset` is replaced
/// by UTF-8 with a warning.
///
/// ```
/// use rust_logger_layouts::layouts::html::HtmlLayoutConfig;
///
/// let config: HtmlLayoutConfig =
///     serde_json::from_str(r#"{"locationInfo": true, "charset": "ISO-8859-1"}"#).unwrap();
/// assert!(config.location_info);
/// assert_eq!(config.title, "Log4J Log Messages");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HtmlLayoutConfig {
    pub location_info: bool,
    pub title: String,
    pub content_type: String,
    pub charset: Option<String>,
}

impl Default for HtmlLayoutConfig {
    fn default() -> Self {
        Self {
            location_info: false,
            title: DEFAULT_TITLE.to_string(),
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            charset: None,
        }
    }
}

/// Layout writing events as HTML table rows
#[derive(Debug, Clone)]
pub struct HtmlLayout {
    content_type: String,
    charset: Charset,
    renderer: HtmlEventRenderer,
    framer: HtmlDocumentFramer,
}

impl HtmlLayout {
    /// Create a builder for HtmlLayout
    #[must_use]
    pub fn builder() -> HtmlLayoutBuilder {
        HtmlLayoutBuilder::new()
    }

    /// Build a layout from configuration
    pub fn from_config(config: &HtmlLayoutConfig, session_start: SessionStart) -> Self {
        let mut builder = HtmlLayoutBuilder::new()
            .location_info(config.location_info)
            .title(config.title.clone())
            .content_type(config.content_type.clone())
            .session_start(session_start);
        if let Some(charset) = &config.charset {
            builder = builder.charset(charset.clone());
        }
        builder.build()
    }

    pub fn location_info(&self) -> bool {
        self.renderer.location_info()
    }

    pub fn title(&self) -> &str {
        self.framer.title()
    }

    pub fn renderer(&self) -> &HtmlEventRenderer {
        &self.renderer
    }

    pub fn framer(&self) -> &HtmlDocumentFramer {
        &self.framer
    }
}

impl Layout for HtmlLayout {
    fn to_bytes(&self, event: &LogEvent) -> Vec<u8> {
        self.renderer.render(event)
    }

    fn header(&self) -> Option<Vec<u8>> {
        Some(self.framer.header())
    }

    fn footer(&self) -> Option<Vec<u8>> {
        Some(self.framer.footer())
    }

    fn content_type(&self) -> String {
        format!("{}; charset={}", self.content_type, self.charset)
    }

    fn charset(&self) -> Charset {
        self.charset
    }
}

/// Builder for [`HtmlLayout`]
pub struct HtmlLayoutBuilder {
    location_info: bool,
    title: String,
    content_type: String,
    charset: Option<String>,
    session_start: Option<SessionStart>,
    timestamp_format: TimestampFormat,
}

impl HtmlLayoutBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            location_info: false,
            title: DEFAULT_TITLE.to_string(),
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            charset: None,
            session_start: None,
            timestamp_format: TimestampFormat::default(),
        }
    }

    /// Add a File:Line column
    #[must_use = "builder methods return a new value"]
    pub fn location_info(mut self, location_info: bool) -> Self {
        self.location_info = location_info;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Set the output charset by name
    ///
    /// Unsupported names fall back to UTF-8 when the layout is built.
    #[must_use = "builder methods return a new value"]
    pub fn charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }

    /// Set the instant elapsed times are measured from
    ///
    /// Defaults to the moment [`build`](Self::build) is called.
    #[must_use = "builder methods return a new value"]
    pub fn session_start(mut self, session_start: SessionStart) -> Self {
        self.session_start = Some(session_start);
        self
    }

    /// Set the format of the session start time in the header
    ///
    /// An invalid custom pattern falls back to the classic format when the
    /// layout is built.
    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Build the layout
    pub fn build(self) -> HtmlLayout {
        let charset = Charset::resolve(self.charset.as_deref());
        let session_start = self.session_start.unwrap_or_else(SessionStart::now);

        HtmlLayout {
            content_type: self.content_type,
            charset,
            renderer: HtmlEventRenderer::new(self.location_info, session_start, charset),
            framer: HtmlDocumentFramer::new(self.title, self.location_info, charset)
                .with_timestamp_format(self.timestamp_format.resolve()),
        }
    }
}

impl Default for HtmlLayoutBuilder {
    fn default() -> Self {
        Self::new()
    }
}
