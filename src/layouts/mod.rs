//! Layout implementations

pub mod html;

pub use html::{
    HtmlDocumentFramer, HtmlEventRenderer, HtmlLayout, HtmlLayoutBuilder, HtmlLayoutConfig,
    ThrowableHtmlFormatter,
};

use crate::core::{Charset, LogEvent};

/// Converts log events into bytes for an output sink
pub trait Layout: Send + Sync {
    /// Render one event
    fn to_bytes(&self, event: &LogEvent) -> Vec<u8>;

    /// Bytes written once before the first event, if any
    fn header(&self) -> Option<Vec<u8>> {
        None
    }

    /// Bytes written once after the last event, if any
    fn footer(&self) -> Option<Vec<u8>> {
        None
    }

    fn content_type(&self) -> String;

    fn charset(&self) -> Charset;
}
