//! # Rust Logger Layouts
//!
//! Output layouts for the Rust logger system: turn a captured log event into
//! JSON or an HTML table row.
//!
//! ## Features
//!
//! - **Message Resolution**: Emit messages as JSON strings, raw JSON or
//!   structured values depending on their shape
//! - **HTML Tables**: Escaping-safe table rows with context and error rows
//! - **Charsets**: UTF-8, UTF-16, ASCII and Latin-1 output
//! - **Thread Safe**: Layouts hold only immutable configuration

pub mod core;
pub mod json;
pub mod layouts;

pub mod prelude {
    pub use crate::core::{
        Charset, ContextMap, ContextStack, FieldValue, LayoutError, LogEvent, LogLevel,
        MapMessage, Message, MessageVariant, ObjectMessage, ParameterizedMessage, Result,
        SessionStart, SimpleMessage, SourceLocation, ThrownError, TimestampFormat,
    };
    pub use crate::json::{
        EventResolver, JsonValueSink, JsonWriter, MessageResolver, MessageResolverConfig,
    };
    pub use crate::layouts::{HtmlLayout, HtmlLayoutBuilder, HtmlLayoutConfig, Layout};
}

pub use crate::core::{
    Charset, ContextMap, ContextStack, FieldValue, LayoutError, LogEvent, LogLevel, MapMessage,
    Message, MessageVariant, ObjectMessage, ParameterizedMessage, Result, SessionStart,
    SimpleMessage, SourceLocation, ThrownError, TimestampFormat,
};
pub use crate::json::{EventResolver, JsonValueSink, JsonWriter, MessageResolver, MessageResolverConfig};
pub use crate::layouts::{HtmlLayout, HtmlLayoutBuilder, HtmlLayoutConfig, Layout};
