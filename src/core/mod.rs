//! Core event model and shared primitives

pub mod charset;
pub mod error;
pub mod interrupt;
pub mod log_context;
pub mod log_event;
pub mod log_level;
pub mod message;
pub mod thrown;
pub mod timestamp;

pub use charset::Charset;
pub use error::{LayoutError, Result};
pub use log_context::{ContextMap, ContextStack, FieldValue};
pub use log_event::{LogEvent, SourceLocation};
pub use log_level::LogLevel;
pub use message::{
    MapMessage, Message, MessageVariant, MultiformatMessage, ObjectMessage, ParameterizedMessage,
    SimpleMessage, StringFormattable,
};
pub use thrown::ThrownError;
pub use timestamp::{SessionStart, TimestampFormat};
