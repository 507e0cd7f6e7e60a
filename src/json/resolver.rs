//! Event resolvers for JSON templates

use super::sink::JsonValueSink;
use crate::core::{LogEvent, Message, MessageVariant, MultiformatMessage, Result};
use serde::{Deserialize, Serialize};

/// Writes one JSON value derived from a log event
pub trait EventResolver: Send + Sync {
    fn resolve(&self, event: &LogEvent, sink: &mut dyn JsonValueSink) -> Result<()>;
}

/// Configuration for [`MessageResolver`]
///
/// ```
/// use rust_logger_layouts::json::MessageResolverConfig;
///
/// let config: MessageResolverConfig = serde_json::from_str(r#"{"stringified": true}"#).unwrap();
/// assert!(config.stringified);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageResolverConfig {
    /// Always emit the message as a JSON string
    pub stringified: bool,
}

/// How a [`MessageResolver`] emits messages, fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    Stringified,
    Structured,
}

/// Resolves an event's message into JSON
///
/// In stringified mode the message is always written as a JSON string. In
/// structured mode the message is classified with
/// [`MessageVariant::classify`] and:
///
/// - simple messages are written as strings
/// - multiformat messages supporting `JSON` are written as raw JSON; the
///   rest fall back to their text as a string
/// - object messages have their parameter written as a structured value
/// - anything else is written as a string
#[derive(Debug, Clone)]
pub struct MessageResolver {
    strategy: Strategy,
}

impl MessageResolver {
    const JSON_FORMAT: &'static str = "JSON";

    pub fn new(config: &MessageResolverConfig) -> Self {
        let strategy = if config.stringified {
            Strategy::Stringified
        } else {
            Strategy::Structured
        };
        Self { strategy }
    }

    /// Template name of this resolver
    pub fn name() -> &'static str {
        "message"
    }

    pub fn is_stringified(&self) -> bool {
        self.strategy == Strategy::Stringified
    }

    fn resolve_string(message: &dyn Message, sink: &mut dyn JsonValueSink) -> Result<()> {
        match message.as_formattable() {
            Some(formattable) => sink.write_formattable(formattable),
            None => sink.write_string(&message.formatted_message()),
        }
    }

    fn resolve_structured(message: &dyn Message, sink: &mut dyn JsonValueSink) -> Result<()> {
        let variant = MessageVariant::classify(message);
        tracing::trace!(variant = variant.name(), "Resolving structured message");
        match variant {
            MessageVariant::Simple(simple) => sink.write_string(simple.text()),
            MessageVariant::Multiformat(multiformat) => {
                Self::resolve_multiformat(message, multiformat, sink)
            }
            MessageVariant::Object(object) => sink.write_value(object.parameter()),
            MessageVariant::Generic(generic) => Self::resolve_string(generic, sink),
        }
    }

    fn resolve_multiformat(
        message: &dyn Message,
        multiformat: &dyn MultiformatMessage,
        sink: &mut dyn JsonValueSink,
    ) -> Result<()> {
        if multiformat.supports_format(Self::JSON_FORMAT) {
            let json = multiformat.format_as(Self::JSON_FORMAT);
            sink.write_raw_string(&json)
        } else {
            // no JSON form, fall back to the original message's text
            Self::resolve_string(message, sink)
        }
    }
}

impl Default for MessageResolver {
    fn default() -> Self {
        Self::new(&MessageResolverConfig::default())
    }
}

impl EventResolver for MessageResolver {
    fn resolve(&self, event: &LogEvent, sink: &mut dyn JsonValueSink) -> Result<()> {
        let message = event.message();
        match self.strategy {
            Strategy::Stringified => Self::resolve_string(message, sink),
            Strategy::Structured => Self::resolve_structured(message, sink),
        }
    }
}
