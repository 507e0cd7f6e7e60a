//! Message payloads and their variant classification
//!
//! A log message is any type implementing [`Message`]. Optional
//! capabilities are exposed through the `as_*` probes, which default to
//! `None`. [`MessageVariant::classify`] turns those probes into exactly one
//! variant using a fixed priority order:
//!
//! 1. [`MessageVariant::Simple`]
//! 2. [`MessageVariant::Multiformat`]
//! 3. [`MessageVariant::Object`]
//! 4. [`MessageVariant::Generic`]

use super::log_context::FieldValue;
use std::collections::BTreeMap;
use std::fmt;

/// A log message payload
pub trait Message: fmt::Debug + Send + Sync {
    /// The message rendered as plain text
    fn formatted_message(&self) -> String;

    /// Direct formatting into a caller-owned buffer, if supported
    fn as_formattable(&self) -> Option<&dyn StringFormattable> {
        None
    }

    fn as_simple(&self) -> Option<&SimpleMessage> {
        None
    }

    fn as_multiformat(&self) -> Option<&dyn MultiformatMessage> {
        None
    }

    fn as_object(&self) -> Option<&ObjectMessage> {
        None
    }
}

/// Messages that can append their text to an existing buffer
pub trait StringFormattable {
    fn format_to(&self, buffer: &mut String);
}

/// Messages that can render themselves in more than one format
pub trait MultiformatMessage: Message {
    /// Names of the formats this message can produce, e.g. `["XML", "JSON"]`
    fn supported_formats(&self) -> Vec<&str>;

    /// Render the message in `format`
    ///
    /// Callers only pass names returned by [`supported_formats`]; other
    /// names fall back to the plain text form.
    ///
    /// [`supported_formats`]: MultiformatMessage::supported_formats
    fn format_as(&self, format: &str) -> String;

    /// Case-insensitive check for a supported format
    fn supports_format(&self, format: &str) -> bool {
        self.supported_formats()
            .iter()
            .any(|supported| supported.eq_ignore_ascii_case(format))
    }
}

/// The single classification a message resolves to
#[derive(Debug, Clone, Copy)]
pub enum MessageVariant<'a> {
    Simple(&'a SimpleMessage),
    Multiformat(&'a dyn MultiformatMessage),
    Object(&'a ObjectMessage),
    Generic(&'a dyn Message),
}

impl<'a> MessageVariant<'a> {
    /// Classify a message; the first matching capability wins
    pub fn classify(message: &'a dyn Message) -> Self {
        if let Some(simple) = message.as_simple() {
            return MessageVariant::Simple(simple);
        }
        if let Some(multiformat) = message.as_multiformat() {
            return MessageVariant::Multiformat(multiformat);
        }
        if let Some(object) = message.as_object() {
            return MessageVariant::Object(object);
        }
        MessageVariant::Generic(message)
    }

    pub fn name(&self) -> &'static str {
        match self {
            MessageVariant::Simple(_) => "simple",
            MessageVariant::Multiformat(_) => "multiformat",
            MessageVariant::Object(_) => "object",
            MessageVariant::Generic(_) => "generic",
        }
    }
}

/// A message that is just a string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleMessage {
    text: String,
}

impl SimpleMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Message for SimpleMessage {
    fn formatted_message(&self) -> String {
        self.text.clone()
    }

    fn as_formattable(&self) -> Option<&dyn StringFormattable> {
        Some(self)
    }

    fn as_simple(&self) -> Option<&SimpleMessage> {
        Some(self)
    }
}

impl StringFormattable for SimpleMessage {
    fn format_to(&self, buffer: &mut String) {
        buffer.push_str(&self.text);
    }
}

impl From<&str> for SimpleMessage {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for SimpleMessage {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

/// A message wrapping one structured parameter
#[derive(Debug, Clone)]
pub struct ObjectMessage {
    parameter: FieldValue,
}

impl ObjectMessage {
    pub fn new(parameter: impl Into<FieldValue>) -> Self {
        Self {
            parameter: parameter.into(),
        }
    }

    pub fn parameter(&self) -> &FieldValue {
        &self.parameter
    }
}

impl Message for ObjectMessage {
    fn formatted_message(&self) -> String {
        self.parameter.to_string()
    }

    fn as_object(&self) -> Option<&ObjectMessage> {
        Some(self)
    }
}

/// A pattern with `{}` placeholders filled from arguments
///
/// Placeholders without a matching argument are kept verbatim, and extra
/// arguments are ignored. A backslash before `{}` escapes the placeholder.
///
/// # Example
///
/// ```
/// use rust_logger_layouts::core::{Message, ParameterizedMessage};
///
/// let message = ParameterizedMessage::new("User {} logged in from {}", vec!["alice".into(), "10.0.0.1".into()]);
/// assert_eq!(message.formatted_message(), "User alice logged in from 10.0.0.1");
/// ```
#[derive(Debug, Clone)]
pub struct ParameterizedMessage {
    pattern: String,
    arguments: Vec<FieldValue>,
}

impl ParameterizedMessage {
    pub fn new(pattern: impl Into<String>, arguments: Vec<FieldValue>) -> Self {
        Self {
            pattern: pattern.into(),
            arguments,
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn arguments(&self) -> &[FieldValue] {
        &self.arguments
    }
}

impl Message for ParameterizedMessage {
    fn formatted_message(&self) -> String {
        let mut buffer = String::with_capacity(self.pattern.len());
        self.format_to(&mut buffer);
        buffer
    }

    fn as_formattable(&self) -> Option<&dyn StringFormattable> {
        Some(self)
    }
}

impl StringFormattable for ParameterizedMessage {
    fn format_to(&self, buffer: &mut String) {
        use std::fmt::Write;

        let mut args = self.arguments.iter();
        let mut chars = self.pattern.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\\' if chars.peek() == Some(&'{') => {
                    // escaped placeholder, emit the brace literally
                    if let Some(brace) = chars.next() {
                        buffer.push(brace);
                    }
                }
                '{' if chars.peek() == Some(&'}') => {
                    chars.next();
                    match args.next() {
                        Some(arg) => {
                            let _ = write!(buffer, "{}", arg);
                        }
                        None => buffer.push_str("{}"),
                    }
                }
                _ => buffer.push(c),
            }
        }
    }
}

/// Key-value message that renders as text, JSON or XML
#[derive(Debug, Clone, Default)]
pub struct MapMessage {
    entries: BTreeMap<String, FieldValue>,
}

impl MapMessage {
    pub const FORMATS: [&'static str; 2] = ["JSON", "XML"];

    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Add an entry to the message
    pub fn with_entry<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn as_json(&self) -> String {
        let object: serde_json::Map<String, serde_json::Value> = self
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json_value()))
            .collect();
        serde_json::Value::Object(object).to_string()
    }

    fn as_xml(&self) -> String {
        let mut out = String::from("<Map>\n");
        for (key, value) in &self.entries {
            out.push_str("  <Entry key=\"");
            push_xml_escaped(&mut out, key);
            out.push_str("\">");
            push_xml_escaped(&mut out, &value.to_string());
            out.push_str("</Entry>\n");
        }
        out.push_str("</Map>");
        out
    }
}

fn push_xml_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
}

impl Message for MapMessage {
    fn formatted_message(&self) -> String {
        let mut buffer = String::new();
        self.format_to(&mut buffer);
        buffer
    }

    fn as_formattable(&self) -> Option<&dyn StringFormattable> {
        Some(self)
    }

    fn as_multiformat(&self) -> Option<&dyn MultiformatMessage> {
        Some(self)
    }
}

impl StringFormattable for MapMessage {
    fn format_to(&self, buffer: &mut String) {
        use std::fmt::Write;

        for (idx, (key, value)) in self.entries.iter().enumerate() {
            if idx > 0 {
                buffer.push(' ');
            }
            let _ = write!(buffer, "{}=\"{}\"", key, value);
        }
    }
}

impl MultiformatMessage for MapMessage {
    fn supported_formats(&self) -> Vec<&str> {
        Self::FORMATS.to_vec()
    }

    fn format_as(&self, format: &str) -> String {
        if format.eq_ignore_ascii_case("JSON") {
            self.as_json()
        } else if format.eq_ignore_ascii_case("XML") {
            self.as_xml()
        } else {
            self.formatted_message()
        }
    }
}

impl FromIterator<(String, FieldValue)> for MapMessage {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct PlainMessage(&'static str);

    impl Message for PlainMessage {
        fn formatted_message(&self) -> String {
            self.0.to_string()
        }
    }

    /// Claims every capability, to check that priority order decides
    #[derive(Debug)]
    struct EverythingMessage {
        simple: SimpleMessage,
        object: ObjectMessage,
    }

    impl Message for EverythingMessage {
        fn formatted_message(&self) -> String {
            "everything".to_string()
        }

        fn as_simple(&self) -> Option<&SimpleMessage> {
            Some(&self.simple)
        }

        fn as_multiformat(&self) -> Option<&dyn MultiformatMessage> {
            Some(self)
        }

        fn as_object(&self) -> Option<&ObjectMessage> {
            Some(&self.object)
        }
    }

    impl MultiformatMessage for EverythingMessage {
        fn supported_formats(&self) -> Vec<&str> {
            vec!["JSON"]
        }

        fn format_as(&self, _format: &str) -> String {
            "{}".to_string()
        }
    }

    #[test]
    fn test_classify_each_variant() {
        let simple = SimpleMessage::new("hello");
        let map = MapMessage::new().with_entry("a", 1);
        let object = ObjectMessage::new(42);
        let plain = PlainMessage("plain");

        assert_eq!(MessageVariant::classify(&simple).name(), "simple");
        assert_eq!(MessageVariant::classify(&map).name(), "multiformat");
        assert_eq!(MessageVariant::classify(&object).name(), "object");
        assert_eq!(MessageVariant::classify(&plain).name(), "generic");
    }

    #[test]
    fn test_classify_priority_order() {
        let everything = EverythingMessage {
            simple: SimpleMessage::new("first"),
            object: ObjectMessage::new("third"),
        };
        match MessageVariant::classify(&everything) {
            MessageVariant::Simple(simple) => assert_eq!(simple.text(), "first"),
            other => panic!("Expected simple variant, got {}", other.name()),
        }
    }

    #[test]
    fn test_parameterized_substitution() {
        let message = ParameterizedMessage::new("{} + {} = {}", vec![1.into(), 2.into()]);
        assert_eq!(message.formatted_message(), "1 + 2 = {}");

        let escaped = ParameterizedMessage::new("literal \\{} then {}", vec!["x".into()]);
        assert_eq!(escaped.formatted_message(), "literal {} then x");
    }

    #[test]
    fn test_map_message_formats() {
        let message = MapMessage::new()
            .with_entry("user", "alice")
            .with_entry("count", 3);

        assert!(message.supports_format("json"));
        assert!(!message.supports_format("yaml"));
        assert_eq!(message.formatted_message(), "count=\"3\" user=\"alice\"");
        assert_eq!(message.format_as("JSON"), r#"{"count":3,"user":"alice"}"#);
        assert!(message.format_as("XML").contains("<Entry key=\"user\">alice</Entry>"));
    }

    #[test]
    fn test_format_to_appends() {
        let message = SimpleMessage::new("world");
        let mut buffer = String::from("hello ");
        message.format_to(&mut buffer);
        assert_eq!(buffer, "hello world");
    }
}
