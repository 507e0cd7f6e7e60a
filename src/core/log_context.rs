//! Diagnostic context carried by log events
//!
//! This module provides:
//! - `FieldValue`: Structured values for message parameters
//! - `ContextStack`: Nested diagnostic context (NDC)
//! - `ContextMap`: Mapped diagnostic context (MDC)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Value type for structured message parameters
///
/// Scalars, sequences and mappings serialize to their JSON equivalents.
/// Anything else is wrapped in [`FieldValue::Other`] and serialized through
/// its `Display` output.
#[derive(Clone)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Seq(Vec<FieldValue>),
    Map(BTreeMap<String, FieldValue>),
    Other(Arc<dyn fmt::Display + Send + Sync>),
    Null,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Seq(items) => {
                f.write_str("[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            FieldValue::Map(entries) => {
                f.write_str("{")?;
                for (idx, (key, value)) in entries.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}={}", key, value)?;
                }
                f.write_str("}")
            }
            FieldValue::Other(value) => write!(f, "{}", value),
            FieldValue::Null => write!(f, "null"),
        }
    }
}

impl fmt::Debug for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => f.debug_tuple("String").field(s).finish(),
            FieldValue::Int(i) => f.debug_tuple("Int").field(i).finish(),
            FieldValue::Float(fl) => f.debug_tuple("Float").field(fl).finish(),
            FieldValue::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            FieldValue::Seq(items) => f.debug_tuple("Seq").field(items).finish(),
            FieldValue::Map(entries) => f.debug_tuple("Map").field(entries).finish(),
            FieldValue::Other(value) => f.debug_tuple("Other").field(&value.to_string()).finish(),
            FieldValue::Null => f.write_str("Null"),
        }
    }
}

impl FieldValue {
    /// Wrap an arbitrary displayable value
    pub fn other<T: fmt::Display + Send + Sync + 'static>(value: T) -> Self {
        FieldValue::Other(Arc::new(value))
    }

    /// Convert to serde_json::Value for JSON serialization
    ///
    /// Sequences and mappings are converted recursively; `Other` values
    /// fall back to their string form.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            FieldValue::String(s) => serde_json::Value::String(s.clone()),
            FieldValue::Int(i) => serde_json::Value::Number((*i).into()),
            FieldValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            FieldValue::Bool(b) => serde_json::Value::Bool(*b),
            FieldValue::Seq(items) => {
                serde_json::Value::Array(items.iter().map(FieldValue::to_json_value).collect())
            }
            FieldValue::Map(entries) => serde_json::Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json_value()))
                    .collect(),
            ),
            FieldValue::Other(value) => serde_json::Value::String(value.to_string()),
            FieldValue::Null => serde_json::Value::Null,
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(items: Vec<T>) -> Self {
        FieldValue::Seq(items.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, FieldValue>> for FieldValue {
    fn from(entries: BTreeMap<String, FieldValue>) -> Self {
        FieldValue::Map(entries)
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => FieldValue::Null,
            serde_json::Value::Bool(b) => FieldValue::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => FieldValue::Int(i),
                None => n.as_f64().map(FieldValue::Float).unwrap_or(FieldValue::Null),
            },
            serde_json::Value::String(s) => FieldValue::String(s),
            serde_json::Value::Array(items) => {
                FieldValue::Seq(items.into_iter().map(FieldValue::from).collect())
            }
            serde_json::Value::Object(entries) => FieldValue::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, FieldValue::from(v)))
                    .collect(),
            ),
        }
    }
}

/// Nested diagnostic context: an ordered stack of strings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContextStack {
    items: Vec<String>,
}

impl ContextStack {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Push an entry onto the stack
    pub fn with_entry(mut self, entry: impl Into<String>) -> Self {
        self.items.push(entry.into());
        self
    }

    pub fn push(&mut self, entry: impl Into<String>) {
        self.items.push(entry.into());
    }

    pub fn pop(&mut self) -> Option<String> {
        self.items.pop()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl fmt::Display for ContextStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.items.join(", "))
    }
}

impl<S: Into<String>> FromIterator<S> for ContextStack {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Mapped diagnostic context
///
/// Entries are kept sorted by key, so two maps with the same contents
/// always render identically regardless of insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContextMap {
    entries: BTreeMap<String, String>,
}

impl ContextMap {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Add an entry to the map
    pub fn with_entry<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Add an entry to the map (mutable version)
    pub fn insert<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for ContextMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (idx, (key, value)) in self.entries.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        f.write_str("}")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ContextMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
