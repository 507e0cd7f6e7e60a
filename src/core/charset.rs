//! Output character sets
//!
//! Layouts produce text and hand it to sinks as bytes. The charset decides
//! that final encoding. Characters a charset cannot represent are written
//! as `?`.

use super::error::LayoutError;
use std::fmt;
use std::str::FromStr;

const REPLACEMENT: u8 = b'?';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Charset {
    #[default]
    Utf8,
    Utf16Be,
    Utf16Le,
    UsAscii,
    Iso8859_1,
}

impl Charset {
    /// Canonical name, as used in `Content-Type` headers
    pub fn name(&self) -> &'static str {
        match self {
            Charset::Utf8 => "UTF-8",
            Charset::Utf16Be => "UTF-16BE",
            Charset::Utf16Le => "UTF-16LE",
            Charset::UsAscii => "US-ASCII",
            Charset::Iso8859_1 => "ISO-8859-1",
        }
    }

    /// Look up a charset by name or alias, ignoring case
    pub fn for_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_ascii_uppercase().replace('_', "-");
        match normalized.as_str() {
            "UTF-8" | "UTF8" => Some(Charset::Utf8),
            // output is written in fragments, so no byte order mark is emitted
            "UTF-16" | "UTF16" | "UTF-16BE" | "UTF16BE" => Some(Charset::Utf16Be),
            "UTF-16LE" | "UTF16LE" => Some(Charset::Utf16Le),
            "US-ASCII" | "ASCII" | "ISO646-US" => Some(Charset::UsAscii),
            "ISO-8859-1" | "ISO8859-1" | "LATIN1" | "L1" => Some(Charset::Iso8859_1),
            _ => None,
        }
    }

    /// Resolve a configured charset name, falling back to UTF-8
    ///
    /// An unsupported name is reported as a warning; it never fails.
    pub fn resolve(name: Option<&str>) -> Self {
        match name {
            None => Charset::default(),
            Some(name) => Self::for_name(name).unwrap_or_else(|| {
                let fallback = Charset::default();
                tracing::warn!(
                    charset = name,
                    fallback = fallback.name(),
                    "Charset {} is not supported for layout, using {}",
                    name,
                    fallback.name()
                );
                fallback
            }),
        }
    }

    /// Encode `text` into a fresh byte buffer
    pub fn encode(&self, text: &str) -> Vec<u8> {
        match self {
            Charset::Utf8 => text.as_bytes().to_vec(),
            Charset::Utf16Be => text.encode_utf16().flat_map(u16::to_be_bytes).collect(),
            Charset::Utf16Le => text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
            Charset::UsAscii => text
                .chars()
                .map(|c| if c.is_ascii() { c as u8 } else { REPLACEMENT })
                .collect(),
            Charset::Iso8859_1 => text
                .chars()
                .map(|c| u8::try_from(u32::from(c)).unwrap_or(REPLACEMENT))
                .collect(),
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Strict parsing; unlike [`Charset::resolve`] an unknown name is an error
impl FromStr for Charset {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::for_name(s)
            .ok_or_else(|| LayoutError::config("charset", format!("Unsupported charset: '{}'", s)))
    }
}
