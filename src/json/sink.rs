//! JSON value sink contract and its `serde_json` implementation

use crate::core::{FieldValue, Result, StringFormattable};
use std::io::Write;

/// Destination for JSON values produced by resolvers
///
/// Every method writes exactly one complete JSON value. Errors from the
/// underlying output are returned as-is.
pub trait JsonValueSink {
    /// Write `value` as an escaped JSON string
    fn write_string(&mut self, value: &str) -> Result<()>;

    /// Write a formattable value as an escaped JSON string
    ///
    /// The default formats into a fresh buffer and calls
    /// [`write_string`](Self::write_string).
    fn write_formattable(&mut self, value: &dyn StringFormattable) -> Result<()> {
        let mut buffer = String::new();
        value.format_to(&mut buffer);
        self.write_string(&buffer)
    }

    /// Write an already-valid JSON fragment without re-escaping it
    fn write_raw_string(&mut self, json: &str) -> Result<()>;

    /// Write an arbitrary structured value
    ///
    /// Scalars, sequences and mappings map to their JSON equivalents;
    /// other values are written as strings.
    fn write_value(&mut self, value: &FieldValue) -> Result<()>;
}

/// [`JsonValueSink`] writing compact JSON to an `io::Write`
///
/// # Example
///
/// ```
/// use rust_logger_layouts::json::{JsonValueSink, JsonWriter};
///
/// let mut writer = JsonWriter::new(Vec::new());
/// writer.write_string("say \"hi\"").unwrap();
/// assert_eq!(writer.into_inner(), br#""say \"hi\"""#.to_vec());
/// ```
pub struct JsonWriter<W: Write> {
    writer: W,
    scratch: String,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            scratch: String::new(),
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl JsonWriter<Vec<u8>> {
    /// Collect output into a byte buffer
    pub fn buffered() -> Self {
        Self::new(Vec::new())
    }

    /// The output written so far, as text
    pub fn as_str(&self) -> &str {
        // only serde_json output and raw fragments handed in as &str reach the buffer
        std::str::from_utf8(&self.writer).unwrap_or_default()
    }
}

impl<W: Write> JsonValueSink for JsonWriter<W> {
    fn write_string(&mut self, value: &str) -> Result<()> {
        serde_json::to_writer(&mut self.writer, value)?;
        Ok(())
    }

    fn write_formattable(&mut self, value: &dyn StringFormattable) -> Result<()> {
        self.scratch.clear();
        value.format_to(&mut self.scratch);
        serde_json::to_writer(&mut self.writer, self.scratch.as_str())?;
        Ok(())
    }

    fn write_raw_string(&mut self, json: &str) -> Result<()> {
        self.writer.write_all(json.as_bytes())?;
        Ok(())
    }

    fn write_value(&mut self, value: &FieldValue) -> Result<()> {
        serde_json::to_writer(&mut self.writer, &value.to_json_value())?;
        Ok(())
    }
}
