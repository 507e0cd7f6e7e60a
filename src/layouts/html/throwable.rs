//! HTML rendering of thrown errors

use super::escape::push_escaped;
use crate::core::{interrupt, LayoutError, Result, ThrownError};
use std::io::{BufRead, Cursor};
use std::panic::{self, AssertUnwindSafe};

/// The lines of a thrown error's textual trace
///
/// Capturing is fallible: [`capture`](Self::capture) reports failures,
/// [`capture_or_empty`](Self::capture_or_empty) turns them into an empty
/// trace so one bad error cannot abort rendering of its event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceLines {
    lines: Vec<String>,
}

impl TraceLines {
    /// Capture the trace of `thrown`
    ///
    /// Fails if the error's `Display` implementation returns an error or
    /// panics.
    pub fn capture(thrown: &ThrownError) -> Result<Self> {
        let mut text = String::new();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            thrown.print_stack_trace(&mut text)
        }));

        match outcome {
            Ok(Ok(())) => Ok(Self::read(Cursor::new(text))),
            Ok(Err(_)) => Err(LayoutError::trace_capture(
                thrown.type_name(),
                "Display implementation returned an error",
            )),
            Err(panic_info) => {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                Err(LayoutError::trace_capture(thrown.type_name(), panic_msg))
            }
        }
    }

    /// Capture the trace of `thrown`, or an empty trace if that fails
    pub fn capture_or_empty(thrown: &ThrownError) -> Self {
        Self::capture(thrown).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "Rendering thrown error without trace");
            Self::default()
        })
    }

    /// Split a trace into lines
    ///
    /// A read error ends the trace with the error's description in place of
    /// the remaining lines. If the read was interrupted, the calling
    /// thread's interrupt flag is set again before returning.
    pub fn read<R: BufRead>(reader: R) -> Self {
        let mut lines = Vec::new();
        for line in reader.lines() {
            match line {
                Ok(line) => lines.push(line),
                Err(err) => {
                    if interrupt::is_interruption(&err) {
                        interrupt::interrupt_current();
                    }
                    lines.push(err.to_string());
                    break;
                }
            }
        }
        Self { lines }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Converts thrown errors into escaped, line-broken HTML
#[derive(Debug, Clone, Copy, Default)]
pub struct ThrowableHtmlFormatter;

impl ThrowableHtmlFormatter {
    /// Marker placed before every trace line except the first
    pub const TRACE_PREFIX: &'static str = "<br>&nbsp;&nbsp;&nbsp;&nbsp;";

    pub fn new() -> Self {
        Self
    }

    /// Append the HTML form of `thrown` to `out`
    pub fn append_html(&self, thrown: &ThrownError, out: &mut String) {
        self.append_lines(&TraceLines::capture_or_empty(thrown), out);
    }

    /// Append already captured trace lines to `out`
    pub fn append_lines(&self, lines: &TraceLines, out: &mut String) {
        for (idx, line) in lines.iter().enumerate() {
            if idx > 0 {
                out.push_str(Self::TRACE_PREFIX);
            }
            push_escaped(out, line);
            out.push('\n');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;
    use std::io::{self, BufReader, Read};

    #[derive(Debug)]
    struct GenericError;

    impl fmt::Display for GenericError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("Map<K, V> lookup failed")
        }
    }

    impl std::error::Error for GenericError {}

    #[derive(Debug)]
    struct BrokenDisplay;

    impl fmt::Display for BrokenDisplay {
        fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    impl std::error::Error for BrokenDisplay {}

    #[derive(Debug)]
    struct PanickingDisplay;

    impl fmt::Display for PanickingDisplay {
        fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
            panic!("display exploded")
        }
    }

    impl std::error::Error for PanickingDisplay {}

    /// Yields its data, then fails every further read with `kind`
    struct CutShortReader {
        data: Cursor<Vec<u8>>,
        kind: io::ErrorKind,
    }

    impl Read for CutShortReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.data.read(buf)? {
                0 => Err(io::Error::new(self.kind, "read timed out")),
                n => Ok(n),
            }
        }
    }

    #[test]
    fn test_first_line_has_no_prefix() {
        let lines = TraceLines::read(Cursor::new("first\nsecond\nthird\n"));
        let mut out = String::new();
        ThrowableHtmlFormatter::new().append_lines(&lines, &mut out);

        assert_eq!(
            out,
            "first\n<br>&nbsp;&nbsp;&nbsp;&nbsp;second\n<br>&nbsp;&nbsp;&nbsp;&nbsp;third\n"
        );
    }

    #[test]
    fn test_lines_are_escaped() {
        let thrown = ThrownError::new(GenericError);
        let mut out = String::new();
        ThrowableHtmlFormatter::new().append_html(&thrown, &mut out);

        assert!(out.contains("Map&lt;K, V&gt; lookup failed"));
        assert!(!out.contains("<K"));
    }

    #[test]
    fn test_display_error_degrades_to_empty() {
        let thrown = ThrownError::new(BrokenDisplay);
        let err = TraceLines::capture(&thrown).unwrap_err();
        assert!(matches!(err, LayoutError::TraceCapture { .. }));
        assert!(TraceLines::capture_or_empty(&thrown).is_empty());
    }

    #[test]
    fn test_display_panic_degrades_to_empty() {
        let thrown = ThrownError::new(PanickingDisplay);
        match TraceLines::capture(&thrown) {
            Err(LayoutError::TraceCapture { message, .. }) => {
                assert_eq!(message, "display exploded")
            }
            other => panic!("Expected trace capture error, got {:?}", other),
        }

        let mut out = String::new();
        ThrowableHtmlFormatter::new().append_html(&thrown, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_interrupted_read_keeps_signal() {
        interrupt::take_interrupted();
        let reader = BufReader::new(CutShortReader {
            data: Cursor::new(b"line one\n".to_vec()),
            kind: io::ErrorKind::TimedOut,
        });

        let lines = TraceLines::read(reader);
        let collected: Vec<&str> = lines.iter().collect();

        assert_eq!(collected, vec!["line one", "read timed out"]);
        assert!(interrupt::take_interrupted());
    }

    #[test]
    fn test_other_read_error_does_not_interrupt() {
        interrupt::take_interrupted();
        let reader = BufReader::new(CutShortReader {
            data: Cursor::new(b"only\n".to_vec()),
            kind: io::ErrorKind::UnexpectedEof,
        });

        let lines = TraceLines::read(reader);
        assert_eq!(lines.len(), 2);
        assert!(!interrupt::is_interrupted());
    }
}
