//! Error types for the layout system

pub type Result<T> = std::result::Result<T, LayoutError>;

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// IO error raised by an output sink
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error that did not originate from IO
    #[error("JSON error: {0}")]
    JsonError(serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Capturing the textual trace of a thrown error failed
    #[error("Failed to capture trace of {error_type}: {message}")]
    TraceCapture { error_type: String, message: String },
}

impl From<serde_json::Error> for LayoutError {
    /// Sink failures must reach the caller as plain IO errors, so IO-class
    /// JSON errors are unwrapped instead of being reported as JSON errors.
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            LayoutError::IoError(err.into())
        } else {
            LayoutError::JsonError(err)
        }
    }
}

impl LayoutError {
    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LayoutError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a trace capture error
    pub fn trace_capture(error_type: impl Into<String>, message: impl Into<String>) -> Self {
        LayoutError::TraceCapture {
            error_type: error_type.into(),
            message: message.into(),
        }
    }

    /// Returns true when the error came from the underlying output
    pub fn is_io(&self) -> bool {
        matches!(self, LayoutError::IoError(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LayoutError::config("HtmlLayout", "Unknown charset");
        assert!(matches!(err, LayoutError::InvalidConfiguration { .. }));

        let err = LayoutError::trace_capture("io::Error", "formatter failed");
        assert!(matches!(err, LayoutError::TraceCapture { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LayoutError::config("HtmlLayout", "Unknown charset");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for HtmlLayout: Unknown charset"
        );

        let err = LayoutError::trace_capture("io::Error", "formatter failed");
        assert_eq!(
            err.to_string(),
            "Failed to capture trace of io::Error: formatter failed"
        );
    }

    #[test]
    fn test_json_io_error_is_unwrapped() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let json_err = serde_json::Error::io(io_err);
        let err = LayoutError::from(json_err);

        assert!(err.is_io());
        match err {
            LayoutError::IoError(e) => assert_eq!(e.kind(), std::io::ErrorKind::BrokenPipe),
            other => panic!("Expected IO error, got {:?}", other),
        }
    }

    #[test]
    fn test_json_syntax_error_stays_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = LayoutError::from(json_err);
        assert!(matches!(err, LayoutError::JsonError(_)));
    }
}
