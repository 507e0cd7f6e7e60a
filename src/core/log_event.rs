//! Log event structure

use super::log_context::{ContextMap, ContextStack};
use super::log_level::LogLevel;
use super::message::{Message, SimpleMessage};
use super::thrown::ThrownError;
use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;

// Thread-local cache for the thread label to avoid repeated allocations
thread_local! {
    static THREAD_LABEL_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Get the current thread's name, or its id when unnamed, caching on first access
fn current_thread_label() -> String {
    THREAD_LABEL_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| {
                let thread = std::thread::current();
                thread
                    .name()
                    .map(String::from)
                    .unwrap_or_else(|| format!("{:?}", thread.id()))
            })
            .clone()
    })
}

/// Source code location of the log call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
    pub module_path: Option<String>,
}

impl SourceLocation {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
            module_path: None,
        }
    }

    pub fn with_module_path(mut self, module_path: impl Into<String>) -> Self {
        self.module_path = Some(module_path.into());
        self
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Everything captured by one log call
///
/// Events are read-only once built; layouts only borrow them.
#[derive(Debug, Clone)]
pub struct LogEvent {
    pub logger_name: String,
    pub level: LogLevel,
    pub message: Arc<dyn Message>,
    pub thread_name: String,
    /// Milliseconds since the Unix epoch
    pub timestamp_millis: i64,
    pub context_stack: ContextStack,
    pub context_map: ContextMap,
    pub thrown: Option<ThrownError>,
    pub source: Option<SourceLocation>,
}

impl LogEvent {
    pub fn new<M>(logger_name: impl Into<String>, level: LogLevel, message: M) -> Self
    where
        M: Message + 'static,
    {
        Self::from_shared(logger_name, level, Arc::new(message))
    }

    /// Create an event with a plain text message
    pub fn simple(logger_name: impl Into<String>, level: LogLevel, text: impl Into<String>) -> Self {
        Self::new(logger_name, level, SimpleMessage::new(text))
    }

    pub fn from_shared(
        logger_name: impl Into<String>,
        level: LogLevel,
        message: Arc<dyn Message>,
    ) -> Self {
        Self {
            logger_name: logger_name.into(),
            level,
            message,
            thread_name: current_thread_label(),
            timestamp_millis: chrono::Utc::now().timestamp_millis(),
            context_stack: ContextStack::new(),
            context_map: ContextMap::new(),
            thrown: None,
            source: None,
        }
    }

    pub fn message(&self) -> &dyn Message {
        self.message.as_ref()
    }

    pub fn with_thread_name(mut self, thread_name: impl Into<String>) -> Self {
        self.thread_name = thread_name.into();
        self
    }

    pub fn with_timestamp_millis(mut self, timestamp_millis: i64) -> Self {
        self.timestamp_millis = timestamp_millis;
        self
    }

    pub fn with_context_stack(mut self, context_stack: ContextStack) -> Self {
        self.context_stack = context_stack;
        self
    }

    pub fn with_context_map(mut self, context_map: ContextMap) -> Self {
        self.context_map = context_map;
        self
    }

    pub fn with_thrown(mut self, thrown: ThrownError) -> Self {
        self.thrown = Some(thrown);
        self
    }

    pub fn with_location(mut self, file: &str, line: u32, module_path: &str) -> Self {
        self.source = Some(SourceLocation::new(file, line).with_module_path(module_path));
        self
    }

    pub fn with_source(mut self, source: SourceLocation) -> Self {
        self.source = Some(source);
        self
    }
}
