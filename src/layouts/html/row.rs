//! Table rows for a single log event

use super::escape::push_escaped;
use super::throwable::ThrowableHtmlFormatter;
use crate::core::{Charset, LogEvent, LogLevel, SessionStart};
use std::fmt::Write;

const BUF_SIZE: usize = 256;

/// Logger name shown when an event's logger name is empty
pub const ROOT_LOGGER_NAME: &str = "root";

/// Number of table columns for the given location setting
pub fn column_count(location_info: bool) -> usize {
    if location_info {
        6
    } else {
        5
    }
}

/// Renders one event as HTML table rows
///
/// Output is a main row followed by optional context stack, context map
/// and thrown error rows. Every row ends with a newline, and every
/// user-controlled value is escaped.
#[derive(Debug, Clone)]
pub struct HtmlEventRenderer {
    location_info: bool,
    session_start: SessionStart,
    charset: Charset,
    throwable_formatter: ThrowableHtmlFormatter,
}

impl HtmlEventRenderer {
    pub fn new(location_info: bool, session_start: SessionStart, charset: Charset) -> Self {
        Self {
            location_info,
            session_start,
            charset,
            throwable_formatter: ThrowableHtmlFormatter::new(),
        }
    }

    pub fn location_info(&self) -> bool {
        self.location_info
    }

    pub fn session_start(&self) -> SessionStart {
        self.session_start
    }

    /// Render `event` and encode it in the configured charset
    pub fn render(&self, event: &LogEvent) -> Vec<u8> {
        self.charset.encode(&self.render_to_string(event))
    }

    /// Render `event` as text
    pub fn render_to_string(&self, event: &LogEvent) -> String {
        let mut sbuf = String::with_capacity(BUF_SIZE);
        self.append_main_row(event, &mut sbuf);
        self.append_context_rows(event, &mut sbuf);
        if let Some(thrown) = &event.thrown {
            let _ = write!(
                sbuf,
                "<tr><td bgcolor=\"#993300\" style=\"color:White; font-size : xx-small;\" colspan=\"{}\">",
                self.colspan()
            );
            self.throwable_formatter.append_html(thrown, &mut sbuf);
            sbuf.push_str("</td></tr>\n");
        }
        sbuf
    }

    fn colspan(&self) -> usize {
        column_count(self.location_info)
    }

    fn append_main_row(&self, event: &LogEvent, sbuf: &mut String) {
        sbuf.push_str("\n<tr>\n");

        let _ = writeln!(
            sbuf,
            "<td>{}</td>",
            self.session_start.elapsed_millis(event.timestamp_millis)
        );

        sbuf.push_str("<td title=\"");
        push_escaped(sbuf, &event.thread_name);
        sbuf.push_str(" thread\">");
        push_escaped(sbuf, &event.thread_name);
        sbuf.push_str("</td>\n");

        sbuf.push_str("<td title=\"Level\">");
        Self::append_level(event.level, sbuf);
        sbuf.push_str("</td>\n");

        let logger_name = if event.logger_name.is_empty() {
            ROOT_LOGGER_NAME
        } else {
            event.logger_name.as_str()
        };
        sbuf.push_str("<td title=\"");
        push_escaped(sbuf, logger_name);
        sbuf.push_str(" category\">");
        push_escaped(sbuf, logger_name);
        sbuf.push_str("</td>\n");

        if self.location_info {
            sbuf.push_str("<td>");
            match &event.source {
                Some(source) => {
                    push_escaped(sbuf, &source.file);
                    let _ = write!(sbuf, ":{}", source.line);
                }
                None => sbuf.push_str("?:?"),
            }
            sbuf.push_str("</td>\n");
        }

        sbuf.push_str("<td title=\"Message\">");
        push_escaped(sbuf, &event.message().formatted_message());
        sbuf.push_str("</td>\n");
        sbuf.push_str("</tr>\n");
    }

    fn append_level(level: LogLevel, sbuf: &mut String) {
        let name = level.to_str();
        if level == LogLevel::Debug {
            sbuf.push_str("<font color=\"#339933\">");
            push_escaped(sbuf, name);
            sbuf.push_str("</font>");
        } else if level.is_at_least(LogLevel::Warn) {
            sbuf.push_str("<font color=\"#993300\"><strong>");
            push_escaped(sbuf, name);
            sbuf.push_str("</strong></font>");
        } else {
            push_escaped(sbuf, name);
        }
    }

    fn append_context_rows(&self, event: &LogEvent, sbuf: &mut String) {
        if !event.context_stack.is_empty() {
            self.append_context_row(
                "Nested Diagnostic Context",
                "NDC: ",
                &event.context_stack.to_string(),
                sbuf,
            );
        }
        if !event.context_map.is_empty() {
            self.append_context_row(
                "Mapped Diagnostic Context",
                "MDC: ",
                &event.context_map.to_string(),
                sbuf,
            );
        }
    }

    fn append_context_row(&self, title: &str, label: &str, rendered: &str, sbuf: &mut String) {
        let _ = write!(
            sbuf,
            "<tr><td bgcolor=\"#EEEEEE\" style=\"font-size : xx-small;\" colspan=\"{}\" title=\"{}\">",
            self.colspan(),
            title
        );
        sbuf.push_str(label);
        push_escaped(sbuf, rendered);
        sbuf.push_str("</td></tr>\n");
    }
}
