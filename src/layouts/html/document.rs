//! Document header and footer around the event rows

use super::escape::push_escaped;
use crate::core::{Charset, TimestampFormat};
use chrono::{DateTime, Utc};

/// Produces the bytes that frame a stream of event rows
///
/// `header() + rows + footer()` forms one complete HTML document for any
/// sequence of rows produced by [`HtmlEventRenderer`](super::HtmlEventRenderer)
/// with the same `location_info` setting.
#[derive(Debug, Clone)]
pub struct HtmlDocumentFramer {
    title: String,
    location_info: bool,
    charset: Charset,
    timestamp_format: TimestampFormat,
}

impl HtmlDocumentFramer {
    pub fn new(title: impl Into<String>, location_info: bool, charset: Charset) -> Self {
        Self {
            title: title.into(),
            location_info,
            charset,
            timestamp_format: TimestampFormat::default(),
        }
    }

    /// Set the format of the session start time shown in the header
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Header bytes, stamped with the current time
    pub fn header(&self) -> Vec<u8> {
        self.header_at(&Utc::now())
    }

    /// Header bytes, stamped with `session_time`
    pub fn header_at(&self, session_time: &DateTime<Utc>) -> Vec<u8> {
        self.charset.encode(&self.header_text(session_time))
    }

    pub fn footer(&self) -> Vec<u8> {
        self.charset.encode(Self::footer_text())
    }

    fn header_text(&self, session_time: &DateTime<Utc>) -> String {
        let mut sbuf = String::with_capacity(1024);
        sbuf.push_str(
            "<!DOCTYPE HTML PUBLIC \"-//W3C//DTD HTML 4.01 Transitional//EN\" \"http://www.w3.org/TR/html4/loose.dtd\">\n",
        );
        sbuf.push_str("<html>\n");
        sbuf.push_str("<head>\n");
        sbuf.push_str("<meta http-equiv=\"Content-Type\" content=\"text/html; charset=");
        sbuf.push_str(self.charset.name());
        sbuf.push_str("\">\n");
        sbuf.push_str("<title>");
        push_escaped(&mut sbuf, &self.title);
        sbuf.push_str("</title>\n");
        sbuf.push_str("<style type=\"text/css\">\n");
        sbuf.push_str("<!--\n");
        sbuf.push_str("body, table {font-family: arial,sans-serif; font-size: x-small;}\n");
        sbuf.push_str("th {background: #336699; color: #FFFFFF; text-align: left;}\n");
        sbuf.push_str("-->\n");
        sbuf.push_str("</style>\n");
        sbuf.push_str("</head>\n");
        sbuf.push_str("<body bgcolor=\"#FFFFFF\" topmargin=\"6\" leftmargin=\"6\">\n");
        sbuf.push_str("<hr size=\"1\" noshade>\n");
        sbuf.push_str("Log session start time ");
        push_escaped(&mut sbuf, &self.timestamp_format.format(session_time));
        sbuf.push_str("<br>\n");
        sbuf.push_str("<br>\n");
        sbuf.push_str(
            "<table cellspacing=\"0\" cellpadding=\"4\" border=\"1\" bordercolor=\"#224466\" width=\"100%\">\n",
        );
        sbuf.push_str("<tr>\n");
        sbuf.push_str("<th>Time</th>\n");
        sbuf.push_str("<th>Thread</th>\n");
        sbuf.push_str("<th>Level</th>\n");
        sbuf.push_str("<th>Logger</th>\n");
        if self.location_info {
            sbuf.push_str("<th>File:Line</th>\n");
        }
        sbuf.push_str("<th>Message</th>\n");
        sbuf.push_str("</tr>\n");
        sbuf
    }

    fn footer_text() -> &'static str {
        "</table>\n<br>\n</body></html>"
    }
}
