//! HTML escaping for user-controlled text

/// Escape `text` for use in HTML element content and quoted attributes
pub fn escape_tags(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    push_escaped(&mut result, text);
    result
}

/// Append `text` to `out`, escaping markup characters
pub fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
}
