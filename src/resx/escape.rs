//! Character escaping of the .NET XML text writer.
//!
//! quick-xml's own escaping also replaces apostrophes and quotes in text, which the .NET
//! writer leaves alone. Documents must match byte for byte, so text and attribute values
//! are escaped here and handed to quick-xml pre-escaped.

use std::borrow::Cow;

/// Escape `text` for element content.
///
/// `&`, `<` and `>` become entity references. Tabs and line breaks are kept; other control
/// characters become hexadecimal character references.
pub(crate) fn escape_text(text: &str) -> Cow<'_, str> {
    escape(text, false)
}

/// Escape `value` for a double-quoted attribute.
///
/// In addition to [`escape_text`], quotes become `&quot;` and CR/LF become character
/// references so they survive attribute value normalization.
pub(crate) fn escape_attribute(value: &str) -> Cow<'_, str> {
    escape(value, true)
}

fn escape(input: &str, in_attribute: bool) -> Cow<'_, str> {
    let needs_escape = |c: char| match c {
        '&' | '<' | '>' => true,
        '"' | '\r' | '\n' => in_attribute,
        '\t' => false,
        c => c < ' ',
    };

    let Some(first) = input.find(needs_escape) else {
        return Cow::Borrowed(input);
    };

    let mut escaped = String::with_capacity(input.len() + 16);
    escaped.push_str(&input[..first]);
    for c in input[first..].chars() {
        if !needs_escape(c) {
            escaped.push(c);
            continue;
        }
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            c => escaped.push_str(&format!("&#x{:X};", u32::from(c))),
        }
    }

    Cow::Owned(escaped)
}
