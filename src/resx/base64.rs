//! Line-wrapped base64 as written into resx `value` elements.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

/// Maximum number of base64 characters per line.
const LINE_LENGTH: usize = 80;
/// Prefix of every wrapped line.
const LINE_PREFIX: &str = "\r\n        ";

/// Encode `data` as standard base64, wrapped the way the .NET resx writer wraps it.
///
/// Encodings of up to 80 characters are returned as-is. Longer encodings are split into
/// 80 character lines, each one preceded by CRLF and an 8 space indent, and the whole block
/// ends with a CRLF.
///
/// # Examples
///
/// ```rust
/// use dotresx::resx::to_wrapped_base64;
///
/// assert_eq!(to_wrapped_base64(b"resx"), "cmVzeA==");
///
/// let wrapped = to_wrapped_base64(&[0u8; 61]);
/// assert!(wrapped.starts_with("\r\n        AAAA"));
/// assert!(wrapped.ends_with("\r\n        AA==\r\n"));
/// ```
#[must_use]
pub fn to_wrapped_base64(data: &[u8]) -> String {
    let raw = BASE64.encode(data);
    if raw.len() <= LINE_LENGTH {
        return raw;
    }

    let lines = raw.len().div_ceil(LINE_LENGTH);
    let mut wrapped = String::with_capacity(raw.len() + lines * LINE_PREFIX.len() + 2);

    let mut start = 0;
    while start < raw.len() {
        let end = (start + LINE_LENGTH).min(raw.len());
        wrapped.push_str(LINE_PREFIX);
        wrapped.push_str(&raw[start..end]);
        start = end;
    }
    wrapped.push_str("\r\n");

    wrapped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_80_is_unwrapped() {
        // 60 bytes encode to exactly 80 characters
        let encoded = to_wrapped_base64(&[0xAB; 60]);

        assert_eq!(encoded.len(), 80);
        assert!(!encoded.contains('\r'));
    }

    #[test]
    fn test_81_characters_wrap_once() {
        // 61 bytes encode to 84 characters
        let encoded = to_wrapped_base64(&[0u8; 61]);
        let expected = format!("\r\n        {}\r\n        AA==\r\n", "A".repeat(80));

        assert_eq!(encoded, expected);
    }

    #[test]
    fn test_multiple_full_lines() {
        // 120 bytes encode to exactly 160 characters
        let encoded = to_wrapped_base64(&[0u8; 120]);
        let line = format!("\r\n        {}", "A".repeat(80));

        assert_eq!(encoded, format!("{line}{line}\r\n"));
    }

    #[test]
    fn test_empty() {
        assert_eq!(to_wrapped_base64(&[]), "");
    }
}
