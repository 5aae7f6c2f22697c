//! Output configuration for the resx writer
//!
//! The defaults reproduce the documents written by the .NET resx writers byte for byte:
//! UTF-8 with a byte order mark, two spaces per nesting level and CRLF line breaks, as the
//! indenting .NET XML text writer produces on Windows. The other presets trade that
//! compatibility for smaller or BOM-free output.

/// CRLF, the line break of the .NET writers.
pub const CRLF: &str = "\r\n";
/// LF, the Unix line break.
pub const LF: &str = "\n";

/// Configuration of the document layout produced by a [`crate::resx::ResxWriter`]
///
/// Only the layout is configurable. Element order, attribute order, value formatting and
/// escaping never change. Wrapped base64 values always use CRLF, whatever the layout.
///
/// # Examples
///
/// ```rust
/// use dotresx::resx::{ResxWriterConfig, LF};
///
/// let unix = ResxWriterConfig::without_bom().with_line_ending(LF);
/// assert_eq!(unix.line_ending, "\n");
/// assert_eq!(unix.indent_width, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResxWriterConfig {
    /// Number of spaces per nesting level (default: 2)
    /// A width of 0 disables indentation and line breaks between elements
    pub indent_width: usize,

    /// Start the document with a UTF-8 byte order mark (default: true)
    /// The .NET writers always emit one
    pub emit_bom: bool,

    /// Line break between elements and inside the schema comment (default: CRLF)
    pub line_ending: &'static str,
}

impl Default for ResxWriterConfig {
    fn default() -> Self {
        Self {
            indent_width: 2,
            emit_bom: true,
            line_ending: CRLF,
        }
    }
}

impl ResxWriterConfig {
    /// Creates the configuration matching the .NET resx writers
    #[must_use]
    pub fn dotnet() -> Self {
        Self::default()
    }

    /// Creates a configuration for indented documents without a byte order mark
    ///
    /// Useful when the output is embedded in another text or compared against strings.
    #[must_use]
    pub fn without_bom() -> Self {
        Self {
            emit_bom: false,
            ..Self::default()
        }
    }

    /// Creates a configuration for the smallest possible document
    ///
    /// No byte order mark, no indentation, no line breaks between elements. Line breaks
    /// inside the schema comment and inside wrapped base64 values are kept.
    #[must_use]
    pub fn compact() -> Self {
        Self {
            indent_width: 0,
            emit_bom: false,
            ..Self::default()
        }
    }

    /// Replace the line break written between elements
    #[must_use]
    pub fn with_line_ending(mut self, line_ending: &'static str) -> Self {
        self.line_ending = line_ending;
        self
    }
}
