use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

macro_rules! unsupported_payload {
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::UnsupportedPayload(format!($fmt, $($arg)*))
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Every failure is fatal for the export in progress. A resx document must reproduce each
/// resource exactly, so there is no partial-success mode: the caller is expected to surface
/// the error and discard whatever was written to the destination so far.
///
/// # Error Categories
///
/// ## Writer Lifecycle
/// - [`Error::AlreadyFinalized`] - The document was already closed
/// - [`Error::Cancelled`] - Cooperative cancellation was observed between entries
///
/// ## Content Errors
/// - [`Error::UnsupportedPayload`] - A resource cannot be represented in resx
/// - [`Error::TypeResolutionFailure`] - A required well-known type could not be resolved
/// - [`Error::Malformed`] - Invalid input, such as an unparsable assembly display name
///
/// ## I/O and External Errors
/// - [`Error::FileError`] - Filesystem and XML writer I/O errors
///
/// # Examples
///
/// ```rust
/// use dotresx::{Error, resx::ResxWriter, metadata::typesystem::ModuleInfo};
///
/// let module = ModuleInfo::net_framework("Demo");
/// let mut writer = ResxWriter::new(Vec::new(), &module)?;
/// writer.generate()?;
///
/// match writer.generate() {
///     Err(Error::AlreadyFinalized) => println!("document was already written"),
///     other => panic!("unexpected: {other:?}"),
/// }
/// # Ok::<(), dotresx::Error>(())
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The resx document has already been finalized.
    ///
    /// Raised when [`crate::resx::ResxWriter::generate`] is called a second time, or when a
    /// resource is added after the closing root element was written.
    #[error("The resource is already generated")]
    AlreadyFinalized,

    /// A resource payload has no representation in the resx format.
    ///
    /// The associated message names the offending type code, serialization format or value.
    #[error("Unsupported resource payload - {0}")]
    UnsupportedPayload(String),

    /// A well-known type required by the document could not be resolved.
    ///
    /// Occurs when the host type system does not know one of the types the format refers to
    /// by name (the null marker, or the canonical reader and writer types).
    #[error("Failed to resolve type - {0}")]
    TypeResolutionFailure(String),

    /// The export was cancelled before all resources were written.
    ///
    /// The destination holds an incomplete document and must be discarded by the caller.
    #[error("The export was cancelled")]
    Cancelled,

    /// The input is damaged and could not be parsed.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// File I/O error.
    ///
    /// Wraps standard I/O errors raised while creating, writing or flushing the destination,
    /// including those surfaced through the XML writer.
    #[error("{0}")]
    FileError(#[from] std::io::Error),
}
