//! Exporting whole resource sets with cooperative cancellation.

use std::{
    borrow::Borrow,
    io::Write,
    path::Path,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use crate::{
    metadata::{resources::ResourceEntry, typesystem::ModuleContext},
    resx::ResxWriter,
    Error, Result,
};

/// A cancellation signal shared between an export and whoever may cancel it.
///
/// Clones share the same signal.
///
/// # Examples
///
/// ```rust
/// use dotresx::resx::CancellationFlag;
///
/// let flag = CancellationFlag::new();
/// let remote = flag.clone();
///
/// remote.cancel();
/// assert!(flag.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    /// Create a flag that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Returns `true` once cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Fail with [`Error::Cancelled`] if cancellation was requested.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cancelled`] once [`CancellationFlag::cancel`] was called.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(Error::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Add every entry of `entries` to `writer`, in order.
///
/// The flag is checked before each entry. On cancellation the export stops before that
/// entry and the document is left incomplete; the caller must discard it.
///
/// Returns the number of entries written.
///
/// # Errors
///
/// - [`Error::Cancelled`] if `cancel` was signalled
/// - Any error of [`ResxWriter::add_resource`]
pub fn export_resources<W, I>(
    writer: &mut ResxWriter<'_, W>,
    entries: I,
    cancel: &CancellationFlag,
) -> Result<usize>
where
    W: Write,
    I: IntoIterator,
    I::Item: Borrow<ResourceEntry>,
{
    let mut written = 0;
    for entry in entries {
        if let Err(error) = cancel.check() {
            tracing::info!("Resource export cancelled after {} entries", written);
            return Err(error);
        }

        writer.add_resource(entry.borrow())?;
        written += 1;
    }

    Ok(written)
}

/// Write the resource set of `module` to a new resx file at `path`.
///
/// The document is always finalized before the file is closed, also when the export fails
/// or is cancelled midway.
///
/// # Errors
///
/// - [`Error::Cancelled`] if `cancel` was signalled; the file is incomplete
/// - [`Error::FileError`] if the file cannot be created or written
/// - Any error of [`ResxWriter::add_resource`]
pub fn export_to_file<I>(
    path: impl AsRef<Path>,
    module: &dyn ModuleContext,
    entries: I,
    cancel: &CancellationFlag,
) -> Result<usize>
where
    I: IntoIterator,
    I::Item: Borrow<ResourceEntry>,
{
    let mut writer = ResxWriter::create(path, module)?;
    let written = export_resources(&mut writer, entries, cancel)?;
    writer.close()?;

    Ok(written)
}
