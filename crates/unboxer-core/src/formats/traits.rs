//! Common trait for archive format readers.

use std::path::Path;

use crate::Result;
use crate::report::EntryCounts;

/// Read-side capabilities every supported archive format provides.
///
/// Implementations exist for TAR (plain or compressed), ZIP, 7z and RAR and
/// are selected with [`open_reader`](super::open_reader) after content
/// detection.
pub trait ArchiveReader {
    /// Lists every entry name (files and directories) in archive order.
    ///
    /// Names are returned as recorded, slash-delimited.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveRead` if the index is corrupt or uses an unsupported
    /// feature.
    fn list_entry_names(&mut self) -> Result<Vec<String>>;

    /// Extracts every entry under `dest`, preserving relative paths.
    ///
    /// # Errors
    ///
    /// Returns an error on I/O failure, corruption, or an entry path that
    /// would resolve outside `dest`.
    fn extract_all(&mut self, dest: &Path) -> Result<EntryCounts>;

    /// Returns the archive format name.
    fn format_name(&self) -> &'static str;
}
