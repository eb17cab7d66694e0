//! Error conversion utilities for CLI.
//!
//! Converts unboxer-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use std::path::Path;
use unboxer_core::UnboxError;

/// Converts `UnboxError` to user-friendly anyhow error with context
pub fn convert_unbox_error(err: UnboxError, archive: &Path) -> anyhow::Error {
    match err {
        UnboxError::UnknownFormat { .. } => {
            anyhow!(
                "Not a supported archive: {}\n\
                 HINT: Supported formats: zip, tar, tar.gz, tar.bz2, tar.xz, tar.zst, 7z, rar. \
                 Detection reads file content, not the extension.",
                archive.display()
            )
        }
        UnboxError::PathTraversal { path } => {
            anyhow!(
                "Security violation: Archive '{}' has an entry escaping the output directory: '{}'\n\
                 HINT: This archive may be malicious. Do not extract from untrusted sources.",
                archive.display(),
                path.display()
            )
        }
        UnboxError::InvalidArchive(reason) => {
            anyhow!(
                "Invalid archive '{}': {}\n\
                 HINT: The archive may be corrupted, truncated, or password-protected.",
                archive.display(),
                reason
            )
        }
        UnboxError::ArchiveRead { reason } => {
            anyhow!("Cannot read archive '{}': {}", archive.display(), reason)
        }
        UnboxError::Filesystem { op, path, source } => {
            anyhow!(
                "Failed to {} '{}' while processing '{}': {}\n\
                 HINT: Check permissions and free space in the output directory.",
                op,
                path.display(),
                archive.display(),
                source
            )
        }
        UnboxError::Io(io_err) => {
            anyhow!(
                "I/O error while processing '{}': {}",
                archive.display(),
                io_err
            )
        }
        UnboxError::InvalidConfig(reason) => anyhow!("Invalid configuration: {reason}"),
    }
}

/// Adds archive context to a core result
pub fn add_archive_context<T>(
    result: Result<T, UnboxError>,
    archive: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_unbox_error(e, archive))
}
