//! Error types for archive detection, extraction and layout operations.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `UnboxError`.
pub type Result<T> = std::result::Result<T, UnboxError>;

/// Filesystem operation that failed while committing extracted content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsOp {
    /// Creating an output or scratch directory.
    CreateDir,
    /// Reading a directory listing.
    ReadDir,
    /// Removing a stale destination before a move.
    Remove,
    /// Moving extracted content into the output tree.
    Move,
    /// Copying content across filesystems.
    Copy,
}

impl fmt::Display for FsOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CreateDir => "create directory",
            Self::ReadDir => "read directory",
            Self::Remove => "remove",
            Self::Move => "move",
            Self::Copy => "copy",
        };
        f.write_str(name)
    }
}

/// Broad class of an error, used to decide how a failure propagates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Content matched no supported archive signature.
    Detection,
    /// Entry listing failed; degrades the layout decision.
    ArchiveRead,
    /// Extraction into the scratch directory failed.
    Extraction,
    /// Creating, removing or moving output failed.
    Filesystem,
    /// Invalid caller-supplied configuration.
    Config,
}

/// Errors that can occur while processing an archive.
#[derive(Error, Debug)]
pub enum UnboxError {
    /// I/O operation failed while extracting entries.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File content matched no supported archive format.
    #[error("unrecognized archive format: {path}")]
    UnknownFormat {
        /// The file that was probed.
        path: PathBuf,
    },

    /// Entry listing failed (corrupt index, unsupported feature).
    #[error("failed to read archive entries: {reason}")]
    ArchiveRead {
        /// Description from the archive reader.
        reason: String,
    },

    /// Archive is corrupted or uses an unsupported feature during extraction.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    /// Entry path would resolve outside the extraction directory.
    #[error("path traversal detected: {path}")]
    PathTraversal {
        /// The offending entry path.
        path: PathBuf,
    },

    /// A filesystem operation on the output tree failed.
    #[error("failed to {op} {path}: {source}")]
    Filesystem {
        /// The operation that failed.
        op: FsOp,
        /// The path it was applied to.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl UnboxError {
    /// Wraps an I/O error as a filesystem failure on `path`.
    pub fn filesystem(op: FsOp, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            op,
            path: path.into(),
            source,
        }
    }

    /// Returns the category this error belongs to.
    ///
    /// # Examples
    ///
    /// ```
    /// use unboxer_core::UnboxError;
    /// use unboxer_core::error::ErrorCategory;
    ///
    /// let err = UnboxError::InvalidArchive("bad header".into());
    /// assert_eq!(err.category(), ErrorCategory::Extraction);
    /// ```
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownFormat { .. } => ErrorCategory::Detection,
            Self::ArchiveRead { .. } => ErrorCategory::ArchiveRead,
            Self::Io(_) | Self::InvalidArchive(_) | Self::PathTraversal { .. } => {
                ErrorCategory::Extraction
            }
            Self::Filesystem { .. } => ErrorCategory::Filesystem,
            Self::InvalidConfig(_) => ErrorCategory::Config,
        }
    }

    /// Returns `true` if the archive should be skipped rather than reported
    /// as a failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use unboxer_core::UnboxError;
    /// use std::path::PathBuf;
    ///
    /// let err = UnboxError::UnknownFormat { path: PathBuf::from("notes.zip") };
    /// assert!(err.is_skip());
    /// ```
    #[must_use]
    pub const fn is_skip(&self) -> bool {
        matches!(self.category(), ErrorCategory::Detection)
    }

    /// Returns `true` if this error aborts the job for its archive.
    #[must_use]
    pub const fn is_job_fatal(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Extraction | ErrorCategory::Filesystem
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = UnboxError::UnknownFormat {
            path: PathBuf::from("notes.zip"),
        };
        assert_eq!(err.to_string(), "unrecognized archive format: notes.zip");
    }

    #[test]
    fn test_path_traversal_error() {
        let err = UnboxError::PathTraversal {
            path: PathBuf::from("../etc/passwd"),
        };
        assert!(err.to_string().contains("path traversal"));
        assert!(err.to_string().contains("../etc/passwd"));
        assert!(err.is_job_fatal());
    }

    #[test]
    fn test_filesystem_error_display() {
        let err = UnboxError::filesystem(
            FsOp::Remove,
            "out/readme.md",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let display = err.to_string();
        assert!(display.contains("failed to remove"));
        assert!(display.contains("out/readme.md"));
        assert_eq!(err.category(), ErrorCategory::Filesystem);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: UnboxError = io_err.into();
        assert!(matches!(err, UnboxError::Io(_)));
        assert_eq!(err.category(), ErrorCategory::Extraction);
    }

    #[test]
    fn test_categories() {
        assert!(
            UnboxError::UnknownFormat {
                path: PathBuf::from("a")
            }
            .is_skip()
        );

        let read = UnboxError::ArchiveRead {
            reason: "corrupt".into(),
        };
        assert!(!read.is_skip());
        assert!(!read.is_job_fatal());

        let config = UnboxError::InvalidConfig("workers must be at least 1".into());
        assert_eq!(config.category(), ErrorCategory::Config);
        assert!(!config.is_job_fatal());

        assert!(UnboxError::InvalidArchive("truncated".into()).is_job_fatal());
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error;

        let err = UnboxError::filesystem(
            FsOp::Move,
            "out/a",
            std::io::Error::other("disk full"),
        );
        assert!(err.source().is_some());
    }
}
