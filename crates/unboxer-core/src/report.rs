//! Job and batch reporting.

use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use crate::UnboxError;
use crate::formats::ArchiveFormat;
use crate::layout::LayoutKind;
use crate::types::BaseName;

/// Entry counters collected while extracting one archive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryCounts {
    /// Number of regular files written.
    pub files: usize,

    /// Number of directory entries created.
    pub directories: usize,

    /// Number of symlinks and hardlinks created.
    pub links: usize,

    /// Total bytes written to disk.
    pub bytes_written: u64,
}

impl EntryCounts {
    /// Returns the total number of entries materialized.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.files + self.directories + self.links
    }
}

/// Result of one successful extraction job.
#[derive(Debug, Clone)]
pub struct JobReport {
    /// Archive that was processed.
    pub archive: PathBuf,

    /// Format detected from the archive's content.
    pub format: ArchiveFormat,

    /// Output directory name derived from the archive file name.
    pub base_name: BaseName,

    /// `<output_root>/<base_name>`.
    pub output_dir: PathBuf,

    /// Which layout rule was applied.
    pub layout: LayoutKind,

    /// Root items discovered before extraction, sorted.
    pub roots: Vec<String>,

    /// Entries written into the scratch directory.
    pub entries: EntryCounts,

    /// Number of move operations applied to the output directory.
    pub moves: usize,

    /// `false` when listing failed and the layout fell back to top level.
    pub roots_discovered: bool,

    /// Wall time of the whole job.
    pub duration: Duration,
}

/// Classification of one archive's result within a batch.
#[derive(Debug)]
pub enum ArchiveOutcome {
    /// The archive was extracted.
    Extracted(JobReport),

    /// The archive was not processed (unrecognized content).
    Skipped {
        /// Archive path.
        archive: PathBuf,
        /// Human-readable reason.
        reason: String,
    },

    /// The job failed; other archives are unaffected.
    Failed {
        /// Archive path.
        archive: PathBuf,
        /// The job error.
        error: UnboxError,
    },
}

impl ArchiveOutcome {
    /// Classifies the result of [`process_archive`](crate::process_archive).
    #[must_use]
    pub fn from_result(archive: &Path, result: crate::Result<JobReport>) -> Self {
        match result {
            Ok(report) => Self::Extracted(report),
            Err(error) if error.is_skip() => Self::Skipped {
                archive: archive.to_path_buf(),
                reason: error.to_string(),
            },
            Err(error) => Self::Failed {
                archive: archive.to_path_buf(),
                error,
            },
        }
    }

    /// Returns the archive this outcome belongs to.
    #[must_use]
    pub fn archive(&self) -> &Path {
        match self {
            Self::Extracted(report) => &report.archive,
            Self::Skipped { archive, .. } | Self::Failed { archive, .. } => archive,
        }
    }

    /// Returns `true` for [`ArchiveOutcome::Failed`].
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Result of a batch run, with outcomes in discovery order.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// One outcome per discovered archive.
    pub outcomes: Vec<ArchiveOutcome>,

    /// Wall time of the whole batch.
    pub duration: Duration,
}

impl BatchReport {
    /// Number of archives extracted.
    #[must_use]
    pub fn extracted(&self) -> usize {
        self.count(|o| matches!(o, ArchiveOutcome::Extracted(_)))
    }

    /// Number of archives skipped.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, ArchiveOutcome::Skipped { .. }))
    }

    /// Number of archives that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(ArchiveOutcome::is_failure)
    }

    /// Returns whether any archive failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(ArchiveOutcome::is_failure)
    }

    /// Total number of archives considered.
    #[must_use]
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    fn count(&self, pred: impl Fn(&ArchiveOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(o)).count()
    }
}

/// Progress callbacks for batch runs.
///
/// Callbacks fire from worker threads, so implementations must be `Sync`
/// and use interior mutability for any state.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use unboxer_core::{ArchiveOutcome, BatchProgress};
///
/// #[derive(Default)]
/// struct Counter(AtomicUsize);
///
/// impl BatchProgress for Counter {
///     fn on_archive_start(&self, _archive: &Path) {}
///
///     fn on_archive_complete(&self, _archive: &Path, _outcome: &ArchiveOutcome) {
///         self.0.fetch_add(1, Ordering::Relaxed);
///     }
/// }
/// ```
pub trait BatchProgress: Sync {
    /// Called once after discovery with the number of archives found.
    fn on_batch_start(&self, _total: usize) {}

    /// Called when a worker picks up an archive.
    fn on_archive_start(&self, archive: &Path);

    /// Called when an archive's job finishes, whatever the outcome.
    fn on_archive_complete(&self, archive: &Path, outcome: &ArchiveOutcome);

    /// Called once after every job has finished.
    fn on_batch_complete(&self) {}
}

/// Progress sink that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl BatchProgress for NoopProgress {
    fn on_archive_start(&self, _archive: &Path) {}

    fn on_archive_complete(&self, _archive: &Path, _outcome: &ArchiveOutcome) {}
}
