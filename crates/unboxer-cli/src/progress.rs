//! Progress bar implementation for batch runs.

use console::Term;
use indicatif::ProgressBar;
use indicatif::ProgressState;
use indicatif::ProgressStyle;
use std::fmt::Write;
use std::path::Path;
use unboxer_core::ArchiveOutcome;
use unboxer_core::BatchProgress;

/// CLI progress bar implementing `BatchProgress`.
///
/// Counts finished archives and shows the most recently completed one.
/// Workers call in concurrently; `ProgressBar` is internally synchronized.
pub struct CliProgress {
    bar: ProgressBar,
}

impl CliProgress {
    /// Creates a hidden-length progress bar; the length is set on batch start.
    #[must_use]
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new(0);

        // Template: "Extracting [████████░░░░] 4/10 archives (12s) bundle.tar.gz"
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{prefix} [{bar:40.cyan/blue}] {pos}/{len} archives ({elapsed_short}) {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .with_key("elapsed_short", |state: &ProgressState, w: &mut dyn Write| {
                    write!(w, "{}", humanize_duration(state.elapsed())).unwrap_or(());
                })
                .progress_chars("█▓░"),
        );
        bar.set_prefix(message.to_string());

        Self { bar }
    }

    /// Checks if we should show progress (TTY detection).
    #[must_use]
    pub fn should_show() -> bool {
        Term::stderr().is_term()
    }

    #[cfg(test)]
    fn position(&self) -> u64 {
        self.bar.position()
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

impl BatchProgress for CliProgress {
    fn on_batch_start(&self, total: usize) {
        self.bar.set_length(total as u64);
    }

    fn on_archive_start(&self, _archive: &Path) {}

    fn on_archive_complete(&self, archive: &Path, outcome: &ArchiveOutcome) {
        let name = archive
            .file_name()
            .map_or_else(|| archive.display().to_string(), |n| n.to_string_lossy().into_owned());
        let mark = match outcome {
            ArchiveOutcome::Extracted(_) => "",
            ArchiveOutcome::Skipped { .. } => " (skipped)",
            ArchiveOutcome::Failed { .. } => " (failed)",
        };
        self.bar.set_message(format!("{name}{mark}"));
        self.bar.inc(1);
    }

    fn on_batch_complete(&self) {
        self.bar.finish_and_clear();
    }
}

/// Converts duration to human-readable format.
fn humanize_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 3600 {
        format!("{}h{}m", secs / 3600, (secs % 3600) / 60)
    } else if secs >= 60 {
        format!("{}m{}s", secs / 60, secs % 60)
    } else {
        format!("{secs}s")
    }
}
