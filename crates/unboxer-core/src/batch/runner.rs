//! Parallel batch runner.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::time::Instant;

use rayon::prelude::*;
use tracing::info;
use tracing::warn;

use crate::BatchConfig;
use crate::Result;
use crate::UnboxError;
use crate::extraction::process_archive;
use crate::report::ArchiveOutcome;
use crate::report::BatchProgress;
use crate::report::BatchReport;
use crate::types::BaseName;

use super::discover::discover_archives;

/// Discovers archives and extracts each one on a fixed-size worker pool.
///
/// Jobs share no mutable state; one job's failure never stops the others.
/// Outcomes come back in discovery order regardless of completion order.
/// The caller decides what a failure means for its exit status.
///
/// Two archives that normalize to the same base name write to the same
/// output directory concurrently; this is logged as a warning and the
/// result is whichever job's moves land last.
///
/// # Errors
///
/// Returns an error only if the configuration is invalid, the input
/// directory cannot be read, or the worker pool cannot be started.
///
/// # Examples
///
/// ```no_run
/// use unboxer_core::{BatchConfig, NoopProgress, run_batch};
///
/// let report = run_batch(&BatchConfig::default(), &NoopProgress)?;
/// println!(
///     "{} extracted, {} skipped, {} failed",
///     report.extracted(),
///     report.skipped(),
///     report.failed()
/// );
/// # Ok::<(), unboxer_core::UnboxError>(())
/// ```
pub fn run_batch(config: &BatchConfig, progress: &dyn BatchProgress) -> Result<BatchReport> {
    config.validate()?;
    let started = Instant::now();

    let archives = discover_archives(&config.input_dir, &config.patterns)?;
    warn_duplicate_base_names(&archives);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.workers.unwrap_or(0))
        .thread_name(|i| format!("unboxer-worker-{i}"))
        .build()
        .map_err(|err| UnboxError::Io(io::Error::other(err)))?;

    progress.on_batch_start(archives.len());
    info!(
        input = %config.input_dir.display(),
        archives = archives.len(),
        workers = pool.current_num_threads(),
        "starting batch"
    );

    let outcomes: Vec<ArchiveOutcome> = pool.install(|| {
        archives
            .par_iter()
            .map(|archive| {
                progress.on_archive_start(archive);
                let outcome =
                    ArchiveOutcome::from_result(archive, process_archive(archive, &config.extract));
                match &outcome {
                    ArchiveOutcome::Skipped { reason, .. } => {
                        info!(archive = %archive.display(), %reason, "skipped");
                    }
                    ArchiveOutcome::Failed { error, .. } => {
                        warn!(archive = %archive.display(), %error, "extraction failed");
                    }
                    ArchiveOutcome::Extracted(_) => {}
                }
                progress.on_archive_complete(archive, &outcome);
                outcome
            })
            .collect()
    });

    progress.on_batch_complete();
    let report = BatchReport {
        outcomes,
        duration: started.elapsed(),
    };
    info!(
        extracted = report.extracted(),
        skipped = report.skipped(),
        failed = report.failed(),
        duration = ?report.duration,
        "batch complete"
    );
    Ok(report)
}

/// Logs every base name claimed by more than one archive.
fn warn_duplicate_base_names(archives: &[PathBuf]) {
    let mut by_name: HashMap<BaseName, Vec<&PathBuf>> = HashMap::new();
    for archive in archives {
        if let Some(name) = BaseName::from_archive_path(archive) {
            by_name.entry(name).or_default().push(archive);
        }
    }

    for (name, paths) in by_name.into_iter().filter(|(_, p)| p.len() > 1) {
        warn!(
            base_name = %name,
            archives = ?paths,
            "archives share an output directory; the result depends on completion order"
        );
    }
}
