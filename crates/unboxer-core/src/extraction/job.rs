//! The per-archive extraction job.

use std::fs;
use std::path::Path;
use std::time::Instant;

use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::ExtractOptions;
use crate::FsOp;
use crate::Result;
use crate::UnboxError;
use crate::formats::ArchiveFormat;
use crate::formats::ArchiveReader;
use crate::formats::detect;
use crate::formats::open_reader;
use crate::layout::RootDiscovery;
use crate::layout::apply_plan;
use crate::layout::plan_layout;
use crate::report::JobReport;
use crate::types::BaseName;

use super::scratch::ScratchDir;

/// Extracts one archive into `<output_root>/<base_name>/` with a normalized
/// layout.
///
/// Steps:
///
/// 1. Detect the format from content. Unrecognized content returns
///    `UnknownFormat` before anything is written.
/// 2. List entry names to find the root items. A listing failure is logged
///    and the job continues with the top-level layout.
/// 3. Extract everything into a fresh scratch directory.
/// 4. Plan and apply the moves into the output directory, replacing
///    conflicting entries from earlier runs.
///
/// The scratch directory is removed on every exit path. Running the job
/// twice on the same archive leaves the same output as running it once.
///
/// # Errors
///
/// - `UnknownFormat` if the content is not a supported archive
/// - extraction errors (`Io`, `InvalidArchive`, `PathTraversal`)
/// - `Filesystem` errors while creating directories or moving output
///
/// # Examples
///
/// ```no_run
/// use unboxer_core::{ExtractOptions, process_archive};
///
/// let report = process_archive("demo/input/release-1.0.zip".as_ref(), &ExtractOptions::default())?;
/// println!("{} -> {} ({})", report.archive.display(), report.output_dir.display(), report.layout);
/// # Ok::<(), unboxer_core::UnboxError>(())
/// ```
pub fn process_archive(path: &Path, options: &ExtractOptions) -> Result<JobReport> {
    let started = Instant::now();

    let format = detect(path);
    if !format.is_known() {
        return Err(UnboxError::UnknownFormat {
            path: path.to_path_buf(),
        });
    }

    let base_name = BaseName::from_archive_path(path).ok_or_else(|| {
        UnboxError::InvalidConfig(format!("archive path has no file name: {}", path.display()))
    })?;

    let mut reader = open_reader(path, format)?;
    run_job(path, format, base_name, &mut *reader, options, started)
}

/// Everything after detection: list, extract into scratch, lay out.
fn run_job(
    path: &Path,
    format: ArchiveFormat,
    base_name: BaseName,
    reader: &mut dyn ArchiveReader,
    options: &ExtractOptions,
    started: Instant,
) -> Result<JobReport> {
    let discovery = RootDiscovery::from_listing(reader.list_entry_names());
    if let RootDiscovery::Failed(err) = &discovery {
        warn!(
            archive = %path.display(),
            error = %err,
            "could not list entries, extracting with top-level layout"
        );
    }
    let roots = discovery.roots();
    debug!(archive = %path.display(), roots = ?roots, "root items");

    let output_dir = options.output_root.join(&base_name);
    fs::create_dir_all(&output_dir)
        .map_err(|err| UnboxError::filesystem(FsOp::CreateDir, &output_dir, err))?;

    let scratch = ScratchDir::create_in(options.scratch_root())?;
    debug!(archive = %path.display(), scratch = %scratch.path().display(), "extracting");
    let entries = reader.extract_all(scratch.path())?;

    let plan = plan_layout(&base_name, &roots, scratch.path(), &output_dir)?;
    let moves = apply_plan(&plan)?;
    scratch.close()?;

    let duration = started.elapsed();
    info!(
        archive = %path.display(),
        format = %format,
        output = %output_dir.display(),
        layout = %plan.kind,
        files = entries.files,
        ?duration,
        "extracted archive"
    );

    Ok(JobReport {
        archive: path.to_path_buf(),
        format,
        base_name,
        output_dir,
        layout: plan.kind,
        roots: roots.into_iter().collect(),
        entries,
        moves,
        roots_discovered: discovery.is_found(),
        duration,
    })
}
