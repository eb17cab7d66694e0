//! Archive discovery in an input directory.

use std::io;
use std::path::Path;
use std::path::PathBuf;

use globset::GlobBuilder;
use globset::GlobSet;
use globset::GlobSetBuilder;
use walkdir::WalkDir;

use crate::FsOp;
use crate::Result;
use crate::UnboxError;

/// Compiles file name patterns into a case-insensitive matcher.
///
/// # Errors
///
/// Returns `InvalidConfig` for a malformed pattern.
pub fn build_matcher<S: AsRef<str>>(patterns: &[S]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let pattern = pattern.as_ref();
        let glob = GlobBuilder::new(pattern)
            .case_insensitive(true)
            .literal_separator(true)
            .build()
            .map_err(|err| UnboxError::InvalidConfig(format!("invalid pattern '{pattern}': {err}")))?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|err| UnboxError::InvalidConfig(format!("invalid patterns: {err}")))
}

/// Lists the regular files directly inside `input_dir` whose names match any
/// of `patterns`.
///
/// Subdirectories are not searched. The result is sorted and free of
/// duplicates. Matching only pre-filters: content detection still decides
/// whether a file is an archive.
///
/// # Errors
///
/// Returns `InvalidConfig` for a malformed pattern, or a `Filesystem` error
/// if `input_dir` cannot be read.
///
/// # Examples
///
/// ```no_run
/// use unboxer_core::discover_archives;
///
/// let archives = discover_archives("demo/input".as_ref(), &["*.zip", "*.tar.gz"])?;
/// for archive in archives {
///     println!("{}", archive.display());
/// }
/// # Ok::<(), unboxer_core::UnboxError>(())
/// ```
pub fn discover_archives<S: AsRef<str>>(input_dir: &Path, patterns: &[S]) -> Result<Vec<PathBuf>> {
    let matcher = build_matcher(patterns)?;
    let read_err = |err: io::Error| UnboxError::filesystem(FsOp::ReadDir, input_dir, err);

    if !input_dir.is_dir() {
        return Err(read_err(io::Error::new(
            io::ErrorKind::NotFound,
            "input directory does not exist",
        )));
    }

    let mut archives = Vec::new();
    for entry in WalkDir::new(input_dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|err| read_err(io::Error::from(err)))?;
        if entry.path().is_file() && matcher.is_match(entry.file_name()) {
            archives.push(entry.into_path());
        }
    }

    archives.sort();
    archives.dedup();
    tracing::debug!(
        input = %input_dir.display(),
        count = archives.len(),
        "discovered archives"
    );
    Ok(archives)
}
