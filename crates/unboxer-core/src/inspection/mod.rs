//! Archive inspection without extraction.
//!
//! Reports what a job would do with an archive: the detected format, the
//! output directory name, the root items and the layout rule predicted from
//! the entry names. Nothing is written to disk.
//!
//! # Examples
//!
//! ```no_run
//! use unboxer_core::inspect_archive;
//!
//! let inspection = inspect_archive("demo/input/bundle.tar.gz".as_ref())?;
//! println!("{} -> {}/ ({})", inspection.format, inspection.base_name, inspection.layout);
//! # Ok::<(), unboxer_core::UnboxError>(())
//! ```

use std::path::Path;
use std::path::PathBuf;

use crate::Result;
use crate::UnboxError;
use crate::formats::ArchiveFormat;
use crate::formats::detect;
use crate::formats::open_reader;
use crate::layout::LayoutKind;
use crate::layout::RootDiscovery;
use crate::layout::analyze_roots;
use crate::layout::predict_layout;
use crate::types::BaseName;

/// What a job would do with one archive.
#[derive(Debug)]
pub struct ArchiveInspection {
    /// Inspected archive.
    pub archive: PathBuf,

    /// Format detected from content.
    pub format: ArchiveFormat,

    /// Output directory name.
    pub base_name: BaseName,

    /// Number of entries listed, `None` if listing failed.
    pub entry_count: Option<usize>,

    /// Root items, or the listing error.
    pub roots: RootDiscovery,

    /// Layout rule predicted from the entry names.
    pub layout: LayoutKind,
}

/// Inspects an archive without extracting it.
///
/// A listing failure is not an error here: it is reported through
/// [`ArchiveInspection::roots`] together with the top-level layout a job
/// would fall back to.
///
/// # Errors
///
/// Returns `UnknownFormat` if the content is not a supported archive, or
/// `InvalidConfig` if the path has no file name.
pub fn inspect_archive(path: &Path) -> Result<ArchiveInspection> {
    let format = detect(path);
    let mut reader = open_reader(path, format)?;
    let base_name = BaseName::from_archive_path(path).ok_or_else(|| {
        UnboxError::InvalidConfig(format!("archive path has no file name: {}", path.display()))
    })?;

    let (entry_count, roots, layout) = match reader.list_entry_names() {
        Ok(names) => {
            let roots = analyze_roots(&names);
            let layout = predict_layout(&base_name, &roots, &names);
            (Some(names.len()), RootDiscovery::Found(roots), layout)
        }
        Err(err) => (None, RootDiscovery::Failed(err), LayoutKind::TopLevel),
    };

    Ok(ArchiveInspection {
        archive: path.to_path_buf(),
        format,
        base_name,
        entry_count,
        roots,
        layout,
    })
}
