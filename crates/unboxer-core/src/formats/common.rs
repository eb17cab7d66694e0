//! Extraction helpers shared between format readers.

use std::fs::File;
use std::fs::create_dir_all;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::Path;

use crate::Result;
use crate::report::EntryCounts;

/// Buffer size for writing extracted files.
const WRITE_BUFFER_SIZE: usize = 64 * 1024;

/// Writes one regular file entry to `target`, creating parent directories.
///
/// On Unix the permission bits of `mode` (masked to `0o777`) are applied
/// when present; elsewhere the mode is ignored.
pub fn write_file<R: Read + ?Sized>(
    reader: &mut R,
    target: &Path,
    mode: Option<u32>,
    counts: &mut EntryCounts,
) -> Result<()> {
    if let Some(parent) = target.parent() {
        create_dir_all(parent)?;
    }

    let file = File::create(target)?;
    let mut writer = BufWriter::with_capacity(WRITE_BUFFER_SIZE, file);
    let bytes_written = std::io::copy(reader, &mut writer)?;
    writer.flush()?;

    #[cfg(unix)]
    if let Some(mode) = mode {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(target, std::fs::Permissions::from_mode(mode & 0o777))?;
    }
    #[cfg(not(unix))]
    let _ = mode;

    counts.files += 1;
    counts.bytes_written = counts.bytes_written.saturating_add(bytes_written);
    Ok(())
}

/// Creates a directory entry at `target`. Idempotent.
pub fn create_directory(target: &Path, counts: &mut EntryCounts) -> Result<()> {
    create_dir_all(target)?;
    counts.directories += 1;
    Ok(())
}
