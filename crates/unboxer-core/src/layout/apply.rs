//! Applying a layout plan to the output directory.

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

use crate::FsOp;
use crate::Result;
use crate::UnboxError;

use super::plan::LayoutPlan;
use super::plan::MoveOp;

/// Applies every move in `plan`, replacing existing destinations.
///
/// Before each move an existing destination is removed (checked without
/// following symlinks): a real directory recursively, anything else as a
/// file. A rename that fails because source and destination are on
/// different filesystems falls back to copy-then-remove.
///
/// Returns the number of moves applied. Moves already applied are not
/// rolled back when a later one fails.
///
/// # Errors
///
/// Returns a `Filesystem` error naming the failed operation and path.
pub fn apply_plan(plan: &LayoutPlan) -> Result<usize> {
    for op in &plan.moves {
        apply_move(op)?;
    }
    Ok(plan.moves.len())
}

fn apply_move(op: &MoveOp) -> Result<()> {
    remove_existing(&op.destination)?;

    debug!(
        from = %op.source.display(),
        to = %op.destination.display(),
        "moving entry"
    );
    match fs::rename(&op.source, &op.destination) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::CrossesDevices => {
            debug!(from = %op.source.display(), "rename crosses devices, copying");
            copy_tree(&op.source, &op.destination)?;
            remove_existing(&op.source)
        }
        Err(err) => Err(UnboxError::filesystem(FsOp::Move, &op.source, err)),
    }
}

/// Removes whatever is at `path`; absent paths are fine.
pub(crate) fn remove_existing(path: &Path) -> Result<()> {
    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(UnboxError::filesystem(FsOp::Remove, path, err)),
    };

    let removed = if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    removed.map_err(|err| UnboxError::filesystem(FsOp::Remove, path, err))
}

/// Recursively copies `src` to `dst`, recreating symlinks rather than
/// following them.
fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    let copy_err = |path: &Path, err: io::Error| UnboxError::filesystem(FsOp::Copy, path, err);

    for entry in WalkDir::new(src).follow_links(false).follow_root_links(false) {
        let entry = entry.map_err(|err| copy_err(src, io::Error::from(err)))?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|err| copy_err(entry.path(), io::Error::other(err)))?;
        let target = if relative.as_os_str().is_empty() {
            dst.to_path_buf()
        } else {
            dst.join(relative)
        };

        let file_type = entry.file_type();
        if file_type.is_dir() {
            fs::create_dir_all(&target).map_err(|err| copy_err(target.as_path(), err))?;
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &target).map_err(|err| copy_err(entry.path(), err))?;
        } else {
            fs::copy(entry.path(), &target).map_err(|err| copy_err(entry.path(), err))?;
        }
    }
    Ok(())
}

#[cfg(unix)]
fn copy_symlink(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(fs::read_link(src)?, dst)
}

#[cfg(not(unix))]
fn copy_symlink(src: &Path, dst: &Path) -> io::Result<()> {
    fs::copy(src, dst).map(|_| ())
}
