//! Per-job scratch directory.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use crate::FsOp;
use crate::Result;
use crate::UnboxError;

/// Name prefix of scratch directories.
pub const SCRATCH_PREFIX: &str = ".unboxer-";

/// Uniquely named directory owned by one job.
///
/// The directory and everything in it is removed when the value is dropped,
/// including on early returns. [`ScratchDir::close`] removes it explicitly
/// and reports failures.
#[derive(Debug)]
pub struct ScratchDir {
    dir: TempDir,
}

impl ScratchDir {
    /// Creates a scratch directory inside `root`, creating `root` if needed.
    ///
    /// # Errors
    ///
    /// Returns a `Filesystem` error if `root` or the directory cannot be
    /// created.
    pub fn create_in(root: &Path) -> Result<Self> {
        fs::create_dir_all(root).map_err(|err| UnboxError::filesystem(FsOp::CreateDir, root, err))?;
        let dir = tempfile::Builder::new()
            .prefix(SCRATCH_PREFIX)
            .tempdir_in(root)
            .map_err(|err| UnboxError::filesystem(FsOp::CreateDir, root, err))?;
        Ok(Self { dir })
    }

    /// Returns the scratch directory path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Removes the directory now.
    ///
    /// # Errors
    ///
    /// Returns a `Filesystem` error if removal fails.
    pub fn close(self) -> Result<()> {
        let path = self.dir.path().to_path_buf();
        self.dir
            .close()
            .map_err(|err| UnboxError::filesystem(FsOp::Remove, path, err))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_created_with_prefix() {
        let root = tempfile::TempDir::new().unwrap();
        let scratch = ScratchDir::create_in(root.path()).unwrap();

        assert!(scratch.path().is_dir());
        assert!(scratch.path().starts_with(root.path()));
        let name = scratch.path().file_name().unwrap().to_string_lossy();
        assert!(name.starts_with(SCRATCH_PREFIX));
    }

    #[test]
    fn test_creates_missing_root() {
        let root = tempfile::TempDir::new().unwrap();
        let nested = root.path().join("a/b");
        let scratch = ScratchDir::create_in(&nested).unwrap();
        assert!(scratch.path().starts_with(&nested));
    }

    #[test]
    fn test_removed_on_drop() {
        let root = tempfile::TempDir::new().unwrap();
        let path = {
            let scratch = ScratchDir::create_in(root.path()).unwrap();
            fs::create_dir_all(scratch.path().join("deep/tree")).unwrap();
            fs::write(scratch.path().join("deep/tree/f"), "x").unwrap();
            scratch.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_close_removes() {
        let root = tempfile::TempDir::new().unwrap();
        let scratch = ScratchDir::create_in(root.path()).unwrap();
        let path = scratch.path().to_path_buf();
        scratch.close().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_unique_per_job() {
        let root = tempfile::TempDir::new().unwrap();
        let a = ScratchDir::create_in(root.path()).unwrap();
        let b = ScratchDir::create_in(root.path()).unwrap();
        assert_ne!(a.path(), b.path());
    }
}
