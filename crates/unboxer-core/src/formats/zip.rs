//! ZIP reader.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::path::PathBuf;

use zip::ZipArchive;
use zip::result::ZipError;

use crate::Result;
use crate::UnboxError;
use crate::report::EntryCounts;
use crate::types::SafePath;

use super::common;
use super::traits::ArchiveReader;

/// Reads a ZIP archive from disk.
///
/// Symlink entries are written as regular files holding the link target.
/// Encrypted entries fail extraction.
#[derive(Debug, Clone)]
pub struct ZipReader {
    path: PathBuf,
}

impl ZipReader {
    /// Creates a reader for the ZIP archive at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn open(&self) -> std::result::Result<ZipArchive<BufReader<File>>, ZipError> {
        let file = File::open(&self.path)?;
        ZipArchive::new(BufReader::new(file))
    }
}

fn read_error(err: ZipError) -> UnboxError {
    UnboxError::ArchiveRead {
        reason: format!("failed to read ZIP directory: {err}"),
    }
}

fn extract_error(err: ZipError) -> UnboxError {
    match err {
        ZipError::Io(io) => UnboxError::Io(io),
        other => UnboxError::InvalidArchive(format!("ZIP error: {other}")),
    }
}

impl ArchiveReader for ZipReader {
    fn list_entry_names(&mut self) -> Result<Vec<String>> {
        let mut archive = self.open().map_err(read_error)?;
        let mut names = Vec::with_capacity(archive.len());

        for i in 0..archive.len() {
            let file = archive.by_index_raw(i).map_err(read_error)?;
            names.push(file.name().to_owned());
        }

        Ok(names)
    }

    fn extract_all(&mut self, dest: &Path) -> Result<EntryCounts> {
        let mut archive = self.open().map_err(extract_error)?;
        let mut counts = EntryCounts::default();

        for i in 0..archive.len() {
            let mut file = archive.by_index(i).map_err(extract_error)?;
            let Some(safe) = SafePath::from_entry_name(file.name())? else {
                continue;
            };
            let target = dest.join(safe.as_path());

            if file.is_dir() {
                common::create_directory(&target, &mut counts)?;
            } else {
                // Strip the file-type bits so symlink entries land as files.
                let mode = file.unix_mode().map(|m| m & 0o777);
                common::write_file(&mut file, &target, mode, &mut counts)?;
            }
        }

        Ok(counts)
    }

    fn format_name(&self) -> &'static str {
        "zip"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::test_utils::ZipTestBuilder;
    use crate::test_utils::write_archive;
    use tempfile::TempDir;

    #[test]
    fn test_list_entry_names() {
        let temp = TempDir::new().unwrap();
        let data = ZipTestBuilder::new()
            .add_directory("release-1.0/")
            .add_file("release-1.0/a.txt", b"a")
            .add_file("release-1.0/b/c.txt", b"c")
            .build();
        let path = write_archive(temp.path(), "release-1.0.zip", &data);

        let names = ZipReader::new(path).list_entry_names().unwrap();
        assert_eq!(
            names,
            vec!["release-1.0/", "release-1.0/a.txt", "release-1.0/b/c.txt"]
        );
    }

    #[test]
    fn test_extract_nested_without_directory_entries() {
        let temp = TempDir::new().unwrap();
        let data = ZipTestBuilder::new()
            .add_file("x/y/z.txt", b"deep")
            .build();
        let path = write_archive(temp.path(), "deep.zip", &data);
        let dest = temp.path().join("out");

        let counts = ZipReader::new(path).extract_all(&dest).unwrap();
        assert_eq!(counts.files, 1);
        assert_eq!(std::fs::read_to_string(dest.join("x/y/z.txt")).unwrap(), "deep");
    }

    #[test]
    fn test_symlink_entry_written_as_file() {
        let temp = TempDir::new().unwrap();
        let data = ZipTestBuilder::new()
            .add_file("pkg/a.txt", b"a")
            .add_symlink("pkg/link", "a.txt")
            .build();
        let path = write_archive(temp.path(), "links.zip", &data);
        let dest = temp.path().join("out");

        ZipReader::new(path).extract_all(&dest).unwrap();

        let link = dest.join("pkg/link");
        assert!(!link.symlink_metadata().unwrap().file_type().is_symlink());
        assert_eq!(std::fs::read_to_string(link).unwrap(), "a.txt");
    }

    #[cfg(unix)]
    #[test]
    fn test_unix_mode_applied() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let data = ZipTestBuilder::new()
            .add_file_with_mode("run.sh", b"#!/bin/sh", 0o755)
            .build();
        let path = write_archive(temp.path(), "tools.zip", &data);
        let dest = temp.path().join("out");

        ZipReader::new(path).extract_all(&dest).unwrap();

        let mode = std::fs::metadata(dest.join("run.sh")).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn test_traversal_entry_rejected() {
        let temp = TempDir::new().unwrap();
        let data = ZipTestBuilder::new()
            .add_file("../escape.txt", b"evil")
            .build();
        let path = write_archive(temp.path(), "evil.zip", &data);
        let dest = temp.path().join("out");

        let err = ZipReader::new(path).extract_all(&dest).unwrap_err();
        assert!(matches!(err, UnboxError::PathTraversal { .. }));
        assert!(!temp.path().join("escape.txt").exists());
    }

    #[test]
    fn test_garbage_is_read_error() {
        let temp = TempDir::new().unwrap();
        let path = write_archive(temp.path(), "junk.zip", b"definitely not a zip");

        let err = ZipReader::new(path).list_entry_names().unwrap_err();
        assert!(matches!(err, UnboxError::ArchiveRead { .. }));
    }
}
