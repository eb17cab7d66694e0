//! 7z reader.
//!
//! Metadata is read once with [`sevenz_rust2::Archive::read`] and cached;
//! every entry name is validated before decompression starts, so a single
//! bad name fails the archive before anything is written.
//!
//! # Limitations
//!
//! sevenz-rust2 does not expose Unix entry types. Unix symlinks are written
//! as regular files containing the target path, and hardlinks as separate
//! copies. Encrypted archives are rejected.

use std::cell::RefCell;
use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use sevenz_rust2::Archive;
use sevenz_rust2::Password;

use crate::Result;
use crate::UnboxError;
use crate::report::EntryCounts;
use crate::types::SafePath;

use super::common;
use super::traits::ArchiveReader;

#[derive(Debug, Clone)]
struct CachedEntry {
    name: String,
    is_directory: bool,
}

/// Reads a 7z archive from disk.
#[derive(Debug)]
pub struct SevenZReader {
    path: PathBuf,
    entries: Option<Vec<CachedEntry>>,
}

impl SevenZReader {
    /// Creates a reader for the 7z archive at `path`.
    ///
    /// Nothing is read until the first call.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: None,
        }
    }

    fn entries(&mut self) -> Result<&[CachedEntry]> {
        if self.entries.is_none() {
            let mut source = BufReader::new(File::open(&self.path)?);
            let archive = Archive::read(&mut source, &Password::empty())?;
            let cached = archive
                .files
                .iter()
                .map(|e| CachedEntry {
                    name: e.name.clone(),
                    is_directory: e.is_directory(),
                })
                .collect();
            self.entries = Some(cached);
        }
        Ok(self.entries.as_deref().unwrap_or_default())
    }
}

impl ArchiveReader for SevenZReader {
    fn list_entry_names(&mut self) -> Result<Vec<String>> {
        let entries = self.entries().map_err(|e| UnboxError::ArchiveRead {
            reason: format!("failed to read 7z header: {e}"),
        })?;
        Ok(entries.iter().map(|e| e.name.clone()).collect())
    }

    fn extract_all(&mut self, dest: &Path) -> Result<EntryCounts> {
        for entry in self.entries()? {
            SafePath::from_entry_name(&entry.name)?;
        }

        let counts = RefCell::new(EntryCounts::default());
        let failure: RefCell<Option<UnboxError>> = RefCell::new(None);

        let extract_fn = |entry: &sevenz_rust2::ArchiveEntry,
                          reader: &mut dyn Read,
                          _dest: &PathBuf|
         -> std::result::Result<bool, sevenz_rust2::Error> {
            extract_entry(entry, reader, dest, &mut counts.borrow_mut()).map_err(|err| {
                let message = err.to_string();
                *failure.borrow_mut() = Some(err);
                sevenz_rust2::Error::Other(message.into())
            })?;
            Ok(true)
        };

        let source = BufReader::new(File::open(&self.path)?);
        let outcome = sevenz_rust2::decompress_with_extract_fn(source, dest, extract_fn);

        if let Some(err) = failure.into_inner() {
            return Err(err);
        }
        outcome?;
        Ok(counts.into_inner())
    }

    fn format_name(&self) -> &'static str {
        "7z"
    }
}

fn extract_entry(
    entry: &sevenz_rust2::ArchiveEntry,
    reader: &mut dyn Read,
    dest: &Path,
    counts: &mut EntryCounts,
) -> Result<()> {
    let Some(safe) = SafePath::from_entry_name(&entry.name)? else {
        return Ok(());
    };
    let target = dest.join(safe.as_path());
    if entry.is_directory() {
        common::create_directory(&target, counts)
    } else {
        common::write_file(reader, &target, None, counts)
    }
}

impl From<sevenz_rust2::Error> for UnboxError {
    fn from(err: sevenz_rust2::Error) -> Self {
        let message = err.to_string();
        let lower = message.to_lowercase();

        if lower.contains("password") || lower.contains("encrypt") {
            return Self::InvalidArchive(format!(
                "encrypted 7z archives are not supported: {message}"
            ));
        }

        Self::InvalidArchive(format!("7z error: {message}"))
    }
}
