//! RAR reader backed by the bundled unrar library.

use std::path::Path;
use std::path::PathBuf;

use unrar::error::UnrarError;

use crate::Result;
use crate::UnboxError;
use crate::report::EntryCounts;
use crate::types::SafePath;

use super::common;
use super::traits::ArchiveReader;

/// Reads a RAR (v4 or v5) archive from disk.
///
/// unrar only opens archives by path, so the reader holds the path and
/// opens a fresh handle per pass.
#[derive(Debug, Clone)]
pub struct RarReader {
    path: PathBuf,
}

impl RarReader {
    /// Creates a reader for the RAR archive at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// RAR stores `\` separators when created on Windows.
fn entry_name(filename: &Path) -> String {
    filename.to_string_lossy().replace('\\', "/")
}

fn is_password_error(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("password") || lower.contains("encrypted")
}

fn read_error(err: &UnrarError) -> UnboxError {
    UnboxError::ArchiveRead {
        reason: format!("failed to read RAR headers: {err}"),
    }
}

fn extract_error(err: &UnrarError) -> UnboxError {
    let message = err.to_string();
    if is_password_error(&message) {
        UnboxError::InvalidArchive(format!("encrypted RAR archives are not supported: {message}"))
    } else {
        UnboxError::InvalidArchive(format!("RAR error: {message}"))
    }
}

impl ArchiveReader for RarReader {
    fn list_entry_names(&mut self) -> Result<Vec<String>> {
        let listing = unrar::Archive::new(&self.path)
            .open_for_listing()
            .map_err(|e| read_error(&e))?;

        let mut names = Vec::new();
        for header in listing {
            let header = header.map_err(|e| read_error(&e))?;
            names.push(entry_name(&header.filename));
        }
        Ok(names)
    }

    fn extract_all(&mut self, dest: &Path) -> Result<EntryCounts> {
        let mut cursor = unrar::Archive::new(&self.path)
            .open_for_processing()
            .map_err(|e| extract_error(&e))?;
        let mut counts = EntryCounts::default();

        while let Some(at_file) = cursor.read_header().map_err(|e| extract_error(&e))? {
            let header = at_file.entry();
            let safe = SafePath::from_entry_name(&entry_name(&header.filename))?;
            let is_directory = header.is_directory();

            cursor = match safe {
                None => at_file.skip().map_err(|e| extract_error(&e))?,
                Some(safe) if is_directory => {
                    common::create_directory(&dest.join(safe.as_path()), &mut counts)?;
                    at_file.skip().map_err(|e| extract_error(&e))?
                }
                Some(safe) => {
                    let target = dest.join(safe.as_path());
                    if let Some(parent) = target.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    let next = at_file.extract_to(&target).map_err(|e| extract_error(&e))?;
                    counts.files += 1;
                    counts.bytes_written = counts
                        .bytes_written
                        .saturating_add(std::fs::metadata(&target)?.len());
                    next
                }
            };
        }

        Ok(counts)
    }

    fn format_name(&self) -> &'static str {
        "rar"
    }
}
