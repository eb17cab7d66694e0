//! TAR reader, plain or wrapped in a compression codec.

use std::fs::File;
use std::io;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use tar::EntryType;

use crate::Result;
use crate::UnboxError;
use crate::report::EntryCounts;
use crate::types::SafePath;

use super::compression::CompressionCodec;
use super::compression::maybe_decode;
use super::traits::ArchiveReader;

/// Reads a TAR archive from disk.
///
/// The file is reopened for each pass because a compressed stream cannot be
/// rewound.
#[derive(Debug, Clone)]
pub struct TarReader {
    path: PathBuf,
    compression: Option<CompressionCodec>,
}

impl TarReader {
    /// Creates a reader for the TAR archive at `path`.
    ///
    /// `compression` is the codec found during detection, if any.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, compression: Option<CompressionCodec>) -> Self {
        Self {
            path: path.into(),
            compression,
        }
    }

    fn open(&self) -> io::Result<tar::Archive<Box<dyn Read>>> {
        let file = File::open(&self.path)?;
        let reader = maybe_decode(BufReader::new(file), self.compression)?;
        let mut archive = tar::Archive::new(reader);
        archive.set_preserve_permissions(false);
        archive.set_overwrite(true);
        Ok(archive)
    }
}

fn read_error(err: io::Error) -> UnboxError {
    UnboxError::ArchiveRead {
        reason: format!("failed to read TAR entries: {err}"),
    }
}

fn corrupt(err: io::Error) -> UnboxError {
    UnboxError::InvalidArchive(format!("corrupt TAR entry: {err}"))
}

impl ArchiveReader for TarReader {
    fn list_entry_names(&mut self) -> Result<Vec<String>> {
        let mut archive = self.open().map_err(read_error)?;
        let mut names = Vec::new();

        for entry in archive.entries().map_err(read_error)? {
            let entry = entry.map_err(read_error)?;
            names.push(String::from_utf8_lossy(&entry.path_bytes()).into_owned());
        }

        tracing::trace!(archive = %self.path.display(), count = names.len(), "listed TAR entries");
        Ok(names)
    }

    fn extract_all(&mut self, dest: &Path) -> Result<EntryCounts> {
        let mut archive = self.open()?;
        let mut counts = EntryCounts::default();

        for entry in archive.entries().map_err(corrupt)? {
            let mut entry = entry.map_err(corrupt)?;
            let path = entry.path().map_err(corrupt)?.into_owned();
            let Some(safe) = SafePath::validate(&path)? else {
                continue;
            };

            let kind = entry.header().entry_type();
            match kind {
                EntryType::Symlink => {
                    if let Some(target) = entry.link_name().map_err(corrupt)? {
                        safe.check_link_target(&target)?;
                    }
                }
                EntryType::Link => {
                    if let Some(target) = entry.link_name().map_err(corrupt)? {
                        SafePath::validate(&target)?;
                    }
                }
                _ => {}
            }

            // `unpack_in` also refuses to write through a symlinked parent that
            // leaves `dest`; `false` means it declined the entry.
            if !entry.unpack_in(dest)? {
                return Err(UnboxError::PathTraversal { path });
            }

            match kind {
                EntryType::Directory => counts.directories += 1,
                EntryType::Symlink | EntryType::Link => counts.links += 1,
                EntryType::Regular | EntryType::Continuous | EntryType::GNUSparse => {
                    counts.files += 1;
                    counts.bytes_written = counts.bytes_written.saturating_add(entry.size());
                }
                _ => {}
            }
        }

        Ok(counts)
    }

    fn format_name(&self) -> &'static str {
        self.compression.map_or("tar", CompressionCodec::extension)
    }
}
