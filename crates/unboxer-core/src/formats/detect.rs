//! Archive format detection by content sniffing.
//!
//! File names are never consulted: a `.zip` that actually holds a TAR stream
//! is reported as TAR. Probes run in a fixed precedence (TAR, ZIP, RAR, 7z)
//! and any failure to open or read the file degrades to
//! [`ArchiveFormat::Unknown`].

use std::fmt;
use std::fs::File;
use std::io;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use super::compression::CompressionCodec;

/// Size of a TAR header block.
const TAR_BLOCK: usize = 512;

/// Byte range of the checksum field inside a TAR header.
const TAR_CKSUM_RANGE: std::ops::Range<usize> = 148..156;

/// RAR 1.5 to 4.x signature.
const RAR4_MAGIC: [u8; 7] = *b"Rar!\x1A\x07\x00";

/// RAR 5.0 signature.
const RAR5_MAGIC: [u8; 8] = *b"Rar!\x1A\x07\x01\x00";

/// 7z signature: "7z" followed by format version bytes.
const SEVENZ_MAGIC: [u8; 6] = [0x37, 0x7A, 0xBC, 0xAF, 0x27, 0x1C];

/// Archive format recognized from file content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    /// TAR archive, optionally inside a compression stream.
    Tar {
        /// Compression wrapped around the TAR stream, if any.
        compression: Option<CompressionCodec>,
    },
    /// ZIP archive.
    Zip,
    /// RAR archive (v4 or v5).
    Rar,
    /// 7z archive.
    SevenZip,
    /// Content matched no supported format.
    Unknown,
}

impl ArchiveFormat {
    /// Short name used in reports and logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Tar { compression: None } => "tar",
            Self::Tar {
                compression: Some(codec),
            } => codec.extension(),
            Self::Zip => "zip",
            Self::Rar => "rar",
            Self::SevenZip => "7z",
            Self::Unknown => "unknown",
        }
    }

    /// Returns `true` unless the format is [`ArchiveFormat::Unknown`].
    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Detects the archive format of the file at `path` from its content.
///
/// Never fails: unreadable or unrecognized files yield
/// [`ArchiveFormat::Unknown`].
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use unboxer_core::formats::detect::{ArchiveFormat, detect};
///
/// match detect(Path::new("input/release-1.0.zip")) {
///     ArchiveFormat::Unknown => println!("not an archive"),
///     format => println!("detected {format}"),
/// }
/// ```
pub fn detect(path: &Path) -> ArchiveFormat {
    match sniff(path) {
        Ok(format) => {
            debug!(path = %path.display(), format = %format, "detected archive format");
            format
        }
        Err(err) => {
            debug!(path = %path.display(), error = %err, "format probe failed");
            ArchiveFormat::Unknown
        }
    }
}

fn sniff(path: &Path) -> io::Result<ArchiveFormat> {
    let mut file = File::open(path)?;
    let head = read_block(&mut file)?;

    if let Some(compression) = probe_tar(path, &head) {
        return Ok(ArchiveFormat::Tar { compression });
    }
    if probe_zip(path) {
        return Ok(ArchiveFormat::Zip);
    }
    if head.starts_with(&RAR4_MAGIC) || head.starts_with(&RAR5_MAGIC) {
        return Ok(ArchiveFormat::Rar);
    }
    if head.starts_with(&SEVENZ_MAGIC) {
        return Ok(ArchiveFormat::SevenZip);
    }
    Ok(ArchiveFormat::Unknown)
}

/// Returns `Some(codec)` when the file holds a TAR stream, where `codec` is
/// the compression layered around it.
fn probe_tar(path: &Path, head: &[u8]) -> Option<Option<CompressionCodec>> {
    match CompressionCodec::from_magic(head) {
        Some(codec) => {
            let file = File::open(path).ok()?;
            let mut decoder = codec.decoder(BufReader::new(file)).ok()?;
            let block = read_block(&mut decoder).ok()?;
            let is_tar = is_tar_header(&block);
            if !is_tar {
                debug!(
                    path = %path.display(),
                    codec = codec.name(),
                    "compressed stream does not hold a TAR archive"
                );
            }
            is_tar.then_some(Some(codec))
        }
        None => is_tar_header(head).then_some(None),
    }
}

fn probe_zip(path: &Path) -> bool {
    File::open(path)
        .map(|file| zip::ZipArchive::new(BufReader::new(file)).is_ok())
        .unwrap_or(false)
}

/// Reads up to one TAR block, stopping early at end of stream.
fn read_block<R: Read>(reader: &mut R) -> io::Result<Vec<u8>> {
    let mut block = Vec::with_capacity(TAR_BLOCK);
    reader.take(TAR_BLOCK as u64).read_to_end(&mut block)?;
    Ok(block)
}

/// Checks that `block` is a non-empty TAR header with a valid checksum.
fn is_tar_header(block: &[u8]) -> bool {
    if block.len() < TAR_BLOCK || block.iter().all(|&b| b == 0) {
        return false;
    }

    let header = tar::Header::from_byte_slice(&block[..TAR_BLOCK]);
    let Ok(stored) = header.cksum() else {
        return false;
    };

    let computed: u32 = block[..TAR_BLOCK]
        .iter()
        .enumerate()
        .map(|(i, &b)| {
            if TAR_CKSUM_RANGE.contains(&i) {
                u32::from(b' ')
            } else {
                u32::from(b)
            }
        })
        .sum();

    stored == computed
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::test_utils::TarTestBuilder;
    use crate::test_utils::ZipTestBuilder;
    use crate::test_utils::gzip;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, data: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, data).expect("failed to write fixture");
        path
    }

    #[test]
    fn test_detect_tar() {
        let temp = TempDir::new().unwrap();
        let data = TarTestBuilder::new().add_file("a.txt", b"hello").build();
        let path = write(&temp, "archive.tar", &data);
        assert_eq!(detect(&path), ArchiveFormat::Tar { compression: None });
    }

    #[test]
    fn test_detect_tar_gz() {
        let temp = TempDir::new().unwrap();
        let data = gzip(&TarTestBuilder::new().add_file("a.txt", b"hello").build());
        let path = write(&temp, "archive.tar.gz", &data);
        assert_eq!(
            detect(&path),
            ArchiveFormat::Tar {
                compression: Some(CompressionCodec::Gzip)
            }
        );
    }

    #[test]
    fn test_detect_ignores_extension() {
        let temp = TempDir::new().unwrap();
        let data = TarTestBuilder::new().add_file("a.txt", b"hello").build();
        let path = write(&temp, "mislabeled.zip", &data);
        assert_eq!(detect(&path), ArchiveFormat::Tar { compression: None });
    }

    #[test]
    fn test_detect_zip() {
        let temp = TempDir::new().unwrap();
        let data = ZipTestBuilder::new().add_file("a.txt", b"hello").build();
        let path = write(&temp, "archive.rar", &data);
        assert_eq!(detect(&path), ArchiveFormat::Zip);
    }

    #[test]
    fn test_detect_rar_signatures() {
        let temp = TempDir::new().unwrap();
        let mut rar4 = RAR4_MAGIC.to_vec();
        rar4.extend_from_slice(&[0u8; 32]);
        let mut rar5 = RAR5_MAGIC.to_vec();
        rar5.extend_from_slice(&[0u8; 32]);

        assert_eq!(detect(&write(&temp, "v4.rar", &rar4)), ArchiveFormat::Rar);
        assert_eq!(detect(&write(&temp, "v5.bin", &rar5)), ArchiveFormat::Rar);
    }

    #[test]
    fn test_detect_7z_signature() {
        let temp = TempDir::new().unwrap();
        let mut data = SEVENZ_MAGIC.to_vec();
        data.extend_from_slice(&[0u8; 26]);
        assert_eq!(
            detect(&write(&temp, "archive.7z", &data)),
            ArchiveFormat::SevenZip
        );
    }

    #[test]
    fn test_detect_unknown() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, "notes.zip", b"this is not an archive at all");
        assert_eq!(detect(&path), ArchiveFormat::Unknown);
    }

    #[test]
    fn test_detect_empty_and_zeroed_files() {
        let temp = TempDir::new().unwrap();
        assert_eq!(
            detect(&write(&temp, "empty.tar", b"")),
            ArchiveFormat::Unknown
        );
        assert_eq!(
            detect(&write(&temp, "zeros.tar", &[0u8; 1024])),
            ArchiveFormat::Unknown
        );
    }

    #[test]
    fn test_detect_gzip_without_tar_is_unknown() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, "plain.tar.gz", &gzip(b"just some text"));
        assert_eq!(detect(&path), ArchiveFormat::Unknown);
    }

    #[test]
    fn test_detect_missing_file() {
        let temp = TempDir::new().unwrap();
        assert_eq!(
            detect(&temp.path().join("missing.zip")),
            ArchiveFormat::Unknown
        );
    }

    #[test]
    fn test_format_names() {
        assert_eq!(ArchiveFormat::Tar { compression: None }.name(), "tar");
        assert_eq!(
            ArchiveFormat::Tar {
                compression: Some(CompressionCodec::Gzip)
            }
            .to_string(),
            "tar.gz"
        );
        assert_eq!(ArchiveFormat::SevenZip.name(), "7z");
        assert!(!ArchiveFormat::Unknown.is_known());
        assert!(ArchiveFormat::Rar.is_known());
    }
}
