//! Compression codecs wrapped around TAR streams.
//!
//! A TAR archive may be stored raw or inside a single compression stream.
//! The codec is recognized from the stream's leading magic bytes so the
//! matching decoder can be layered under the TAR reader, regardless of
//! what the file happens to be called.

use std::io::Read;
use std::io::{self};

use bzip2::read::MultiBzDecoder;
use flate2::read::MultiGzDecoder;
use xz2::read::XzDecoder;

const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];
const BZIP2_MAGIC: [u8; 3] = *b"BZh";
const XZ_MAGIC: [u8; 6] = [0xFD, 0x37, 0x7A, 0x58, 0x5A, 0x00];
const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

/// Compression codec layered around a TAR stream.
///
/// # Examples
///
/// ```
/// use unboxer_core::formats::compression::CompressionCodec;
///
/// assert_eq!(
///     CompressionCodec::from_magic(&[0x1F, 0x8B, 0x08]),
///     Some(CompressionCodec::Gzip)
/// );
/// assert_eq!(CompressionCodec::from_magic(b"plain text"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompressionCodec {
    /// Gzip (deflate), `.tar.gz` / `.tgz`.
    Gzip,
    /// Bzip2, `.tar.bz2`.
    Bzip2,
    /// Xz (LZMA2), `.tar.xz`.
    Xz,
    /// Zstandard, `.tar.zst`.
    Zstd,
}

impl CompressionCodec {
    /// Recognizes a codec from the first bytes of a file.
    #[must_use]
    pub fn from_magic(head: &[u8]) -> Option<Self> {
        if head.starts_with(&GZIP_MAGIC) {
            Some(Self::Gzip)
        } else if head.starts_with(&BZIP2_MAGIC) {
            Some(Self::Bzip2)
        } else if head.starts_with(&XZ_MAGIC) {
            Some(Self::Xz)
        } else if head.starts_with(&ZSTD_MAGIC) {
            Some(Self::Zstd)
        } else {
            None
        }
    }

    /// Returns the typical file extension for this codec when used with TAR.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Gzip => "tar.gz",
            Self::Bzip2 => "tar.bz2",
            Self::Xz => "tar.xz",
            Self::Zstd => "tar.zst",
        }
    }

    /// Returns a human-readable name for this codec.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Gzip => "gzip",
            Self::Bzip2 => "bzip2",
            Self::Xz => "xz",
            Self::Zstd => "zstd",
        }
    }

    /// Wraps `reader` in the decoder for this codec.
    ///
    /// # Errors
    ///
    /// Returns an error if the decoder cannot be initialized (zstd only).
    pub fn decoder<'a, R: Read + 'a>(self, reader: R) -> io::Result<Box<dyn Read + 'a>> {
        Ok(match self {
            Self::Gzip => Box::new(MultiGzDecoder::new(reader)),
            Self::Bzip2 => Box::new(MultiBzDecoder::new(reader)),
            Self::Xz => Box::new(XzDecoder::new_multi_decoder(reader)),
            Self::Zstd => Box::new(zstd::stream::read::Decoder::new(reader)?),
        })
    }
}

/// Wraps `reader` in the decoder for `codec`, or returns it unchanged.
pub(crate) fn maybe_decode<'a, R: Read + 'a>(
    reader: R,
    codec: Option<CompressionCodec>,
) -> io::Result<Box<dyn Read + 'a>> {
    match codec {
        Some(codec) => codec.decoder(reader),
        None => Ok(Box::new(reader)),
    }
}
