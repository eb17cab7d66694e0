//! Archive format detection and readers.

pub mod common;
pub mod compression;
pub mod detect;
pub mod rar;
pub mod sevenz;
pub mod tar;
pub mod traits;
pub mod zip;

use std::path::Path;

pub use compression::CompressionCodec;
pub use detect::ArchiveFormat;
pub use detect::detect;
pub use rar::RarReader;
pub use sevenz::SevenZReader;
pub use tar::TarReader;
pub use traits::ArchiveReader;
pub use zip::ZipReader;

use crate::Result;
use crate::UnboxError;

/// Returns the reader for an archive whose format was already detected.
///
/// # Errors
///
/// Returns `UnknownFormat` for [`ArchiveFormat::Unknown`].
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use unboxer_core::formats::{detect, open_reader};
///
/// let path = Path::new("input/bundle.tar.gz");
/// let mut reader = open_reader(path, detect(path))?;
/// for name in reader.list_entry_names()? {
///     println!("{name}");
/// }
/// # Ok::<(), unboxer_core::UnboxError>(())
/// ```
pub fn open_reader(path: &Path, format: ArchiveFormat) -> Result<Box<dyn ArchiveReader>> {
    Ok(match format {
        ArchiveFormat::Tar { compression } => Box::new(TarReader::new(path, compression)),
        ArchiveFormat::Zip => Box::new(ZipReader::new(path)),
        ArchiveFormat::Rar => Box::new(RarReader::new(path)),
        ArchiveFormat::SevenZip => Box::new(SevenZReader::new(path)),
        ArchiveFormat::Unknown => {
            return Err(UnboxError::UnknownFormat {
                path: path.to_path_buf(),
            });
        }
    })
}
