//! Validated value types shared across the extraction pipeline.
//!
//! Both types are constructed through validation or normalization only;
//! neither has a `From<String>` or `From<PathBuf>` implementation.

pub mod base_name;
pub mod safe_path;

pub use base_name::ARCHIVE_SUFFIXES;
pub use base_name::BaseName;
pub use safe_path::SafePath;
