//! Bulk archive extraction with a normalized, idempotent output layout.
//!
//! `unboxer-core` extracts ZIP, TAR (plain, gzip, bzip2, xz, zstd), 7z and
//! RAR archives into `<output_root>/<base_name>/`, where the base name is
//! the archive file name without its archive suffix. Formats are detected
//! from content, never from the file name.
//!
//! The layout avoids redundant nesting: an archive `release-1.0.zip` whose
//! only top-level entry is a `release-1.0/` directory extracts to
//! `release-1.0/a.txt`, not `release-1.0/release-1.0/a.txt`. Each job
//! extracts into a private scratch directory first and then moves entries
//! into place, replacing conflicting entries, so rerunning a job leaves the
//! same tree.
//!
//! # Examples
//!
//! ```no_run
//! use unboxer_core::{BatchConfig, ExtractOptions, NoopProgress, process_archive, run_batch};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // One archive
//! let report = process_archive("downloads/bundle.tar.gz".as_ref(), &ExtractOptions::new("out"))?;
//! println!("{} files in {}", report.entries.files, report.output_dir.display());
//!
//! // A whole directory, in parallel
//! let config = BatchConfig::new("downloads").with_extract(ExtractOptions::new("out"));
//! let batch = run_batch(&config, &NoopProgress)?;
//! println!("{} failed", batch.failed());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod batch;
pub mod config;
pub mod error;
pub mod extraction;
pub mod formats;
pub mod inspection;
pub mod layout;
pub mod report;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
pub mod types;

pub use batch::discover_archives;
pub use batch::run_batch;
pub use config::BatchConfig;
pub use config::DEFAULT_INPUT_DIR;
pub use config::DEFAULT_OUTPUT_DIR;
pub use config::DEFAULT_PATTERNS;
pub use config::ExtractOptions;
pub use error::ErrorCategory;
pub use error::FsOp;
pub use error::Result;
pub use error::UnboxError;
pub use extraction::process_archive;
pub use formats::ArchiveFormat;
pub use formats::detect;
pub use formats::open_reader;
pub use inspection::ArchiveInspection;
pub use inspection::inspect_archive;
pub use layout::LayoutKind;
pub use layout::analyze_roots;
pub use layout::apply_plan;
pub use layout::plan_layout;
pub use report::ArchiveOutcome;
pub use report::BatchProgress;
pub use report::BatchReport;
pub use report::EntryCounts;
pub use report::JobReport;
pub use report::NoopProgress;
pub use types::ARCHIVE_SUFFIXES;
pub use types::BaseName;
