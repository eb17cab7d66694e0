//! Single-archive extraction jobs.

pub mod job;
pub mod scratch;

pub use job::process_archive;
pub use scratch::ScratchDir;
