//! Batch processing: discovery plus the parallel job runner.

pub mod discover;
pub mod runner;

pub use discover::discover_archives;
pub use runner::run_batch;
