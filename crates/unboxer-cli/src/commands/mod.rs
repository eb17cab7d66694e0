//! Subcommand implementations.

pub mod completion;
pub mod extract;
pub mod inspect;
pub mod run;
