//! Inspect command implementation

use crate::cli::InspectArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use unboxer_core::inspect_archive;

pub fn execute(args: &InspectArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let inspection = add_archive_context(inspect_archive(&args.archive), &args.archive)?;
    formatter.format_inspection(&inspection)
}
