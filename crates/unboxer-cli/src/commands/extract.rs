//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use anyhow::Context;
use anyhow::Result;
use std::env;
use unboxer_core::ExtractOptions;
use unboxer_core::process_archive;

pub fn execute(args: &ExtractArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let output_root = match &args.output_dir {
        Some(dir) => dir.clone(),
        None => env::current_dir().context("failed to get current directory")?,
    };

    let options = ExtractOptions::new(output_root).with_scratch_root(args.scratch_dir.clone());
    let report = add_archive_context(process_archive(&args.archive, &options), &args.archive)?;

    formatter.format_job_result(&report)?;

    Ok(())
}
