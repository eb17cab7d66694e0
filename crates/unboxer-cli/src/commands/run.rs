//! Run command implementation.

use crate::cli::RunArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Result;
use anyhow::bail;
use unboxer_core::BatchConfig;
use unboxer_core::ExtractOptions;
use unboxer_core::NoopProgress;
use unboxer_core::run_batch;

pub fn execute(args: &RunArgs, formatter: &dyn OutputFormatter, show_progress: bool) -> Result<()> {
    let extract = ExtractOptions::new(&args.output_dir).with_scratch_root(args.scratch_dir.clone());
    let mut config = BatchConfig::new(&args.input_dir)
        .with_workers(args.workers.map(|n| n as usize))
        .with_extract(extract);
    if !args.patterns.is_empty() {
        config = config.with_patterns(args.patterns.clone());
    }
    tracing::debug!(
        input = %config.input_dir.display(),
        output = %config.extract.output_root.display(),
        patterns = ?config.patterns,
        "resolved batch configuration"
    );

    // Progress bar only on a TTY and when the summary is not machine-readable
    let report = if show_progress && CliProgress::should_show() {
        let progress = CliProgress::new("Extracting");
        add_archive_context(run_batch(&config, &progress), &args.input_dir)?
    } else {
        add_archive_context(run_batch(&config, &NoopProgress), &args.input_dir)?
    };

    formatter.format_batch_result(&report)?;

    if report.has_failures() {
        bail!(
            "{} of {} archives failed",
            report.failed(),
            report.total()
        );
    }

    Ok(())
}
