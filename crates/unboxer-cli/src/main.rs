//! Unboxer CLI - Command-line utility for bulk archive extraction into
//! normalized directories.

mod cli;
mod commands;
mod error;
mod logging;
mod output;
mod progress;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    logging::init(cli.verbose, cli.quiet);
    let formatter = output::create_formatter(cli.json, cli.verbose > 0, cli.quiet);

    match &cli.command {
        cli::Commands::Run(args) => {
            commands::run::execute(args, &*formatter, !cli.quiet && !cli.json)
        }
        cli::Commands::Extract(args) => commands::extract::execute(args, &*formatter),
        cli::Commands::Inspect(args) => commands::inspect::execute(args, &*formatter),
        cli::Commands::Completion(args) => {
            commands::completion::execute(args.shell);
            Ok(())
        }
    }
}
