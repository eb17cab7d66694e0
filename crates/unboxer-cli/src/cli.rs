//! CLI argument parsing using clap.

use clap::ArgAction;
use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;
use unboxer_core::DEFAULT_INPUT_DIR;
use unboxer_core::DEFAULT_OUTPUT_DIR;

#[derive(Parser)]
#[command(name = "unboxer")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract every archive in a directory
    Run(RunArgs),
    /// Extract a single archive
    Extract(ExtractArgs),
    /// Show how an archive would be laid out without extracting it
    Inspect(InspectArgs),
    /// Generate shell completions
    Completion(CompletionArgs),
}

#[derive(clap::Args)]
pub struct RunArgs {
    /// Directory to scan for archives
    #[arg(value_name = "INPUT_DIR", default_value = DEFAULT_INPUT_DIR)]
    pub input_dir: PathBuf,

    /// Root directory for extracted output
    #[arg(value_name = "OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Number of parallel workers (default: available cores)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub workers: Option<u32>,

    /// File name pattern to match (glob, can be repeated; replaces defaults)
    #[arg(long = "pattern", short = 'p', value_name = "GLOB")]
    pub patterns: Vec<String>,

    /// Directory for per-archive scratch space (default: OUTPUT_DIR)
    #[arg(long, value_name = "DIR")]
    pub scratch_dir: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct ExtractArgs {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Output root directory (default: current directory)
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Directory for scratch space (default: OUTPUT_DIR)
    #[arg(long, value_name = "DIR")]
    pub scratch_dir: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct InspectArgs {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}
