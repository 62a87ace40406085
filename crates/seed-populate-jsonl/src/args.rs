//! CLI argument definitions for the file and console populators.

use clap::Args;
use seed_populate::CommonSeedArgs;
use std::path::PathBuf;

/// JSONL file seed arguments.
#[derive(Args, Clone, Debug)]
pub struct JsonlSeedArgs {
    /// Output file path
    #[arg(long, short = 'o')]
    pub output_file: PathBuf,

    /// Append to the file instead of truncating it
    #[arg(long)]
    pub append: bool,

    #[command(flatten)]
    pub common: CommonSeedArgs,
}

/// Console seed arguments.
#[derive(Args, Clone, Debug)]
pub struct ConsoleSeedArgs {
    /// Print JSON Lines instead of a single JSON array
    #[arg(long)]
    pub lines: bool,

    #[command(flatten)]
    pub common: CommonSeedArgs,
}
