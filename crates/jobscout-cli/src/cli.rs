//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// JobScout - evaluate job postings and send ranked digests.
#[derive(Debug, Parser)]
#[command(name = "jobscout")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "JOBSCOUT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Database file path
    #[arg(long, global = true, env = "JOBSCOUT_DB")]
    pub db: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run one discovery cycle over a JSON array of postings
    Discover(DiscoverArgs),

    /// Run one digest cycle
    Digest(DigestArgs),

    /// Delete records past the retention age
    Purge(PurgeArgs),

    /// Show store statistics
    Stats,

    /// Show or initialize the configuration
    Config(ConfigArgs),
}

/// Arguments for the discover command.
#[derive(Debug, Parser)]
pub struct DiscoverArgs {
    /// JSON file with postings, or `-` for stdin
    #[arg(short, long, default_value = "-")]
    pub input: String,
}

/// Arguments for the digest command.
#[derive(Debug, Parser)]
pub struct DigestArgs {
    /// Write the digest to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the purge command.
#[derive(Debug, Parser)]
pub struct PurgeArgs {
    /// Retention age in days (overrides the configuration)
    #[arg(short, long)]
    pub days: Option<u32>,

    /// Count what would be deleted without deleting
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the config command.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    /// Write a default configuration file
    #[arg(long)]
    pub init: bool,

    /// Overwrite an existing file with --init
    #[arg(long, requires = "init")]
    pub force: bool,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}
