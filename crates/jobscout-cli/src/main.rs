//! JobScout CLI - evaluate job postings and send ranked digests.

use anyhow::Context;
use clap::Parser;
use jobscout_cli::commands;
use jobscout_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::path()?,
    };
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))?;

    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let db_override = cli.db.as_deref();
    match cli.command {
        Command::Discover(args) => {
            let db_path = config.database_path(db_override)?;
            commands::execute_discover(args, &config, &db_path, &formatter).await?;
        }
        Command::Digest(args) => {
            commands::execute_digest(args, &config, &config.database_path(db_override)?, &formatter)?;
        }
        Command::Purge(args) => {
            commands::execute_purge(args, &config, &config.database_path(db_override)?, &formatter)?;
        }
        Command::Stats => commands::execute_stats(&config.database_path(db_override)?, &formatter)?,
        Command::Config(args) => commands::execute_config(args, &config, &config_path, &formatter)?,
    }
    Ok(())
}
