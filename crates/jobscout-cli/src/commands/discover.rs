//! Discover command implementation.

use crate::cli::DiscoverArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use jobscout_analyzer::{LlmAnalyzer, RuleBasedAnalyzer};
use jobscout_domain::{PostingAnalyzer, RawPosting, Scorer, SponsorshipEvaluator, TierTable};
use jobscout_pipeline::{DiscoveryCycle, DiscoveryReport};
use jobscout_store::SqliteStore;
use std::fmt::Display;
use std::fs;
use std::path::Path;
use tracing::info;

use super::open_store;

/// Execute the discover command.
pub async fn execute_discover(
    args: DiscoverArgs,
    config: &Config,
    db_path: &Path,
    formatter: &Formatter,
) -> Result<()> {
    let postings = read_postings(&args.input)?;
    info!("Read {} postings from {}", postings.len(), args.input);

    let mut store = open_store(db_path)?;
    let report = match config.llm.build()? {
        Some(provider) => {
            let analyzer = LlmAnalyzer::new(provider, config.analyzer.clone())?;
            run_cycle(analyzer, config, &mut store, postings).await?
        }
        None => {
            let analyzer = RuleBasedAnalyzer::new(config.analyzer.clone())?;
            run_cycle(analyzer, config, &mut store, postings).await?
        }
    };

    println!("{}", formatter.format_discovery(&report)?);
    Ok(())
}

async fn run_cycle<A>(
    analyzer: A,
    config: &Config,
    store: &mut SqliteStore,
    postings: Vec<RawPosting>,
) -> Result<DiscoveryReport>
where
    A: PostingAnalyzer + Send + Sync + 'static,
    A::Error: Display,
{
    let evaluator =
        SponsorshipEvaluator::new(&config.sponsorship, TierTable::new(&config.tiers)).map_err(CliError::Config)?;
    let scorer = Scorer::new(config.scoring.clone());
    let cycle = DiscoveryCycle::new(analyzer, evaluator, scorer, config.pipeline.clone())?;
    Ok(cycle.run(store, postings, chrono::Utc::now()).await?)
}

/// Read a JSON array of postings from a file, or stdin for `-`.
pub fn read_postings(input: &str) -> Result<Vec<RawPosting>> {
    let contents = if input == "-" {
        std::io::read_to_string(std::io::stdin())?
    } else {
        fs::read_to_string(input)?
    };
    parse_postings(&contents)
}

fn parse_postings(contents: &str) -> Result<Vec<RawPosting>> {
    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(contents).map_err(|e| CliError::InvalidInput(format!("Expected a JSON array of postings: {}", e)))
}
