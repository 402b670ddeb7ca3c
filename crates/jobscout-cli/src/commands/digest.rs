//! Digest command implementation.

use crate::cli::DigestArgs;
use crate::config::Config;
use crate::error::Result;
use crate::notifier::PreviewNotifier;
use crate::output::Formatter;
use jobscout_pipeline::DigestCycle;
use std::path::Path;

use super::open_store;

/// Execute the digest command.
pub fn execute_digest(args: DigestArgs, config: &Config, db_path: &Path, formatter: &Formatter) -> Result<()> {
    let mut store = open_store(db_path)?;

    let notifier = match args.output {
        Some(path) => PreviewNotifier::file(*formatter, path),
        None => PreviewNotifier::stdout(*formatter),
    };
    let cycle = DigestCycle::new(config.digest.clone(), notifier)?;
    let report = cycle.run(&mut store, chrono::Utc::now())?;

    let summary = format!(
        "{} of {} unsent jobs marked sent",
        report.marked_sent, report.candidates
    );
    if cycle.notifier().writes_file() {
        println!("{}", formatter.success(&summary));
    } else {
        eprintln!("{}", formatter.info(&summary));
    }
    Ok(())
}
