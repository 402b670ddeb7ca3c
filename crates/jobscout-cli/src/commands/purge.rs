//! Purge command implementation.

use crate::cli::PurgeArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use jobscout_janitor::{Janitor, JanitorConfig};
use std::path::Path;

use super::open_store;

/// Execute the purge command.
pub fn execute_purge(args: PurgeArgs, config: &Config, db_path: &Path, formatter: &Formatter) -> Result<()> {
    let janitor_config = effective_config(&args, &config.janitor);
    let mut janitor = Janitor::new(janitor_config)?;
    let mut store = open_store(db_path)?;

    let metrics = janitor.sweep(&mut store, chrono::Utc::now())?;
    println!("{}", formatter.format_janitor(&metrics)?);
    Ok(())
}

fn effective_config(args: &PurgeArgs, base: &JanitorConfig) -> JanitorConfig {
    let mut config = base.clone();
    if let Some(days) = args.days {
        config.retention_days = days;
    }
    config.dry_run |= args.dry_run;
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = PurgeArgs {
            days: Some(7),
            dry_run: true,
        };
        let config = effective_config(&args, &JanitorConfig::default());
        assert_eq!(config.retention_days, 7);
        assert!(config.dry_run);
    }

    #[test]
    fn test_config_kept_without_flags() {
        let args = PurgeArgs {
            days: None,
            dry_run: false,
        };
        let config = effective_config(&args, &JanitorConfig::lenient());
        assert_eq!(config, JanitorConfig::lenient());
    }
}
