//! Stats command implementation.

use crate::error::Result;
use crate::output::Formatter;
use jobscout_domain::JobStore;
use std::path::Path;

use super::open_store;

/// Execute the stats command.
pub fn execute_stats(db_path: &Path, formatter: &Formatter) -> Result<()> {
    let store = open_store(db_path)?;
    let stats = store.stats()?;
    println!("{}", formatter.format_stats(&stats)?);
    Ok(())
}
