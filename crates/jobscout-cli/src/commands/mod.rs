//! Command implementations.

pub mod configure;
pub mod digest;
pub mod discover;
pub mod purge;
pub mod stats;

pub use self::configure::execute_config;
pub use self::digest::execute_digest;
pub use self::discover::execute_discover;
pub use self::purge::execute_purge;
pub use self::stats::execute_stats;

use crate::error::Result;
use jobscout_store::SqliteStore;
use std::fs;
use std::path::Path;

/// Open the store at `path`, creating its directory if needed.
pub fn open_store(path: &Path) -> Result<SqliteStore> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(SqliteStore::new(path)?)
}
