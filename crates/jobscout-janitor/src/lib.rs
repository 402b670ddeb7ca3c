//! JobScout Janitor
//!
//! Retention sweep for the job store.
//!
//! # Overview
//!
//! Records are kept for `retention_days` after discovery and then deleted,
//! sent or not. Dedup therefore only covers postings seen within the
//! retention window.
//!
//! # Usage
//!
//! ```no_run
//! use jobscout_janitor::{Janitor, JanitorConfig};
//! use jobscout_store::SqliteStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut store = SqliteStore::new("jobscout.db")?;
//! let mut janitor = Janitor::new(JanitorConfig::lenient())?;
//!
//! let metrics = janitor.sweep(&mut store, chrono::Utc::now())?;
//! println!("Deleted: {}", metrics.deleted);
//! println!("\n{}", metrics.summary());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! ```toml
//! [janitor]
//! retention_days = 30
//! dry_run = false
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod janitor;
mod metrics;

pub use config::JanitorConfig;
pub use error::JanitorError;
pub use janitor::Janitor;
pub use metrics::JanitorMetrics;
