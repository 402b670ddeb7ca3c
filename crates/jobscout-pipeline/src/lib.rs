//! JobScout Pipeline
//!
//! The two batch cycles of the system.
//!
//! ```text
//! discovery: postings → dedup → analyzer → sponsorship → scorer → store
//! digest:    store (unsent) → selector → notifier → store (mark sent)
//! ```
//!
//! Cycles never overlap; each takes the store by `&mut` for its duration.

#![warn(missing_docs)]

mod config;
mod digest;
mod discovery;
mod error;

pub use config::PipelineConfig;
pub use digest::{DigestCycle, DigestReport};
pub use discovery::{DiscoveryCycle, DiscoveryReport};
pub use error::PipelineError;
