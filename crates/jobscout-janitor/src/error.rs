//! Retention sweep errors

use thiserror::Error;

/// Why a sweep could not run
#[derive(Error, Debug)]
pub enum JanitorError {
    /// The job store rejected the count or delete
    #[error("Job store error: {0}")]
    Store(String),

    /// Invalid retention settings
    #[error("Invalid retention config: {0}")]
    Config(String),
}
