//! Error types for the pipeline cycles

use thiserror::Error;

/// Errors that abort a cycle
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Job store error
    #[error("Store error: {0}")]
    Store(String),

    /// Digest delivery failed; nothing was marked sent
    #[error("Notification error: {0}")]
    Notification(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
