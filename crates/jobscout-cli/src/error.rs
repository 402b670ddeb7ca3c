//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Job store error
    #[error("Store error: {0}")]
    Store(#[from] jobscout_store::StoreError),

    /// Discovery or digest cycle error
    #[error(transparent)]
    Pipeline(#[from] jobscout_pipeline::PipelineError),

    /// Retention sweep error
    #[error(transparent)]
    Janitor(#[from] jobscout_janitor::JanitorError),

    /// Analyzer setup error
    #[error("Analyzer error: {0}")]
    Analyzer(#[from] jobscout_analyzer::AnalyzerError),

    /// LLM provider setup error
    #[error("LLM error: {0}")]
    Llm(#[from] jobscout_llm::LlmError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
