//! Shared plumbing for the HTTP providers

use crate::LlmError;
use std::future::Future;
use std::time::Duration;

/// Build a client with a request timeout
pub(crate) fn client(timeout: Duration) -> Result<reqwest::Client, LlmError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| LlmError::Configuration(format!("Failed to build HTTP client: {}", e)))
}

/// Run an async request from synchronous code
///
/// Callers are expected to be on a plain or blocking-pool thread, never
/// inside an async task.
pub(crate) fn block_on<F: Future>(future: F) -> Result<F::Output, LlmError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| LlmError::Other(format!("Failed to start runtime: {}", e)))?;
    Ok(runtime.block_on(future))
}

/// Exponential backoff: 1s, 2s, 4s, etc.
pub(crate) fn backoff(attempt: u32) -> Duration {
    Duration::from_secs(2u64.saturating_pow(attempt.saturating_sub(1)))
}

/// Map a non-success status to an error and whether to retry it
pub(crate) fn classify_status(status: reqwest::StatusCode, model: &str, body: String) -> (LlmError, bool) {
    match status {
        reqwest::StatusCode::NOT_FOUND => (LlmError::ModelNotAvailable(model.to_string()), false),
        reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
            (LlmError::Authentication(format!("HTTP {}", status)), false)
        }
        reqwest::StatusCode::TOO_MANY_REQUESTS => (LlmError::RateLimitExceeded, true),
        _ => (LlmError::Communication(format!("HTTP {}: {}", status, body)), true),
    }
}
