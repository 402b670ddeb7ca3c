//! LLM backends for posting analysis.
//!
//! Every backend implements the domain `LlmProvider` trait and is blocking
//! from the caller's side; HTTP backends drive their own runtime.
//!
//! - [`MockProvider`]: canned replies keyed by prompt fragment, for tests
//! - [`OllamaProvider`]: a local Ollama server
//! - [`OpenAiProvider`]: any OpenAI-compatible chat-completions endpoint
//!
//! [`LlmConfig::build`] picks one from configuration.
//!
//! ```
//! use jobscout_domain::traits::LlmProvider;
//! use jobscout_llm::MockProvider;
//!
//! let provider = MockProvider::new(r#"{"signal": "partial"}"#);
//! assert!(provider.generate("Does this role sponsor visas?").unwrap().contains("partial"));
//! ```

#![warn(missing_docs)]

pub mod config;
mod http;
pub mod ollama;
pub mod openai;

use jobscout_domain::traits::LlmProvider as LlmProviderTrait;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

pub use config::{ConfiguredProvider, LlmConfig, ProviderKind};
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;

/// Failures talking to a backend
#[derive(Error, Debug)]
pub enum LlmError {
    /// Transport failure or retries exhausted
    #[error("Communication error: {0}")]
    Communication(String),

    /// Body did not have the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// HTTP 429
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// HTTP 401/403
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// HTTP 404 for the requested model
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Bad endpoint or client setup
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Scripted mock failure
    #[error("LLM error: {0}")]
    Other(String),
}

#[derive(Debug, Clone)]
enum Scripted {
    Reply(String),
    Fail,
}

/// Canned-response provider
///
/// Rules are checked in insertion order; the first fragment found in the
/// prompt decides the reply. Clones share rules and the call counter.
///
/// ```
/// use jobscout_domain::traits::LlmProvider;
/// use jobscout_llm::MockProvider;
///
/// let mut provider = MockProvider::default();
/// provider.add_response("Classify", r#"{"category": "Data Analyst"}"#);
/// provider.add_error("sponsorship");
/// assert!(provider.generate("Classify this posting").unwrap().contains("Data Analyst"));
/// assert!(provider.generate("Assess sponsorship").is_err());
/// assert_eq!(provider.call_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    rules: Arc<Mutex<Vec<(String, Scripted)>>>,
    call_count: Arc<Mutex<usize>>,
}

/// Lock a mutex, recovering the data if a panicking test poisoned it
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockProvider {
    /// Reply with `response` to every prompt no rule matches
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            rules: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Respond with `response` to prompts containing `fragment`
    pub fn add_response(&mut self, fragment: impl Into<String>, response: impl Into<String>) {
        lock(&self.rules).push((fragment.into(), Scripted::Reply(response.into())));
    }

    /// Fail prompts containing `fragment`
    pub fn add_error(&mut self, fragment: impl Into<String>) {
        lock(&self.rules).push((fragment.into(), Scripted::Fail));
    }

    /// Prompts seen so far
    pub fn call_count(&self) -> usize {
        *lock(&self.call_count)
    }

    /// Zero the counter
    pub fn reset_call_count(&self) {
        *lock(&self.call_count) = 0;
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("{}")
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        *lock(&self.call_count) += 1;

        let rules = lock(&self.rules);
        match rules.iter().find(|(fragment, _)| prompt.contains(fragment.as_str())) {
            Some((_, Scripted::Reply(response))) => Ok(response.clone()),
            Some((_, Scripted::Fail)) => Err(LlmError::Other("Mock error".to_string())),
            None => Ok(self.default_response.clone()),
        }
    }

    fn generate_structured(&self, prompt: &str, _schema: &str) -> Result<String, Self::Error> {
        self.generate(prompt)
    }
}
