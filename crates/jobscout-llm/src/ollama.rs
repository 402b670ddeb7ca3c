//! Ollama backend (`POST /api/generate`).
//!
//! Structured calls switch on Ollama's JSON mode; the schema itself is
//! carried in the prompt.

use crate::http;
use crate::LlmError;
use jobscout_domain::traits::LlmProvider as LlmProviderTrait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Where `ollama serve` listens by default
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Attempts per request
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Local Ollama server
///
/// ```no_run
/// use jobscout_domain::traits::LlmProvider;
/// use jobscout_llm::OllamaProvider;
///
/// let provider = OllamaProvider::default_endpoint("llama3").unwrap().with_max_retries(2);
/// let json = provider.generate_structured("Classify this posting...", "{}").unwrap();
/// ```
pub struct OllamaProvider {
    endpoint: String,
    model: String,
    client: reqwest::Client,
    max_retries: u32,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<&'a str>,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaProvider {
    /// Provider with the default timeout
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        Self::with_timeout(endpoint, model, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Provider with an explicit per-request timeout
    pub fn with_timeout(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            client: http::client(timeout)?,
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    /// Provider on [`DEFAULT_ENDPOINT`]
    pub fn default_endpoint(model: impl Into<String>) -> Result<Self, LlmError> {
        Self::new(DEFAULT_ENDPOINT, model)
    }

    /// Attempts per request, at least one
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// One completion, retried with backoff on transport errors, 429 and 5xx
    ///
    /// `json` switches Ollama into JSON mode.
    pub async fn complete(&self, prompt: &str, json: bool) -> Result<String, LlmError> {
        let url = format!("{}/api/generate", self.endpoint);
        let request_body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            format: json.then_some("json"),
        };

        let mut last_error = None;
        for attempt in 1..=self.max_retries {
            match self.client.post(&url).json(&request_body).send().await {
                Ok(response) if response.status().is_success() => {
                    let body: GenerateResponse = response
                        .json()
                        .await
                        .map_err(|e| LlmError::InvalidResponse(format!("Unexpected Ollama body: {}", e)))?;
                    debug!(model = %self.model, chars = body.response.len(), "ollama completion");
                    return Ok(body.response);
                }
                Ok(response) => {
                    let status = response.status();
                    let text = response.text().await.unwrap_or_default();
                    let (error, retryable) = http::classify_status(status, &self.model, text);
                    if !retryable {
                        return Err(error);
                    }
                    last_error = Some(error);
                }
                Err(e) => {
                    last_error = Some(LlmError::Communication(format!("Ollama unreachable at {}: {}", self.endpoint, e)));
                }
            }

            if attempt < self.max_retries {
                warn!(attempt, model = %self.model, "ollama request failed, retrying");
                tokio::time::sleep(http::backoff(attempt)).await;
            }
        }

        Err(last_error.unwrap_or_else(|| LlmError::Communication("No attempts made".to_string())))
    }
}

impl LlmProviderTrait for OllamaProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        http::block_on(self.complete(prompt, false))?
    }

    fn generate_structured(&self, prompt: &str, _schema: &str) -> Result<String, Self::Error> {
        http::block_on(self.complete(prompt, true))?
    }
}
