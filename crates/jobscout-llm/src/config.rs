//! Provider selection from configuration

use crate::{LlmError, MockProvider, OllamaProvider, OpenAiProvider};
use jobscout_domain::traits::LlmProvider as LlmProviderTrait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which backend to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// No LLM; analysis is rule-based only
    #[default]
    Disabled,
    /// Deterministic canned responses
    Mock,
    /// Local Ollama server
    Ollama,
    /// OpenAI-compatible chat completions
    OpenAi,
}

/// LLM provider configuration
///
/// # Examples
///
/// ```
/// use jobscout_llm::{LlmConfig, ProviderKind};
///
/// let config = LlmConfig::default();
/// assert_eq!(config.provider, ProviderKind::Disabled);
/// assert!(config.build().unwrap().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Backend
    pub provider: ProviderKind,

    /// Model name
    pub model: String,

    /// API endpoint; the backend's default when unset
    pub endpoint: Option<String>,

    /// Environment variable holding the API key (OpenAI-compatible only)
    pub api_key_env: String,

    /// Per-request timeout (seconds)
    pub timeout_secs: u64,

    /// Attempts per request
    pub max_retries: u32,

    /// Response returned by the mock provider
    pub mock_response: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Disabled,
            model: "gpt-4.1-mini".to_string(),
            endpoint: None,
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_secs: 30,
            max_retries: 3,
            mock_response: r#"{"category": "Other", "signal": "LOW", "reasoning": "mock"}"#.to_string(),
        }
    }
}

impl LlmConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        if self.max_retries == 0 {
            return Err("max_retries must be greater than 0".to_string());
        }
        if self.provider != ProviderKind::Disabled && self.model.trim().is_empty() {
            return Err("model must be set when a provider is enabled".to_string());
        }
        Ok(())
    }

    /// Build the configured provider, `None` when disabled
    pub fn build(&self) -> Result<Option<ConfiguredProvider>, LlmError> {
        let timeout = Duration::from_secs(self.timeout_secs);
        let provider = match self.provider {
            ProviderKind::Disabled => return Ok(None),
            ProviderKind::Mock => ConfiguredProvider::Mock(MockProvider::new(self.mock_response.clone())),
            ProviderKind::Ollama => {
                let endpoint = self.endpoint.as_deref().unwrap_or(crate::ollama::DEFAULT_ENDPOINT);
                ConfiguredProvider::Ollama(
                    OllamaProvider::with_timeout(endpoint, &self.model, timeout)?
                        .with_max_retries(self.max_retries),
                )
            }
            ProviderKind::OpenAi => {
                let endpoint = self.endpoint.as_deref().unwrap_or(crate::openai::DEFAULT_BASE_URL);
                let api_key = std::env::var(&self.api_key_env).ok();
                ConfiguredProvider::OpenAi(
                    OpenAiProvider::with_timeout(endpoint, &self.model, api_key, timeout)?
                        .with_max_retries(self.max_retries),
                )
            }
        };
        Ok(Some(provider))
    }
}

/// Any provider the configuration can select
pub enum ConfiguredProvider {
    /// Mock
    Mock(MockProvider),
    /// Ollama
    Ollama(OllamaProvider),
    /// OpenAI-compatible
    OpenAi(OpenAiProvider),
}

impl LlmProviderTrait for ConfiguredProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        match self {
            ConfiguredProvider::Mock(p) => p.generate(prompt),
            ConfiguredProvider::Ollama(p) => p.generate(prompt),
            ConfiguredProvider::OpenAi(p) => p.generate(prompt),
        }
    }

    fn generate_structured(&self, prompt: &str, schema: &str) -> Result<String, Self::Error> {
        match self {
            ConfiguredProvider::Mock(p) => p.generate_structured(prompt, schema),
            ConfiguredProvider::Ollama(p) => p.generate_structured(prompt, schema),
            ConfiguredProvider::OpenAi(p) => p.generate_structured(prompt, schema),
        }
    }
}
