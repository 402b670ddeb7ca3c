//! OpenAI-compatible chat-completions provider
//!
//! Works against any server exposing `POST {base_url}/chat/completions` with
//! the OpenAI request and response shape.

use crate::http;
use crate::LlmError;
use jobscout_domain::traits::LlmProvider as LlmProviderTrait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default system message
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are an expert technical recruiter who evaluates job postings for early-career candidates.";

/// Chat-completions provider
pub struct OpenAiProvider {
    base_url: String,
    model: String,
    api_key: Option<String>,
    system_prompt: String,
    temperature: f32,
    max_tokens: u32,
    client: reqwest::Client,
    max_retries: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

impl OpenAiProvider {
    /// Create a provider
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use jobscout_llm::OpenAiProvider;
    ///
    /// let provider = OpenAiProvider::new("https://api.openai.com/v1", "gpt-4.1-mini", None).unwrap();
    /// ```
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Result<Self, LlmError> {
        Self::with_timeout(base_url, model, api_key, Duration::from_secs(crate::ollama::DEFAULT_TIMEOUT_SECS))
    }

    /// Create a provider with an explicit per-request timeout
    pub fn with_timeout(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            temperature: 0.3,
            max_tokens: 300,
            client: http::client(timeout)?,
            max_retries: crate::ollama::DEFAULT_MAX_RETRIES,
        })
    }

    /// Set the maximum number of attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Replace the system message
    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    fn request<'a>(&'a self, prompt: &'a str, json: bool) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &self.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            response_format: json.then_some(ResponseFormat { kind: "json_object" }),
        }
    }

    /// Run one chat completion
    pub async fn complete(&self, prompt: &str, json: bool) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = self.request(prompt, json);

        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            let mut builder = self.client.post(&url).json(&body);
            if let Some(key) = &self.api_key {
                builder = builder.bearer_auth(key);
            }

            match builder.send().await {
                Ok(response) if response.status().is_success() => {
                    let parsed = response.json::<ChatResponse>().await.map_err(|e| {
                        LlmError::InvalidResponse(format!("Failed to parse response: {}", e))
                    })?;
                    let content = parsed
                        .choices
                        .into_iter()
                        .next()
                        .and_then(|c| c.message.content)
                        .ok_or_else(|| LlmError::InvalidResponse("Response has no content".to_string()))?;
                    debug!(model = %self.model, chars = content.len(), "chat completion");
                    return Ok(content);
                }
                Ok(response) => {
                    let status = response.status();
                    let text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
                    let (error, retryable) = http::classify_status(status, &self.model, text);
                    if !retryable {
                        return Err(error);
                    }
                    last_error = Some(error);
                }
                Err(e) => {
                    last_error = Some(LlmError::Communication(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                warn!(attempt = attempts, model = %self.model, "chat completion failed, retrying");
                tokio::time::sleep(http::backoff(attempts)).await;
            }
        }

        Err(last_error.unwrap_or_else(|| LlmError::Communication("Max retries exceeded".to_string())))
    }
}

impl LlmProviderTrait for OpenAiProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        http::block_on(self.complete(prompt, false))?
    }

    fn generate_structured(&self, prompt: &str, _schema: &str) -> Result<String, Self::Error> {
        http::block_on(self.complete(prompt, true))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let provider = OpenAiProvider::new(DEFAULT_BASE_URL, "gpt-4.1-mini", None).unwrap();
        let value = serde_json::to_value(provider.request("classify this", true)).unwrap();

        assert_eq!(value["model"], "gpt-4.1-mini");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["content"], "classify this");
        assert_eq!(value["response_format"]["type"], "json_object");

        let plain = serde_json::to_value(provider.request("hi", false)).unwrap();
        assert!(plain.get("response_format").is_none());
    }

    #[test]
    fn test_response_parsing() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":"{\"signal\":\"HIGH\"}"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.choices[0].message.content.as_deref(), Some(r#"{"signal":"HIGH"}"#));
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let provider = OpenAiProvider::new("http://localhost:8000/v1/", "local", None).unwrap();
        assert_eq!(provider.base_url, "http://localhost:8000/v1");
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        let provider = OpenAiProvider::new("http://127.0.0.1:9/v1", "local", Some("key".into()))
            .unwrap()
            .with_max_retries(1);
        let result = provider.complete("hello", false).await;
        assert!(matches!(result, Err(LlmError::Communication(_))));
    }
}
