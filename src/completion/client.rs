//! `CompletionClient` trait and the HTTP implementation.
//!
//! [`ApiClient`] posts to an OpenAI-style `/v1/completions` endpoint with
//! the fixed generation parameters from [`CompletionConfig`].  All
//! connection details come from the config; the API key arrives separately
//! from the environment and is attached only as the bearer header.

use async_trait::async_trait;
use thiserror::Error;

use crate::completion::prompt::PromptBuilder;
use crate::config::CompletionConfig;

// ---------------------------------------------------------------------------
// CompletionError
// ---------------------------------------------------------------------------

/// Errors that can occur while querying the completion service.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// HTTP transport or connection error.
    #[error("request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("completion request timed out")]
    Timeout,

    /// The service answered with a non-success status (auth, quota, …).
    #[error("service returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// The response body could not be parsed as expected JSON.
    #[error("failed to parse completion response: {0}")]
    Parse(String),

    /// The response carried no usable text.
    #[error("completion response was empty")]
    Empty,
}

impl From<reqwest::Error> for CompletionError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            CompletionError::Timeout
        } else {
            CompletionError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// CompletionClient trait
// ---------------------------------------------------------------------------

/// Async trait for the remote completion service.
///
/// Implementors must be `Send + Sync` so they can be shared as
/// `Arc<dyn CompletionClient>`.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send `utterance` and return the service's reply text.
    async fn complete(&self, utterance: &str) -> Result<String, CompletionError>;
}

// ---------------------------------------------------------------------------
// ApiClient
// ---------------------------------------------------------------------------

/// HTTP client for an OpenAI-compatible `/v1/completions` endpoint.
pub struct ApiClient {
    client: reqwest::Client,
    config: CompletionConfig,
    api_key: String,
    prompt: PromptBuilder,
}

impl ApiClient {
    /// Build a client from config plus the credential read from the
    /// environment at startup.
    ///
    /// The HTTP client carries the per-request timeout from
    /// `config.timeout_secs`; a default (no-timeout) client is the
    /// last-resort fallback if the builder fails (should never happen in
    /// practice).
    pub fn new(config: &CompletionConfig, api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
            api_key: api_key.into(),
            prompt: PromptBuilder::new(config.persona.clone()),
        }
    }
}

#[async_trait]
impl CompletionClient for ApiClient {
    async fn complete(&self, utterance: &str) -> Result<String, CompletionError> {
        let url = format!(
            "{}/v1/completions",
            self.config.base_url.trim_end_matches('/')
        );

        let body = serde_json::json!({
            "model":             self.config.model,
            "prompt":            self.prompt.build(utterance),
            "temperature":       self.config.temperature,
            "max_tokens":        self.config.max_tokens,
            "top_p":             self.config.top_p,
            "frequency_penalty": self.config.frequency_penalty,
            "presence_penalty":  self.config.presence_penalty,
            "stop":              self.config.stop,
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            return Err(CompletionError::Api {
                status: status.as_u16(),
                message: api_error_message(&raw),
            });
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| CompletionError::Parse(e.to_string()))?;

        let text = json["choices"][0]["text"]
            .as_str()
            .ok_or(CompletionError::Empty)?
            .trim()
            .to_string();

        if text.is_empty() {
            return Err(CompletionError::Empty);
        }

        Ok(text)
    }
}

/// Pull the human-readable message out of an API error body, falling back
/// to a truncated copy of the raw body.
fn api_error_message(raw: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(raw) {
        if let Some(message) = json["error"]["message"].as_str() {
            return message.to_string();
        }
    }
    let mut message: String = raw.chars().take(200).collect();
    if message.is_empty() {
        message = "no response body".into();
    }
    message
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
