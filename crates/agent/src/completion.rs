//! OpenRouter chat-completions client.
//!
//! One POST per request, bounded timeout, no retries and no streaming. A failed
//! call is reported once to the caller and surfaced to the end user.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::types::ChatMessage;

pub const DEFAULT_COMPLETION_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "openai/gpt-4o";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors from a single completion call.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// Network failure, timeout, or a non-success HTTP status.
    #[error("completion request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Success status but the response is missing `choices[0].message.content`.
    /// Carries the parsed body for diagnosis.
    #[error("unexpected completion response shape: {body}")]
    Format { body: String },
}

/// Seam over the remote completion endpoint, mockable in tests.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Sends the composed message list and returns the trimmed reply text.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, CompletionError>;
}

pub struct OpenRouterClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    url: String,
}

impl OpenRouterClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        url: impl Into<String>,
    ) -> Result<Self, CompletionError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            model: model.into(),
            url: url.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionBackend for OpenRouterClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, CompletionError> {
        debug!(
            model = %self.model,
            message_count = messages.len(),
            "sending completion request"
        );

        let payload = serde_json::json!({
            "model": self.model,
            "messages": messages,
        });

        let body: Value = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", "https://example.com")
            .header("X-Title", "CTF Assistant")
            .json(&payload)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        extract_reply(&body)
    }
}

/// Pulls `choices[0].message.content` out of a parsed completion response,
/// trimmed of surrounding whitespace.
fn extract_reply(body: &Value) -> Result<String, CompletionError> {
    body.get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
        .map(|content| content.trim().to_string())
        .ok_or_else(|| CompletionError::Format {
            body: body.to_string(),
        })
}
