//! Adapter for the DeepSeek reasoner API (the secondary model).
//!
//! This is the retrying adapter variant: transient network and 5xx failures
//! are reattempted with exponential backoff, bounded by
//! [`crate::env::provider::MAX_RETRIES`]. Auth and malformed-response
//! failures are never retried.

use crate::env::provider as env;
use crate::provider::adapter::{ModelAdapter, retry_transient};
use crate::provider::claude::classify_transport_error;
use crate::provider::types::{ModelReply, ProviderError, ProviderSettings};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::debug;

/// System instruction nudging the reasoner toward an explicit trace
const SYSTEM_PROMPT: &str = "You are an AI assistant that provides thoughtful and \
well-reasoned responses. Before giving your answer, use Chain of Thought reasoning \
to think through the problem step by step.";

pub struct DeepseekAdapter {
    settings: ProviderSettings,
    client: Client,
}

impl DeepseekAdapter {
    pub fn new(settings: ProviderSettings) -> Self {
        Self {
            settings,
            client: Client::new(),
        }
    }

    /// Adapter with the key taken from `DEEPSEEK_API_KEY`
    pub fn from_env() -> Self {
        let settings = ProviderSettings {
            api_key: std::env::var(env::DEEPSEEK_API_KEY_ENV).ok(),
            ..Default::default()
        };
        Self::new(settings)
    }

    fn endpoint(&self) -> &str {
        self.settings
            .base_url
            .as_deref()
            .unwrap_or(env::DEEPSEEK_API_URL)
    }

    fn model(&self) -> &str {
        self.settings.model.as_deref().unwrap_or(env::DEEPSEEK_MODEL)
    }

    async fn invoke_once(&self, api_key: &str, prompt: &str) -> Result<ModelReply, ProviderError> {
        let request_body = json!({
            "model": self.model(),
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": prompt },
            ],
            "max_tokens": env::MAX_TOKENS,
            "stream": false,
        });

        debug!(model = self.model(), "calling deepseek API");

        let response = self
            .client
            .post(self.endpoint())
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .bearer_auth(api_key)
            .timeout(self.settings.timeout)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| classify_transport_error("deepseek", self.settings.timeout, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| classify_transport_error("deepseek", self.settings.timeout, e))?;

        if !status.is_success() {
            return Err(ProviderError::UpstreamStatus {
                provider: "deepseek",
                status: status.as_u16(),
                body,
            });
        }

        let value: serde_json::Value = serde_json::from_str(&body)
            .map_err(|_| ProviderError::MalformedResponse { provider: "deepseek" })?;

        extract_chat_completion(&value)
            .ok_or(ProviderError::MalformedResponse { provider: "deepseek" })
    }
}

#[async_trait]
impl ModelAdapter for DeepseekAdapter {
    fn name(&self) -> &'static str {
        "deepseek"
    }

    async fn invoke(&self, prompt: &str) -> Result<ModelReply, ProviderError> {
        // Fail fast before any network call
        let api_key = self
            .settings
            .api_key
            .clone()
            .ok_or(ProviderError::AuthMissing {
                provider: "deepseek",
            })?;

        retry_transient(
            "deepseek",
            env::MAX_RETRIES,
            env::RETRY_BASE_DELAY,
            || self.invoke_once(&api_key, prompt),
        )
        .await
    }
}

/// Pull `content` and the optional `reasoning_content` out of an OpenAI-style
/// chat completion. Returns `None` when the message text is absent or empty.
pub(crate) fn extract_chat_completion(value: &serde_json::Value) -> Option<ModelReply> {
    let message = value.get("choices")?.get(0)?.get("message")?;
    let content = message.get("content")?.as_str()?.trim();
    if content.is_empty() {
        return None;
    }
    let reasoning = message
        .get("reasoning_content")
        .and_then(|r| r.as_str())
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty());
    Some(ModelReply::new(content, reasoning))
}
