//! Adapter for the Anthropic messages API (the primary model).

use crate::env::provider as env;
use crate::provider::adapter::ModelAdapter;
use crate::provider::types::{ModelReply, ProviderError, ProviderSettings};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::debug;

pub struct ClaudeAdapter {
    settings: ProviderSettings,
    client: Client,
}

impl ClaudeAdapter {
    pub fn new(settings: ProviderSettings) -> Self {
        Self {
            settings,
            client: Client::new(),
        }
    }

    /// Adapter with the key taken from `CLAUDE_API_KEY`
    pub fn from_env() -> Self {
        let settings = ProviderSettings {
            api_key: std::env::var(env::CLAUDE_API_KEY_ENV).ok(),
            ..Default::default()
        };
        Self::new(settings)
    }

    fn endpoint(&self) -> &str {
        self.settings.base_url.as_deref().unwrap_or(env::CLAUDE_API_URL)
    }

    fn model(&self) -> &str {
        self.settings.model.as_deref().unwrap_or(env::CLAUDE_MODEL)
    }
}

#[async_trait]
impl ModelAdapter for ClaudeAdapter {
    fn name(&self) -> &'static str {
        "claude"
    }

    async fn invoke(&self, prompt: &str) -> Result<ModelReply, ProviderError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .ok_or(ProviderError::AuthMissing { provider: "claude" })?;

        let request_body = json!({
            "model": self.model(),
            "max_tokens": env::MAX_TOKENS,
            "messages": [{ "role": "user", "content": prompt }],
        });

        debug!(model = self.model(), "calling claude API");

        let response = self
            .client
            .post(self.endpoint())
            .header("Content-Type", "application/json")
            .header("x-api-key", api_key)
            .header("anthropic-version", env::ANTHROPIC_VERSION)
            .timeout(self.settings.timeout)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| classify_transport_error("claude", self.settings.timeout, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| classify_transport_error("claude", self.settings.timeout, e))?;

        if !status.is_success() {
            return Err(ProviderError::UpstreamStatus {
                provider: "claude",
                status: status.as_u16(),
                body,
            });
        }

        let value: serde_json::Value = serde_json::from_str(&body)
            .map_err(|_| ProviderError::MalformedResponse { provider: "claude" })?;

        let content = extract_message_text(&value)
            .ok_or(ProviderError::MalformedResponse { provider: "claude" })?;

        Ok(ModelReply::new(content, None))
    }
}

/// Map a reqwest transport failure into the provider taxonomy. A timeout is
/// an aborted in-flight request, never a silent hang.
pub(crate) fn classify_transport_error(
    provider: &'static str,
    timeout: std::time::Duration,
    err: reqwest::Error,
) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout { provider, timeout }
    } else {
        ProviderError::Network {
            provider,
            message: err.to_string(),
        }
    }
}

/// Pull the concatenated text blocks out of an Anthropic messages response.
/// Returns `None` when the expected field is absent or empty.
pub(crate) fn extract_message_text(value: &serde_json::Value) -> Option<String> {
    let blocks = value.get("content")?.as_array()?;
    let mut text = String::new();
    for block in blocks {
        if let Some(t) = block.get("text").and_then(|t| t.as_str()) {
            text.push_str(t);
        }
    }
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
