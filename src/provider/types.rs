use crate::env;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Model identifiers accepted at the dispatch boundary.
///
/// The wire names match what clients send in the `models` array:
/// `claude`, `deepseek`, `claude_reasoning`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// Primary model, invoked directly
    Claude,
    /// Reasoning model, invoked directly
    Deepseek,
    /// Primary model whose prompt is enhanced with the reasoning model's trace
    ClaudeReasoning,
}

impl ModelKind {
    pub const ALL: [ModelKind; 3] = [
        ModelKind::Claude,
        ModelKind::Deepseek,
        ModelKind::ClaudeReasoning,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Claude => "claude",
            ModelKind::Deepseek => "deepseek",
            ModelKind::ClaudeReasoning => "claude_reasoning",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelKind {
    type Err = UnknownModel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "claude" => Ok(ModelKind::Claude),
            "deepseek" => Ok(ModelKind::Deepseek),
            "claude_reasoning" => Ok(ModelKind::ClaudeReasoning),
            other => Err(UnknownModel(other.to_string())),
        }
    }
}

/// Rejection for model identifiers outside [`ModelKind::ALL`]
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown model identifier '{0}'")]
pub struct UnknownModel(pub String);

/// Canonical result produced by every adapter and composer.
///
/// Immutable once created; provider-specific response shapes never leak past
/// the adapter that parsed them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelReply {
    /// User-facing answer text
    pub content: String,
    /// Optional step-by-step trace, native or donated by a companion model
    pub reasoning: Option<String>,
}

impl ModelReply {
    pub fn new(content: impl Into<String>, reasoning: Option<String>) -> Self {
        Self {
            content: content.into(),
            reasoning,
        }
    }
}

/// Per-model failures, isolated at the dispatch boundary
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    /// Required credential absent; detected before any network traffic
    #[error("{provider} API key is not configured")]
    AuthMissing { provider: &'static str },

    /// The per-adapter wall-clock budget expired and the request was aborted
    #[error("{provider} API request timed out after {} seconds", timeout.as_secs())]
    Timeout {
        provider: &'static str,
        timeout: Duration,
    },

    /// Non-success HTTP status; carries the raw body for diagnostics
    #[error("{provider} API error: HTTP {status} - {body}")]
    UpstreamStatus {
        provider: &'static str,
        status: u16,
        body: String,
    },

    /// Success status but the expected message text was absent or empty
    #[error("invalid response format from {provider} API")]
    MalformedResponse { provider: &'static str },

    /// Connection-level failure before a status was received
    #[error("{provider} network error: {message}")]
    Network {
        provider: &'static str,
        message: String,
    },
}

impl ProviderError {
    /// Whether a retry could plausibly help. Auth and response-shape
    /// failures never qualify.
    pub fn is_transient(&self) -> bool {
        match self {
            ProviderError::Network { .. } => true,
            ProviderError::UpstreamStatus { status, .. } => (500..600).contains(status),
            ProviderError::AuthMissing { .. }
            | ProviderError::Timeout { .. }
            | ProviderError::MalformedResponse { .. } => false,
        }
    }
}

/// Connection settings for one upstream provider. Every field can be
/// omitted in config files; a partial section falls back field by field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// Credential, normally sourced from the environment
    #[serde(skip)]
    pub api_key: Option<String>,
    /// Endpoint override, primarily for tests
    pub base_url: Option<String>,
    /// Model name sent upstream
    pub model: Option<String>,
    /// Hard wall-clock budget per call
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            model: None,
            timeout: env::provider::UPSTREAM_TIMEOUT,
        }
    }
}

/// Serialize durations as whole seconds in config files
mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_secs(u64::deserialize(d)?))
    }
}
