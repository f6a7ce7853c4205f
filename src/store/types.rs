use crate::provider::ModelKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// One message in a conversation, owned by exactly one session.
///
/// Within a session, creation order is conversation order and is recoverable
/// via `created_at` ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub content: String,
    pub role: MessageRole,
    pub reasoning: Option<String>,
    pub session_id: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn user(session_id: &str, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            role: MessageRole::User,
            reasoning: None,
            session_id: session_id.to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn assistant(
        session_id: &str,
        content: impl Into<String>,
        reasoning: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            role: MessageRole::Assistant,
            reasoning,
            session_id: session_id.to_string(),
            created_at: Utc::now(),
        }
    }
}

/// A conversation container. `updated_at` is refreshed on every appended
/// message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: String,
    pub title: String,
    pub model_type: ModelKind,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Parameters for creating a session
#[derive(Debug, Clone, Default)]
pub struct NewSession {
    /// Explicit id, used for ephemeral containers; generated when absent
    pub id: Option<String>,
    pub title: Option<String>,
    pub model_type: Option<ModelKind>,
}

/// One page of a session's messages, chronological order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagePage {
    pub messages: Vec<Message>,
    pub has_more: bool,
}

/// Persistence-layer failures, kept distinct from provider failures so the
/// caller can tell "the model answered but we couldn't save it" apart from
/// "the model failed to answer".
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// The per-operation budget expired; retryable locally
    #[error("store operation timed out after {} seconds", .0.as_secs())]
    Timeout(Duration),

    #[error("session not found: {0}")]
    NotFound(String),

    #[error("store write failed: {0}")]
    Write(String),
}
