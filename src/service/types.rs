use crate::dispatch::InvalidRequest;
use crate::provider::{ModelKind, ModelReply};
use crate::store::StoreError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// A chat submission as clients send it.
///
/// `session_id: None` requests a throwaway container; ids carrying the
/// ephemeral prefix are honored as explicit throwaway containers.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub session_id: Option<String>,
    pub prompt: String,
    pub models: Vec<ModelKind>,
}

/// One reply per requested model. Failed slots carry their readable error
/// message as `content` with no reasoning, so the map is always complete.
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub replies: HashMap<ModelKind, ModelReply>,
}

/// Service-level failures with a stable HTTP-style status mapping
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("session not found: {0}")]
    SessionNotFound(String),

    #[error(transparent)]
    Store(StoreError),

    #[error("request exceeded the {} second ceiling", .0.as_secs())]
    DeadlineExceeded(Duration),
}

impl ChatError {
    /// HTTP-style status code: caller faults map to 4xx, everything else
    /// is a 500.
    pub fn status(&self) -> u16 {
        match self {
            ChatError::InvalidRequest(_) => 400,
            ChatError::SessionNotFound(_) => 404,
            ChatError::Store(_) | ChatError::DeadlineExceeded(_) => 500,
        }
    }
}

impl From<StoreError> for ChatError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ChatError::SessionNotFound(id),
            other => ChatError::Store(other),
        }
    }
}

impl From<InvalidRequest> for ChatError {
    fn from(err: InvalidRequest) -> Self {
        ChatError::InvalidRequest(err.0)
    }
}
