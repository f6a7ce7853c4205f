//! Inbound interface layer tying the dispatcher, the store gateway, and the
//! local caches together.
//!
//! All collaborators are constructed explicitly and passed in; nothing here
//! reaches for globals. Session ids carrying the ephemeral prefix denote
//! throwaway containers: they are created on demand for a single submission,
//! deleted best-effort afterwards, and never served by the retrieval
//! operations even when that deletion fails.

use crate::cache::TtlCache;
use crate::dispatch::Dispatcher;
use crate::env;
use crate::normalize::normalize;
use crate::provider::{ModelKind, ModelReply};
use crate::store::{ChatSession, Message, MessagePage, NewSession, StoreGateway};
use std::collections::HashMap;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub mod types;


pub use types::{ChatError, ChatRequest, ChatResponse};

const SESSIONS_CACHE_KEY: &str = "sessions";

fn is_ephemeral(session_id: &str) -> bool {
    session_id.starts_with(env::store::EPHEMERAL_SESSION_PREFIX)
}

pub struct ChatService {
    gateway: StoreGateway,
    dispatcher: Dispatcher,
    sessions_cache: TtlCache<Vec<ChatSession>>,
    messages_cache: TtlCache<MessagePage>,
}

impl ChatService {
    pub fn new(gateway: StoreGateway, dispatcher: Dispatcher) -> Self {
        Self {
            gateway,
            dispatcher,
            sessions_cache: TtlCache::new(env::CACHE_TTL),
            messages_cache: TtlCache::new(env::CACHE_TTL),
        }
    }

    /// Handle one chat submission end to end: resolve the session, persist
    /// the user message, fan out to the requested models, persist one
    /// assistant message per slot, and clean up throwaway containers.
    ///
    /// Dispatch and persistence run under a single wall-clock ceiling; on
    /// expiry every in-flight upstream call is dropped. Throwaway-container
    /// cleanup and cache invalidation run regardless of how the submission
    /// ended, so a partially written session is never served stale.
    pub async fn submit_chat(&self, request: ChatRequest) -> Result<ChatResponse, ChatError> {
        if request.prompt.trim().is_empty() {
            return Err(ChatError::InvalidRequest("prompt must not be empty".to_string()));
        }
        if request.models.is_empty() {
            return Err(ChatError::InvalidRequest(
                "at least one model must be requested".to_string(),
            ));
        }

        let (session_id, ephemeral) = self.resolve_session(&request).await?;

        let result = tokio::time::timeout(
            env::dispatch::OUTER_CEILING,
            self.chat_in_session(&session_id, &request),
        )
        .await
        .unwrap_or(Err(ChatError::DeadlineExceeded(env::dispatch::OUTER_CEILING)));

        if ephemeral {
            // Throwaway container: its messages have been written (or the
            // submission failed); either way it must not linger. Deletion
            // failure is logged, never surfaced, and the retrieval guards
            // keep a leaked container invisible.
            if let Err(err) = self.gateway.delete_session(&session_id).await {
                warn!(session_id, error = %err, "failed to delete ephemeral session");
            }
        } else {
            self.sessions_cache.invalidate(SESSIONS_CACHE_KEY);
            self.messages_cache.invalidate(&session_id);
        }

        let replies = result?;
        Ok(ChatResponse {
            session_id,
            replies,
        })
    }

    /// Resolve the target session, creating a throwaway container when the
    /// request names none or names an ephemeral id explicitly.
    async fn resolve_session(&self, request: &ChatRequest) -> Result<(String, bool), ChatError> {
        match &request.session_id {
            Some(id) if is_ephemeral(id) => {
                let session = self.create_ephemeral(Some(id.clone()), request).await?;
                Ok((session.id, true))
            }
            Some(id) => {
                let session = self.gateway.get_session(id).await?;
                Ok((session.id, false))
            }
            None => {
                let session = self.create_ephemeral(None, request).await?;
                Ok((session.id, true))
            }
        }
    }

    async fn create_ephemeral(
        &self,
        id: Option<String>,
        request: &ChatRequest,
    ) -> Result<ChatSession, ChatError> {
        let id = id.unwrap_or_else(|| {
            format!("{}{}", env::store::EPHEMERAL_SESSION_PREFIX, Uuid::new_v4())
        });
        debug!(session_id = %id, "creating ephemeral session");
        let session = self
            .gateway
            .create_session(NewSession {
                id: Some(id),
                title: None,
                model_type: request.models.first().copied(),
            })
            .await?;
        Ok(session)
    }

    async fn chat_in_session(
        &self,
        session_id: &str,
        request: &ChatRequest,
    ) -> Result<HashMap<ModelKind, ModelReply>, ChatError> {
        self.gateway
            .append_message(Message::user(session_id, request.prompt.clone()))
            .await?;

        let mut outcomes = self.dispatcher.dispatch(&request.prompt, &request.models).await?;

        info!(
            session_id,
            models = request.models.len(),
            "dispatch complete, persisting replies"
        );

        let mut replies = HashMap::new();
        for model in &request.models {
            let Some(outcome) = outcomes.remove(model) else {
                continue; // duplicate model id, already handled
            };
            let failed = outcome.is_failed();
            let mut reply = outcome.into_stored_reply();
            if !failed {
                reply.content = normalize(&reply.content);
            }
            self.gateway
                .append_message(Message::assistant(
                    session_id,
                    reply.content.clone(),
                    reply.reasoning.clone(),
                ))
                .await?;
            replies.insert(*model, reply);
        }

        Ok(replies)
    }

    pub async fn create_session(&self, new: NewSession) -> Result<ChatSession, ChatError> {
        if new.id.as_deref().is_some_and(is_ephemeral) {
            return Err(ChatError::InvalidRequest(format!(
                "the '{}' id prefix is reserved",
                env::store::EPHEMERAL_SESSION_PREFIX
            )));
        }
        let session = self.gateway.create_session(new).await?;
        self.sessions_cache.invalidate(SESSIONS_CACHE_KEY);
        Ok(session)
    }

    pub async fn get_session(&self, id: &str) -> Result<ChatSession, ChatError> {
        if is_ephemeral(id) {
            return Err(ChatError::SessionNotFound(id.to_string()));
        }
        Ok(self.gateway.get_session(id).await?)
    }

    /// All persistent sessions, most recently updated first. Served from the
    /// local cache when fresh; ephemeral leftovers are filtered out.
    pub async fn list_sessions(&self) -> Result<Vec<ChatSession>, ChatError> {
        if let Some(cached) = self.sessions_cache.get(SESSIONS_CACHE_KEY) {
            return Ok(cached);
        }
        let sessions: Vec<ChatSession> = self
            .gateway
            .list_sessions()
            .await?
            .into_iter()
            .filter(|session| !is_ephemeral(&session.id))
            .collect();
        self.sessions_cache.set(SESSIONS_CACHE_KEY, sessions.clone());
        Ok(sessions)
    }

    pub async fn rename_session(&self, id: &str, title: &str) -> Result<ChatSession, ChatError> {
        if is_ephemeral(id) {
            return Err(ChatError::SessionNotFound(id.to_string()));
        }
        let session = self.gateway.rename_session(id, title).await?;
        self.sessions_cache.invalidate(SESSIONS_CACHE_KEY);
        Ok(session)
    }

    pub async fn delete_session(&self, id: &str) -> Result<(), ChatError> {
        if is_ephemeral(id) {
            return Err(ChatError::SessionNotFound(id.to_string()));
        }
        self.gateway.delete_session(id).await?;
        self.sessions_cache.invalidate(SESSIONS_CACHE_KEY);
        self.messages_cache.invalidate(id);
        Ok(())
    }

    /// One page of a session's messages, chronological order.
    ///
    /// Only the default first page is cached (keyed by session id); it is
    /// the page every conversation view loads, and caching deeper pages
    /// would need per-page invalidation for no practical gain.
    pub async fn list_messages(
        &self,
        session_id: &str,
        page: usize,
        page_size: usize,
    ) -> Result<MessagePage, ChatError> {
        if is_ephemeral(session_id) {
            return Err(ChatError::SessionNotFound(session_id.to_string()));
        }
        if page_size == 0 {
            return Err(ChatError::InvalidRequest("page size must be positive".to_string()));
        }

        let cacheable = page == 0 && page_size == env::store::PAGE_SIZE;
        if cacheable
            && let Some(cached) = self.messages_cache.get(session_id)
        {
            return Ok(cached);
        }

        let page = self.gateway.list_messages(session_id, page, page_size).await?;
        if cacheable {
            self.messages_cache.set(session_id, page.clone());
        }
        Ok(page)
    }
}
