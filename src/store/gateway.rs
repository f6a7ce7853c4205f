//! Gateway between the dispatcher/service and the persistence backend.
//!
//! Every backend operation runs under a seconds-scale timeout, deliberately
//! distinct from the minutes-scale upstream model timeouts. Pagination is
//! implemented here once, on top of the backend's newest-first query.

use crate::env;
use crate::store::types::{ChatSession, Message, MessagePage, NewSession, StoreError};
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Contract the persistence engine must satisfy. The relational engine
/// behind it is an external collaborator; [`super::MemoryStore`] is the
/// in-process reference backend.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create_session(&self, new: NewSession) -> Result<ChatSession, StoreError>;

    async fn get_session(&self, id: &str) -> Result<ChatSession, StoreError>;

    /// All sessions, most recently updated first
    async fn list_sessions(&self) -> Result<Vec<ChatSession>, StoreError>;

    async fn rename_session(&self, id: &str, title: &str) -> Result<ChatSession, StoreError>;

    /// Delete a session and, cascading, all of its messages
    async fn delete_session(&self, id: &str) -> Result<(), StoreError>;

    /// Persist `message` and bump the owning session's `updated_at` as one
    /// atomic unit: either both take effect or neither does.
    async fn append_message(&self, message: Message) -> Result<(), StoreError>;

    /// Raw page query, newest first
    async fn messages_newest_first(
        &self,
        session_id: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Message>, StoreError>;
}

/// Timeout-wrapping front over any [`SessionStore`] backend.
#[derive(Clone)]
pub struct StoreGateway {
    backend: Arc<dyn SessionStore>,
    op_timeout: Duration,
}

impl StoreGateway {
    pub fn new(backend: Arc<dyn SessionStore>) -> Self {
        Self {
            backend,
            op_timeout: env::store::OP_TIMEOUT,
        }
    }

    pub fn with_timeout(backend: Arc<dyn SessionStore>, op_timeout: Duration) -> Self {
        Self {
            backend,
            op_timeout,
        }
    }

    async fn bounded<T, F>(&self, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        tokio::time::timeout(self.op_timeout, fut)
            .await
            .map_err(|_| StoreError::Timeout(self.op_timeout))?
    }

    pub async fn create_session(&self, new: NewSession) -> Result<ChatSession, StoreError> {
        self.bounded(self.backend.create_session(new)).await
    }

    pub async fn get_session(&self, id: &str) -> Result<ChatSession, StoreError> {
        self.bounded(self.backend.get_session(id)).await
    }

    pub async fn list_sessions(&self) -> Result<Vec<ChatSession>, StoreError> {
        self.bounded(self.backend.list_sessions()).await
    }

    pub async fn rename_session(&self, id: &str, title: &str) -> Result<ChatSession, StoreError> {
        self.bounded(self.backend.rename_session(id, title)).await
    }

    pub async fn delete_session(&self, id: &str) -> Result<(), StoreError> {
        self.bounded(self.backend.delete_session(id)).await
    }

    pub async fn append_message(&self, message: Message) -> Result<(), StoreError> {
        self.bounded(self.backend.append_message(message)).await
    }

    /// One page of a session's messages.
    ///
    /// Fetches `page_size + 1` rows newest-first so overflow detection costs
    /// a single extra row, then reorders the page chronologically.
    pub async fn list_messages(
        &self,
        session_id: &str,
        page: usize,
        page_size: usize,
    ) -> Result<MessagePage, StoreError> {
        let offset = page * page_size;
        let mut rows = self
            .bounded(
                self.backend
                    .messages_newest_first(session_id, offset, page_size + 1),
            )
            .await?;

        let has_more = rows.len() > page_size;
        rows.truncate(page_size);
        rows.reverse();

        debug!(
            session_id,
            page,
            returned = rows.len(),
            has_more,
            "listed messages"
        );

        Ok(MessagePage {
            messages: rows,
            has_more,
        })
    }
}
