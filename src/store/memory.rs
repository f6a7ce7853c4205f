//! In-process reference backend for [`SessionStore`].
//!
//! One dashmap entry guards a session record together with its messages, so
//! an append and its `updated_at` bump happen under a single entry lock and
//! concurrent appends to the same session cannot lose messages.

use crate::env;
use crate::provider::ModelKind;
use crate::store::gateway::SessionStore;
use crate::store::types::{ChatSession, Message, NewSession, StoreError};
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

struct SessionRecord {
    session: ChatSession,
    messages: Vec<Message>,
}

#[derive(Default)]
pub struct MemoryStore {
    records: DashMap<String, SessionRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn create_session(&self, new: NewSession) -> Result<ChatSession, StoreError> {
        let now = Utc::now();
        let session = ChatSession {
            id: new.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            title: new
                .title
                .unwrap_or_else(|| env::store::DEFAULT_SESSION_TITLE.to_string()),
            model_type: new.model_type.unwrap_or(ModelKind::Claude),
            created_at: now,
            updated_at: now,
        };

        if self.records.contains_key(&session.id) {
            return Err(StoreError::Write(format!(
                "session already exists: {}",
                session.id
            )));
        }

        self.records.insert(
            session.id.clone(),
            SessionRecord {
                session: session.clone(),
                messages: Vec::new(),
            },
        );
        Ok(session)
    }

    async fn get_session(&self, id: &str) -> Result<ChatSession, StoreError> {
        self.records
            .get(id)
            .map(|r| r.session.clone())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn list_sessions(&self) -> Result<Vec<ChatSession>, StoreError> {
        let mut sessions: Vec<ChatSession> =
            self.records.iter().map(|r| r.session.clone()).collect();
        sessions.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(sessions)
    }

    async fn rename_session(&self, id: &str, title: &str) -> Result<ChatSession, StoreError> {
        let mut record = self
            .records
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        record.session.title = title.to_string();
        Ok(record.session.clone())
    }

    async fn delete_session(&self, id: &str) -> Result<(), StoreError> {
        self.records
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn append_message(&self, message: Message) -> Result<(), StoreError> {
        let mut record = self
            .records
            .get_mut(&message.session_id)
            .ok_or_else(|| StoreError::NotFound(message.session_id.clone()))?;
        record.session.updated_at = Utc::now();
        record.messages.push(message);
        Ok(())
    }

    async fn messages_newest_first(
        &self,
        session_id: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Message>, StoreError> {
        let record = self
            .records
            .get(session_id)
            .ok_or_else(|| StoreError::NotFound(session_id.to_string()))?;
        Ok(record
            .messages
            .iter()
            .rev()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }
}
