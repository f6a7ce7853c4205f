use super::*;
use crate::provider::ModelKind;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

fn gateway() -> StoreGateway {
    StoreGateway::new(Arc::new(MemoryStore::new()))
}

async fn session_with_messages(gw: &StoreGateway, count: usize) -> ChatSession {
    let session = gw
        .create_session(NewSession {
            model_type: Some(ModelKind::Claude),
            title: Some("Test Session".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    for i in 0..count {
        gw.append_message(Message::user(&session.id, format!("message {i}")))
            .await
            .unwrap();
    }
    session
}

#[tokio::test]
async fn create_and_get_session() {
    let gw = gateway();
    let session = gw
        .create_session(NewSession {
            model_type: Some(ModelKind::Deepseek),
            title: Some("Weather talk".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    let fetched = gw.get_session(&session.id).await.unwrap();
    assert_eq!(fetched.title, "Weather talk");
    assert_eq!(fetched.model_type, ModelKind::Deepseek);
    assert_eq!(fetched.created_at, fetched.updated_at);
}

#[tokio::test]
async fn create_session_defaults_title() {
    let gw = gateway();
    let session = gw.create_session(NewSession::default()).await.unwrap();
    assert_eq!(session.title, "New Chat");
}

#[tokio::test]
async fn missing_session_is_not_found() {
    let gw = gateway();
    assert!(matches!(
        gw.get_session("nope").await,
        Err(StoreError::NotFound(_))
    ));
    assert!(matches!(
        gw.delete_session("nope").await,
        Err(StoreError::NotFound(_))
    ));
    assert!(matches!(
        gw.append_message(Message::user("nope", "hi")).await,
        Err(StoreError::NotFound(_))
    ));
}

#[tokio::test]
async fn append_bumps_updated_at() {
    let gw = gateway();
    let session = session_with_messages(&gw, 0).await;

    tokio::time::sleep(Duration::from_millis(5)).await;
    gw.append_message(Message::user(&session.id, "hello"))
        .await
        .unwrap();

    let after = gw.get_session(&session.id).await.unwrap();
    assert!(after.updated_at > session.updated_at);
}

#[tokio::test]
async fn sessions_list_most_recently_updated_first() {
    let gw = gateway();
    let first = session_with_messages(&gw, 0).await;
    let second = session_with_messages(&gw, 0).await;

    // Touch the older session so it moves to the front
    tokio::time::sleep(Duration::from_millis(5)).await;
    gw.append_message(Message::user(&first.id, "bump"))
        .await
        .unwrap();

    let listed = gw.list_sessions().await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, first.id);
    assert_eq!(listed[1].id, second.id);
}

#[tokio::test]
async fn rename_updates_title() {
    let gw = gateway();
    let session = session_with_messages(&gw, 0).await;

    let renamed = gw.rename_session(&session.id, "Better name").await.unwrap();
    assert_eq!(renamed.title, "Better name");
    assert_eq!(gw.get_session(&session.id).await.unwrap().title, "Better name");
}

#[tokio::test]
async fn delete_cascades_to_messages() {
    let gw = gateway();
    let session = session_with_messages(&gw, 3).await;

    gw.delete_session(&session.id).await.unwrap();

    assert!(matches!(
        gw.get_session(&session.id).await,
        Err(StoreError::NotFound(_))
    ));
    assert!(matches!(
        gw.list_messages(&session.id, 0, 20).await,
        Err(StoreError::NotFound(_))
    ));
}

#[tokio::test]
async fn pagination_returns_chronological_pages_with_overflow_flag() {
    let gw = gateway();
    let session = session_with_messages(&gw, 25).await;

    let page0 = gw.list_messages(&session.id, 0, 20).await.unwrap();
    assert_eq!(page0.messages.len(), 20);
    assert!(page0.has_more);
    // Page 0 holds the newest 20 messages, oldest of those first
    assert_eq!(page0.messages[0].content, "message 5");
    assert_eq!(page0.messages[19].content, "message 24");

    let page1 = gw.list_messages(&session.id, 1, 20).await.unwrap();
    assert_eq!(page1.messages.len(), 5);
    assert!(!page1.has_more);
    assert_eq!(page1.messages[0].content, "message 0");
    assert_eq!(page1.messages[4].content, "message 4");
}

#[tokio::test]
async fn exact_page_boundary_reports_no_more() {
    let gw = gateway();
    let session = session_with_messages(&gw, 20).await;

    let page0 = gw.list_messages(&session.id, 0, 20).await.unwrap();
    assert_eq!(page0.messages.len(), 20);
    assert!(!page0.has_more);
}

#[tokio::test]
async fn concurrent_appends_lose_nothing() {
    let gw = gateway();
    let session = session_with_messages(&gw, 0).await;

    let mut handles = Vec::new();
    for i in 0..10 {
        let gw = gw.clone();
        let id = session.id.clone();
        handles.push(tokio::spawn(async move {
            gw.append_message(Message::user(&id, format!("concurrent {i}")))
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let page = gw.list_messages(&session.id, 0, 20).await.unwrap();
    assert_eq!(page.messages.len(), 10);
}

/// Backend that never completes, for timeout coverage
struct StalledStore;

#[async_trait]
impl SessionStore for StalledStore {
    async fn create_session(&self, _new: NewSession) -> Result<ChatSession, StoreError> {
        std::future::pending().await
    }
    async fn get_session(&self, _id: &str) -> Result<ChatSession, StoreError> {
        std::future::pending().await
    }
    async fn list_sessions(&self) -> Result<Vec<ChatSession>, StoreError> {
        std::future::pending().await
    }
    async fn rename_session(&self, _id: &str, _title: &str) -> Result<ChatSession, StoreError> {
        std::future::pending().await
    }
    async fn delete_session(&self, _id: &str) -> Result<(), StoreError> {
        std::future::pending().await
    }
    async fn append_message(&self, _message: Message) -> Result<(), StoreError> {
        std::future::pending().await
    }
    async fn messages_newest_first(
        &self,
        _session_id: &str,
        _offset: usize,
        _limit: usize,
    ) -> Result<Vec<Message>, StoreError> {
        std::future::pending().await
    }
}

#[tokio::test(start_paused = true)]
async fn stalled_backend_surfaces_store_timeout() {
    let gw = StoreGateway::with_timeout(Arc::new(StalledStore), Duration::from_secs(5));

    let err = gw.get_session("any").await.unwrap_err();
    assert!(matches!(err, StoreError::Timeout(_)));

    let err = gw
        .append_message(Message::user("any", "hi"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Timeout(_)));
}
