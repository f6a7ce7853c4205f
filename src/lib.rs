//! # blendchat
//!
//! A multi-provider chat front end that runs one prompt against Claude,
//! DeepSeek R1, or a composed "Claude with reasoning" mode that feeds
//! DeepSeek's chain-of-thought trace into Claude's prompt. Conversations
//! are persisted in sessions behind a narrow store gateway, with a TTL
//! cache over the listing endpoints.
//!
//! ## Architecture Overview
//!
//! - **[`provider`]**: One adapter per upstream model API behind a common
//!   trait, with retry and error classification
//! - **[`composer`]**: Builds the reasoning-enhanced Claude responses
//! - **[`normalize`]**: Canonical cleanup of model output text
//! - **[`dispatch`]**: Concurrent fan-out of one prompt to many models with
//!   per-slot failure isolation
//! - **[`store`]**: Session and message persistence behind a timeout-wrapped
//!   gateway
//! - **[`cache`]**: Lazy-expiry TTL cache for session and message listings
//! - **[`service`]**: The inbound interface layer tying it all together
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use blendchat::dispatch::Dispatcher;
//! use blendchat::provider::{ClaudeAdapter, DeepseekAdapter, ModelKind};
//! use blendchat::service::{ChatRequest, ChatService};
//! use blendchat::store::{MemoryStore, StoreGateway};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let dispatcher = Dispatcher::new(
//!         Arc::new(ClaudeAdapter::from_env()),
//!         Arc::new(DeepseekAdapter::from_env()),
//!     );
//!     let service = ChatService::new(
//!         StoreGateway::new(Arc::new(MemoryStore::new())),
//!         dispatcher,
//!     );
//!
//!     let response = service
//!         .submit_chat(ChatRequest {
//!             session_id: None,
//!             prompt: "What is the capital of France?".to_string(),
//!             models: vec![ModelKind::Claude, ModelKind::ClaudeReasoning],
//!         })
//!         .await?;
//!
//!     for (model, reply) in &response.replies {
//!         println!("{model}: {}", reply.content);
//!     }
//!     Ok(())
//! }
//! ```

/// Upstream model adapters.
///
/// One adapter per provider API behind the [`provider::ModelAdapter`] trait,
/// with transport error classification and bounded retry for transient
/// failures.
pub mod provider;

/// Reasoning-enhanced response composition.
pub mod composer;

/// Canonical cleanup of model output text.
pub mod normalize;

/// Concurrent fan-out of one prompt to the requested models.
pub mod dispatch;

/// Session and message persistence behind a narrow gateway.
pub mod store;

/// Lazy-expiry TTL cache.
pub mod cache;

/// Inbound interface layer: request validation, session resolution,
/// persistence, and the HTTP-style error mapping.
pub mod service;

/// Configuration discovery and loading.
pub mod config;

/// Environment constants.
///
/// Centralizes env-var names, endpoint URLs, timeouts, and limits used
/// throughout the application.
pub mod env;

// Re-export the types most callers need
pub use dispatch::{DispatchResult, Dispatcher, SlotOutcome};
pub use provider::{ClaudeAdapter, DeepseekAdapter, ModelAdapter, ModelKind, ModelReply};
pub use service::{ChatError, ChatRequest, ChatResponse, ChatService};
pub use store::{ChatSession, Message, MessagePage, MemoryStore, SessionStore, StoreGateway};

// CLI module for the command-line interface
pub mod cli;
