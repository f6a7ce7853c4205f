//! Session and message persistence behind a narrow gateway.

pub mod gateway;
pub mod memory;
pub mod types;

#[cfg(test)]
mod tests;

pub use gateway::{SessionStore, StoreGateway};
pub use memory::MemoryStore;
pub use types::{ChatSession, Message, MessagePage, MessageRole, NewSession, StoreError};
