//! Provider adapters: one per upstream model family.
//!
//! Adapters normalize arbitrary upstream JSON into [`ModelReply`] and own
//! their provider's timeout and retry policy. Nothing outside this module
//! sees a provider-specific field name.

pub mod adapter;
pub mod claude;
pub mod deepseek;
pub mod types;

#[cfg(test)]
mod tests;

pub use adapter::ModelAdapter;
pub use claude::ClaudeAdapter;
pub use deepseek::DeepseekAdapter;
pub use types::{ModelKind, ModelReply, ProviderError, ProviderSettings, UnknownModel};
