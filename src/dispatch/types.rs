use crate::provider::{ModelKind, ModelReply};
use std::collections::HashMap;
use std::fmt::Display;

/// Outcome of one model's slot within a dispatch.
///
/// Failures are caught at the per-model boundary and become placeholders;
/// they are persisted and returned exactly like real replies so no slot is
/// ever dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotOutcome {
    Reply(ModelReply),
    Failed { message: String },
}

impl SlotOutcome {
    pub fn from_result<E: Display>(result: Result<ModelReply, E>) -> Self {
        match result {
            Ok(reply) => SlotOutcome::Reply(reply),
            Err(err) => SlotOutcome::Failed {
                message: err.to_string(),
            },
        }
    }

    pub fn reply(&self) -> Option<&ModelReply> {
        match self {
            SlotOutcome::Reply(reply) => Some(reply),
            SlotOutcome::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, SlotOutcome::Failed { .. })
    }

    /// Collapse into the reply persisted for this slot: placeholders store
    /// the readable error message as content with no reasoning.
    pub fn into_stored_reply(self) -> ModelReply {
        match self {
            SlotOutcome::Reply(reply) => reply,
            SlotOutcome::Failed { message } => ModelReply::new(message, None),
        }
    }
}

/// One entry per requested model, failures included
pub type DispatchResult = HashMap<ModelKind, SlotOutcome>;

/// Caller error detected before any upstream call is made
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid request: {0}")]
pub struct InvalidRequest(pub String);
