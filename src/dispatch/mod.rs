//! Fan-out of one prompt to the requested set of model adapters.
//!
//! Independent calls run concurrently and are joined without
//! short-circuiting; a slot failure becomes a placeholder rather than
//! cancelling its siblings. When the composed model and its dependency model
//! are both requested, the dependency is invoked exactly once and its result
//! feeds both slots.

use crate::composer::{ComposeError, ReasoningComposer};
use crate::provider::{ModelAdapter, ModelKind, ModelReply, ProviderError};
use futures::FutureExt;
use futures::future::{BoxFuture, Shared, join_all};
use std::sync::Arc;
use tracing::{debug, info};

pub mod types;


pub use types::{DispatchResult, InvalidRequest, SlotOutcome};

type SharedDonorCall = Shared<BoxFuture<'static, Result<ModelReply, ProviderError>>>;

pub struct Dispatcher {
    claude: Arc<dyn ModelAdapter>,
    deepseek: Arc<dyn ModelAdapter>,
    composer: ReasoningComposer,
}

impl Dispatcher {
    pub fn new(claude: Arc<dyn ModelAdapter>, deepseek: Arc<dyn ModelAdapter>) -> Self {
        let composer = ReasoningComposer::new(claude.clone(), deepseek.clone());
        Self {
            claude,
            deepseek,
            composer,
        }
    }

    /// Run `prompt` against every requested model.
    ///
    /// Returns one entry per requested model; validation failures abort the
    /// whole call before any upstream traffic.
    pub async fn dispatch(
        &self,
        prompt: &str,
        models: &[ModelKind],
    ) -> Result<DispatchResult, InvalidRequest> {
        if models.is_empty() {
            return Err(InvalidRequest(
                "at least one model must be requested".to_string(),
            ));
        }

        let mut requested: Vec<ModelKind> = Vec::new();
        for model in models {
            if !requested.contains(model) {
                requested.push(*model);
            }
        }

        // The reasoning model is a dependency of the composed slot. Sharing
        // one lazy future keeps the upstream call count at one even when both
        // slots are requested; it is never polled unless some slot awaits it.
        let donor_call: SharedDonorCall = {
            let deepseek = self.deepseek.clone();
            let prompt = prompt.to_string();
            async move { deepseek.invoke(&prompt).await }.boxed().shared()
        };

        info!(models = ?requested, "dispatching prompt");

        let slots = requested.iter().map(|model| {
            let donor_call = donor_call.clone();
            async move {
                let outcome = match model {
                    ModelKind::Claude => {
                        SlotOutcome::from_result(self.claude.invoke(prompt).await)
                    }
                    ModelKind::Deepseek => SlotOutcome::from_result(donor_call.await),
                    ModelKind::ClaudeReasoning => {
                        self.composed_slot(prompt, donor_call).await
                    }
                };
                if outcome.is_failed() {
                    debug!(model = %model, "slot failed, keeping placeholder");
                }
                outcome
            }
        });

        let outcomes = join_all(slots).await;
        Ok(requested.into_iter().zip(outcomes).collect())
    }

    /// The composed slot waits for the donor call, then runs donor-based
    /// composition. A failed or trace-less donor fails only this slot.
    async fn composed_slot(&self, prompt: &str, donor_call: SharedDonorCall) -> SlotOutcome {
        let donor = match donor_call.await {
            Ok(reply) => match reply.reasoning {
                Some(trace) => trace,
                None => {
                    return SlotOutcome::Failed {
                        message: ComposeError::NoReasoningAvailable.to_string(),
                    };
                }
            },
            Err(err) => {
                return SlotOutcome::Failed {
                    message: format!("{}: {err}", ComposeError::NoReasoningAvailable),
                };
            }
        };

        SlotOutcome::from_result(self.composer.compose_with_donor(prompt, Some(donor)).await)
    }
}
