//! Two-stage reasoning composition.
//!
//! The composer either asks the primary model for a labeled two-part answer
//! and splits it (self-contained mode), or fetches a reasoning trace from the
//! secondary model and injects it into the primary model's prompt
//! (donor-based mode). Donor-based results always carry the donor's trace so
//! callers can show what informed the answer.

use crate::provider::{ModelAdapter, ModelReply, ProviderError};
use regex::Regex;
use std::sync::{Arc, LazyLock};
use tracing::debug;


/// Instruction suffix for self-contained mode
const TWO_PART_SUFFIX: &str = "\n\nPlease provide your response in two parts:\n\
1. Your direct answer\n\
2. Your reasoning process, including key considerations and assumptions";

/// Transition to the second labeled part. Tolerant of case and of optional
/// qualifiers like "Your" or "process".
static REASONING_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\n\s*2\.\s*(?:your\s+)?reasoning(?:\s+process)?\s*:?\s*").expect("valid regex")
});

/// Leading "1. Answer:"-style label on the first part
static ANSWER_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*1\.\s*(?:your\s+)?(?:direct\s+)?answer\s*:?\s*").expect("valid regex")
});

#[derive(Debug, Clone, thiserror::Error)]
pub enum ComposeError {
    /// Donor-based mode was requested but no reasoning trace could be
    /// obtained. Never silently falls back to self-contained mode.
    #[error("no reasoning trace is available to enhance this response")]
    NoReasoningAvailable,

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Composer over a primary (answering) and secondary (reasoning) adapter.
pub struct ReasoningComposer {
    primary: Arc<dyn ModelAdapter>,
    secondary: Arc<dyn ModelAdapter>,
}

impl ReasoningComposer {
    pub fn new(primary: Arc<dyn ModelAdapter>, secondary: Arc<dyn ModelAdapter>) -> Self {
        Self { primary, secondary }
    }

    /// Single primary-model call instructed to answer in two labeled parts;
    /// the raw text is split heuristically. A missing second part yields
    /// `reasoning: None`, not an error.
    pub async fn compose_self_contained(&self, prompt: &str) -> Result<ModelReply, ComposeError> {
        let full_prompt = format!("{prompt}{TWO_PART_SUFFIX}");
        let raw = self.primary.invoke(&full_prompt).await?;

        let (content, reasoning) = split_two_part_answer(&raw.content);
        Ok(ModelReply::new(content, reasoning))
    }

    /// Enhance the primary model's prompt with a donor reasoning trace.
    ///
    /// When `donor_reasoning` is absent the trace is fetched from the
    /// secondary adapter. The returned reply's `reasoning` is the donor's
    /// trace exactly, never re-derived from the primary model's output.
    pub async fn compose_with_donor(
        &self,
        prompt: &str,
        donor_reasoning: Option<String>,
    ) -> Result<ModelReply, ComposeError> {
        let donor = match donor_reasoning {
            Some(trace) if !trace.trim().is_empty() => trace,
            Some(_) => return Err(ComposeError::NoReasoningAvailable),
            None => {
                debug!(
                    secondary = self.secondary.name(),
                    "fetching donor reasoning trace"
                );
                let reply = self.secondary.invoke(prompt).await?;
                reply.reasoning.ok_or(ComposeError::NoReasoningAvailable)?
            }
        };

        let enhanced = build_enhanced_prompt(prompt, &donor);
        let reply = self.primary.invoke(&enhanced).await?;

        Ok(ModelReply::new(reply.content.trim(), Some(donor)))
    }
}

/// Quote the donor trace verbatim and ask the primary model for an
/// independent judgment informed by it.
fn build_enhanced_prompt(prompt: &str, donor_reasoning: &str) -> String {
    format!(
        "I'll share an analysis of this question, along with the reasoning process \
that led to it. Consider this reasoning and use it to inform your own response, \
while maintaining your independent judgment:\n\n\
{donor_reasoning}\n\n\
With that reasoning process in mind, please provide your own analysis of this \
question:\n\n\
{prompt}\n\n\
Note: While you should consider the reasoning provided above, please form your \
own independent analysis and conclusions. You may agree or disagree with aspects \
of the reasoning, and should explain your own thought process."
    )
}

/// Best-effort split of a free-text two-part answer.
///
/// The upstream output format is not contractually guaranteed, so this is a
/// heuristic: when no second part is found the whole text is the answer and
/// the reasoning is `None`.
pub fn split_two_part_answer(raw: &str) -> (String, Option<String>) {
    match REASONING_HEADER.find(raw) {
        Some(m) => {
            let answer = ANSWER_LABEL.replace(&raw[..m.start()], "").trim().to_string();
            let reasoning = raw[m.end()..].trim();
            let reasoning = (!reasoning.is_empty()).then(|| reasoning.to_string());
            (answer, reasoning)
        }
        None => {
            let answer = ANSWER_LABEL.replace(raw, "").trim().to_string();
            (answer, None)
        }
    }
}
