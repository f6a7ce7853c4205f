//! Provider adapter contract and shared retry machinery.
//!
//! Each upstream model family gets one adapter that owns its wire format,
//! credential lookup, and timeout policy. Everything past `invoke` speaks
//! [`ModelReply`] only.

use crate::provider::types::{ModelReply, ProviderError};
use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Boundary component translating one upstream model's wire format into the
/// canonical result type.
#[async_trait]
pub trait ModelAdapter: Send + Sync {
    /// Stable provider name used in logs and error messages
    fn name(&self) -> &'static str;

    /// Execute a single prompt against the upstream model.
    ///
    /// Must not mutate shared state; the only side effect is the outbound
    /// call itself.
    async fn invoke(&self, prompt: &str) -> Result<ModelReply, ProviderError>;
}

/// Delay before the given 1-based attempt, doubling from `base`
pub(crate) fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base * 2u32.saturating_pow(attempt.saturating_sub(1))
}

/// Run `op` up to `max_attempts` times, sleeping with exponential backoff
/// between attempts. Only transient failures are retried; auth and
/// malformed-response errors surface immediately.
pub(crate) async fn retry_transient<F, Fut>(
    provider: &'static str,
    max_attempts: u32,
    base_delay: Duration,
    op: F,
) -> Result<ModelReply, ProviderError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<ModelReply, ProviderError>>,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        match op().await {
            Ok(reply) => return Ok(reply),
            Err(err) if err.is_transient() && attempt < max_attempts => {
                let delay = backoff_delay(base_delay, attempt);
                warn!(
                    provider,
                    attempt,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    "transient upstream failure, retrying: {err}"
                );
                tokio::time::sleep(delay).await;
            }
            Err(err) => return Err(err),
        }
    }
}
