//! Bounded exponential backoff
//!
//! The engine owns retries and the SDK's built-in retry is disabled, so
//! attempts are never multiplied. Only errors the taxonomy marks retryable
//! are attempted again; semantic failures surface immediately.

use std::future::Future;
use std::time::Duration;

use scout_core::{Result, RetryConfig};

/// Run `call` until it succeeds, fails non-retryably, or exhausts attempts
///
/// The backoff doubles from `initial_backoff_ms` up to `max_backoff_ms`.
pub(crate) async fn with_retry<T, F, Fut>(
    config: &RetryConfig,
    operation: &str,
    mut call: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let max_backoff = Duration::from_millis(config.max_backoff_ms);
    let mut backoff = Duration::from_millis(config.initial_backoff_ms);
    let mut attempt = 1;
    loop {
        match call().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() && attempt < config.max_attempts => {
                tracing::warn!(
                    operation,
                    attempt,
                    backoff_ms = backoff.as_millis() as u64,
                    error = %err,
                    "transient failure, retrying"
                );
                tokio::time::sleep(backoff).await;
                backoff = (backoff * 2).min(max_backoff);
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
