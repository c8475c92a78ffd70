//! Fixed-delay retry policy for page fetches.
//!
//! [`retry_fixed`] wraps a fallible async operation and retries transient
//! failures after a constant delay, up to a bounded attempt budget. There is
//! deliberately no exponential backoff: sync runs are low-volume and the
//! upstream rate limits are generous at one request per page of 250 records.

use std::future::Future;
use std::time::Duration;

use crate::error::ClientError;

/// Returns `true` for errors worth retrying after the fixed delay.
///
/// **Transient (retried):**
/// - [`ClientError::Http`] — network-level failure (timeout, connection reset).
/// - [`ClientError::RateLimited`] — HTTP 429.
/// - [`ClientError::UnexpectedStatus`] with a 5xx status.
///
/// **Fatal (returned immediately):**
/// - [`ClientError::NotFound`] — retrying returns the same 404.
/// - [`ClientError::UnexpectedStatus`] with a 4xx status (bad token, etc.).
/// - [`ClientError::Deserialize`] — malformed body; retrying won't fix it.
/// - [`ClientError::Projection`] / [`ClientError::InvalidAccessToken`] —
///   local errors, never produced inside a request.
pub(crate) fn is_transient(err: &ClientError) -> bool {
    match err {
        ClientError::Http(_) | ClientError::RateLimited { .. } => true,
        ClientError::UnexpectedStatus { status, .. } => (500..600).contains(status),
        ClientError::NotFound { .. }
        | ClientError::Deserialize { .. }
        | ClientError::InvalidAccessToken { .. }
        | ClientError::Projection { .. } => false,
    }
}

/// Runs `operation` up to `max_attempts` times, sleeping `delay_secs` between
/// attempts that failed transiently.
///
/// A `max_attempts` of 0 is treated as 1: the operation always runs at least
/// once. Fatal errors are returned immediately without sleeping.
pub(crate) async fn retry_fixed<T, F, Fut>(
    max_attempts: u32,
    delay_secs: u64,
    mut operation: F,
) -> Result<T, ClientError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ClientError>>,
{
    let budget = max_attempts.max(1);
    let mut attempt = 1u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_transient(&err) || attempt >= budget {
                    return Err(err);
                }
                tracing::warn!(
                    attempt,
                    max_attempts = budget,
                    delay_secs,
                    error = %err,
                    "transient fetch error — retrying after fixed delay"
                );
                tokio::time::sleep(Duration::from_secs(delay_secs)).await;
                attempt += 1;
            }
        }
    }
}
