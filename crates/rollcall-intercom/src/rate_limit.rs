//! Rate-limit retry for Intercom requests.
//!
//! Intercom answers 429 with a `Retry-After` header. [`retry_rate_limited`]
//! sleeps for that long and repeats the request, up to a fixed number of
//! consecutive attempts. Every other error is returned immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::IntercomError;

/// Seconds to wait when a 429 response carries no usable `Retry-After`.
pub(crate) const DEFAULT_RETRY_AFTER_SECS: u64 = 10;

/// Reads `Retry-After` as whole seconds, falling back to
/// [`DEFAULT_RETRY_AFTER_SECS`].
pub(crate) fn retry_after_secs(headers: &reqwest::header::HeaderMap) -> u64 {
    headers
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

/// Executes `operation`, retrying up to `max_retries` times while it reports
/// [`IntercomError::RateLimited`].
///
/// With `max_retries = 5` the operation is attempted at most 6 times. Once
/// retries are exhausted the last `RateLimited` error is returned.
pub(crate) async fn retry_rate_limited<T, F, Fut>(
    max_retries: u32,
    mut operation: F,
) -> Result<T, IntercomError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, IntercomError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(IntercomError::RateLimited { retry_after_secs }) if attempt < max_retries => {
                attempt += 1;
                tracing::warn!(
                    attempt,
                    max_retries,
                    retry_after_secs,
                    "rate limited by Intercom, retrying after Retry-After delay"
                );
                tokio::time::sleep(Duration::from_secs(retry_after_secs)).await;
            }
            Err(err) => return Err(err),
        }
    }
}
