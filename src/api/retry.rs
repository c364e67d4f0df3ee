//! Bounded retry for rate-limited requests.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::{CatalogError, Result};

/// Run `op` until it stops returning [`CatalogError::RateLimited`].
///
/// `max_attempts` counts every call of `op`, the first included. Between
/// attempts the task sleeps for `backoff(attempt, retry_after)`. Any other
/// error is returned immediately. Running out of attempts yields
/// [`CatalogError::RetriesExhausted`].
pub async fn with_retry<T, F, Fut, B>(
    operation: &str,
    max_attempts: u32,
    backoff: B,
    mut op: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
    B: Fn(u32, Option<Duration>) -> Duration,
{
    let mut attempt = 0;

    loop {
        match op().await {
            Err(CatalogError::RateLimited { retry_after }) => {
                attempt += 1;
                if attempt >= max_attempts {
                    return Err(CatalogError::RetriesExhausted {
                        operation: operation.to_string(),
                    });
                }

                let wait = backoff(attempt, retry_after);
                warn!(
                    "{} rate limited (attempt {}/{}), waiting {:?}",
                    operation, attempt, max_attempts, wait
                );
                tokio::time::sleep(wait).await;
            }
            other => return other,
        }
    }
}

/// Backoff that honors the server's advice and otherwise waits `fallback`.
pub fn advised_or(fallback: Duration) -> impl Fn(u32, Option<Duration>) -> Duration {
    move |_, retry_after| retry_after.unwrap_or(fallback)
}
