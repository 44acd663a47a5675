//! Retry policy for catalog requests.
//!
//! Every failure class is retried the same way: rate limiting (429), other
//! non-200 statuses, transport failures and undecodable bodies all wait
//! `backoff_unit * 2^attempt` before the next attempt. Running out of
//! attempts is not an error; it yields [`FetchOutcome::Exhausted`], which the
//! paginator treats as the end of the listing.

use std::future::Future;
use std::time::Duration;

use qcat_core::AppConfig;

use crate::error::ScraperError;

/// Result of a request run through [`retry_with_backoff`].
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    Data(T),
    /// All attempts failed.
    Exhausted,
}

impl<T> FetchOutcome<T> {
    /// Converts to `Option`, discarding the exhaustion marker.
    pub fn into_data(self) -> Option<T> {
        match self {
            FetchOutcome::Data(value) => Some(value),
            FetchOutcome::Exhausted => None,
        }
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        matches!(self, FetchOutcome::Exhausted)
    }
}

/// Attempt budget and timing for one logical request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. `0` never issues a request.
    pub max_attempts: u32,
    /// Base of the exponential backoff.
    pub backoff_unit: Duration,
    /// Courtesy pause after every successful response.
    pub post_success_delay: Duration,
}

impl RetryPolicy {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            max_attempts: config.max_retries,
            backoff_unit: Duration::from_millis(config.backoff_unit_ms),
            post_success_delay: Duration::from_millis(config.rate_limit_delay_ms),
        }
    }

    /// Wait before the attempt following `attempt` (0-based):
    /// `backoff_unit * 2^attempt`, saturating on extreme values.
    #[must_use]
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        self.backoff_unit.saturating_mul(1u32 << attempt.min(31))
    }
}

/// Runs `operation` until it succeeds or `policy.max_attempts` is used up.
///
/// # Backoff schedule (example with a one-second unit and 3 attempts)
///
/// | Attempt | Wait before next attempt |
/// |---------|--------------------------|
/// | 0       | 1 s (2^0)                |
/// | 1       | 2 s (2^1)                |
/// | 2       | none, returns `Exhausted` |
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    policy: &RetryPolicy,
    url: &str,
    mut operation: F,
) -> FetchOutcome<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScraperError>>,
{
    for attempt in 0..policy.max_attempts {
        match operation().await {
            Ok(value) => {
                if !policy.post_success_delay.is_zero() {
                    tokio::time::sleep(policy.post_success_delay).await;
                }
                return FetchOutcome::Data(value);
            }
            Err(err) => {
                let has_next = attempt + 1 < policy.max_attempts;
                let delay = policy.backoff_delay(attempt);
                #[allow(clippy::cast_possible_truncation)]
                let delay_ms = if has_next { delay.as_millis() as u64 } else { 0 };

                if matches!(err, ScraperError::RateLimited { .. }) {
                    tracing::warn!(
                        url,
                        attempt = attempt + 1,
                        max_attempts = policy.max_attempts,
                        delay_ms,
                        "rate limited, backing off"
                    );
                } else {
                    tracing::error!(
                        url,
                        attempt = attempt + 1,
                        max_attempts = policy.max_attempts,
                        delay_ms,
                        error = %err,
                        "request failed"
                    );
                }

                if has_next {
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    tracing::warn!(
        url,
        max_attempts = policy.max_attempts,
        "all attempts failed, treating as no data"
    );
    FetchOutcome::Exhausted
}
