//! Retry-with-backoff for operations that may fail transiently.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use crate::schema::LifecycleError;

/// Classification of a failed attempt.
#[derive(Debug)]
pub enum RetryError {
    /// Try again after a delay.
    Retryable(LifecycleError),
    /// Give up immediately.
    NonRetryable(LifecycleError),
}

impl RetryError {
    /// Wraps an error as retryable.
    pub fn retryable(error: impl Into<LifecycleError>) -> Self {
        Self::Retryable(error.into())
    }

    /// Wraps an error as non-retryable.
    pub fn non_retryable(error: impl Into<LifecycleError>) -> Self {
        Self::NonRetryable(error.into())
    }

    /// Returns `true` for [`RetryError::Retryable`].
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Retryable(_))
    }
}

/// Timing of [`retry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total time budget.
    pub timeout: Duration,
    /// Delay after the first failed attempt.
    pub initial_delay: Duration,
    /// Upper bound for the delay between attempts.
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Default first delay.
    pub const INITIAL_DELAY: Duration = Duration::from_millis(500);
    /// Default delay cap.
    pub const MAX_DELAY: Duration = Duration::from_secs(10);

    /// A policy with the given timeout and default backoff.
    #[must_use]
    pub const fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            initial_delay: Self::INITIAL_DELAY,
            max_delay: Self::MAX_DELAY,
        }
    }

    /// Delay before attempt `attempt + 1`, doubling from `initial_delay`.
    fn delay_after(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.initial_delay
            .saturating_mul(factor)
            .min(self.max_delay)
    }
}

/// Runs `operation` until it succeeds, fails with a non-retryable error, or
/// the policy's timeout elapses.
///
/// # Errors
///
/// Returns the non-retryable error as is, or [`LifecycleError::Timeout`]
/// wrapping the last retryable error.
///
/// # Example
///
/// ```rust,ignore
/// let group = retry(RetryPolicy::with_timeout(Duration::from_secs(60)), || async {
///     client.customer_groups().post(draft.clone()).execute().await
///         .map_err(handle_commercetools_error)
/// })
/// .await?;
/// ```
pub async fn retry<T, F, Fut>(policy: RetryPolicy, mut operation: F) -> Result<T, LifecycleError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, RetryError>>,
{
    let started = Instant::now();
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;
        let error = match operation().await {
            Ok(value) => return Ok(value),
            Err(RetryError::NonRetryable(error)) => return Err(error),
            Err(RetryError::Retryable(error)) => error,
        };

        let elapsed = started.elapsed();
        if elapsed >= policy.timeout {
            return Err(LifecycleError::Timeout {
                timeout: policy.timeout,
                source: Box::new(error),
            });
        }

        let delay = policy.delay_after(attempt).min(policy.timeout - elapsed);
        tracing::warn!(attempt, ?delay, %error, "Retryable error, trying again");
        tokio::time::sleep(delay).await;
    }
}
