//! Transient-failure retry with exponential backoff.
//!
//! The attempt loop is generic over the operation so the policy can be
//! exercised without a live endpoint. Waits go through `tokio::time::sleep`,
//! so one request's backoff never blocks another request's progress, and
//! dropping the future aborts the loop between any two attempts.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::GenerateError;

/// Bounded retry budget for transient generation failures
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self { max_attempts: max_attempts.max(1), base_delay }
    }

    /// Backoff before the attempt after `attempt` (1-indexed): base * 2^(attempt-1)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt.saturating_sub(1))
    }

    /// Run `op` until it succeeds, fails permanently, or the budget is spent.
    ///
    /// Retryable failures wait out the backoff and try again; non-retryable
    /// failures are returned immediately. A spent budget yields
    /// [`GenerateError::Exhausted`] embedding the attempt count and the last
    /// underlying cause.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T, GenerateError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, GenerateError>>,
    {
        let mut attempt = 1;
        loop {
            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < self.max_attempts => {
                    let delay = self.delay_for(attempt);
                    warn!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "transient generation failure, backing off"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) if e.is_retryable() => {
                    return Err(GenerateError::Exhausted {
                        attempts: attempt,
                        last: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }
    }
}
