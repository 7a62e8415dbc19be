//! Retry policy for calls to the text-generation service

use super::error::AiError;
use std::future::Future;
use std::time::Duration;

/// Exponential backoff around a fallible async call
///
/// The wait after the n-th failed attempt is `multiplier * 2^(n-1)` seconds,
/// clamped to `[min_delay, max_delay]`. Only errors accepted by the
/// `retryable` predicate are retried; anything else, or the last error once
/// `max_attempts` is reached, is returned to the caller unchanged.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub multiplier: f64,
    pub min_delay: Duration,
    pub max_delay: Duration,
    pub retryable: fn(&AiError) -> bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            multiplier: 1.0,
            min_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(64),
            retryable: AiError::is_rate_limited,
        }
    }
}

impl RetryPolicy {
    /// A policy that calls exactly once
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Same policy without any wait between attempts
    pub fn without_delay(mut self) -> Self {
        self.multiplier = 0.0;
        self.min_delay = Duration::ZERO;
        self.max_delay = Duration::ZERO;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_predicate(mut self, retryable: fn(&AiError) -> bool) -> Self {
        self.retryable = retryable;
        self
    }

    /// Wait before attempt `attempt + 1`, `attempt` being 1-based
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(62) as i32;
        let secs = self.multiplier * 2f64.powi(exponent);
        let delay = Duration::try_from_secs_f64(secs).unwrap_or(self.max_delay);
        delay.max(self.min_delay).min(self.max_delay)
    }

    /// Run `call` until it succeeds, fails with a non-retryable error, or
    /// runs out of attempts
    pub async fn run<T, F, Fut>(&self, operation: &str, mut call: F) -> Result<T, AiError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, AiError>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match call().await {
                Ok(value) => return Ok(value),
                Err(err) if attempt < max_attempts && (self.retryable)(&err) => {
                    let delay = self.delay_for(attempt);
                    tracing::warn!(
                        operation,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Retryable failure, backing off"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    if attempt > 1 {
                        tracing::error!(operation, attempt, error = %err, "Giving up");
                    }
                    return Err(err);
                }
            }
        }
    }
}
