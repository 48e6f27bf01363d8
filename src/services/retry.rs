// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bounded retries with exponential backoff.

use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

/// How many times to try an operation and how long to wait in between.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first one), at least 1
    pub max_attempts: u32,
    /// Delay before the first retry
    pub backoff_base: Duration,
    /// Maximum delay between retries
    pub max_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff_base: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff_base,
            max_delay: Duration::from_secs(8),
        }
    }

    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// Delay before the given attempt (0-indexed).
    ///
    /// Attempt 0 runs immediately; attempt `n` waits `base * 2^(n-1)`,
    /// capped at `max_delay`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let factor = 2u32.saturating_pow(attempt - 1);
        self.backoff_base
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }

    /// Run `operation` until it succeeds, fails with an error that
    /// `should_retry` rejects, or the attempt budget runs out.
    ///
    /// Only the final error is returned.
    pub async fn run<T, E, F, Fut, P>(
        &self,
        operation_name: &str,
        mut operation: F,
        should_retry: P,
    ) -> Result<T, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
        P: Fn(&E) -> bool,
    {
        let mut attempt = 0;
        loop {
            let delay = self.delay_for_attempt(attempt);
            if !delay.is_zero() {
                tracing::debug!(
                    operation = operation_name,
                    attempt = attempt + 1,
                    max_attempts = self.max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    "Retrying after backoff"
                );
                sleep(delay).await;
            }

            match operation(attempt).await {
                Ok(value) => {
                    if attempt > 0 {
                        tracing::debug!(
                            operation = operation_name,
                            attempt = attempt + 1,
                            "Succeeded after retry"
                        );
                    }
                    return Ok(value);
                }
                Err(e) if !should_retry(&e) => {
                    tracing::debug!(
                        operation = operation_name,
                        attempt = attempt + 1,
                        error = %e,
                        "Non-retryable failure"
                    );
                    return Err(e);
                }
                Err(e) => {
                    let remaining = self.max_attempts.saturating_sub(attempt + 1);
                    if remaining == 0 {
                        tracing::warn!(
                            operation = operation_name,
                            attempts = self.max_attempts,
                            error = %e,
                            "All attempts failed"
                        );
                        return Err(e);
                    }
                    tracing::warn!(
                        operation = operation_name,
                        attempt = attempt + 1,
                        remaining,
                        error = %e,
                        "Attempt failed, will retry"
                    );
                }
            }

            attempt += 1;
        }
    }
}

impl Default for RetryPolicy {
    /// Three attempts, 500ms then 1s between them.
    fn default() -> Self {
        Self::new(3, Duration::from_millis(500))
    }
}
