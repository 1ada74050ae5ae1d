//! Retry logic.
//!
//! # Responsibilities
//! - Re-run a fallible async operation a bounded number of times
//! - Sleep on the quadratic schedule before each retry
//! - Log every failed attempt
//!
//! # Design Decisions
//! - Used for the startup store connection only; requests are never retried
//! - The error from the last attempt is kept, earlier ones are logged and dropped

use std::fmt;
use std::future::Future;
use std::time::Duration;

use thiserror::Error;

use crate::config::DatabaseConfig;
use crate::resilience::backoff::quadratic_backoff;

/// How many times to try and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Policy for the startup database connection.
    pub fn for_database(config: &DatabaseConfig) -> Self {
        Self::new(
            config.connect_attempts,
            Duration::from_millis(config.connect_backoff_base_ms),
        )
    }

    /// Delay before attempt `attempt` (0-based).
    pub fn delay_before(&self, attempt: u32) -> Duration {
        quadratic_backoff(attempt, self.base_delay)
    }
}

/// Every attempt failed.
#[derive(Debug, Error)]
#[error("gave up after {attempts} attempts: {last_error}")]
pub struct RetryError<E> {
    pub attempts: u32,
    #[source]
    pub last_error: E,
}

/// Run `op` until it succeeds or the policy runs out of attempts.
///
/// `op` receives the 0-based attempt number.
pub async fn retry<T, E, F, Fut>(policy: RetryPolicy, mut op: F) -> Result<T, RetryError<E>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    let mut attempt = 0;
    loop {
        let delay = policy.delay_before(attempt);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(e) => {
                attempt += 1;
                if attempt >= policy.max_attempts {
                    return Err(RetryError {
                        attempts: attempt,
                        last_error: e,
                    });
                }
                tracing::warn!(
                    attempt,
                    max_attempts = policy.max_attempts,
                    retry_in = ?policy.delay_before(attempt),
                    error = %e,
                    "Attempt failed, retrying"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy::new(max_attempts, Duration::from_millis(1))
    }

    #[tokio::test]
    async fn test_succeeds_first_time() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = calls.clone();
        let result: Result<u32, RetryError<String>> = retry(fast_policy(5), |attempt| {
            c.fetch_add(1, Ordering::SeqCst);
            async move { Ok(attempt) }
        })
        .await;

        assert_eq!(result.unwrap(), 0);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_stops_after_success() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = calls.clone();
        let result = retry(fast_policy(5), |attempt| {
            c.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt < 2 {
                    Err("refused".to_string())
                } else {
                    Ok("connected")
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), "connected");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = calls.clone();
        let result: Result<(), _> = retry(fast_policy(5), |attempt| {
            c.fetch_add(1, Ordering::SeqCst);
            async move { Err(format!("refused #{attempt}")) }
        })
        .await;

        let err = result.unwrap_err();
        assert_eq!(err.attempts, 5);
        assert_eq!(err.last_error, "refused #4");
        assert_eq!(calls.load(Ordering::SeqCst), 5);
        assert!(err.to_string().starts_with("gave up after 5 attempts"));
    }

    #[tokio::test]
    async fn test_error_keeps_last_failure_as_source() {
        let result: Result<(), _> = retry(fast_policy(2), |_| async {
            Err(std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused"))
        })
        .await;

        let err = result.unwrap_err();
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "refused");
        assert_eq!(err.to_string(), "gave up after 2 attempts: refused");
    }

    #[test]
    fn test_policy_from_database_config() {
        let policy = RetryPolicy::for_database(&DatabaseConfig::default());
        assert_eq!(policy.max_attempts, 5);
        let schedule: Vec<u64> = (0..5).map(|a| policy.delay_before(a).as_secs()).collect();
        assert_eq!(schedule, vec![0, 1, 4, 9, 16]);
    }

    #[test]
    fn test_zero_attempts_still_tries_once() {
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).max_attempts, 1);
    }
}
