//! Retry of storage operations that fail on transient lock contention.
//!
//! Errors are classified by their message only. A transient error is retried
//! after `base_delay * attempt`; anything else, or a failure on the last
//! attempt, is returned as is. The operation is re-run from the start, so it
//! must be safe to repeat.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::config::RetryConfig;

/// Lower-cased message fragments that mark a lock error as transient
const TRANSIENT_LOCK_MARKERS: &[&str] = &[
    "locktimeout",
    "transienttransactionerror",
    "unable to acquire ix lock",
];

/// Default number of attempts, including the first one
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 5;

/// Default delay unit between attempts
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(150);

/// Check whether an error message reports transient lock contention
pub fn is_transient_lock_error<E: Display + ?Sized>(error: &E) -> bool {
    let message = error.to_string().to_lowercase();
    TRANSIENT_LOCK_MARKERS
        .iter()
        .any(|marker| message.contains(marker))
}

/// Linear retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
}

impl RetryPolicy {
    /// Create a policy. At least one attempt is always made.
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay after the failed attempt `attempt` (1-indexed)
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_DELAY)
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self::new(config.attempts, Duration::from_millis(config.base_delay_ms))
    }
}

/// Run `operation`, retrying it while it fails with a transient lock error.
pub async fn with_retry<T, E, F, Fut>(policy: &RetryPolicy, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) => {
                if attempt >= policy.max_attempts() || !is_transient_lock_error(&error) {
                    return Err(error);
                }

                let delay = policy.delay_for_attempt(attempt);
                warn!(
                    attempt,
                    max_attempts = policy.max_attempts(),
                    delay_ms = delay.as_millis() as u64,
                    "Transient lock error, retrying: {}",
                    error
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    use tokio::time::Instant;
    use tokio_test::{assert_err, assert_ok};

    use super::*;

    #[test]
    fn test_classifies_known_lock_messages() {
        assert!(is_transient_lock_error("LockTimeout: waited too long"));
        assert!(is_transient_lock_error(
            "Command failed: TransientTransactionError"
        ));
        assert!(is_transient_lock_error(
            "Unable to acquire IX lock on collection"
        ));
        assert!(!is_transient_lock_error("ValidationError: slug is required"));
        assert!(!is_transient_lock_error("lock acquired"));
    }

    #[test]
    fn test_delays_grow_linearly() {
        let policy = RetryPolicy::default();
        let delays: Vec<u128> = (1..5)
            .map(|attempt| policy.delay_for_attempt(attempt).as_millis())
            .collect();
        assert_eq!(delays, vec![150, 300, 450, 600]);
    }

    #[test]
    fn test_policy_from_config() {
        let policy = RetryPolicy::from(&RetryConfig {
            attempts: 0,
            base_delay_ms: 20,
        });
        assert_eq!(policy.max_attempts(), 1);
        assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(40));
    }

    #[tokio::test(start_paused = true)]
    async fn test_recovers_after_transient_failures() {
        let counter = AtomicU32::new(0);
        let calls = &counter;

        let result = with_retry(&RetryPolicy::default(), move || async move {
            let call = calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call < 5 {
                Err(format!("LockTimeout on attempt {}", call))
            } else {
                Ok("created")
            }
        })
        .await;

        assert_eq!(assert_ok!(result), "created");
        assert_eq!(counter.load(Ordering::SeqCst), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_transient_error_is_not_retried() {
        let counter = AtomicU32::new(0);
        let calls = &counter;

        let result: Result<(), String> = with_retry(&RetryPolicy::default(), move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err("ValidationError".to_string())
        })
        .await;

        assert_eq!(assert_err!(result), "ValidationError");
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_last_attempt() {
        let started = Instant::now();
        let timeline = Mutex::new(Vec::new());
        let attempts_at = &timeline;

        let result: Result<(), String> = with_retry(&RetryPolicy::default(), move || async move {
            let mut seen = attempts_at.lock().unwrap();
            seen.push(started.elapsed());
            Err(format!("Unable to acquire IX lock ({})", seen.len()))
        })
        .await;

        assert_eq!(assert_err!(result), "Unable to acquire IX lock (5)");

        let seen = timeline.into_inner().unwrap();
        assert_eq!(seen.len(), 5);
        let gaps: Vec<u128> = seen
            .windows(2)
            .map(|pair| (pair[1] - pair[0]).as_millis())
            .collect();
        assert_eq!(gaps, vec![150, 300, 450, 600]);
    }
}
