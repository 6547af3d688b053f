//! Retry with exponential backoff for calls against rate-limited upstream
//! sources. Explicitly constructed and injected per service; holds no
//! process-wide state.

use std::future::Future;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

#[derive(Debug)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
    min_interval: Duration,
    last_attempt: Mutex<Option<Instant>>,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration, min_interval: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            min_interval,
            last_attempt: Mutex::new(None),
        }
    }

    /// Delay before retry number `retry` (zero-based): base * 2^retry.
    pub fn backoff_delay(&self, retry: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(retry)
    }

    /// Sleep until `min_interval` has passed since the previous attempt.
    async fn pace(&self) {
        let mut last = self.last_attempt.lock().await;
        if let Some(previous) = *last {
            let since = previous.elapsed();
            if since < self.min_interval {
                tokio::time::sleep(self.min_interval - since).await;
            }
        }
        *last = Some(Instant::now());
    }

    /// Run `op` until it succeeds or the attempt budget is spent; the last
    /// error is returned.
    pub async fn run<T, E, F, Fut>(&self, mut op: F) -> Result<T, E>
    where
        E: std::fmt::Display,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut attempt = 0;
        loop {
            self.pace().await;
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    attempt += 1;
                    if attempt >= self.max_attempts {
                        return Err(err);
                    }
                    let delay = self.backoff_delay(attempt - 1);
                    tracing::warn!(
                        attempt,
                        error = %err,
                        "upstream call failed, retrying in {:?}",
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(5, Duration::from_secs(2), Duration::from_secs(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy::new(max_attempts, Duration::from_millis(1), Duration::ZERO)
    }

    #[tokio::test]
    async fn returns_first_success() {
        let policy = fast_policy(3);
        let calls = AtomicU32::new(0);
        let result: Result<u32, String> = policy
            .run(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok(42) }
            })
            .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_until_success() {
        let policy = fast_policy(5);
        let calls = AtomicU32::new(0);
        let result: Result<&str, String> = policy
            .run(|| {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n < 2 {
                        Err("quota exceeded".to_string())
                    } else {
                        Ok("done")
                    }
                }
            })
            .await;
        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_attempt_budget() {
        let policy = fast_policy(3);
        let calls = AtomicU32::new(0);
        let result: Result<(), String> = policy
            .run(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err("still down".to_string()) }
            })
            .await;
        assert_eq!(result.unwrap_err(), "still down");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn backoff_doubles_per_retry() {
        let policy = RetryPolicy::new(5, Duration::from_millis(100), Duration::ZERO);
        assert_eq!(policy.backoff_delay(0), Duration::from_millis(100));
        assert_eq!(policy.backoff_delay(1), Duration::from_millis(200));
        assert_eq!(policy.backoff_delay(2), Duration::from_millis(400));
    }
}
