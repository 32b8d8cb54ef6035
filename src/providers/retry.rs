// Bounded retry for transient generation failures

use std::future::Future;
use std::time::Duration;

use crate::config::GenerationSettings;
use crate::errors::GenerationError;

/// Attempt budget and per-failure backoff
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    pub warmup_backoff: Duration,
    pub timeout_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_settings(&GenerationSettings::default())
    }
}

impl RetryPolicy {
    pub fn from_settings(settings: &GenerationSettings) -> Self {
        Self {
            max_attempts: settings.max_attempts.max(1),
            warmup_backoff: Duration::from_millis(settings.warmup_backoff_ms),
            timeout_backoff: Duration::from_millis(settings.timeout_backoff_ms),
        }
    }

    /// Delay before the next attempt, or `None` if the error is not retryable
    pub fn backoff_for(&self, error: &GenerationError) -> Option<Duration> {
        match error {
            GenerationError::WarmingUp => Some(self.warmup_backoff),
            GenerationError::Timeout(_) => Some(self.timeout_backoff),
            _ => None,
        }
    }
}

/// Run `op` until it succeeds, fails permanently, or the budget is spent.
///
/// `op` receives the 1-based attempt number.
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, GenerationError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, GenerationError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match op(attempt).await {
            Ok(value) => {
                if attempt > 1 {
                    tracing::info!("Generation succeeded on attempt {}/{}", attempt, max_attempts);
                }
                return Ok(value);
            }
            Err(error) => match policy.backoff_for(&error) {
                Some(delay) if attempt < max_attempts => {
                    tracing::warn!(
                        code = error.code(),
                        "Attempt {}/{} failed, retrying in {:?}: {}",
                        attempt,
                        max_attempts,
                        delay,
                        error
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                _ => {
                    tracing::debug!(
                        code = error.code(),
                        "Giving up after attempt {}/{}",
                        attempt,
                        max_attempts
                    );
                    return Err(error);
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            warmup_backoff: Duration::ZERO,
            timeout_backoff: Duration::ZERO,
        }
    }

    #[tokio::test]
    async fn test_transient_errors_use_whole_budget() {
        let calls = AtomicU32::new(0);
        let calls = &calls;

        let result: Result<(), _> = with_retry(&fast_policy(3), |_| async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(GenerationError::WarmingUp)
        })
        .await;

        assert!(matches!(result, Err(GenerationError::WarmingUp)));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_permanent_error_is_not_retried() {
        let calls = AtomicU32::new(0);
        let calls = &calls;

        let result: Result<(), _> = with_retry(&fast_policy(3), |_| async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(GenerationError::Status {
                status: 500,
                body: "boom".into(),
            })
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_recovers_after_timeout() {
        let result = with_retry(&fast_policy(3), |attempt| async move {
            if attempt == 1 {
                Err(GenerationError::Timeout(Duration::from_secs(1)))
            } else {
                Ok(attempt)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_zero_budget_still_attempts_once() {
        let calls = AtomicU32::new(0);
        let calls = &calls;

        let _: Result<(), _> = with_retry(&fast_policy(0), |_| async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(GenerationError::WarmingUp)
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
