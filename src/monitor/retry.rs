use std::fmt::Display;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// How many times to try and how long to wait before the first retry.
/// Each later retry waits twice as long as the previous one.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay: Duration::from_secs(1),
        }
    }

    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    /// Delay after the given failed attempt (1-based)
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay * 2_u32.saturating_pow(attempt.saturating_sub(1))
    }
}

/// Retry an operation with exponential backoff
pub async fn retry_with_backoff<'a, F, T, E>(
    operation_name: &str,
    policy: RetryPolicy,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>,
    E: Display,
{
    let mut attempt = 0;

    loop {
        attempt += 1;

        match operation().await {
            Ok(result) => {
                if attempt > 1 {
                    debug!(
                        "'{}' succeeded on attempt {}/{}",
                        operation_name, attempt, policy.max_attempts
                    );
                }
                return Ok(result);
            }
            Err(e) if attempt < policy.max_attempts => {
                let delay = policy.delay_after(attempt);
                warn!(
                    "'{}' failed (attempt {}/{}): {}; retrying in {:?}",
                    operation_name, attempt, policy.max_attempts, e, delay
                );
                sleep(delay).await;
            }
            Err(e) => {
                warn!(
                    "'{}' failed after {} attempts: {}",
                    operation_name, policy.max_attempts, e
                );
                return Err(e);
            }
        }
    }
}
