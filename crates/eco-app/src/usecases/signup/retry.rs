use std::future::Future;
use std::time::Duration;

use eco_core::config::ApiConfig;
use eco_core::ports::GatewayError;
use tracing::warn;

/// Bounded timeout and retry budget for a single remote signup call.
///
/// Only transport failures are retried; a rejection from the server is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub timeout: Duration,
    /// Extra attempts after the first one.
    pub retries: u32,
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn new(timeout: Duration, retries: u32, backoff: Duration) -> Self {
        Self {
            timeout,
            retries,
            backoff,
        }
    }

    pub fn from_config(api: &ApiConfig) -> Self {
        Self::new(
            Duration::from_millis(api.timeout_ms),
            api.retry_attempts,
            Duration::from_millis(api.retry_backoff_ms),
        )
    }

    /// Runs `call` until it succeeds, fails with a non-retryable error or the
    /// retry budget is spent. Each attempt is bounded by `timeout`.
    pub async fn run<F, Fut>(
        &self,
        operation: &'static str,
        mut call: F,
    ) -> Result<(), GatewayError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<(), GatewayError>>,
    {
        let mut attempt = 0u32;
        loop {
            let result = match tokio::time::timeout(self.timeout, call()).await {
                Ok(result) => result,
                Err(_) => Err(GatewayError::Timeout),
            };
            match result {
                Ok(()) => return Ok(()),
                Err(err) if err.is_retryable() && attempt < self.retries => {
                    attempt += 1;
                    warn!(operation, attempt, error = %err, "remote call failed, retrying");
                    if !self.backoff.is_zero() {
                        tokio::time::sleep(self.backoff).await;
                    }
                }
                Err(err) => return Err(err),
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&ApiConfig::default())
    }
}
