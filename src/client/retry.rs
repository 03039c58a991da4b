//! Retry-with-backoff policy for upstream calls

use crate::error::{BotError, Result};
use std::future::Future;
use std::time::Duration;
use tracing::{info, warn};

/// Exponential backoff policy applied uniformly to every adapter call
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// Wait before the retry following `attempt` (0-based): base * 2^attempt
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt)
    }

    /// Run `call` until it succeeds or the retry ceiling is reached.
    ///
    /// Exhaustion yields `SourceUnavailable` carrying the last error; the
    /// caller decides whether that degrades one wallet or the whole run.
    pub async fn run<T, F, Fut>(&self, what: &str, mut call: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            match call().await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    warn!("{} failed: {}", what, e);
                    last_error = Some(e);

                    if attempt < self.max_retries {
                        let wait = self.delay_for(attempt);
                        info!(
                            "retrying {} in {:?} (attempt {}/{})",
                            what,
                            wait,
                            attempt + 1,
                            self.max_retries
                        );
                        tokio::time::sleep(wait).await;
                    }
                }
            }
        }

        Err(BotError::SourceUnavailable {
            attempts: self.max_retries + 1,
            message: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown error".to_string()),
        })
    }
}
