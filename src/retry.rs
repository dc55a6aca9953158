//! Bounded retry with linear backoff.
//!
//! Attempt 1 runs immediately. Before attempt `k` the policy sleeps
//! `interval * (k - 1)`, so with the defaults (60s, 6 attempts) a permanently
//! failing operation waits 60 + 120 + 180 + 240 + 300 = 900 seconds in total.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::RetryConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            interval: Duration::from_secs(config.interval_secs),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts,
            interval,
        }
    }

    /// Number of attempts actually made; zero is treated as one.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Sleep before the given 1-based attempt.
    pub fn delay_before(&self, attempt: u32) -> Duration {
        self.interval * attempt.saturating_sub(1)
    }

    /// Run `op` until it succeeds or the attempts are used up.
    ///
    /// `op` receives the 1-based attempt number. The last error is returned
    /// unchanged once every attempt has failed.
    pub async fn run<T, E, F, Fut>(&self, label: &str, mut op: F) -> Result<T, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let attempts = self.attempts();
        let mut attempt = 1;
        loop {
            if attempt > 1 {
                let delay = self.delay_before(attempt);
                debug!(label, attempt, delay_secs = delay.as_secs(), "backing off");
                tokio::time::sleep(delay).await;
            }

            match op(attempt).await {
                Ok(value) => {
                    if attempt > 1 {
                        debug!(label, attempt, "succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(error) if attempt < attempts => {
                    warn!(label, attempt, max_attempts = attempts, %error, "attempt failed, will retry");
                    attempt += 1;
                }
                Err(error) => {
                    warn!(label, attempts, %error, "giving up");
                    return Err(error);
                }
            }
        }
    }
}
