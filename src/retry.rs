//! Retry with exponential backoff for source reads
//!
//! Only `IngestError::Io` is retried. Drift, null and date failures are
//! deterministic for a given source and return on the first attempt.

use crate::error::IngestError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Retry policy for the ingestion read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total attempts including the first (>= 1)
    pub max_attempts: u32,
    /// Delay before the second attempt; doubled per attempt
    pub initial_backoff_ms: u64,
    /// Upper bound for a single delay
    pub max_backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff_ms: 100,
            max_backoff_ms: 2000,
        }
    }
}

impl RetryPolicy {
    /// Single attempt, no delay
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            initial_backoff_ms: 0,
            max_backoff_ms: 0,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 {
            return Err("retry.max_attempts must be >= 1, got 0".to_string());
        }
        if self.initial_backoff_ms > self.max_backoff_ms {
            return Err(format!(
                "retry.initial_backoff_ms ({}) exceeds retry.max_backoff_ms ({})",
                self.initial_backoff_ms, self.max_backoff_ms
            ));
        }
        Ok(())
    }

    /// Delay after the given failed attempt (1-based)
    ///
    /// # Example
    /// ```
    /// use adsight::retry::RetryPolicy;
    /// use std::time::Duration;
    ///
    /// let policy = RetryPolicy::default();
    /// assert_eq!(policy.backoff_after(1), Duration::from_millis(100));
    /// assert_eq!(policy.backoff_after(2), Duration::from_millis(200));
    /// assert_eq!(policy.backoff_after(10), Duration::from_millis(2000));
    /// ```
    pub fn backoff_after(&self, attempt: u32) -> Duration {
        let factor = 1u64.checked_shl(attempt.saturating_sub(1)).unwrap_or(u64::MAX);
        let millis = self
            .initial_backoff_ms
            .saturating_mul(factor)
            .min(self.max_backoff_ms);
        Duration::from_millis(millis)
    }

    /// Run `operation` until it succeeds, fails non-retryably, or attempts run out
    ///
    /// The closure receives the 1-based attempt number.
    pub fn run<T, F>(&self, label: &str, mut operation: F) -> Result<T, IngestError>
    where
        F: FnMut(u32) -> Result<T, IngestError>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match operation(attempt) {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < max_attempts => {
                    let delay = self.backoff_after(attempt);
                    warn!(
                        "{} failed (attempt {}/{}): {}",
                        label, attempt, max_attempts, e
                    );
                    debug!("Retrying {} in {:?}", label, delay);
                    std::thread::sleep(delay);
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
