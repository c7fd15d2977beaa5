//! Fixed-count retry loop for probe requests.
//!
//! Attempts run back to back: there is no backoff and no jitter. The first
//! success wins; once attempts are exhausted the last error is returned as is.

use std::future::Future;

use tracing::debug;

/// Default number of attempts per probe (including the first).
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// How many times a probe request is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl RetryPolicy {
    /// Creates a policy with a custom attempt count (minimum 1).
    #[must_use]
    pub fn with_max_attempts(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    /// Returns the maximum number of attempts configured.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Runs `operation` until it succeeds or attempts run out.
    ///
    /// # Errors
    ///
    /// Returns the error from the final attempt.
    pub async fn run<T, E, F, Fut>(&self, mut operation: F) -> Result<T, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let mut attempt = 1;
        loop {
            match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(error) if attempt >= self.max_attempts => {
                    debug!(attempt, error = %error, "attempts exhausted");
                    return Err(error);
                }
                Err(error) => {
                    debug!(attempt, max = self.max_attempts, error = %error, "attempt failed, retrying");
                    attempt += 1;
                }
            }
        }
    }
}
