//! Exponential-backoff retry for single Slack API calls.
//!
//! [`RetryPolicy`] wraps one remote call at a time. Transient failures
//! ([`SlackpackError::is_transient`]) are retried after sleeping
//! `base_delay * 2^attempt`; anything else is returned immediately.
//!
//! # Example
//!
//! ```rust
//! use std::cell::Cell;
//! use std::time::Duration;
//! use slackpack::retry::RetryPolicy;
//! use slackpack::SlackpackError;
//!
//! let policy = RetryPolicy::new(5);
//! let calls = Cell::new(0);
//! let mut slept = Vec::new();
//!
//! let value = policy.run_with_sleep(
//!     "users.info",
//!     || {
//!         calls.set(calls.get() + 1);
//!         if calls.get() < 3 {
//!             Err(SlackpackError::api("users.info", "ratelimited"))
//!         } else {
//!             Ok("alice")
//!         }
//!     },
//!     |delay| slept.push(delay),
//! )?;
//!
//! assert_eq!(value, "alice");
//! assert_eq!(slept, vec![Duration::from_secs(1), Duration::from_secs(2)]);
//! # Ok::<(), SlackpackError>(())
//! ```

use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default number of retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// Bounded exponential backoff.
///
/// With `max_retries = N` an operation is attempted at most `N + 1` times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Delay before the first retry; doubles on every subsequent one
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Creates a policy with a one second base delay.
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Self::default()
        }
    }

    /// A policy that never retries.
    pub fn none() -> Self {
        Self::new(0)
    }

    /// Sets the base delay.
    #[must_use]
    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    /// Delay before retry number `attempt` (0-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt))
    }

    /// Runs `op`, sleeping the current thread between attempts.
    pub fn run<T, F>(&self, label: &str, op: F) -> Result<T>
    where
        F: FnMut() -> Result<T>,
    {
        self.run_with_sleep(label, op, thread::sleep)
    }

    /// Runs `op`, using `sleep` for the backoff pauses.
    pub fn run_with_sleep<T, F, S>(&self, label: &str, mut op: F, mut sleep: S) -> Result<T>
    where
        F: FnMut() -> Result<T>,
        S: FnMut(Duration),
    {
        let mut attempt = 0;
        loop {
            match op() {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() && attempt < self.max_retries => {
                    let delay = self.delay_for(attempt);
                    tracing::warn!(
                        call = label,
                        attempt = attempt + 1,
                        delay_secs = delay.as_secs_f64(),
                        error = %err,
                        "slack call failed, retrying"
                    );
                    sleep(delay);
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SlackpackError;
    use std::cell::Cell;

    fn flaky(failures: u32, calls: &Cell<u32>) -> Result<&'static str> {
        calls.set(calls.get() + 1);
        if calls.get() <= failures {
            Err(SlackpackError::api("conversations.history", "ratelimited"))
        } else {
            Ok("ok")
        }
    }

    #[test]
    fn test_success_first_try_never_sleeps() {
        let calls = Cell::new(0);
        let mut slept = Vec::new();
        let result = RetryPolicy::default()
            .run_with_sleep("t", || flaky(0, &calls), |d| slept.push(d))
            .unwrap();
        assert_eq!(result, "ok");
        assert_eq!(calls.get(), 1);
        assert!(slept.is_empty());
    }

    #[test]
    fn test_backoff_doubles() {
        let calls = Cell::new(0);
        let mut slept = Vec::new();
        RetryPolicy::new(5)
            .run_with_sleep("t", || flaky(4, &calls), |d| slept.push(d.as_secs()))
            .unwrap();
        assert_eq!(slept, vec![1, 2, 4, 8]);
        assert_eq!(calls.get(), 5);
    }

    #[test]
    fn test_gives_up_after_max_retries() {
        let calls = Cell::new(0);
        let mut slept = 0;
        let err = RetryPolicy::new(2)
            .run_with_sleep("t", || flaky(u32::MAX, &calls), |_| slept += 1)
            .unwrap_err();
        assert!(err.is_api());
        assert_eq!(calls.get(), 3);
        assert_eq!(slept, 2);
    }

    #[test]
    fn test_non_transient_error_is_not_retried() {
        let calls = Cell::new(0);
        let err = RetryPolicy::default()
            .run_with_sleep(
                "t",
                || -> Result<()> {
                    calls.set(calls.get() + 1);
                    Err(SlackpackError::missing_token("SLACK_API_TOKEN"))
                },
                |_| panic!("must not sleep"),
            )
            .unwrap_err();
        assert!(err.is_missing_token());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_zero_retries() {
        let calls = Cell::new(0);
        let result = RetryPolicy::none().run_with_sleep("t", || flaky(1, &calls), |_| {});
        assert!(result.is_err());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_custom_base_delay() {
        let policy = RetryPolicy::new(3).with_base_delay(Duration::from_millis(10));
        assert_eq!(policy.delay_for(0), Duration::from_millis(10));
        assert_eq!(policy.delay_for(3), Duration::from_millis(80));
    }
}
