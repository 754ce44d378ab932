//! Retry policy for repository calls

use std::time::Duration;

use backoff::ExponentialBackoffBuilder;

use crate::error::{Error, Result};

/// Exponential backoff settings for repository access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    /// Delay before the first retry
    pub initial_delay: Duration,
    /// Upper bound on any single delay
    pub max_delay: Duration,
    /// Total attempts, including the first
    pub max_attempts: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
            max_attempts: 6,
        }
    }
}

impl RetryConfig {
    /// Single attempt, no delay
    pub fn no_retry() -> Self {
        Self {
            initial_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            max_attempts: 1,
        }
    }

    /// Run a repository call until it succeeds or attempts run out
    pub fn run<T, F>(&self, operation: &str, mut call: F) -> Result<T>
    where
        F: FnMut() -> confres_model::Result<T>,
    {
        let max_attempts = self.max_attempts.max(1);
        let policy = ExponentialBackoffBuilder::new()
            .with_initial_interval(self.initial_delay)
            .with_max_interval(self.max_delay)
            .with_max_elapsed_time(None)
            .build();

        let mut attempts = 0u32;
        let outcome = backoff::retry(policy, || {
            attempts += 1;
            call().map_err(|e| {
                if attempts >= max_attempts {
                    backoff::Error::permanent(e)
                } else {
                    tracing::warn!(operation, attempt = attempts, error = %e, "Repository call failed, retrying");
                    backoff::Error::transient(e)
                }
            })
        });

        outcome.map_err(|e| {
            let source = match e {
                backoff::Error::Permanent(source) => source,
                backoff::Error::Transient { err, .. } => err,
            };
            Error::Repository { attempts, source }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick(max_attempts: u32) -> RetryConfig {
        RetryConfig {
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
            max_attempts,
        }
    }

    #[test]
    fn test_defaults() {
        let config = RetryConfig::default();
        assert_eq!(config.initial_delay, Duration::from_secs(1));
        assert_eq!(config.max_delay, Duration::from_secs(60));
        assert_eq!(config.max_attempts, 6);
    }

    #[test]
    fn test_succeeds_after_transient_failures() {
        let mut calls = 0;
        let value = quick(5)
            .run("get", || {
                calls += 1;
                if calls < 3 {
                    Err(confres_model::Error::repository("unavailable"))
                } else {
                    Ok(calls)
                }
            })
            .unwrap();
        assert_eq!(value, 3);
    }

    #[test]
    fn test_gives_up_after_max_attempts() {
        let mut calls = 0;
        let err = quick(3)
            .run("get", || -> confres_model::Result<()> {
                calls += 1;
                Err(confres_model::Error::repository("down"))
            })
            .unwrap_err();

        assert_eq!(calls, 3);
        assert!(matches!(err, Error::Repository { attempts: 3, .. }), "got: {err}");
    }

    #[test]
    fn test_no_retry_is_single_attempt() {
        let mut calls = 0;
        let _ = RetryConfig::no_retry().run("get", || -> confres_model::Result<()> {
            calls += 1;
            Err(confres_model::Error::repository("down"))
        });
        assert_eq!(calls, 1);
    }
}
