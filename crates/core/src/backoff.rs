//! Client polling backoff.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Doubling backoff capped at `max_interval`.
///
/// The policy is stateless: callers hold the current interval and feed it
/// back through [`BackoffPolicy::next`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackoffPolicy {
    initial_interval: Duration,
    max_interval: Duration,
}

impl BackoffPolicy {
    /// Requires `0 < initial_interval <= max_interval`.
    pub fn new(initial_interval: Duration, max_interval: Duration) -> DomainResult<Self> {
        if initial_interval.is_zero() {
            return Err(DomainError::validation("initial interval must be greater than zero"));
        }
        if initial_interval > max_interval {
            return Err(DomainError::validation(format!(
                "initial interval ({initial_interval:?}) must not exceed max interval ({max_interval:?})"
            )));
        }
        Ok(Self {
            initial_interval,
            max_interval,
        })
    }

    pub fn from_secs(initial_interval: f64, max_interval: f64) -> DomainResult<Self> {
        let initial = Duration::try_from_secs_f64(initial_interval)
            .map_err(|e| DomainError::validation(format!("initial interval: {e}")))?;
        let max = Duration::try_from_secs_f64(max_interval)
            .map_err(|e| DomainError::validation(format!("max interval: {e}")))?;
        Self::new(initial, max)
    }

    pub fn initial_interval(&self) -> Duration {
        self.initial_interval
    }

    pub fn max_interval(&self) -> Duration {
        self.max_interval
    }

    /// `min(interval * 2, max_interval)`.
    pub fn next(&self, interval: Duration) -> Duration {
        interval.saturating_mul(2).min(self.max_interval)
    }

    /// The interval waited after the `n`-th poll (0-indexed).
    pub fn interval_after(&self, n: u32) -> Duration {
        let mut interval = self.initial_interval;
        for _ in 0..n {
            if interval == self.max_interval {
                break;
            }
            interval = self.next(interval);
        }
        interval
    }
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            initial_interval: Duration::from_millis(500),
            max_interval: Duration::from_secs(8),
        }
    }
}
