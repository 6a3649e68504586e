//! Job record, terminal outcome, and derived status.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::id::JobId;

/// Terminal result fixed when a job is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobOutcome {
    Completed,
    Error,
}

impl JobOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobOutcome::Completed => "completed",
            JobOutcome::Error => "error",
        }
    }
}

impl core::fmt::Display for JobOutcome {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Externally visible job status (derived, never stored).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Completed,
    Error,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, JobStatus::Pending)
    }

    /// The terminal outcome, if this status is terminal.
    pub fn outcome(&self) -> Option<JobOutcome> {
        match self {
            JobStatus::Pending => None,
            JobStatus::Completed => Some(JobOutcome::Completed),
            JobStatus::Error => Some(JobOutcome::Error),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Completed => "completed",
            JobStatus::Error => "error",
        }
    }
}

impl From<JobOutcome> for JobStatus {
    fn from(value: JobOutcome) -> Self {
        match value {
            JobOutcome::Completed => JobStatus::Completed,
            JobOutcome::Error => JobStatus::Error,
        }
    }
}

impl core::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A simulated unit of asynchronous work.
///
/// Every field is fixed at construction; there are no mutators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Job {
    id: JobId,
    start_time: DateTime<Utc>,
    completion_time: DateTime<Utc>,
    final_outcome: JobOutcome,
}

impl Job {
    /// Build a job that becomes terminal `delay` after `start_time`.
    pub fn new(id: JobId, start_time: DateTime<Utc>, delay: Duration, final_outcome: JobOutcome) -> Self {
        let delay = chrono::Duration::from_std(delay).unwrap_or(chrono::Duration::MAX);
        let completion_time = start_time
            .checked_add_signed(delay)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self {
            id,
            start_time,
            completion_time,
            final_outcome,
        }
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn completion_time(&self) -> DateTime<Utc> {
        self.completion_time
    }

    pub fn final_outcome(&self) -> JobOutcome {
        self.final_outcome
    }

    /// Status as observed at `now`: pending strictly before the completion
    /// time, the fixed outcome from then on.
    pub fn status_at(&self, now: DateTime<Utc>) -> JobStatus {
        if now < self.completion_time {
            JobStatus::Pending
        } else {
            self.final_outcome.into()
        }
    }
}

/// Server-side knobs that shape every new job.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JobSettings {
    min_delay: Duration,
    max_delay: Duration,
    error_probability: f64,
}

impl JobSettings {
    /// Validate and build settings.
    ///
    /// Requires `min_delay <= max_delay` and `0.0 <= error_probability <= 1.0`.
    pub fn new(min_delay: Duration, max_delay: Duration, error_probability: f64) -> DomainResult<Self> {
        if min_delay > max_delay {
            return Err(DomainError::validation(format!(
                "min delay ({min_delay:?}) must not exceed max delay ({max_delay:?})"
            )));
        }
        if !(0.0..=1.0).contains(&error_probability) {
            return Err(DomainError::validation(format!(
                "error probability must be within [0, 1], got {error_probability}"
            )));
        }
        Ok(Self {
            min_delay,
            max_delay,
            error_probability,
        })
    }

    /// Convenience constructor taking seconds, as the env config does.
    pub fn from_secs(min_delay: f64, max_delay: f64, error_probability: f64) -> DomainResult<Self> {
        let min = Duration::try_from_secs_f64(min_delay)
            .map_err(|e| DomainError::validation(format!("min delay: {e}")))?;
        let max = Duration::try_from_secs_f64(max_delay)
            .map_err(|e| DomainError::validation(format!("max delay: {e}")))?;
        Self::new(min, max, error_probability)
    }

    pub fn min_delay(&self) -> Duration {
        self.min_delay
    }

    pub fn max_delay(&self) -> Duration {
        self.max_delay
    }

    pub fn error_probability(&self) -> f64 {
        self.error_probability
    }
}

impl Default for JobSettings {
    fn default() -> Self {
        Self {
            min_delay: Duration::from_secs(5),
            max_delay: Duration::from_secs(15),
            error_probability: 0.2,
        }
    }
}
