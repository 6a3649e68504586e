//! Job creation: draws the completion delay and terminal outcome.

use std::sync::Arc;

use tracing::{debug, info};

use jobwatch_core::{Clock, Job, JobId, JobOutcome, JobSettings, RandomSource};

use super::store::{JobStore, JobStoreError};

/// Creates jobs and writes them into the store.
#[derive(Clone)]
pub struct JobScheduler {
    store: Arc<dyn JobStore>,
    clock: Arc<dyn Clock>,
    random: Arc<dyn RandomSource>,
    settings: JobSettings,
}

impl JobScheduler {
    pub fn new(
        store: Arc<dyn JobStore>,
        clock: Arc<dyn Clock>,
        random: Arc<dyn RandomSource>,
        settings: JobSettings,
    ) -> Self {
        Self {
            store,
            clock,
            random,
            settings,
        }
    }

    pub fn settings(&self) -> &JobSettings {
        &self.settings
    }

    /// Create a job and return its identifier.
    ///
    /// `completion_time = now + delay` with `delay` uniform over
    /// `[min_delay, max_delay]`; the outcome is `Error` with probability
    /// `error_probability`.
    pub fn create_job(&self) -> Result<JobId, JobStoreError> {
        let delay = self
            .random
            .uniform_delay(self.settings.min_delay(), self.settings.max_delay());
        let outcome = if self.random.bernoulli(self.settings.error_probability()) {
            JobOutcome::Error
        } else {
            JobOutcome::Completed
        };
        let start_time = self.clock.now();

        loop {
            let job = Job::new(JobId::new(), start_time, delay, outcome);
            match self.store.insert(job) {
                Ok(id) => {
                    info!(job_id = %id, "job created");
                    debug!(job_id = %id, delay_ms = delay.as_millis() as u64, %outcome, "job schedule drawn");
                    return Ok(id);
                }
                Err(JobStoreError::AlreadyExists(id)) => {
                    debug!(job_id = %id, "job id collision, regenerating");
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl core::fmt::Debug for JobScheduler {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("JobScheduler")
            .field("clock", &self.clock)
            .field("random", &self.random)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
