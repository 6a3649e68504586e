//! Status lookup.

use std::sync::Arc;

use tracing::debug;

use jobwatch_core::{Clock, JobId, JobStatus};

use super::store::{JobStore, JobStoreError};

/// Derives the externally visible status of stored jobs.
#[derive(Clone)]
pub struct StatusResolver {
    store: Arc<dyn JobStore>,
    clock: Arc<dyn Clock>,
}

impl StatusResolver {
    pub fn new(store: Arc<dyn JobStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Current status of `job_id`, or `NotFound`.
    pub fn get_status(&self, job_id: JobId) -> Result<JobStatus, JobStoreError> {
        let job = self.store.get(job_id)?.ok_or_else(|| {
            debug!(job_id = %job_id, "status requested for unknown job");
            JobStoreError::NotFound(job_id)
        })?;
        Ok(job.status_at(self.clock.now()))
    }
}

impl core::fmt::Debug for StatusResolver {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StatusResolver")
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}
