//! Job storage implementations.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, RwLock};

use jobwatch_core::{Job, JobId};

/// Job store abstraction.
///
/// Implementations must make an inserted record visible to every `get` that
/// starts after `insert` returns.
pub trait JobStore: Send + Sync {
    /// Insert a new job. Records are never replaced.
    fn insert(&self, job: Job) -> Result<JobId, JobStoreError>;

    /// Get a job by ID.
    fn get(&self, job_id: JobId) -> Result<Option<Job>, JobStoreError>;

    /// Number of stored jobs.
    fn len(&self) -> Result<usize, JobStoreError>;
}

/// Job store error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JobStoreError {
    #[error("job not found: {0}")]
    NotFound(JobId),
    #[error("job already exists: {0}")]
    AlreadyExists(JobId),
    #[error("storage error: {0}")]
    Storage(String),
}

/// In-memory job store.
///
/// A single `RwLock` guards the map; taking it on both insert and lookup is
/// what publishes a new record to concurrent readers.
#[derive(Debug, Default)]
pub struct InMemoryJobStore {
    jobs: RwLock<HashMap<JobId, Job>>,
}

impl InMemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

fn poisoned<T>(_: T) -> JobStoreError {
    JobStoreError::Storage("job map lock poisoned".to_string())
}

impl JobStore for InMemoryJobStore {
    fn insert(&self, job: Job) -> Result<JobId, JobStoreError> {
        let mut jobs = self.jobs.write().map_err(poisoned)?;
        let id = job.id();
        match jobs.entry(id) {
            Entry::Occupied(_) => Err(JobStoreError::AlreadyExists(id)),
            Entry::Vacant(slot) => {
                slot.insert(job);
                Ok(id)
            }
        }
    }

    fn get(&self, job_id: JobId) -> Result<Option<Job>, JobStoreError> {
        let jobs = self.jobs.read().map_err(poisoned)?;
        Ok(jobs.get(&job_id).cloned())
    }

    fn len(&self) -> Result<usize, JobStoreError> {
        Ok(self.jobs.read().map_err(poisoned)?.len())
    }
}

impl<S: JobStore + ?Sized> JobStore for Arc<S> {
    fn insert(&self, job: Job) -> Result<JobId, JobStoreError> {
        (**self).insert(job)
    }

    fn get(&self, job_id: JobId) -> Result<Option<Job>, JobStoreError> {
        (**self).get(job_id)
    }

    fn len(&self) -> Result<usize, JobStoreError> {
        (**self).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    use chrono::Utc;
    use jobwatch_core::JobOutcome;

    fn test_job() -> Job {
        Job::new(JobId::new(), Utc::now(), Duration::from_secs(1), JobOutcome::Completed)
    }

    #[test]
    fn insert_and_get() {
        let store = InMemoryJobStore::new();
        let job = test_job();
        let id = store.insert(job.clone()).unwrap();

        assert_eq!(store.get(id).unwrap(), Some(job));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn unknown_id_is_none() {
        let store = InMemoryJobStore::new();
        store.insert(test_job()).unwrap();
        assert!(store.get(JobId::new()).unwrap().is_none());
    }

    #[test]
    fn records_are_never_replaced() {
        let store = InMemoryJobStore::new();
        let job = test_job();
        let id = store.insert(job.clone()).unwrap();

        let imposter = Job::new(id, Utc::now(), Duration::ZERO, JobOutcome::Error);
        assert_eq!(store.insert(imposter), Err(JobStoreError::AlreadyExists(id)));
        assert_eq!(store.get(id).unwrap(), Some(job));
    }

    #[test]
    fn insert_is_visible_to_other_threads() {
        let store = InMemoryJobStore::arc();

        let writers: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                thread::spawn(move || {
                    (0..50)
                        .map(|_| store.insert(test_job()).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let ids: Vec<JobId> = writers
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();

        let readers: Vec<_> = ids
            .chunks(40)
            .map(|chunk| {
                let store = store.clone();
                let chunk = chunk.to_vec();
                thread::spawn(move || {
                    for id in chunk {
                        let job = store.get(id).unwrap().expect("inserted job must be visible");
                        assert_eq!(job.id(), id);
                    }
                })
            })
            .collect();

        for r in readers {
            r.join().unwrap();
        }
        assert_eq!(store.len().unwrap(), 400);
    }
}
