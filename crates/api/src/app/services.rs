use std::sync::Arc;

use jobwatch_core::{Clock, JobId, JobSettings, RandomSource, SeededRandom, SystemClock, ThreadRandom};
use jobwatch_infra::{InMemoryJobStore, JobScheduler, JobStore, JobStoreError, StatusResolver};

use crate::config::{ServerConfig, ServiceMode};

/// Everything the handlers need, sharing one job store.
#[derive(Debug, Clone)]
pub struct AppServices {
    pub scheduler: JobScheduler,
    pub resolver: StatusResolver,
    default_job: Option<JobId>,
}

impl AppServices {
    pub fn new(clock: Arc<dyn Clock>, random: Arc<dyn RandomSource>, settings: JobSettings) -> Self {
        let store: Arc<dyn JobStore> = InMemoryJobStore::arc();
        Self {
            scheduler: JobScheduler::new(store.clone(), clock.clone(), random, settings),
            resolver: StatusResolver::new(store, clock),
            default_job: None,
        }
    }

    /// Create the implicit job served by single-job mode.
    pub fn with_default_job(mut self) -> Result<Self, JobStoreError> {
        let id = self.scheduler.create_job()?;
        tracing::info!(job_id = %id, "created default job");
        self.default_job = Some(id);
        Ok(self)
    }

    /// Wire production services: wall clock, seeded or OS randomness.
    pub fn from_config(config: &ServerConfig) -> Result<Self, JobStoreError> {
        let random: Arc<dyn RandomSource> = match config.random_seed {
            Some(seed) => Arc::new(SeededRandom::new(seed)),
            None => Arc::new(ThreadRandom),
        };
        let services = Self::new(Arc::new(SystemClock), random, config.settings);

        match config.mode {
            ServiceMode::Single => services.with_default_job(),
            ServiceMode::Multi { .. } => Ok(services),
        }
    }

    pub fn default_job(&self) -> Option<JobId> {
        self.default_job
    }
}
