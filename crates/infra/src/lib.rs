//! Infrastructure layer: job storage, scheduling, and status resolution.

pub mod jobs;

pub use jobs::{InMemoryJobStore, JobScheduler, JobStore, JobStoreError, StatusResolver};
