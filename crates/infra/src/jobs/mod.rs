//! Job lifecycle on the service side.
//!
//! ## Design
//!
//! - Jobs are immutable once inserted; the store is written once per job
//! - Completion time and outcome are drawn at creation, never later
//! - Status is derived on every read from the record and the current time
//!
//! ## Components
//!
//! - `JobStore`: authoritative id → record map (in-memory implementation)
//! - `JobScheduler`: draws delay/outcome and inserts the record
//! - `StatusResolver`: looks a job up and derives its visible status

pub mod resolver;
pub mod scheduler;
pub mod store;

pub use resolver::StatusResolver;
pub use scheduler::JobScheduler;
pub use store::{InMemoryJobStore, JobStore, JobStoreError};
