//! `jobwatch-core` — job lifecycle building blocks.
//!
//! This crate holds the **pure** pieces of the protocol: identifiers, the job
//! record and its derived status, the injectable clock and random source, and
//! the client backoff policy. No HTTP or storage concerns live here.

pub mod backoff;
pub mod clock;
pub mod config;
pub mod error;
pub mod id;
pub mod job;
pub mod random;

pub use backoff::BackoffPolicy;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::ConfigError;
pub use error::{DomainError, DomainResult};
pub use id::JobId;
pub use job::{Job, JobOutcome, JobSettings, JobStatus};
pub use random::{FixedDraws, RandomSource, SeededRandom, ThreadRandom};
