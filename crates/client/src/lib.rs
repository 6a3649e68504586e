//! `jobwatch-client` — polls a jobwatch service until a job finishes.
//!
//! [`PollingClient`] owns the wait loop and backoff; it talks to the service
//! through the [`StatusFetcher`] seam, which [`HttpStatusFetcher`] implements
//! over reqwest.

pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod polling;

pub use config::ClientConfig;
pub use error::{FetchError, PollError};
pub use fetch::{HttpStatusFetcher, JobClient, StatusFetcher, StatusTarget};
pub use polling::{PollObservation, PollingClient};
