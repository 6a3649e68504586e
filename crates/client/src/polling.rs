//! The client wait loop.
//!
//! A session moves `Idle -> Polling -> Terminal(outcome)`. Every poll that
//! does not yield a terminal status (still pending, or any fetch failure)
//! waits the current interval and then doubles it up to the policy cap.

use std::time::Duration;

use jobwatch_core::{BackoffPolicy, JobOutcome, JobStatus};

use crate::error::{FetchError, PollError};
use crate::fetch::StatusFetcher;

/// How one poll was interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollObservation {
    Terminal(JobOutcome),
    Pending,
    Failed(FetchError),
}

impl PollObservation {
    pub fn classify(result: Result<JobStatus, FetchError>) -> Self {
        match result {
            Ok(status) => match status.outcome() {
                Some(outcome) => PollObservation::Terminal(outcome),
                None => PollObservation::Pending,
            },
            Err(e) => PollObservation::Failed(e),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PollingClient<F> {
    fetcher: F,
    policy: BackoffPolicy,
    fail_fast_unauthorized: bool,
}

impl<F: StatusFetcher> PollingClient<F> {
    pub fn new(fetcher: F, policy: BackoffPolicy) -> Self {
        Self {
            fetcher,
            policy,
            fail_fast_unauthorized: false,
        }
    }

    /// End the session on the first `Unauthorized` instead of retrying it.
    pub fn fail_fast_unauthorized(mut self, enabled: bool) -> Self {
        self.fail_fast_unauthorized = enabled;
        self
    }

    pub fn policy(&self) -> BackoffPolicy {
        self.policy
    }

    /// Poll until the job reaches a terminal status.
    ///
    /// Never returns while the job stays pending or the service stays
    /// unreachable; callers wanting a deadline wrap this in
    /// `tokio::time::timeout`.
    pub async fn wait_for_completion(&self) -> Result<JobOutcome, PollError> {
        let mut interval = self.policy.initial_interval();
        let mut attempt: u64 = 0;

        loop {
            attempt += 1;
            let observation = PollObservation::classify(self.fetcher.fetch_status().await);

            match observation {
                PollObservation::Terminal(outcome) => {
                    tracing::info!(attempt, %outcome, "final status");
                    return Ok(outcome);
                }
                PollObservation::Pending => {
                    tracing::info!(
                        attempt,
                        wait_ms = millis(interval),
                        "status: pending, waiting before next check"
                    );
                }
                PollObservation::Failed(FetchError::Unauthorized) if self.fail_fast_unauthorized => {
                    tracing::error!(attempt, "credentials rejected, giving up");
                    return Err(PollError::Unauthorized);
                }
                PollObservation::Failed(e) => {
                    tracing::warn!(
                        attempt,
                        wait_ms = millis(interval),
                        error = %e,
                        "status check failed, retrying"
                    );
                }
            }

            tokio::time::sleep(interval).await;
            interval = self.policy.next(interval);
        }
    }
}

fn millis(d: Duration) -> u64 {
    d.as_millis().try_into().unwrap_or(u64::MAX)
}
