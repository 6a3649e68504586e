use serde::{Deserialize, Serialize};

use jobwatch_core::{JobId, JobStatus};

// -------------------------
// Response DTOs
// -------------------------

/// `{"result": "pending" | "completed" | "error"}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub result: JobStatus,
}

/// `{"job_id": "<uuid>"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartResponse {
    pub job_id: String,
}

impl From<JobId> for StartResponse {
    fn from(id: JobId) -> Self {
        Self {
            job_id: id.to_string(),
        }
    }
}
