use axum::{
    routing::{get, post},
    Router,
};

pub mod jobs;
pub mod system;

/// Single-job mode: one implicit job, no auth.
pub fn single_job_router() -> Router {
    Router::new().route("/status", get(jobs::default_status))
}

/// Multi-job mode. Callers must add the auth layer.
pub fn multi_job_router() -> Router {
    Router::new()
        .route("/start", post(jobs::start_job))
        .route("/status/:job_id", get(jobs::job_status))
}
