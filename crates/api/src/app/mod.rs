//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: scheduler/resolver wiring over one shared job store
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: response bodies
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};

use jobwatch_infra::JobStoreError;

use crate::config::{ServerConfig, ServiceMode};
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router from configuration (entrypoint used by `main.rs`).
///
/// In single-job mode this also creates the implicit job.
pub fn build_app(config: &ServerConfig) -> Result<Router, JobStoreError> {
    let services = AppServices::from_config(config)?;
    Ok(router(Arc::new(services), &config.mode))
}

/// Assemble the router for `mode` over already-built services.
pub fn router(services: Arc<AppServices>, mode: &ServiceMode) -> Router {
    let api = match mode {
        ServiceMode::Single => routes::single_job_router(),
        ServiceMode::Multi { credentials } => {
            let auth_state = middleware::AuthState::new(credentials.clone());
            routes::multi_job_router().route_layer(axum::middleware::from_fn_with_state(
                auth_state,
                middleware::auth_middleware,
            ))
        }
    };

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(api)
        .layer(Extension(services))
}
