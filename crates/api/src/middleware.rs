use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use tracing::warn;

use jobwatch_auth::{parse_basic_auth_header, AuthError, AuthGate, Credentials};

use crate::app::errors;

#[derive(Clone)]
pub struct AuthState {
    pub gate: Arc<AuthGate>,
}

impl AuthState {
    pub fn new(expected: Credentials) -> Self {
        Self {
            gate: Arc::new(AuthGate::new(expected)),
        }
    }
}

/// Rejects the request with 401 unless it carries the configured Basic
/// credentials. Runs before any handler touches the job store.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    req: Request,
    next: Next,
) -> Response {
    let checked = extract_basic(req.headers()).and_then(|presented| state.gate.check(&presented));

    if let Err(e) = checked {
        // Same log line and response whether the header, username or
        // password was at fault.
        warn!(method = %req.method(), path = %req.uri().path(), "rejected request: {}", AuthError::Unauthorized);
        tracing::debug!("auth failure detail: {e}");
        return errors::unauthorized();
    }

    next.run(req).await
}

fn extract_basic(headers: &HeaderMap) -> Result<Credentials, AuthError> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(AuthError::Unauthorized)?;

    let header = header
        .to_str()
        .map_err(|_| AuthError::MalformedAuthorization("non-ASCII header".to_string()))?;

    parse_basic_auth_header(header.trim())
}
