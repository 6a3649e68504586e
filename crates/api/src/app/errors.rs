use axum::http::{header, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use serde_json::json;

use jobwatch_infra::JobStoreError;

pub fn store_error_to_response(err: JobStoreError) -> axum::response::Response {
    match err {
        JobStoreError::NotFound(_) => not_found(),
        JobStoreError::AlreadyExists(id) => json_error(
            StatusCode::CONFLICT,
            "conflict",
            format!("job already exists: {id}"),
        ),
        JobStoreError::Storage(msg) => {
            tracing::error!("job store failure: {msg}");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", msg)
        }
    }
}

pub fn not_found() -> axum::response::Response {
    json_error(StatusCode::NOT_FOUND, "not_found", "job not found")
}

/// 401 with a `WWW-Authenticate` challenge. The body never says which
/// credential was wrong.
pub fn unauthorized() -> axum::response::Response {
    let mut response = json_error(StatusCode::UNAUTHORIZED, "unauthorized", "invalid credentials");
    response.headers_mut().insert(
        header::WWW_AUTHENTICATE,
        HeaderValue::from_static("Basic realm=\"jobwatch\""),
    );
    response
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
