use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use jobwatch_core::JobId;

use crate::app::dto::{StartResponse, StatusResponse};
use crate::app::{errors, services::AppServices};

/// POST /start
pub async fn start_job(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.scheduler.create_job() {
        Ok(id) => (StatusCode::OK, Json(StartResponse::from(id))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// GET /status/:job_id
///
/// Identifiers that do not parse cannot name a job, so they are 404 as well.
pub async fn job_status(
    Extension(services): Extension<Arc<AppServices>>,
    Path(job_id): Path<String>,
) -> axum::response::Response {
    let Ok(job_id) = job_id.parse::<JobId>() else {
        tracing::debug!(job_id = %job_id, "status requested for malformed job id");
        return errors::not_found();
    };
    status_response(&services, job_id)
}

/// GET /status (single-job mode)
pub async fn default_status(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.default_job() {
        Some(job_id) => status_response(&services, job_id),
        None => errors::json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "no_default_job",
            "service started without a default job",
        ),
    }
}

fn status_response(services: &AppServices, job_id: JobId) -> axum::response::Response {
    match services.resolver.get_status(job_id) {
        Ok(result) => Json(StatusResponse { result }).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{header, Request};
    use tower::ServiceExt;

    use jobwatch_auth::{encode_basic_auth, Credentials};
    use jobwatch_core::{FixedDraws, JobSettings, ManualClock};

    use crate::app::router;
    use crate::config::ServiceMode;

    fn services(clock: Arc<ManualClock>, delay: Duration, error: bool) -> AppServices {
        let settings = JobSettings::new(delay, delay, if error { 1.0 } else { 0.0 }).unwrap();
        AppServices::new(clock, Arc::new(FixedDraws::new(delay, error)), settings)
    }

    fn multi_mode() -> ServiceMode {
        ServiceMode::Multi {
            credentials: Credentials::new("admin", "secretpassword"),
        }
    }

    fn authorized(req: axum::http::request::Builder) -> axum::http::request::Builder {
        req.header(
            header::AUTHORIZATION,
            encode_basic_auth(&Credentials::new("admin", "secretpassword")),
        )
    }

    async fn body_json(resp: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn single_mode_default_job_goes_pending_then_terminal() {
        let clock = Arc::new(ManualClock::starting_now());
        let svc = services(clock.clone(), Duration::from_secs(1), true)
            .with_default_job()
            .unwrap();
        let app = router(Arc::new(svc), &ServiceMode::Single);

        let resp = app
            .clone()
            .oneshot(Request::get("/status").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await, serde_json::json!({ "result": "pending" }));

        clock.advance(Duration::from_millis(1200));

        let resp = app
            .oneshot(Request::get("/status").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(body_json(resp).await, serde_json::json!({ "result": "error" }));
    }

    #[tokio::test]
    async fn multi_mode_start_then_poll() {
        let clock = Arc::new(ManualClock::starting_now());
        let app = router(
            Arc::new(services(clock.clone(), Duration::from_secs(2), false)),
            &multi_mode(),
        );

        let resp = app
            .clone()
            .oneshot(authorized(Request::post("/start")).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let job_id = body_json(resp).await["job_id"].as_str().unwrap().to_string();

        let status_req = || {
            authorized(Request::get(format!("/status/{job_id}")))
                .body(Body::empty())
                .unwrap()
        };

        let resp = app.clone().oneshot(status_req()).await.unwrap();
        assert_eq!(body_json(resp).await["result"], "pending");

        clock.advance(Duration::from_secs(2));
        let resp = app.oneshot(status_req()).await.unwrap();
        assert_eq!(body_json(resp).await["result"], "completed");
    }

    #[tokio::test]
    async fn auth_is_checked_before_lookup() {
        let clock = Arc::new(ManualClock::starting_now());
        let app = router(Arc::new(services(clock, Duration::ZERO, false)), &multi_mode());
        let unknown = JobId::new();

        // Bad credentials on an unknown job: 401, not 404.
        let resp = app
            .clone()
            .oneshot(
                Request::get(format!("/status/{unknown}"))
                    .header(
                        header::AUTHORIZATION,
                        encode_basic_auth(&Credentials::new("admin", "wrong")),
                    )
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert!(resp.headers().contains_key(header::WWW_AUTHENTICATE));

        // Good credentials on the same id: 404.
        let resp = app
            .clone()
            .oneshot(
                authorized(Request::get(format!("/status/{unknown}")))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        // Malformed id with good credentials: 404.
        let resp = app
            .oneshot(
                authorized(Request::get("/status/nonexistent"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn wrong_username_and_wrong_password_look_identical() {
        let clock = Arc::new(ManualClock::starting_now());
        let app = router(Arc::new(services(clock, Duration::ZERO, false)), &multi_mode());

        let mut bodies = Vec::new();
        for creds in [
            Credentials::new("root", "secretpassword"),
            Credentials::new("admin", "nope"),
        ] {
            let resp = app
                .clone()
                .oneshot(
                    Request::post("/start")
                        .header(header::AUTHORIZATION, encode_basic_auth(&creds))
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
            bodies.push(body_json(resp).await);
        }
        assert_eq!(bodies[0], bodies[1]);
    }

    #[tokio::test]
    async fn single_mode_has_no_multi_routes() {
        let clock = Arc::new(ManualClock::starting_now());
        let svc = services(clock, Duration::ZERO, false).with_default_job().unwrap();
        let app = router(Arc::new(svc), &ServiceMode::Single);

        let resp = app
            .oneshot(Request::post("/start").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
