use std::time::Duration;

use jobwatch_api::config::{ServerConfig, ServiceMode};
use jobwatch_auth::Credentials;
use jobwatch_core::JobSettings;
use reqwest::StatusCode;

const USER: &str = "admin";
const PASS: &str = "secretpassword";

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(config: ServerConfig) -> Self {
        // Same router as prod, bound to an ephemeral port.
        let app = jobwatch_api::app::build_app(&config).expect("failed to build app");
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn config(mode: ServiceMode, min: f64, max: f64, p: f64) -> ServerConfig {
    ServerConfig {
        mode,
        settings: JobSettings::from_secs(min, max, p).unwrap(),
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        random_seed: None,
    }
}

fn multi() -> ServiceMode {
    ServiceMode::Multi {
        credentials: Credentials::new(USER, PASS),
    }
}

async fn start_job(client: &reqwest::Client, base_url: &str) -> String {
    let res = client
        .post(format!("{}/start", base_url))
        .basic_auth(USER, Some(PASS))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    body["job_id"].as_str().unwrap().to_string()
}

async fn job_result(client: &reqwest::Client, base_url: &str, job_id: &str) -> String {
    let res = client
        .get(format!("{}/status/{}", base_url, job_id))
        .basic_auth(USER, Some(PASS))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    body["result"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn(config(multi(), 0.0, 0.0, 0.0)).await;

    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn auth_required_for_protected_endpoints() {
    let srv = TestServer::spawn(config(multi(), 0.0, 0.0, 0.0)).await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/start", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .get(format!("{}/status/nonexistent", srv.base_url))
        .basic_auth(USER, Some("wrong"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_job_is_404_with_valid_credentials() {
    let srv = TestServer::spawn(config(multi(), 0.0, 0.0, 0.0)).await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/status/nonexistent", srv.base_url))
        .basic_auth(USER, Some(PASS))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn session_pending_then_completed() {
    let srv = TestServer::spawn(config(multi(), 1.0, 1.0, 0.0)).await;
    let client = reqwest::Client::new();

    let job_id = start_job(&client, &srv.base_url).await;
    assert_eq!(job_result(&client, &srv.base_url, &job_id).await, "pending");

    tokio::time::sleep(Duration::from_millis(1200)).await;
    assert_eq!(job_result(&client, &srv.base_url, &job_id).await, "completed");
}

#[tokio::test]
async fn zero_delay_certain_error_is_terminal_immediately() {
    let srv = TestServer::spawn(config(multi(), 0.0, 0.0, 1.0)).await;
    let client = reqwest::Client::new();

    for _ in 0..5 {
        let job_id = start_job(&client, &srv.base_url).await;
        assert_eq!(job_result(&client, &srv.base_url, &job_id).await, "error");
    }
}

#[tokio::test]
async fn created_jobs_are_immediately_visible_to_concurrent_callers() {
    let srv = TestServer::spawn(config(multi(), 30.0, 60.0, 0.5)).await;
    let client = reqwest::Client::new();

    let tasks: Vec<_> = (0..16)
        .map(|_| {
            let client = client.clone();
            let base_url = srv.base_url.clone();
            tokio::spawn(async move {
                let job_id = start_job(&client, &base_url).await;
                // A different connection from the one that created it.
                let other = reqwest::Client::new();
                job_result(&other, &base_url, &job_id).await
            })
        })
        .collect();

    for t in tasks {
        assert_eq!(t.await.unwrap(), "pending");
    }
}

#[tokio::test]
async fn single_mode_serves_implicit_job_without_auth() {
    let srv = TestServer::spawn(config(ServiceMode::Single, 0.0, 0.0, 0.0)).await;

    let res = reqwest::get(format!("{}/status", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, serde_json::json!({ "result": "completed" }));
}
