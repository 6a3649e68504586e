//! HTTP access to the job service.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use jobwatch_auth::Credentials;
use jobwatch_core::{JobId, JobStatus};

use crate::config::ClientConfig;
use crate::error::FetchError;

/// One status query against whatever the session is watching.
#[async_trait]
pub trait StatusFetcher: Send + Sync {
    async fn fetch_status(&self) -> Result<JobStatus, FetchError>;
}

/// Which job a status query names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTarget {
    /// The implicit job of a single-job service (`GET /status`).
    Default,
    /// `GET /status/{id}`.
    Job(JobId),
}

impl StatusTarget {
    fn path(&self) -> String {
        match self {
            StatusTarget::Default => "/status".to_string(),
            StatusTarget::Job(id) => format!("/status/{id}"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct StatusBody {
    result: JobStatus,
}

#[derive(Debug, Deserialize)]
struct StartBody {
    job_id: String,
}

/// reqwest-backed client for the job service.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct JobClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Option<Credentials>,
}

impl JobClient {
    pub fn new(
        base_url: impl Into<String>,
        request_timeout: Duration,
        credentials: Option<Credentials>,
    ) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            http,
            base_url,
            credentials,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, FetchError> {
        Self::new(
            config.base_url.clone(),
            config.request_timeout,
            config.credentials.clone(),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.credentials {
            Some(c) => req.basic_auth(c.username(), Some(c.password())),
            None => req,
        }
    }

    /// `POST /start`; returns the new job's id.
    pub async fn start_job(&self) -> Result<JobId, FetchError> {
        let url = format!("{}/start", self.base_url);
        let resp = self.authorize(self.http.post(&url)).send().await?;
        if !resp.status().is_success() {
            return Err(FetchError::from_status(resp.status()));
        }

        let body: StartBody = resp.json().await?;
        let job_id = body
            .job_id
            .parse::<JobId>()
            .map_err(|e| FetchError::MalformedResponse(e.to_string()))?;
        tracing::info!(job_id = %job_id, "started job");
        Ok(job_id)
    }

    /// A single status query for `target`.
    pub async fn status(&self, target: StatusTarget) -> Result<JobStatus, FetchError> {
        let url = format!("{}{}", self.base_url, target.path());
        let resp = self.authorize(self.http.get(&url)).send().await?;
        if !resp.status().is_success() {
            return Err(FetchError::from_status(resp.status()));
        }

        let text = resp.text().await?;
        serde_json::from_str::<StatusBody>(&text)
            .map(|body| body.result)
            .map_err(|e| FetchError::MalformedResponse(format!("{e}: {text}")))
    }

    /// Bind this client to one target so it can drive a polling session.
    pub fn watch(&self, target: StatusTarget) -> HttpStatusFetcher {
        HttpStatusFetcher {
            client: self.clone(),
            target,
        }
    }
}

/// [`StatusFetcher`] over HTTP for a fixed target.
#[derive(Debug, Clone)]
pub struct HttpStatusFetcher {
    client: JobClient,
    target: StatusTarget,
}

impl HttpStatusFetcher {
    pub fn target(&self) -> StatusTarget {
        self.target
    }
}

#[async_trait]
impl StatusFetcher for HttpStatusFetcher {
    async fn fetch_status(&self) -> Result<JobStatus, FetchError> {
        self.client.status(self.target).await
    }
}
