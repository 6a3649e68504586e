use thiserror::Error;

/// Why a single status query produced no usable status.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("credentials rejected by the service")]
    Unauthorized,
    #[error("job not found")]
    NotFound,
    #[error("transport error: {0}")]
    Transport(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("unexpected HTTP status {0}")]
    UnexpectedStatus(u16),
}

impl FetchError {
    pub(crate) fn from_status(status: reqwest::StatusCode) -> Self {
        match status {
            reqwest::StatusCode::UNAUTHORIZED => FetchError::Unauthorized,
            reqwest::StatusCode::NOT_FOUND => FetchError::NotFound,
            other => FetchError::UnexpectedStatus(other.as_u16()),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            FetchError::MalformedResponse(e.to_string())
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}

/// A polling session that ended without a terminal status.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PollError {
    #[error("polling stopped: credentials rejected")]
    Unauthorized,
}
