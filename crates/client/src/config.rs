//! Client configuration: environment (and `.env`) first, CLI flags on top.

use std::time::Duration;

use jobwatch_auth::Credentials;
use jobwatch_core::config::{optional_env, parse_flag, parse_or};
use jobwatch_core::{BackoffPolicy, ConfigError};

use crate::cli::ConnectionArgs;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub credentials: Option<Credentials>,
    pub policy: BackoffPolicy,
    /// Per-request timeout, independent of the backoff interval.
    pub request_timeout: Duration,
    pub fail_fast_unauthorized: bool,
}

impl ClientConfig {
    pub const DEFAULT_URL: &'static str = "http://127.0.0.1:8000";
    pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(3);

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(optional_env)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = BackoffPolicy::default();
        let initial: f64 = parse_or(
            "INITIAL_INTERVAL",
            lookup("INITIAL_INTERVAL"),
            defaults.initial_interval().as_secs_f64(),
        )?;
        let max: f64 = parse_or(
            "MAX_INTERVAL",
            lookup("MAX_INTERVAL"),
            defaults.max_interval().as_secs_f64(),
        )?;
        let timeout: f64 = parse_or(
            "REQUEST_TIMEOUT",
            lookup("REQUEST_TIMEOUT"),
            Self::DEFAULT_REQUEST_TIMEOUT.as_secs_f64(),
        )?;

        let fail_fast_unauthorized = lookup("FAIL_FAST_UNAUTHORIZED")
            .map(|raw| parse_flag("FAIL_FAST_UNAUTHORIZED", &raw))
            .transpose()?
            .unwrap_or(false);

        Ok(Self {
            base_url: lookup("JOBWATCH_URL").unwrap_or_else(|| Self::DEFAULT_URL.to_string()),
            credentials: credentials(lookup("API_USERNAME"), lookup("API_PASSWORD"))?,
            policy: BackoffPolicy::from_secs(initial, max)?,
            request_timeout: timeout_from_secs("REQUEST_TIMEOUT", timeout)?,
            fail_fast_unauthorized,
        })
    }

    /// Apply command-line flags over the environment-derived values.
    pub fn with_overrides(mut self, args: &ConnectionArgs) -> Result<Self, ConfigError> {
        if let Some(url) = &args.url {
            self.base_url = url.clone();
        }

        let username = args
            .username
            .clone()
            .or_else(|| self.credentials.as_ref().map(|c| c.username().to_string()));
        let password = args
            .password
            .clone()
            .or_else(|| self.credentials.as_ref().map(|c| c.password().to_string()));
        self.credentials = credentials(username, password)?;

        if args.initial_interval.is_some() || args.max_interval.is_some() {
            self.policy = BackoffPolicy::from_secs(
                args.initial_interval
                    .unwrap_or(self.policy.initial_interval().as_secs_f64()),
                args.max_interval
                    .unwrap_or(self.policy.max_interval().as_secs_f64()),
            )?;
        }
        if let Some(secs) = args.request_timeout {
            self.request_timeout = timeout_from_secs("--request-timeout", secs)?;
        }
        if args.fail_fast_unauthorized {
            self.fail_fast_unauthorized = true;
        }
        Ok(self)
    }
}

/// Username and password come as a pair or not at all.
fn credentials(
    username: Option<String>,
    password: Option<String>,
) -> Result<Option<Credentials>, ConfigError> {
    match (username, password) {
        (Some(u), Some(p)) => Ok(Some(Credentials::new(u, p))),
        (None, None) => Ok(None),
        (Some(_), None) => Err(ConfigError::Missing("API_PASSWORD".to_string())),
        (None, Some(_)) => Err(ConfigError::Missing("API_USERNAME".to_string())),
    }
}

fn timeout_from_secs(key: &str, secs: f64) -> Result<Duration, ConfigError> {
    match Duration::try_from_secs_f64(secs) {
        Ok(d) if !d.is_zero() => Ok(d),
        Ok(_) => Err(ConfigError::invalid(key, "must be greater than zero")),
        Err(e) => Err(ConfigError::invalid(key, e.to_string())),
    }
}
