//! Server configuration, read from the environment (and `.env`).

use std::net::SocketAddr;

use jobwatch_auth::Credentials;
use jobwatch_core::config::{optional_env, parse_or, require};
use jobwatch_core::{ConfigError, JobSettings};

/// Which protocol variant the service speaks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceMode {
    /// `GET /status` for one implicit job created at startup; no auth.
    Single,
    /// `POST /start` + `GET /status/:job_id`, both behind HTTP Basic auth.
    Multi { credentials: Credentials },
}

impl ServiceMode {
    pub fn name(&self) -> &'static str {
        match self {
            ServiceMode::Single => "single",
            ServiceMode::Multi { .. } => "multi",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub mode: ServiceMode,
    pub settings: JobSettings,
    pub bind_addr: SocketAddr,
    /// Seed for reproducible delay/outcome draws; OS entropy when unset.
    pub random_seed: Option<u64>,
}

impl ServerConfig {
    pub const DEFAULT_BIND_ADDR: &'static str = "127.0.0.1:8000";

    /// Load from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(optional_env)
    }

    /// Load using an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let min_delay: f64 = parse_or("MIN_DELAY", lookup("MIN_DELAY"), 5.0)?;
        let max_delay: f64 = parse_or("MAX_DELAY", lookup("MAX_DELAY"), 15.0)?;
        let error_probability: f64 =
            parse_or("ERROR_PROBABILITY", lookup("ERROR_PROBABILITY"), 0.2)?;
        let settings = JobSettings::from_secs(min_delay, max_delay, error_probability)?;

        let mode = match lookup("SERVER_MODE")
            .map(|m| m.trim().to_ascii_lowercase())
            .as_deref()
        {
            None | Some("multi") => ServiceMode::Multi {
                credentials: Credentials::new(
                    require("API_USERNAME", lookup("API_USERNAME"))?,
                    require("API_PASSWORD", lookup("API_PASSWORD"))?,
                ),
            },
            Some("single") => ServiceMode::Single,
            Some(other) => {
                return Err(ConfigError::invalid(
                    "SERVER_MODE",
                    format!("expected 'single' or 'multi', got {other:?}"),
                ));
            }
        };

        let bind_addr = parse_or(
            "BIND_ADDR",
            lookup("BIND_ADDR"),
            SocketAddr::from(([127, 0, 0, 1], 8000)),
        )?;
        let random_seed = lookup("RANDOM_SEED")
            .map(|raw| jobwatch_core::config::parse_value("RANDOM_SEED", &raw))
            .transpose()?;

        Ok(Self {
            mode,
            settings,
            bind_addr,
            random_seed,
        })
    }
}
