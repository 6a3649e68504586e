use clap::{Args, Parser, Subcommand};

use jobwatch_core::JobId;

/// Start jobs on a jobwatch service and wait for them to finish.
#[derive(Debug, Parser)]
#[command(name = "jobwatch-client", version)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start a job and wait for its final status.
    Run,
    /// Start a job and print its id.
    Start,
    /// Wait for an existing job.
    Wait {
        job_id: JobId,
    },
    /// Wait for the implicit job of a single-job service.
    WaitDefault,
}

/// Flags that override the environment. Unset flags leave it untouched.
#[derive(Debug, Default, Args)]
pub struct ConnectionArgs {
    /// Service base URL [env: JOBWATCH_URL]
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// [env: API_USERNAME]
    #[arg(long, global = true)]
    pub username: Option<String>,

    /// [env: API_PASSWORD]
    #[arg(long, global = true)]
    pub password: Option<String>,

    /// First wait between polls, in seconds [env: INITIAL_INTERVAL]
    #[arg(long, global = true)]
    pub initial_interval: Option<f64>,

    /// Upper bound on the wait between polls, in seconds [env: MAX_INTERVAL]
    #[arg(long, global = true)]
    pub max_interval: Option<f64>,

    /// Per-request timeout, in seconds [env: REQUEST_TIMEOUT]
    #[arg(long, global = true)]
    pub request_timeout: Option<f64>,

    /// Stop on the first 401 instead of retrying [env: FAIL_FAST_UNAUTHORIZED]
    #[arg(long, global = true)]
    pub fail_fast_unauthorized: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wait_with_flags() {
        let cli = Cli::try_parse_from([
            "jobwatch-client",
            "wait",
            "7f2c1d2e-5a0b-4d8e-9c1f-2b3a4c5d6e7f",
            "--max-interval",
            "4",
            "--fail-fast-unauthorized",
        ])
        .unwrap();

        assert!(matches!(cli.command, Command::Wait { .. }));
        assert_eq!(cli.connection.max_interval, Some(4.0));
        assert!(cli.connection.fail_fast_unauthorized);
        assert_eq!(cli.connection.url, None);
    }

    #[test]
    fn rejects_malformed_job_id() {
        assert!(Cli::try_parse_from(["jobwatch-client", "wait", "nonexistent"]).is_err());
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["jobwatch-client"]).is_err());
        assert!(matches!(
            Cli::try_parse_from(["jobwatch-client", "wait-default"]).unwrap().command,
            Command::WaitDefault
        ));
    }
}
