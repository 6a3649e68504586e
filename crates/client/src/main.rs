use anyhow::Context;
use clap::Parser;

use jobwatch_client::cli::{Cli, Command};
use jobwatch_client::{ClientConfig, JobClient, PollingClient, StatusTarget};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    jobwatch_core::config::load_dotenv();
    jobwatch_observability::init();

    let cli = Cli::parse();
    let config = ClientConfig::from_env()
        .and_then(|c| c.with_overrides(&cli.connection))
        .context("invalid client configuration")?;
    let client = JobClient::from_config(&config).context("failed to build HTTP client")?;

    let target = match cli.command {
        Command::Start => {
            let job_id = client.start_job().await.context("failed to start job")?;
            println!("{job_id}");
            return Ok(());
        }
        Command::Run => StatusTarget::Job(client.start_job().await.context("failed to start job")?),
        Command::Wait { job_id } => StatusTarget::Job(job_id),
        Command::WaitDefault => StatusTarget::Default,
    };

    tracing::info!(url = %client.base_url(), ?target, "waiting for job");
    let outcome = PollingClient::new(client.watch(target), config.policy)
        .fail_fast_unauthorized(config.fail_fast_unauthorized)
        .wait_for_completion()
        .await?;

    println!("{outcome}");
    Ok(())
}
