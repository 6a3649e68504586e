use anyhow::Context;

use jobwatch_api::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    jobwatch_core::config::load_dotenv();
    jobwatch_observability::init();

    let config = ServerConfig::from_env().context("invalid server configuration")?;
    let app = jobwatch_api::app::build_app(&config).context("failed to build job service")?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(
        mode = config.mode.name(),
        min_delay_ms = config.settings.min_delay().as_millis() as u64,
        max_delay_ms = config.settings.max_delay().as_millis() as u64,
        error_probability = config.settings.error_probability(),
        "listening on {}",
        listener.local_addr()?
    );

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
