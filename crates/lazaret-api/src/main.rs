use lazaret_api::{routes, server, state::AppState, telemetry};
use lazaret_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration (reads .env when present)
    let config = Config::from_env()?;

    telemetry::init_telemetry()
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!("Configuration loaded and validated successfully");

    let state = AppState::from_config(config.clone()).await?;
    let router = routes::build_router(state);

    server::start_server(&config, router).await?;

    Ok(())
}
