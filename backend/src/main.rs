use whatday_backend::{build_rocket, config::Config, routes::AppState};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[rocket::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🚀 Starting What Day server");

    let config = Config::from_env().map_err(|e| {
        error!("Configuration error: {}", e);
        e
    })?;
    let state = AppState::from_config(&config).await?;
    info!(database = %config.database_url, api = %config.twitter_api_url, "📋 State ready");

    let _rocket = build_rocket(state).launch().await?;
    Ok(())
}
