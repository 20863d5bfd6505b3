use poll_server::{config::AppConfig, routes::AppState, store::PollStore};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[rocket::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🚀 Starting poll server");

    let figment = rocket::Config::figment();
    let config = AppConfig::from_figment(&figment)?;
    let store = PollStore::open(config.storage(), &config.store_config()).map_err(|e| {
        error!("Failed to open poll store: {}", e);
        e
    })?;

    info!("📋 Poll store ready (latency {}ms)", config.simulated_latency_ms);

    let _rocket = poll_server::build(AppState::new(store)).launch().await?;
    Ok(())
}
