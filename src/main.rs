use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use seaguard::{FishingAlertService, OpenMeteoClient, SeaGuardConfig, logging, web};

#[tokio::main]
async fn main() -> Result<()> {
    // optional first argument: path to a TOML config file
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = SeaGuardConfig::load_from_path(config_path)?;

    logging::init(&config.logging)?;
    tracing::info!("Starting SeaGuard {}", seaguard::VERSION);
    tracing::info!(
        "Upstream timezone {}, timeout {}s",
        config.upstream.timezone,
        config.upstream.timeout_seconds
    );

    let http = OpenMeteoClient::http_client().context("Failed to create HTTP client")?;
    let provider = OpenMeteoClient::new(http, &config.upstream);
    let service = Arc::new(FishingAlertService::new(provider, config.alert_settings()?));

    web::run(config.server.port, service).await
}
