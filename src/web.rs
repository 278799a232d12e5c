use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::{FishingAlertService, api, weather::ConditionsProvider};

pub fn app<P>(service: Arc<FishingAlertService<P>>) -> Router
where
    P: ConditionsProvider + Send + Sync + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    api::router(service).layer(cors)
}

pub async fn run<P>(port: u16, service: Arc<FishingAlertService<P>>) -> Result<()>
where
    P: ConditionsProvider + Send + Sync + 'static,
{
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://localhost:{}", port);
    axum::serve(listener, app(service))
        .await
        .context("Web server stopped unexpectedly")
}
