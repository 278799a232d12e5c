//! HTTP API for fishing alerts

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{FishingAlertService, SeaGuardError, VERSION, weather::ConditionsProvider};

#[derive(Debug, Deserialize)]
pub struct AlertQuery {
    pub lat: f64,
    pub lon: f64,
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

pub fn router<P>(service: Arc<FishingAlertService<P>>) -> Router
where
    P: ConditionsProvider + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/fishing-alert", get(fishing_alert::<P>))
        .with_state(service)
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "Welcome to SeaGuard. Use /fishing-alert?lat=..&lon=.. for alerts." }))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: VERSION.to_string(),
    })
}

/// Reject coordinates outside the valid lat/lon ranges
pub fn validate_coordinates(lat: f64, lon: f64) -> crate::Result<()> {
    if !(-90.0..=90.0).contains(&lat) {
        return Err(SeaGuardError::validation(format!(
            "Latitude must be between -90 and 90, got: {lat}"
        )));
    }

    if !(-180.0..=180.0).contains(&lon) {
        return Err(SeaGuardError::validation(format!(
            "Longitude must be between -180 and 180, got: {lon}"
        )));
    }

    Ok(())
}

/// ERROR decisions map to 503, SAFE/UNSAFE to 200
async fn fishing_alert<P>(
    State(service): State<Arc<FishingAlertService<P>>>,
    Query(query): Query<AlertQuery>,
) -> Result<Response, SeaGuardError>
where
    P: ConditionsProvider + Send + Sync + 'static,
{
    validate_coordinates(query.lat, query.lon)?;

    let decision = service
        .evaluate(query.lat, query.lon, query.name.as_deref())
        .await;

    if decision.status.is_error() {
        let body = Json(json!({ "detail": decision.message }));
        return Ok((StatusCode::SERVICE_UNAVAILABLE, body).into_response());
    }

    Ok(Json(decision).into_response())
}
