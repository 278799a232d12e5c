//! Integration tests for SeaGuard
//!
//! A local axum server stands in for both Open-Meteo endpoints so the full
//! fetch, score and decide path runs without network access.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{Json, Router, http::StatusCode, routing::get};
use chrono::{DateTime, Utc};
use chrono_tz::{Asia::Kolkata, Tz};
use serde_json::{Value, json};

use seaguard::config::UpstreamConfig;
use seaguard::{AlertSettings, AlertStatus, FishingAlertService, OpenMeteoClient, TimeOfDay};

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn local(t: DateTime<Tz>) -> String {
    t.format("%Y-%m-%dT%H:%M").to_string()
}

fn forecast_body(sunrise: DateTime<Tz>, sunset: DateTime<Tz>) -> Value {
    json!({
        "latitude": 13.0,
        "longitude": 80.25,
        "timezone": "Asia/Kolkata",
        "current": {
            "time": local(Utc::now().with_timezone(&Kolkata)),
            "interval": 900,
            "temperature_2m": 29.4,
            "relative_humidity_2m": 71,
            "apparent_temperature": 33.0,
            "precipitation": 0.0,
            "precipitation_probability": 5,
            "weather_code": 1,
            "pressure_msl": 1011.2,
            "wind_speed_10m": 5.0,
            "visibility": 9000.0
        },
        "daily": {
            "time": [sunrise.format("%Y-%m-%d").to_string()],
            "sunrise": [local(sunrise)],
            "sunset": [local(sunset)]
        }
    })
}

fn marine_body() -> Value {
    json!({
        "current": {
            "time": local(Utc::now().with_timezone(&Kolkata)),
            "wave_height": 1.0,
            "wave_direction": 120,
            "wind_wave_period": 4.1,
            "swell_wave_height": 0.5,
            "ocean_current_velocity": 0.3
        }
    })
}

fn service_for(base: &str, timeout_seconds: u32) -> FishingAlertService<OpenMeteoClient> {
    let config = UpstreamConfig {
        forecast_url: format!("{base}/v1/forecast"),
        marine_url: format!("{base}/marine/v1/marine"),
        timeout_seconds,
        ..UpstreamConfig::default()
    };
    let client = OpenMeteoClient::new(OpenMeteoClient::http_client().unwrap(), &config);
    FishingAlertService::new(client, AlertSettings::default())
}

fn upstream(forecast: Value, marine: Value) -> Router {
    Router::new()
        .route("/v1/forecast", get(move || async move { Json(forecast) }))
        .route("/marine/v1/marine", get(move || async move { Json(marine) }))
}

/// Daylight window that always contains "now"
fn daylight_around_now() -> (DateTime<Tz>, DateTime<Tz>) {
    let now = Utc::now().with_timezone(&Kolkata);
    (now - chrono::Duration::hours(3), now + chrono::Duration::hours(3))
}

#[tokio::test]
async fn test_calm_daytime_sea_is_safe() {
    let (sunrise, sunset) = daylight_around_now();
    let base = serve(upstream(forecast_body(sunrise, sunset), marine_body())).await;
    let service = service_for(&base, 2);

    let decision = service.evaluate(13.08, 80.27, Some("Chennai")).await;

    assert_eq!(decision.status, AlertStatus::Safe);
    assert!(decision.safe);
    assert!((decision.risk_probability - 77.22).abs() < 0.01);
    assert_eq!(decision.time_of_day, TimeOfDay::Day);
    assert_eq!(decision.location, "Chennai");
    assert!(decision.time.ends_with("IST"));
    assert!(decision.message.contains("Wind: 5.0 m/s (Score: 58%)"));

    let json = serde_json::to_value(&decision).unwrap();
    assert_eq!(json["status"], "SAFE");
    assert_eq!(json["data"]["marine"]["wave_direction"], 120.0);
    assert_eq!(json["data"]["weather"]["interval"], 900);
    assert_eq!(json["data"]["factors"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_same_sea_after_sunset_is_unsafe() {
    let now = Utc::now().with_timezone(&Kolkata);
    let sunrise = now - chrono::Duration::hours(14);
    let sunset = now - chrono::Duration::hours(2);
    let base = serve(upstream(forecast_body(sunrise, sunset), marine_body())).await;
    let service = service_for(&base, 2);

    let decision = service.evaluate(13.08, 80.27, None).await;

    assert_eq!(decision.status, AlertStatus::Unsafe);
    assert!(!decision.safe);
    assert_eq!(decision.time_of_day, TimeOfDay::Night);
    assert_eq!(decision.advice, "Stay on shore");
    assert_eq!(decision.location, "13.08°N, 80.27°E");
}

#[tokio::test]
async fn test_marine_timeout_only_nulls_marine_factors() {
    let (sunrise, sunset) = daylight_around_now();
    let forecast = forecast_body(sunrise, sunset);
    let router = Router::new()
        .route("/v1/forecast", get(move || async move { Json(forecast) }))
        .route(
            "/marine/v1/marine",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                Json(marine_body())
            }),
        );
    let base = serve(router).await;
    let service = service_for(&base, 1);

    let start = Instant::now();
    let decision = service.evaluate(13.08, 80.27, None).await;
    assert!(start.elapsed() < Duration::from_secs(3));

    let data = decision.data.as_ref().unwrap();
    let nulls: Vec<_> = data
        .factors
        .iter()
        .filter(|f| f.probability.is_none())
        .map(|f| f.factor.as_str())
        .collect();
    assert_eq!(nulls, ["Wave", "Swell", "Current"]);
    assert!(data.marine.is_none());
    // mean of wind 58.33, rain 100, visibility 100
    assert!((decision.risk_probability - 86.11).abs() < 0.01);
    assert_eq!(decision.status, AlertStatus::Safe);
}

#[tokio::test]
async fn test_slow_sources_are_fetched_concurrently() {
    let (sunrise, sunset) = daylight_around_now();
    let forecast = forecast_body(sunrise, sunset);
    let delay = Duration::from_millis(1500);
    let router = Router::new()
        .route(
            "/v1/forecast",
            get(move || async move {
                tokio::time::sleep(delay).await;
                Json(forecast)
            }),
        )
        .route(
            "/marine/v1/marine",
            get(move || async move {
                tokio::time::sleep(delay).await;
                Json(marine_body())
            }),
        );
    let base = serve(router).await;
    let service = service_for(&base, 5);

    let start = Instant::now();
    let decision = service.evaluate(13.08, 80.27, None).await;
    let elapsed = start.elapsed();

    // bounded by the slower read, not the sum of both
    assert!(elapsed >= delay);
    assert!(elapsed < delay * 2, "took {elapsed:?}");
    assert_eq!(decision.status, AlertStatus::Safe);
}

#[tokio::test]
async fn test_both_sources_failing_is_unsafe_not_error() {
    let router = Router::new()
        .route("/v1/forecast", get(|| async { StatusCode::BAD_GATEWAY }))
        .route("/marine/v1/marine", get(|| async { StatusCode::BAD_GATEWAY }));
    let base = serve(router).await;
    let service = service_for(&base, 2);

    let decision = service.evaluate(13.08, 80.27, None).await;

    assert_eq!(decision.status, AlertStatus::Unsafe);
    assert_eq!(decision.risk_probability, 0.0);
    assert_eq!(decision.time_of_day, TimeOfDay::Night);
    let data = decision.data.unwrap();
    assert!(data.factors.iter().all(|f| f.probability.is_none()));
}

#[tokio::test]
async fn test_http_endpoint_maps_decision() {
    let (sunrise, sunset) = daylight_around_now();
    let upstream_base = serve(upstream(forecast_body(sunrise, sunset), marine_body())).await;
    let service = Arc::new(service_for(&upstream_base, 2));
    let app_base = serve(seaguard::web::app(service)).await;

    let client = reqwest::Client::new();
    let response = client
        .get(format!("{app_base}/fishing-alert?lat=13.08&lon=80.27&name=Chennai"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "SAFE");
    assert_eq!(body["location"], "Chennai");

    let response = client
        .get(format!("{app_base}/fishing-alert?lat=123&lon=80.27"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
}
