//! Open-Meteo forecast and marine API client
//!
//! Each read is a single attempt bounded by its own timeout. Transport
//! errors, timeouts, non-success statuses and undecodable bodies are
//! logged and turned into an empty condition set.

use std::time::{Duration, Instant};

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::config::UpstreamConfig;
use crate::models::conditions::{
    MARINE_CURRENT_FIELDS, WEATHER_CURRENT_FIELDS, WEATHER_DAILY_FIELDS,
};
use crate::models::{Coordinate, MarineConditions, WeatherConditions};

use super::ConditionsProvider;

const SLOW_RESPONSE: Duration = Duration::from_secs(5);

/// Client for both Open-Meteo endpoints. The underlying `reqwest::Client`
/// is owned by the caller and shared for connection reuse.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: Client,
    forecast_url: String,
    marine_url: String,
    timezone: String,
    wind_speed_unit: String,
    timeout: Duration,
}

impl OpenMeteoClient {
    #[must_use]
    pub fn new(client: Client, config: &UpstreamConfig) -> Self {
        Self {
            client,
            forecast_url: config.forecast_url.clone(),
            marine_url: config.marine_url.clone(),
            timezone: config.timezone.clone(),
            wind_speed_unit: config.wind_speed_unit.clone(),
            timeout: config.timeout(),
        }
    }

    /// Build the shared HTTP client used by the service
    pub fn http_client() -> reqwest::Result<Client> {
        Client::builder()
            .user_agent(concat!("SeaGuard/", env!("CARGO_PKG_VERSION")))
            .build()
    }

    fn base_params(&self, coordinate: Coordinate) -> Vec<(&'static str, String)> {
        vec![
            ("latitude", coordinate.latitude.to_string()),
            ("longitude", coordinate.longitude.to_string()),
            ("timezone", self.timezone.clone()),
        ]
    }

    /// Issue one GET and decode the body, or fall back to `T::default()`
    async fn fetch_or_empty<T: DeserializeOwned + Default>(
        &self,
        source: &'static str,
        url: &str,
        params: &[(&'static str, String)],
    ) -> T {
        let start = Instant::now();
        match self.fetch(url, params).await {
            Ok(value) => {
                let elapsed = start.elapsed();
                if elapsed > SLOW_RESPONSE {
                    warn!(source, "Slow upstream response: {:.3}s", elapsed.as_secs_f64());
                } else {
                    debug!(source, "Upstream response in {:.3}s", elapsed.as_secs_f64());
                }
                value
            }
            Err(e) if e.is_timeout() => {
                warn!(source, "Upstream request timed out after {:?}", self.timeout);
                T::default()
            }
            Err(e) => {
                warn!(source, "Upstream request failed: {}", e);
                T::default()
            }
        }
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&'static str, String)],
    ) -> reqwest::Result<T> {
        self.client
            .get(url)
            .query(params)
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?
            .json::<T>()
            .await
    }
}

impl ConditionsProvider for OpenMeteoClient {
    #[instrument(skip(self), fields(lat = coordinate.latitude, lon = coordinate.longitude))]
    async fn fetch_weather(&self, coordinate: Coordinate) -> WeatherConditions {
        let mut params = self.base_params(coordinate);
        params.push(("current", WEATHER_CURRENT_FIELDS.to_string()));
        params.push(("daily", WEATHER_DAILY_FIELDS.to_string()));
        params.push(("wind_speed_unit", self.wind_speed_unit.clone()));

        self.fetch_or_empty("weather", &self.forecast_url, &params).await
    }

    #[instrument(skip(self), fields(lat = coordinate.latitude, lon = coordinate.longitude))]
    async fn fetch_marine(&self, coordinate: Coordinate) -> MarineConditions {
        let mut params = self.base_params(coordinate);
        params.push(("current", MARINE_CURRENT_FIELDS.to_string()));

        self.fetch_or_empty("marine", &self.marine_url, &params).await
    }
}
