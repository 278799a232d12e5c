//! Fishing safety alerts
//!
//! This module turns one coordinate into one stateless decision:
//! - Concurrent fetch of general weather and marine conditions
//! - Day/night determination from sunrise/sunset
//! - Per-factor safety scoring against the threshold table
//! - Aggregation with the daylight gate
//! - Decision assembly, with a degraded ERROR decision on failure

pub mod daylight;
pub mod factors;
pub mod verdict;

use std::panic::AssertUnwindSafe;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use futures::FutureExt;
use tracing::{debug, error, info, instrument};

use crate::models::{
    AlertData, AlertDecision, AlertStatus, Coordinate, MarineConditions, TimeOfDay,
    WeatherConditions,
};
use crate::weather::ConditionsProvider;
use crate::{Result, SeaGuardError};

pub use factors::{Factor, FactorThreshold, FactorThresholds, ScoringPolicy};
pub use verdict::Verdict;

pub const ADVICE_ERROR: &str = "Cannot assess - stay safe";

/// Immutable evaluation settings supplied at construction
#[derive(Debug, Clone, PartialEq)]
pub struct AlertSettings {
    /// Zone for timestamps and daylight comparisons
    pub timezone: Tz,
    pub thresholds: FactorThresholds,
    /// Composite probability needed for SAFE
    pub safe_probability: f64,
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::Asia::Kolkata,
            thresholds: FactorThresholds::default(),
            safe_probability: 75.0,
        }
    }
}

/// Evaluates fishing safety for a coordinate using a condition provider
pub struct FishingAlertService<P> {
    provider: P,
    settings: AlertSettings,
}

impl<P: ConditionsProvider + Sync> FishingAlertService<P> {
    pub fn new(provider: P, settings: AlertSettings) -> Self {
        Self { provider, settings }
    }

    /// Produce exactly one decision. Never fails: any error or panic during
    /// evaluation becomes an ERROR decision.
    #[instrument(skip(self), fields(lat = latitude, lon = longitude))]
    pub async fn evaluate(
        &self,
        latitude: f64,
        longitude: f64,
        location_name: Option<&str>,
    ) -> AlertDecision {
        let coordinate = Coordinate::new(latitude, longitude);
        let location = coordinate.label(location_name);

        let outcome = AssertUnwindSafe(self.assess(coordinate, location.clone()))
            .catch_unwind()
            .await;

        match outcome {
            Ok(Ok(decision)) => {
                info!(
                    status = ?decision.status,
                    probability = decision.risk_probability,
                    time_of_day = ?decision.time_of_day,
                    "Fishing alert evaluated"
                );
                decision
            }
            Ok(Err(e)) => {
                error!("Evaluation failed: {}", e);
                self.error_decision(&e.to_string(), location)
            }
            Err(panic) => {
                let reason = panic
                    .downcast_ref::<&str>()
                    .map(|s| (*s).to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unexpected failure".to_string());
                error!("Evaluation panicked: {}", reason);
                self.error_decision(&reason, location)
            }
        }
    }

    async fn assess(&self, coordinate: Coordinate, location: String) -> Result<AlertDecision> {
        // join, not select: both branches always complete
        let (weather, marine) = tokio::join!(
            self.provider.fetch_weather(coordinate),
            self.provider.fetch_marine(coordinate),
        );

        debug!(marine = ?marine.current, "Marine data");
        self.decide(weather, marine, location, self.now())
    }

    /// Score, aggregate and assemble a decision from fetched condition sets
    pub fn decide(
        &self,
        weather: WeatherConditions,
        marine: MarineConditions,
        location: String,
        now: DateTime<Tz>,
    ) -> Result<AlertDecision> {
        let is_day = daylight::is_daytime(&weather, now);
        let factors = factors::score_all(&self.settings.thresholds, &weather, &marine, is_day);
        let verdict = verdict::aggregate(&factors, is_day, self.settings.safe_probability);

        if !verdict.average.is_finite() {
            return Err(SeaGuardError::evaluation(format!(
                "composite probability is not finite: {}",
                verdict.average
            )));
        }

        let conditions = weather.description().map(str::to_string);
        Ok(AlertDecision {
            safe: verdict.safe,
            status: verdict.status,
            message: verdict.message,
            advice: verdict.advice.to_string(),
            risk_probability: verdict.average,
            location,
            time: format_time(now),
            time_of_day: TimeOfDay::from_daylight(is_day),
            data: Some(AlertData {
                weather: weather.current,
                marine: marine.current,
                factors,
                conditions,
            }),
        })
    }

    fn error_decision(&self, failure: &str, location: String) -> AlertDecision {
        AlertDecision {
            safe: false,
            status: AlertStatus::Error,
            message: format!("Data unavailable: {failure}"),
            advice: ADVICE_ERROR.to_string(),
            risk_probability: 0.0,
            location,
            time: format_time(self.now()),
            time_of_day: TimeOfDay::Unknown,
            data: None,
        }
    }

    fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.settings.timezone)
    }
}

/// e.g. `15-01-2025 10:15 IST`
fn format_time(now: DateTime<Tz>) -> String {
    now.format("%d-%m-%Y %H:%M %Z").to_string()
}
