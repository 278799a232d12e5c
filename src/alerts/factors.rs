//! Factor threshold table and per-factor safety scoring
//!
//! Six fixed factors are scored independently. Each one reads a single
//! value from its source condition set and maps it onto a 0-100 safety
//! probability relative to its limit.

use serde::{Deserialize, Serialize};

use crate::models::{FactorScore, MarineConditions, WeatherConditions};

/// How a measured value relates to safety
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ScoringPolicy {
    /// 0 at or above the limit, 100 at zero
    LowerIsBetter,
    /// 100 at or above the limit, 0 at zero
    HigherIsBetter,
}

/// Scored factors, in evaluation and display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Factor {
    Wind,
    Rain,
    Visibility,
    Wave,
    Swell,
    Current,
}

impl Factor {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Factor::Wind => "Wind",
            Factor::Rain => "Rain",
            Factor::Visibility => "Visibility",
            Factor::Wave => "Wave",
            Factor::Swell => "Swell",
            Factor::Current => "Current",
        }
    }

    /// Read this factor's value from the condition sets
    #[must_use]
    pub fn read(self, weather: &WeatherConditions, marine: &MarineConditions) -> Option<f64> {
        match self {
            Factor::Wind => weather.wind_speed(),
            Factor::Rain => weather.precipitation(),
            Factor::Visibility => weather.visibility(),
            Factor::Wave => marine.wave_height(),
            Factor::Swell => marine.swell_height(),
            Factor::Current => marine.current_velocity(),
        }
    }
}

/// Static limit for one factor
#[derive(Debug, Clone, PartialEq)]
pub struct FactorThreshold {
    pub factor: Factor,
    pub unit: &'static str,
    /// Daytime limit (or the only limit)
    pub limit: f64,
    /// Limit applied at night, when it differs from the day limit
    pub night_limit: Option<f64>,
    pub policy: ScoringPolicy,
}

impl FactorThreshold {
    fn lower_is_better(factor: Factor, unit: &'static str, limit: f64) -> Self {
        Self {
            factor,
            unit,
            limit,
            night_limit: None,
            policy: ScoringPolicy::LowerIsBetter,
        }
    }

    /// Limit in effect for the given time of day
    #[must_use]
    pub fn limit_for(&self, is_day: bool) -> f64 {
        if is_day {
            self.limit
        } else {
            self.night_limit.unwrap_or(self.limit)
        }
    }
}

/// The six-entry threshold table, immutable for the process lifetime
#[derive(Debug, Clone, PartialEq)]
pub struct FactorThresholds {
    entries: [FactorThreshold; 6],
}

impl FactorThresholds {
    #[must_use]
    pub fn new(
        wind_ms: f64,
        rain_mm: f64,
        visibility_m: f64,
        visibility_m_night: f64,
        wave_m: f64,
        swell_m: f64,
        current_ms: f64,
    ) -> Self {
        let lower = FactorThreshold::lower_is_better;
        Self {
            entries: [
                lower(Factor::Wind, "m/s", wind_ms),
                lower(Factor::Rain, "mm", rain_mm),
                FactorThreshold {
                    factor: Factor::Visibility,
                    unit: "m",
                    limit: visibility_m,
                    night_limit: Some(visibility_m_night),
                    policy: ScoringPolicy::HigherIsBetter,
                },
                lower(Factor::Wave, "m", wave_m),
                lower(Factor::Swell, "m", swell_m),
                lower(Factor::Current, "m/s", current_ms),
            ],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &FactorThreshold> {
        self.entries.iter()
    }

    #[must_use]
    pub fn get(&self, factor: Factor) -> &FactorThreshold {
        // entries are laid out in declaration order
        &self.entries[factor as usize]
    }
}

impl Default for FactorThresholds {
    fn default() -> Self {
        Self::new(12.0, 10.0, 1000.0, 5000.0, 2.5, 2.0, 1.0)
    }
}

/// Map a value onto [0, 100] under the given policy
#[must_use]
pub fn probability(value: f64, limit: f64, policy: ScoringPolicy) -> f64 {
    let ratio = (value / limit) * 100.0;
    let score = match policy {
        ScoringPolicy::LowerIsBetter => 100.0 - ratio,
        ScoringPolicy::HigherIsBetter => ratio,
    };
    round2(score.clamp(0.0, 100.0))
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Score one factor. A missing value yields a null probability.
#[must_use]
pub fn score_factor(threshold: &FactorThreshold, value: Option<f64>, is_day: bool) -> FactorScore {
    let label = threshold.factor.label();
    let Some(value) = value else {
        return FactorScore {
            factor: label.to_string(),
            probability: None,
            message: format!("{label} data unavailable"),
        };
    };

    let score = probability(value, threshold.limit_for(is_day), threshold.policy);
    FactorScore {
        factor: label.to_string(),
        probability: Some(score),
        message: format!("{label}: {value:.1} {} (Score: {score:.0}%)", threshold.unit),
    }
}

/// Score all six factors in display order
#[must_use]
pub fn score_all(
    thresholds: &FactorThresholds,
    weather: &WeatherConditions,
    marine: &MarineConditions,
    is_day: bool,
) -> Vec<FactorScore> {
    thresholds
        .iter()
        .map(|t| score_factor(t, t.factor.read(weather, marine), is_day))
        .collect()
}
