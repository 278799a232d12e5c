//! Typed upstream condition sets
//!
//! Each upstream payload is parsed once at fetch time into these shapes.
//! Every measured field is optional: an absent or `null` value simply
//! leaves the matching factor unscored. Unknown keys inside `current`
//! are kept so the raw reading can be echoed back to clients.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Current fields requested from the general weather source
pub const WEATHER_CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,precipitation,precipitation_probability,weather_code,pressure_msl,wind_speed_10m,visibility";

/// Daily fields requested from the general weather source
pub const WEATHER_DAILY_FIELDS: &str = "sunrise,sunset";

/// Current fields requested from the marine source
pub const MARINE_CURRENT_FIELDS: &str =
    "wave_height,wave_direction,wind_wave_period,swell_wave_height,ocean_current_velocity";

/// General weather condition set (current + daily sun times)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WeatherConditions {
    #[serde(default)]
    pub current: Option<WeatherCurrent>,
    #[serde(default)]
    pub daily: Option<DailySun>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WeatherCurrent {
    pub temperature_2m: Option<f64>,
    pub relative_humidity_2m: Option<f64>,
    pub apparent_temperature: Option<f64>,
    /// Precipitation in mm
    pub precipitation: Option<f64>,
    pub precipitation_probability: Option<f64>,
    /// WMO code, kept as the upstream number so odd encodings don't sink the set
    pub weather_code: Option<Number>,
    pub pressure_msl: Option<f64>,
    /// Wind speed at 10 m, in the unit requested upstream (m/s by default)
    pub wind_speed_10m: Option<f64>,
    /// Visibility in meters
    pub visibility: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Daily sunrise/sunset as local ISO-8601 strings, first entry is today
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DailySun {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub sunrise: Vec<String>,
    #[serde(default)]
    pub sunset: Vec<String>,
}

/// Marine condition set
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MarineConditions {
    #[serde(default)]
    pub current: Option<MarineCurrent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MarineCurrent {
    /// Significant wave height in meters
    pub wave_height: Option<f64>,
    pub wave_direction: Option<f64>,
    pub wind_wave_period: Option<f64>,
    /// Swell wave height in meters
    pub swell_wave_height: Option<f64>,
    pub ocean_current_velocity: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WeatherConditions {
    pub fn wind_speed(&self) -> Option<f64> {
        self.current.as_ref().and_then(|c| c.wind_speed_10m)
    }

    pub fn precipitation(&self) -> Option<f64> {
        self.current.as_ref().and_then(|c| c.precipitation)
    }

    pub fn visibility(&self) -> Option<f64> {
        self.current.as_ref().and_then(|c| c.visibility)
    }

    /// Today's sunrise and sunset strings, if both are present
    pub fn sun_times(&self) -> Option<(&str, &str)> {
        let daily = self.daily.as_ref()?;
        let sunrise = daily.sunrise.first()?;
        let sunset = daily.sunset.first()?;
        Some((sunrise.as_str(), sunset.as_str()))
    }

    /// Human-readable description of the current weather code
    pub fn description(&self) -> Option<&'static str> {
        self.current
            .as_ref()
            .and_then(|c| c.weather_code.as_ref())
            .and_then(wmo_code)
            .map(weather_code_to_description)
    }
}

impl MarineConditions {
    pub fn wave_height(&self) -> Option<f64> {
        self.current.as_ref().and_then(|c| c.wave_height)
    }

    pub fn swell_height(&self) -> Option<f64> {
        self.current.as_ref().and_then(|c| c.swell_wave_height)
    }

    pub fn current_velocity(&self) -> Option<f64> {
        self.current.as_ref().and_then(|c| c.ocean_current_velocity)
    }
}

/// Convert a WMO weather code to a human-readable description
#[must_use]
/// Integral codes in `u8` range only; `3.0` counts as 3
fn wmo_code(code: &Number) -> Option<u8> {
    if let Some(code) = code.as_u64() {
        return u8::try_from(code).ok();
    }
    let code = code.as_f64()?;
    if code.fract() == 0.0 && (0.0..=f64::from(u8::MAX)).contains(&code) {
        Some(code as u8)
    } else {
        None
    }
}

pub fn weather_code_to_description(code: u8) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => "Unknown",
    }
}
