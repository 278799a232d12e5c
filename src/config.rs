//! Configuration management for the `SeaGuard` service
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::SeaGuardError;
use crate::alerts::{AlertSettings, FactorThresholds};
use anyhow::{Context, Result};
use chrono_tz::Tz;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure for the `SeaGuard` service
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SeaGuardConfig {
    /// Upstream weather/marine API configuration
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// Factor limits and the safe cut-off
    #[serde(default)]
    pub thresholds: ThresholdConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

/// Upstream API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// General weather forecast endpoint
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,
    /// Marine conditions endpoint
    #[serde(default = "default_marine_url")]
    pub marine_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// IANA timezone used for upstream data and daylight comparisons
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Wind speed unit requested from the forecast endpoint
    #[serde(default = "default_wind_speed_unit")]
    pub wind_speed_unit: String,
}

/// Factor limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdConfig {
    #[serde(default = "default_wind_ms")]
    pub wind_ms: f64,
    #[serde(default = "default_rain_mm")]
    pub rain_mm: f64,
    /// Minimum visibility during the day, in meters
    #[serde(default = "default_visibility_m")]
    pub visibility_m: f64,
    /// Minimum visibility at night, in meters
    #[serde(default = "default_visibility_m_night")]
    pub visibility_m_night: f64,
    #[serde(default = "default_wave_m")]
    pub wave_m: f64,
    #[serde(default = "default_swell_m")]
    pub swell_m: f64,
    #[serde(default = "default_current_ms")]
    pub current_ms: f64,
    /// Composite probability needed for a SAFE verdict
    #[serde(default = "default_safe_probability")]
    pub safe_probability: f64,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// HTTP server configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

// Default value functions
fn default_forecast_url() -> String {
    "https://api.open-meteo.com/v1/forecast".to_string()
}

fn default_marine_url() -> String {
    "https://marine-api.open-meteo.com/v1/marine".to_string()
}

fn default_timeout() -> u32 {
    8
}

fn default_timezone() -> String {
    "Asia/Kolkata".to_string()
}

fn default_wind_speed_unit() -> String {
    "ms".to_string()
}

fn default_wind_ms() -> f64 {
    12.0
}

fn default_rain_mm() -> f64 {
    10.0
}

fn default_visibility_m() -> f64 {
    1000.0
}

fn default_visibility_m_night() -> f64 {
    5000.0
}

fn default_wave_m() -> f64 {
    2.5
}

fn default_swell_m() -> f64 {
    2.0
}

fn default_current_ms() -> f64 {
    1.0
}

fn default_safe_probability() -> f64 {
    75.0
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            forecast_url: default_forecast_url(),
            marine_url: default_marine_url(),
            timeout_seconds: default_timeout(),
            timezone: default_timezone(),
            wind_speed_unit: default_wind_speed_unit(),
        }
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            wind_ms: default_wind_ms(),
            rain_mm: default_rain_mm(),
            visibility_m: default_visibility_m(),
            visibility_m_night: default_visibility_m_night(),
            wave_m: default_wave_m(),
            swell_m: default_swell_m(),
            current_ms: default_current_ms(),
            safe_probability: default_safe_probability(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

impl UpstreamConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.into())
    }
}

impl SeaGuardConfig {
    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path()
                .filter(|path| path.exists())
                .unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // SEAGUARD_UPSTREAM__TIMEOUT_SECONDS=5 overrides upstream.timeout_seconds
        builder = builder.add_source(
            Environment::with_prefix("SEAGUARD")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: SeaGuardConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("seaguard").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.upstream.forecast_url.is_empty() {
            self.upstream.forecast_url = default_forecast_url();
        }
        if self.upstream.marine_url.is_empty() {
            self.upstream.marine_url = default_marine_url();
        }
        if self.upstream.timeout_seconds == 0 {
            self.upstream.timeout_seconds = default_timeout();
        }
        if self.upstream.timezone.is_empty() {
            self.upstream.timezone = default_timezone();
        }
        if self.upstream.wind_speed_unit.is_empty() {
            self.upstream.wind_speed_unit = default_wind_speed_unit();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        self.timezone()?;
        Ok(())
    }

    /// Parse the configured timezone
    pub fn timezone(&self) -> Result<Tz> {
        self.upstream.timezone.parse::<Tz>().map_err(|_| {
            SeaGuardError::config(format!(
                "Unknown timezone '{}'. Use an IANA name such as Asia/Kolkata",
                self.upstream.timezone
            ))
            .into()
        })
    }

    /// Build the immutable settings handed to the alert service
    pub fn alert_settings(&self) -> Result<AlertSettings> {
        let t = &self.thresholds;
        Ok(AlertSettings {
            timezone: self.timezone()?,
            thresholds: FactorThresholds::new(
                t.wind_ms,
                t.rain_mm,
                t.visibility_m,
                t.visibility_m_night,
                t.wave_m,
                t.swell_m,
                t.current_ms,
            ),
            safe_probability: t.safe_probability,
        })
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.upstream.timeout_seconds > 300 {
            return Err(
                SeaGuardError::config("Upstream timeout cannot exceed 300 seconds").into(),
            );
        }

        let t = &self.thresholds;
        let limits = [
            ("wind_ms", t.wind_ms),
            ("rain_mm", t.rain_mm),
            ("visibility_m", t.visibility_m),
            ("visibility_m_night", t.visibility_m_night),
            ("wave_m", t.wave_m),
            ("swell_m", t.swell_m),
            ("current_ms", t.current_ms),
        ];
        for (name, limit) in limits {
            if !limit.is_finite() || limit <= 0.0 {
                return Err(SeaGuardError::config(format!(
                    "Threshold '{name}' must be a positive number, got {limit}"
                ))
                .into());
            }
        }

        if !(0.0..=100.0).contains(&t.safe_probability) {
            return Err(SeaGuardError::config(
                "Safe probability must be between 0 and 100",
            )
            .into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(SeaGuardError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(SeaGuardError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for url in [&self.upstream.forecast_url, &self.upstream.marine_url] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(SeaGuardError::config(format!(
                    "Upstream URL '{url}' must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}
