//! Decision records returned by the alert service

use serde::{Deserialize, Serialize, Serializer};

use super::conditions::{MarineCurrent, WeatherCurrent};

/// Safety probability of a single factor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FactorScore {
    /// Factor label (e.g. "Wind")
    pub factor: String,
    /// Safety probability in [0, 100], `None` when the source had no value
    pub probability: Option<f64>,
    /// Rendered message for display
    pub message: String,
}

/// Verdict status, kept distinct from `safe` so the web layer can tell
/// a degraded evaluation apart from an unsafe one
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertStatus {
    Safe,
    Unsafe,
    Error,
}

impl AlertStatus {
    #[must_use]
    pub fn is_error(self) -> bool {
        matches!(self, AlertStatus::Error)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimeOfDay {
    Day,
    Night,
    Unknown,
}

impl TimeOfDay {
    #[must_use]
    pub fn from_daylight(is_day: bool) -> Self {
        if is_day { TimeOfDay::Day } else { TimeOfDay::Night }
    }
}

/// Payload echoed to clients for display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlertData {
    /// Raw `current` block of the general weather source
    pub weather: Option<WeatherCurrent>,
    /// Raw `current` block of the marine source
    pub marine: Option<MarineCurrent>,
    pub factors: Vec<FactorScore>,
    /// Weather code description, when reported
    pub conditions: Option<String>,
}

/// The single decision produced per evaluation
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AlertDecision {
    pub safe: bool,
    pub status: AlertStatus,
    pub message: String,
    pub advice: String,
    /// Composite probability, rounded to 2 decimals
    pub risk_probability: f64,
    pub location: String,
    /// Local timestamp in the configured timezone
    pub time: String,
    pub time_of_day: TimeOfDay,
    /// `None` for ERROR decisions, serialized as an empty object
    #[serde(serialize_with = "serialize_data_or_empty")]
    pub data: Option<AlertData>,
}

fn serialize_data_or_empty<S: Serializer>(
    data: &Option<AlertData>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match data {
        Some(data) => data.serialize(serializer),
        None => serde_json::Map::new().serialize(serializer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_serialization() {
        assert_eq!(serde_json::to_value(AlertStatus::Safe).unwrap(), json!("SAFE"));
        assert_eq!(serde_json::to_value(AlertStatus::Unsafe).unwrap(), json!("UNSAFE"));
        assert_eq!(serde_json::to_value(AlertStatus::Error).unwrap(), json!("ERROR"));
        assert!(AlertStatus::Error.is_error());
        assert!(!AlertStatus::Unsafe.is_error());
    }

    #[test]
    fn test_error_decision_has_empty_data_object() {
        let decision = AlertDecision {
            safe: false,
            status: AlertStatus::Error,
            message: "Data unavailable: boom".to_string(),
            advice: "Cannot assess - stay safe".to_string(),
            risk_probability: 0.0,
            location: "Kochi".to_string(),
            time: "15-01-2025 10:15 IST".to_string(),
            time_of_day: TimeOfDay::Unknown,
            data: None,
        };

        let value = serde_json::to_value(&decision).unwrap();
        assert_eq!(value["data"], json!({}));
        assert_eq!(value["time_of_day"], json!("Unknown"));
        assert_eq!(value["status"], json!("ERROR"));
    }
}
