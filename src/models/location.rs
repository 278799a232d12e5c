//! Coordinate model for the evaluated sea position

use serde::{Deserialize, Serialize};

/// Geographic position an alert is evaluated for.
///
/// No range checks happen here; the web layer rejects out-of-range input
/// before a `Coordinate` is built.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinate {
    /// Create a new coordinate
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Format coordinates for display, e.g. `13.08°N, 80.27°E`
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.2}°N, {:.2}°E", self.latitude, self.longitude)
    }

    /// Location label for a decision: the caller-supplied name if it is
    /// non-empty, else the formatted coordinates.
    #[must_use]
    pub fn label(&self, name: Option<&str>) -> String {
        match name.map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.format_coordinates(),
        }
    }
}
