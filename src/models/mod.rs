//! Data models for the SeaGuard service
//!
//! This module contains the core domain models organized by concern:
//! - Location: the evaluated coordinate and its display label
//! - Conditions: typed upstream condition sets
//! - Alert: factor scores and the final decision record

pub mod alert;
pub mod conditions;
pub mod location;

// Re-export all public types for convenient access
pub use alert::{AlertData, AlertDecision, AlertStatus, FactorScore, TimeOfDay};
pub use conditions::{
    DailySun, MarineConditions, MarineCurrent, WeatherConditions, WeatherCurrent,
};
pub use location::Coordinate;
