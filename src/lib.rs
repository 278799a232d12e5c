//! `SeaGuard` - probability-based coastal fishing safety alerts
//!
//! This library fuses current general weather and marine conditions for a
//! coordinate into a single safe/unsafe decision with day/night detection.

pub mod alerts;
pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use alerts::{AlertSettings, FishingAlertService};
pub use config::SeaGuardConfig;
pub use error::SeaGuardError;
pub use models::{AlertDecision, AlertStatus, Coordinate, FactorScore, TimeOfDay};
pub use weather::{ConditionsProvider, OpenMeteoClient};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, SeaGuardError>;
