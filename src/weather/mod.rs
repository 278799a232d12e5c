//! Upstream condition sources
//!
//! A provider performs the two independent reads an evaluation needs.
//! Both reads are infallible from the caller's point of view: any failure
//! is absorbed by the provider and reported as an empty condition set.

use std::future::Future;

use crate::models::{Coordinate, MarineConditions, WeatherConditions};

pub mod open_meteo;

pub use open_meteo::OpenMeteoClient;

pub trait ConditionsProvider {
    /// Current general weather plus today's sunrise/sunset
    fn fetch_weather(
        &self,
        coordinate: Coordinate,
    ) -> impl Future<Output = WeatherConditions> + Send;

    /// Current marine conditions
    fn fetch_marine(&self, coordinate: Coordinate) -> impl Future<Output = MarineConditions> + Send;
}
