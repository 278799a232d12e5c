//! Day/night determination from upstream sunrise/sunset times
//!
//! Anything missing or unparseable resolves to night.

use chrono::{DateTime, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use tracing::debug;

use crate::models::WeatherConditions;

/// Open-Meteo emits minute precision; seconds are tolerated too
const LOCAL_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Parse a local ISO-8601 timestamp in the given zone
pub fn parse_local(value: &str, tz: Tz) -> Option<DateTime<Tz>> {
    let naive = LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value.trim(), format).ok())?;
    tz.from_local_datetime(&naive).single()
}

/// True only if today's sunrise and sunset are both present and parseable
/// and `now` falls within `[sunrise, sunset]`.
pub fn is_daytime(weather: &WeatherConditions, now: DateTime<Tz>) -> bool {
    let tz = now.timezone();
    let Some((sunrise, sunset)) = weather.sun_times() else {
        debug!("No sunrise/sunset in weather data, assuming night");
        return false;
    };

    match (parse_local(sunrise, tz), parse_local(sunset, tz)) {
        (Some(sunrise), Some(sunset)) => sunrise <= now && now <= sunset,
        _ => {
            debug!(sunrise, sunset, "Unparseable sun times, assuming night");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DailySun;
    use chrono_tz::Asia::Kolkata;
    use rstest::rstest;

    fn weather_with(sunrise: &str, sunset: &str) -> WeatherConditions {
        WeatherConditions {
            current: None,
            daily: Some(DailySun {
                time: vec!["2025-01-15".into()],
                sunrise: vec![sunrise.into()],
                sunset: vec![sunset.into()],
            }),
        }
    }

    fn at(h: u32, m: u32) -> DateTime<Tz> {
        Kolkata.with_ymd_and_hms(2025, 1, 15, h, m, 0).unwrap()
    }

    #[rstest]
    #[case(at(10, 0), true)]
    #[case(at(6, 31), true)]
    #[case(at(18, 2), true)]
    #[case(at(6, 30), false)]
    #[case(at(18, 3), false)]
    #[case(at(23, 0), false)]
    fn test_daylight_interval_is_inclusive(#[case] now: DateTime<Tz>, #[case] expected: bool) {
        let weather = weather_with("2025-01-15T06:31", "2025-01-15T18:02");
        assert_eq!(is_daytime(&weather, now), expected);
    }

    #[test]
    fn test_missing_daily_is_night() {
        assert!(!is_daytime(&WeatherConditions::default(), at(12, 0)));
    }

    #[test]
    fn test_malformed_times_are_night() {
        let weather = weather_with("sometime in the morning", "2025-01-15T18:02");
        assert!(!is_daytime(&weather, at(12, 0)));
    }

    #[test]
    fn test_seconds_precision_parses() {
        let parsed = parse_local("2025-01-15T06:31:15", Kolkata).unwrap();
        assert_eq!(parsed, Kolkata.with_ymd_and_hms(2025, 1, 15, 6, 31, 15).unwrap());
    }

    #[test]
    fn test_comparison_uses_zone_of_now() {
        // 05:00 UTC is 10:30 IST
        let now = chrono::Utc
            .with_ymd_and_hms(2025, 1, 15, 5, 0, 0)
            .unwrap()
            .with_timezone(&Kolkata);
        let weather = weather_with("2025-01-15T06:31", "2025-01-15T18:02");
        assert!(is_daytime(&weather, now));
    }
}
