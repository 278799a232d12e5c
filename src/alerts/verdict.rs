//! Aggregation of factor scores into a safe/unsafe verdict

use crate::models::{AlertStatus, FactorScore};

use super::factors::round2;

pub const ADVICE_SAFE: &str = "Good for fishing";
pub const ADVICE_UNSAFE: &str = "Stay on shore";

#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    /// Mean of the non-null factor probabilities, 0 if there are none
    pub average: f64,
    pub safe: bool,
    pub status: AlertStatus,
    pub message: String,
    pub advice: &'static str,
}

/// Arithmetic mean of the available probabilities, 0 when none are available
#[must_use]
pub fn composite_probability(factors: &[FactorScore]) -> f64 {
    let valid: Vec<f64> = factors.iter().filter_map(|f| f.probability).collect();
    if valid.is_empty() {
        return 0.0;
    }
    valid.iter().sum::<f64>() / valid.len() as f64
}

/// Combine factor scores with the daylight gate. Night is never safe.
#[must_use]
pub fn aggregate(factors: &[FactorScore], is_day: bool, safe_probability: f64) -> Verdict {
    let average = composite_probability(factors);
    let safe = average >= safe_probability && is_day;

    let message = factors
        .iter()
        .map(|f| f.message.as_str())
        .filter(|m| !m.is_empty())
        .collect::<Vec<_>>()
        .join(" | ");

    Verdict {
        average: round2(average),
        safe,
        status: if safe { AlertStatus::Safe } else { AlertStatus::Unsafe },
        message,
        advice: if safe { ADVICE_SAFE } else { ADVICE_UNSAFE },
    }
}
