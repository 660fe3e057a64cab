//! Analytics calculation engine.
//!
//! Computes derived analytics from raw session/record data:
//! - Team trends across sessions
//! - Player rankings by average points
//! - Per-athlete multi-metric breakdowns
//! - Consistency scoring
//!
//! Everything here is a pure function over caller-supplied slices; nothing is
//! cached or mutated in place.

pub mod athlete;
pub mod players;
pub mod team;

pub use athlete::athlete_metrics;
pub use players::player_rankings;
pub use team::team_trends;

/// Arithmetic mean. 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Population standard deviation. 0.0 for fewer than 2 values.
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Coefficient of variation: population std dev / mean, 0.0 when the mean is 0.
pub fn coefficient_of_variation(values: &[f64]) -> f64 {
    let m = mean(values);
    if m == 0.0 {
        0.0
    } else {
        population_std_dev(values) / m
    }
}

/// Consistency score: 100 minus the coefficient of variation as a percentage,
/// clamped to [0, 100] and rounded to 1 decimal. Fewer than 2 data points
/// score a perfect 100 (there is nothing to vary).
pub fn consistency_score(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 100.0;
    }
    let cv = coefficient_of_variation(values);
    round1((100.0 - cv * 100.0).clamp(0.0, 100.0))
}

/// Round to 2 decimal places (displayed averages).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to 1 decimal place (consistency scores).
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
