//! Dynamic Y-axis range selection.

use serde::{Deserialize, Serialize};

/// Axis bounds and tick step for a value series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for AxisRange {
    /// Fixed fallback for an empty series.
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 10.0,
            step: 1.0,
        }
    }
}

/// Compute a padded, step-aligned Y-axis range for `values`.
///
/// The data range is padded by 10% (at least 0.5) on both sides, with the
/// minimum floored at 0 since every tracked metric is non-negative. The step
/// grows with the padded range, and the final bounds snap outward to step
/// multiples so gridlines land on round numbers.
pub fn y_axis_range(values: &[f64]) -> AxisRange {
    if values.is_empty() {
        return AxisRange::default();
    }

    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let pad = ((max - min) * 0.1).max(0.5);

    let padded_min = (min - pad).max(0.0);
    let padded_max = max + pad;
    let step = step_for(padded_max - padded_min);

    AxisRange {
        min: (padded_min / step).floor() * step,
        max: (padded_max / step).ceil() * step,
        step,
    }
}

/// Tick step for a given axis span.
fn step_for(span: f64) -> f64 {
    if span <= 5.0 {
        0.5
    } else if span <= 10.0 {
        1.0
    } else if span <= 25.0 {
        2.0
    } else if span <= 50.0 {
        5.0
    } else {
        10.0
    }
}
