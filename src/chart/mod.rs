//! Presentation-agnostic chart shaping.
//!
//! Turns a chronological value series into the neutral bundle a rendering
//! layer needs: adaptive x-axis labels, a bounded tick set, a padded y-axis
//! range, and an optional least-squares trend line. Nothing here knows about
//! any particular charting library.

pub mod axis;
pub mod labels;
pub mod trend;

pub use axis::{y_axis_range, AxisRange};
pub use labels::{max_tick_count, smart_labels, SmartLabels};
pub use trend::linear_trend;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::coerce;

/// Minimum series length before a trend line is worth showing. Fits over
/// fewer points are dominated by noise.
pub const TREND_MIN_POINTS: usize = 5;

/// Everything a renderer needs to draw one metric series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartData {
    /// Label text per point, empty string where unlabeled
    pub labels: Vec<String>,

    /// Indices that should render an axis tick
    pub tick_indices: Vec<usize>,

    /// Cap on rendered ticks for this series length
    pub max_ticks: usize,

    /// The values being plotted, chronological
    pub series: Vec<f64>,

    pub axis_range: AxisRange,

    /// Least-squares fit per point. Same length as `series`.
    pub trend_line: Vec<f64>,

    /// Whether the trend line carries enough points to be meaningful
    pub show_trend: bool,
}

/// Shape one chronological series for rendering.
///
/// `dates` and `values` are parallel; a missing date is pinned to today so
/// the point still gets an x-position instead of dropping out of the chart.
pub fn build_chart_data(dates: &[Option<NaiveDate>], values: &[f64]) -> ChartData {
    let resolved: Vec<NaiveDate> = dates.iter().map(|d| coerce::date_or_now(*d)).collect();
    let SmartLabels {
        labels,
        tick_indices,
    } = smart_labels(&resolved);

    ChartData {
        labels,
        tick_indices,
        max_ticks: max_tick_count(values.len()),
        series: values.to_vec(),
        axis_range: y_axis_range(values),
        trend_line: linear_trend(values),
        show_trend: values.len() >= TREND_MIN_POINTS,
    }
}
