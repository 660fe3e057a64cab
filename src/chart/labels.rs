//! Adaptive x-axis labeling.
//!
//! Label density scales with data volume so a season's worth of sessions does
//! not crowd the axis: every point for small sets, every other point for
//! medium sets, then week and month buckets.

use chrono::{Datelike, NaiveDate};

/// Parallel label arrays for N chronologically sorted points: the full label
/// text per index (empty where unlabeled) and the indices that render a tick.
#[derive(Debug, Clone, PartialEq)]
pub struct SmartLabels {
    pub labels: Vec<String>,
    pub tick_indices: Vec<usize>,
}

/// Short month/day label, e.g. "Mar 2".
fn day_label(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// Month label, e.g. "Mar 2026".
fn month_label(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

/// Choose labels for `dates`, which must be chronologically sorted.
///
/// - up to 10 points: label every point
/// - 11 to 20: label every other point plus the last
/// - 21 to 50: bucket into Monday-start calendar weeks, label the first
///   session of every other week
/// - more than 50: bucket into calendar months, label the first session of
///   every month
pub fn smart_labels(dates: &[NaiveDate]) -> SmartLabels {
    let n = dates.len();
    let mut labels = vec![String::new(); n];
    let mut tick_indices = Vec::new();

    if n <= 10 {
        for (i, date) in dates.iter().enumerate() {
            labels[i] = day_label(*date);
            tick_indices.push(i);
        }
    } else if n <= 20 {
        for (i, date) in dates.iter().enumerate() {
            if i % 2 == 0 || i == n - 1 {
                labels[i] = day_label(*date);
                tick_indices.push(i);
            }
        }
    } else if n <= 50 {
        // ISO weeks start on Monday. Label the first point of weeks 0, 2, 4...
        let mut current_week: Option<(i32, u32)> = None;
        let mut week_ordinal = 0usize;
        for (i, date) in dates.iter().enumerate() {
            let week = date.iso_week();
            let key = (week.year(), week.week());
            if current_week == Some(key) {
                continue;
            }
            if current_week.is_some() {
                week_ordinal += 1;
            }
            current_week = Some(key);
            if week_ordinal % 2 == 0 {
                labels[i] = day_label(*date);
                tick_indices.push(i);
            }
        }
    } else {
        let mut current_month: Option<(i32, u32)> = None;
        for (i, date) in dates.iter().enumerate() {
            let key = (date.year(), date.month());
            if current_month != Some(key) {
                labels[i] = month_label(*date);
                tick_indices.push(i);
                current_month = Some(key);
            }
        }
    }

    SmartLabels {
        labels,
        tick_indices,
    }
}

/// Upper bound on rendered ticks for N points.
pub fn max_tick_count(n: usize) -> usize {
    match n {
        0..=10 => n,
        11..=20 => 10,
        21..=50 => 8,
        _ => 6,
    }
}
