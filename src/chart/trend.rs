//! Least-squares trend line over a chronological value series.

/// Fit `values` against their 0-based index by ordinary least squares and
/// return the fitted value at each index. Fewer than 2 points cannot anchor a
/// line, so the input comes back unchanged.
pub fn linear_trend(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    if n < 2 {
        return values.to_vec();
    }

    let n_f = n as f64;
    let sum_x: f64 = (0..n).map(|i| i as f64).sum();
    let sum_y: f64 = values.iter().sum();
    let sum_xy: f64 = values.iter().enumerate().map(|(i, v)| i as f64 * v).sum();
    let sum_xx: f64 = (0..n).map(|i| (i as f64).powi(2)).sum();

    let denom = n_f * sum_xx - sum_x * sum_x;
    // denom is 0 only for n < 2, which was handled above.
    let slope = (n_f * sum_xy - sum_x * sum_y) / denom;
    let intercept = (sum_y - slope * sum_x) / n_f;

    (0..n).map(|i| intercept + slope * i as f64).collect()
}
