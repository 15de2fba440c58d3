//! Spatial autocorrelation of tile ordinals

use crate::spatial::grid::TileMatrix;
use std::collections::BTreeMap;

/// Autocorrelation for every `(row_lag, col_lag)` in `0..=max_lag` squared
///
/// Each coefficient is the covariance sum between cells and their lagged
/// partners, divided by the total variance sum of the matrix. A matrix with
/// zero variance yields zero for every lag.
pub fn autocorrelation(grid: &TileMatrix, max_lag: usize) -> BTreeMap<(usize, usize), f64> {
    let values = grid.mapv(f64::from);
    let mean = values.mean().unwrap_or_default();
    let variance_sum: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    let (rows, cols) = values.dim();

    let mut out = BTreeMap::new();
    for row_lag in 0..=max_lag {
        for col_lag in 0..=max_lag {
            let coefficient = if variance_sum > 0.0 {
                let mut covariance_sum = 0.0;
                for r in 0..rows.saturating_sub(row_lag) {
                    for c in 0..cols.saturating_sub(col_lag) {
                        if let (Some(a), Some(b)) =
                            (values.get([r, c]), values.get([r + row_lag, c + col_lag]))
                        {
                            covariance_sum += (a - mean) * (b - mean);
                        }
                    }
                }
                covariance_sum / variance_sum
            } else {
                0.0
            };
            out.insert((row_lag, col_lag), coefficient);
        }
    }

    out
}
