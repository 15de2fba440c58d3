//! Aggregated metrics for one generated map

use crate::analysis::correlation::autocorrelation;
use crate::analysis::fractal::fractal_dimension;
use crate::analysis::spectral::magnitude_spectrum;
use crate::analysis::statistics::{adjacency_matrix, cluster_sizes, tile_entropy, tile_frequencies};
use crate::spatial::grid::TileMatrix;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Every metric computed for a tile matrix
///
/// Autocorrelation keys are written as `"row_lag,col_lag"` so the report
/// stays a plain JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsReport {
    /// Shannon entropy in bits
    pub entropy: f64,
    /// Ordered 4-adjacency counts
    pub adjacency: BTreeMap<u8, BTreeMap<u8, usize>>,
    /// Relative tile frequencies
    pub frequencies: BTreeMap<u8, f64>,
    /// Spatial autocorrelation per lag pair
    pub autocorr: BTreeMap<String, f64>,
    /// Box-counting dimension
    pub fractal_dim: f64,
    /// DFT magnitude spectrum, row-major
    pub spectrum: Vec<Vec<f64>>,
    /// 4-connected cluster sizes
    pub cluster_sizes: Vec<usize>,
}

impl MetricsReport {
    /// Run the full metrics suite
    pub fn compute(grid: &TileMatrix, max_lag: usize) -> Self {
        let autocorr = autocorrelation(grid, max_lag)
            .into_iter()
            .map(|((row_lag, col_lag), value)| (format!("{row_lag},{col_lag}"), value))
            .collect();
        let spectrum = magnitude_spectrum(grid)
            .rows()
            .into_iter()
            .map(|row| row.to_vec())
            .collect();

        Self {
            entropy: tile_entropy(grid),
            adjacency: adjacency_matrix(grid),
            frequencies: tile_frequencies(grid),
            autocorr,
            fractal_dim: fractal_dimension(grid),
            spectrum,
            cluster_sizes: cluster_sizes(grid),
        }
    }
}
