//! Two-dimensional discrete Fourier magnitude spectrum

use crate::analysis::statistics::is_uniform;
use crate::spatial::grid::TileMatrix;
use ndarray::Array2;
use std::f64::consts::TAU;

/// Magnitude `|Σ_x Σ_y g[x, y] e^(-2πi(ux/H + vy/W))|` for every frequency `(u, v)`
///
/// Uniform matrices yield an all-zero spectrum of the same shape. The
/// transform is evaluated directly, which is quadratic in the cell count.
pub fn magnitude_spectrum(grid: &TileMatrix) -> Array2<f64> {
    let (rows, cols) = grid.dim();
    if is_uniform(grid) {
        return Array2::zeros((rows, cols));
    }

    let (h, w) = (rows as f64, cols as f64);
    Array2::from_shape_fn((rows, cols), |(u, v)| {
        let (mut re, mut im) = (0.0, 0.0);
        for ((x, y), &tile) in grid.indexed_iter() {
            let angle = -TAU * ((u * x) as f64 / h + (v * y) as f64 / w);
            let value = f64::from(tile);
            re += value * angle.cos();
            im += value * angle.sin();
        }
        re.hypot(im)
    })
}
