//! Box-counting fractal dimension
//!
//! A cell counts as filled when its tile ordinal is not zero, so deep water
//! is the empty background. Boxes of side `s = 1, 2, 4, ...` tile the
//! largest leading square of the matrix, and the dimension is the slope of
//! `ln N(s)` against `ln(1 / s)`.

use crate::analysis::statistics::is_uniform;
use crate::math::regression::least_squares_slope;
use crate::spatial::grid::TileMatrix;
use ndarray::{Axis, Slice};

/// Dimension reported for uniform or degenerate input
pub const FLAT_DIMENSION: f64 = 2.0;

/// Number of boxes of side `size` holding at least one filled cell
pub fn occupied_boxes(grid: &TileMatrix, size: usize) -> usize {
    let side = grid.nrows().min(grid.ncols());
    if size == 0 || size > side {
        return 0;
    }
    let boxes = side / size;

    (0..boxes)
        .flat_map(|by| (0..boxes).map(move |bx| (by, bx)))
        .filter(|&(by, bx)| {
            grid.slice_axis(Axis(0), Slice::from(by * size..(by + 1) * size))
                .slice_axis_move(Axis(1), Slice::from(bx * size..(bx + 1) * size))
                .iter()
                .any(|&tile| tile != 0)
        })
        .count()
}

/// Estimate the box-counting dimension
///
/// Uniform matrices and fits with fewer than two occupied scales report
/// [`FLAT_DIMENSION`].
pub fn fractal_dimension(grid: &TileMatrix) -> f64 {
    if is_uniform(grid) {
        return FLAT_DIMENSION;
    }

    let side = grid.nrows().min(grid.ncols());
    let points: Vec<(f64, f64)> = std::iter::successors(Some(1_usize), |&size| size.checked_mul(2))
        .take_while(|&size| size <= side)
        .filter_map(|size| {
            let count = occupied_boxes(grid, size);
            (count > 0).then(|| ((1.0 / size as f64).ln(), (count as f64).ln()))
        })
        .collect();

    least_squares_slope(&points).unwrap_or_else(|| {
        tracing::debug!(scales = points.len(), "degenerate box count, reporting flat");
        FLAT_DIMENSION
    })
}
