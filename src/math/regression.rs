//! Ordinary least-squares line fitting

use num_traits::Float;

/// Slope of the least-squares line through `(x, y)` pairs
///
/// Computes `(n Σxy - Σx Σy) / (n Σx² - (Σx)²)`. Returns `None` when fewer
/// than two points are given or all `x` values coincide.
pub fn least_squares_slope<T: Float>(points: &[(T, T)]) -> Option<T> {
    if points.len() < 2 {
        return None;
    }

    let n = T::from(points.len())?;
    let (sum_x, sum_y, sum_xy, sum_xx) = points.iter().fold(
        (T::zero(), T::zero(), T::zero(), T::zero()),
        |(sx, sy, sxy, sxx), &(x, y)| (sx + x, sy + y, sxy + x * y, sxx + x * x),
    );

    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator.abs() <= T::epsilon() {
        return None;
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    slope.is_finite().then_some(slope)
}
