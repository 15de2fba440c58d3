//! Alternative map generators sharing the tile vocabulary of the solver

use crate::spatial::tiles::TileKind;
use rand::Rng;

/// Game-of-Life automaton over bushes and sand
pub mod life;
/// Thresholded fractal Perlin noise
pub mod noise;
/// Layered terrain-rule automaton
pub mod terrain;

/// Offsets of the 8-neighbourhood in row-major order
pub const EIGHT_NEIGHBORHOOD: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Uniformly random tile kind
pub fn random_tile<R: Rng + ?Sized>(rng: &mut R) -> TileKind {
    let index = rng.random_range(0..TileKind::COUNT);
    TileKind::ALL
        .get(index)
        .copied()
        .unwrap_or(TileKind::DeepWater)
}
