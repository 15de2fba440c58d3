//! Spatial data structures: tile kinds, candidate sets and the solver grid

/// Cells, grid state and tile matrix export
pub mod grid;
/// Tile kinds, candidate bitsets and the compatibility table
pub mod tiles;
