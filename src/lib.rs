//! Terrain tile map generation by constraint propagation, cellular automata and noise
//!
//! The core solver fills a grid with tile kinds so that every orthogonal pair
//! respects a compatibility table, restarting the whole grid when a cell runs
//! out of candidates. Alternative generators and a metrics suite share the
//! same row-major tile matrix representation.

#![forbid(unsafe_code)]

/// Core solver: selection, collapse, propagation and the attempt loop
pub mod algorithm;
/// Metrics over generated tile matrices
pub mod analysis;
/// Terrain-rule automaton, life automaton and noise generator
pub mod generators;
/// Input/output operations and error handling
pub mod io;
/// Mathematical utilities for the metrics
pub mod math;
/// Tile kinds, candidate sets and the grid
pub mod spatial;

pub use algorithm::executor::{Solver, SolverConfig, solve};
pub use io::error::{AlgorithmError, Result};
pub use spatial::grid::TileMatrix;
pub use spatial::tiles::{CompatibilityTable, TileKind, TileSet};
