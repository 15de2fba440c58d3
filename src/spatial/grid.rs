//! Per-attempt solver grid and the exported tile matrix format
//!
//! A `Grid` owns the candidate state of every cell for one solve attempt.
//! Cells are stored row-major in an `Array2` indexed `[y, x]`; domains only
//! ever shrink while an attempt runs.

use ndarray::Array2;

use crate::io::error::{Result, invalid_configuration};
use crate::spatial::tiles::{TileKind, TileSet};

/// Row-major matrix of tile ordinals, `height` rows by `width` columns
///
/// This is the hand-off format shared by every generator and every metric.
pub type TileMatrix = Array2<u8>;

/// Grid coordinates, `x` along a row and `y` down the columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Column index
    pub x: usize,
    /// Row index
    pub y: usize,
}

impl Position {
    /// Create a position
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    const fn index(self) -> [usize; 2] {
        [self.y, self.x]
    }
}

/// Observable state of one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    /// More than one candidate remains
    Unresolved,
    /// Exactly one candidate remains but no tile has been committed
    Singleton,
    /// A tile has been committed
    Resolved(TileKind),
    /// No candidate remains
    Contradiction,
}

/// Candidate domain and committed tile of a single position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    domain: TileSet,
    tile: Option<TileKind>,
}

impl Default for Cell {
    fn default() -> Self {
        Self::new()
    }
}

impl Cell {
    /// Unresolved cell with every tile kind as a candidate
    pub const fn new() -> Self {
        Self {
            domain: TileSet::full(),
            tile: None,
        }
    }

    /// Remaining candidates
    pub const fn domain(&self) -> TileSet {
        self.domain
    }

    /// Committed tile, if any
    pub const fn tile(&self) -> Option<TileKind> {
        self.tile
    }

    /// Whether a tile has been committed
    pub const fn is_resolved(&self) -> bool {
        self.tile.is_some()
    }

    /// Candidate count, used as the selection entropy
    pub fn entropy(&self) -> usize {
        self.domain.count()
    }

    /// Classify the cell
    pub fn state(&self) -> CellState {
        if let Some(tile) = self.tile {
            return CellState::Resolved(tile);
        }
        match self.domain.count() {
            0 => CellState::Contradiction,
            1 => CellState::Singleton,
            _ => CellState::Unresolved,
        }
    }

    /// Commit a tile, leaving it as the only candidate
    pub const fn resolve(&mut self, tile: TileKind) {
        self.tile = Some(tile);
        self.domain = TileSet::single(tile);
    }

    /// Narrow the domain to its intersection with `allowed`
    ///
    /// Returns `true` when the domain shrank.
    pub fn restrict(&mut self, allowed: TileSet) -> bool {
        let narrowed = self.domain.intersection(allowed);
        let changed = narrowed != self.domain;
        self.domain = narrowed;
        changed
    }
}

/// Two-dimensional array of cells for one solve attempt
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Array2<Cell>,
}

impl Grid {
    /// Create a grid with every cell unresolved and unconstrained
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: Array2::from_elem((height, width), Cell::new()),
        }
    }

    /// Number of columns
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Whether a position lies inside the grid
    pub const fn contains(&self, position: Position) -> bool {
        position.x < self.width && position.y < self.height
    }

    /// Cell at a position
    pub fn cell(&self, position: Position) -> Option<&Cell> {
        self.cells.get(position.index())
    }

    /// Mutable cell at a position
    pub fn cell_mut(&mut self, position: Position) -> Option<&mut Cell> {
        self.cells.get_mut(position.index())
    }

    /// Narrow the domain at a position, returning whether it shrank
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` when the position lies outside the grid
    pub fn restrict(&mut self, position: Position, allowed: TileSet) -> Result<bool> {
        let (width, height) = (self.width, self.height);
        self.cell_mut(position)
            .map(|cell| cell.restrict(allowed))
            .ok_or_else(|| {
                invalid_configuration(&format!(
                    "position ({}, {}) is outside the {width}x{height} grid",
                    position.x, position.y
                ))
            })
    }

    /// All positions in row-major scan order
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let width = self.width;
        (0..self.height).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }

    /// Positions of resolved cells in row-major scan order
    pub fn resolved_positions(&self) -> Vec<Position> {
        self.positions()
            .filter(|&p| self.cell(p).is_some_and(Cell::is_resolved))
            .collect()
    }

    /// In-bounds orthogonal neighbours in up, down, left, right order
    pub fn orthogonal_neighbors(&self, position: Position) -> impl Iterator<Item = Position> + use<> {
        let Position { x, y } = position;
        let (width, height) = (self.width, self.height);
        [
            y.checked_sub(1).map(|ny| Position::new(x, ny)),
            (y + 1 < height).then_some(Position::new(x, y + 1)),
            x.checked_sub(1).map(|nx| Position::new(nx, y)),
            (x + 1 < width).then_some(Position::new(x + 1, y)),
        ]
        .into_iter()
        .flatten()
    }

    /// Whether every cell has a committed tile
    pub fn is_fully_resolved(&self) -> bool {
        self.cells.iter().all(Cell::is_resolved)
    }

    /// Convert a fully resolved grid to a tile matrix
    ///
    /// Returns `None` while any cell is unresolved so partial grids never leak.
    pub fn export(&self) -> Option<TileMatrix> {
        let tiles: Option<Vec<u8>> = self
            .cells
            .iter()
            .map(|cell| cell.tile().map(TileKind::ordinal))
            .collect();
        Array2::from_shape_vec((self.height, self.width), tiles?).ok()
    }
}

/// Split a tile matrix into nested rows
pub fn to_rows(matrix: &TileMatrix) -> Vec<Vec<u8>> {
    matrix.outer_iter().map(|row| row.to_vec()).collect()
}

/// Build a tile matrix from nested rows
///
/// # Errors
///
/// Returns `InvalidConfiguration` if the rows are empty or ragged
pub fn from_rows(rows: &[Vec<u8>]) -> Result<TileMatrix> {
    let height = rows.len();
    let width = rows.first().map_or(0, Vec::len);
    if height == 0 || width == 0 {
        return Err(invalid_configuration(&"tile matrix is empty"));
    }
    if rows.iter().any(|row| row.len() != width) {
        return Err(invalid_configuration(&"tile matrix rows differ in length"));
    }
    Array2::from_shape_vec((height, width), rows.concat())
        .map_err(|e| invalid_configuration(&e))
}
