//! Lowest-entropy cell selection
//!
//! Entropy here is the plain candidate count of a cell. Ties are broken by a
//! uniform draw over the tied cells listed in row-major order, so the choice
//! is reproducible for a fixed random stream.

use crate::algorithm::propagation::Contradiction;
use crate::spatial::grid::{Grid, Position};
use rand::Rng;

/// Outcome of scanning the grid for the next cell to collapse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Collapse this cell next
    Target(Position),
    /// Every cell is resolved
    Complete,
    /// An unresolved cell has no candidates left
    Contradiction(Contradiction),
}

/// Unresolved cells sharing the lowest non-zero candidate count
///
/// Returns the positions in row-major order together with that count. An
/// empty list means every cell is resolved.
///
/// # Errors
///
/// Returns a `Contradiction` for the first unresolved cell (in scan order)
/// whose domain is empty, before any minimum is considered.
pub fn lowest_entropy_positions(grid: &Grid) -> Result<(Vec<Position>, usize), Contradiction> {
    let mut minimum = usize::MAX;
    let mut candidates = Vec::new();

    for position in grid.positions() {
        let Some(cell) = grid.cell(position) else {
            continue;
        };
        if cell.is_resolved() {
            continue;
        }

        let entropy = cell.entropy();
        if entropy == 0 {
            return Err(Contradiction { position });
        }

        if entropy < minimum {
            minimum = entropy;
            candidates.clear();
            candidates.push(position);
        } else if entropy == minimum {
            candidates.push(position);
        }
    }

    Ok((candidates, minimum))
}

/// Pick the next cell to collapse
///
/// Draws from `rng` only when at least one candidate exists.
pub fn select_next_cell<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Selection {
    match lowest_entropy_positions(grid) {
        Err(contradiction) => Selection::Contradiction(contradiction),
        Ok((candidates, _)) if candidates.is_empty() => Selection::Complete,
        Ok((candidates, _)) => {
            let index = rng.random_range(0..candidates.len());
            candidates
                .get(index)
                .copied()
                .map_or(Selection::Complete, Selection::Target)
        }
    }
}
