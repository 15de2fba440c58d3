use crate::spatial::grid::{Grid, Position};
use crate::spatial::tiles::{CompatibilityTable, TileSet};
use std::collections::VecDeque;
use std::fmt;

/// A cell ran out of candidates, so the current attempt cannot succeed
///
/// Contradictions never leave the solver: the attempt that produced one is
/// discarded and the next attempt starts from a fresh grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contradiction {
    /// Cell whose domain became empty
    pub position: Position,
}

impl fmt::Display for Contradiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "contradiction at ({}, {})",
            self.position.x, self.position.y
        )
    }
}

/// Candidates permitted by every resolved orthogonal neighbour of `position`
///
/// Each resolved neighbour contributes its own compatibility entry, so the
/// relation is applied in the direction "placed tile constrains its neighbour".
pub fn allowed_by_resolved_neighbors(
    grid: &Grid,
    position: Position,
    table: &CompatibilityTable,
) -> TileSet {
    grid.orthogonal_neighbors(position)
        .filter_map(|neighbor| grid.cell(neighbor).and_then(|cell| cell.tile()))
        .fold(TileSet::full(), |allowed, tile| {
            allowed.intersection(table.entry(tile))
        })
}

/// Restore orthogonal consistency around every resolved cell
///
/// Worklist propagation seeded with all resolved cells in row-major order.
/// Each unresolved neighbour of a popped cell has its domain recomputed from
/// its own resolved neighbours; a neighbour that shrinks is queued so the
/// restriction ripples outward. Stops at the first empty domain.
///
/// Returns the number of domain reductions performed.
///
/// # Errors
///
/// Returns the first `Contradiction` encountered; the grid is left
/// mid-propagation and must be discarded.
pub fn propagate(grid: &mut Grid, table: &CompatibilityTable) -> Result<usize, Contradiction> {
    let mut queue: VecDeque<Position> = grid.resolved_positions().into();
    let mut reductions = 0;

    while let Some(current) = queue.pop_front() {
        for neighbor in grid.orthogonal_neighbors(current) {
            let Some(cell) = grid.cell(neighbor) else {
                continue;
            };
            if cell.is_resolved() {
                continue;
            }

            let before = cell.domain();
            let recomputed = allowed_by_resolved_neighbors(grid, neighbor, table).intersection(before);

            if recomputed.is_empty() {
                if let Some(cell) = grid.cell_mut(neighbor) {
                    cell.restrict(recomputed);
                }
                return Err(Contradiction { position: neighbor });
            }

            if recomputed.count() < before.count() {
                if let Some(cell) = grid.cell_mut(neighbor) {
                    cell.restrict(recomputed);
                }
                reductions += 1;
                queue.push_back(neighbor);
            }
        }
    }

    Ok(reductions)
}
