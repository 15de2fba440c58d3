use crate::algorithm::propagation::Contradiction;
use crate::spatial::grid::{Grid, Position};
use crate::spatial::tiles::TileKind;
use rand::Rng;

/// Commit one tile from the cell's remaining candidates
///
/// Candidates are taken in ascending ordinal order and the random stream
/// supplies the index into that order. Only the target cell changes;
/// propagation is left to the caller.
///
/// # Errors
///
/// Returns a `Contradiction` if the cell has no candidates or lies outside
/// the grid.
pub fn collapse_cell<R: Rng + ?Sized>(
    grid: &mut Grid,
    position: Position,
    rng: &mut R,
) -> Result<TileKind, Contradiction> {
    let cell = grid
        .cell_mut(position)
        .ok_or(Contradiction { position })?;

    let candidates = cell.domain().to_vec();
    if candidates.is_empty() {
        return Err(Contradiction { position });
    }

    let index = rng.random_range(0..candidates.len());
    let tile = candidates
        .get(index)
        .copied()
        .ok_or(Contradiction { position })?;

    cell.resolve(tile);
    Ok(tile)
}
