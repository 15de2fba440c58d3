//! Tests for worklist propagation around resolved cells

#[cfg(test)]
mod tests {

    use terrawave::algorithm::propagation::{
        Contradiction, allowed_by_resolved_neighbors, propagate,
    };
    use terrawave::spatial::grid::{Grid, Position};
    use terrawave::spatial::tiles::{CompatibilityTable, TileKind, TileSet};

    fn resolve(grid: &mut Grid, x: usize, y: usize, tile: TileKind) {
        if let Some(cell) = grid.cell_mut(Position::new(x, y)) {
            cell.resolve(tile);
        }
    }

    fn domain(grid: &Grid, x: usize, y: usize) -> TileSet {
        grid.cell(Position::new(x, y)).map(|c| c.domain()).unwrap()
    }

    // Tests each resolved neighbour contributes its own entry
    // Verified by unioning instead of intersecting the entries
    #[test]
    fn test_allowed_by_resolved_neighbors_intersects() {
        let mut grid = Grid::new(3, 1);
        let table = CompatibilityTable::default();
        resolve(&mut grid, 0, 0, TileKind::DeepWater);
        resolve(&mut grid, 2, 0, TileKind::Sand);

        let allowed = allowed_by_resolved_neighbors(&grid, Position::new(1, 0), &table);
        assert_eq!(allowed, TileSet::single(TileKind::CoastalWater));
    }

    // Tests an isolated cell is unconstrained
    // Verified by starting the fold from the empty set
    #[test]
    fn test_allowed_without_resolved_neighbors() {
        let grid = Grid::new(3, 3);
        let table = CompatibilityTable::default();
        assert_eq!(
            allowed_by_resolved_neighbors(&grid, Position::new(1, 1), &table),
            TileSet::full()
        );
    }

    // Tests narrowing stops at direct neighbours of resolved cells
    // Verified by recomputing domains from unresolved neighbours too
    #[test]
    fn test_only_direct_neighbors_narrow() {
        let mut grid = Grid::new(5, 1);
        let table = CompatibilityTable::default();
        resolve(&mut grid, 0, 0, TileKind::DeepWater);

        assert_eq!(propagate(&mut grid, &table), Ok(1));
        assert_eq!(domain(&grid, 1, 0), table.entry(TileKind::DeepWater));
        assert_eq!(domain(&grid, 2, 0), TileSet::full());
    }

    // Tests incompatible resolved neighbours empty the cell between them
    // Verified by skipping the empty-domain check
    #[test]
    fn test_contradiction_reported_at_cell() {
        let mut grid = Grid::new(3, 1);
        let table = CompatibilityTable::default();
        resolve(&mut grid, 0, 0, TileKind::DeepWater);
        resolve(&mut grid, 2, 0, TileKind::Forest);

        assert_eq!(
            propagate(&mut grid, &table),
            Err(Contradiction {
                position: Position::new(1, 0)
            })
        );
    }

    // Tests a converged grid is a fixed point
    // Verified by counting unchanged domains as reductions
    #[test]
    fn test_propagation_is_idempotent() {
        let mut grid = Grid::new(4, 4);
        let table = CompatibilityTable::default();
        resolve(&mut grid, 1, 1, TileKind::Grass);
        resolve(&mut grid, 3, 2, TileKind::Water);

        assert!(propagate(&mut grid, &table).is_ok());
        let snapshot: Vec<_> = grid.positions().map(|p| grid.cell(p).copied()).collect();

        assert_eq!(propagate(&mut grid, &table), Ok(0));
        let after: Vec<_> = grid.positions().map(|p| grid.cell(p).copied()).collect();
        assert_eq!(snapshot, after);
    }

    // Tests seeded domains are intersected rather than replaced
    // Verified by assigning the recomputed set without the prior domain
    #[test]
    fn test_existing_domain_is_respected() {
        let mut grid = Grid::new(2, 1);
        let table = CompatibilityTable::default();
        grid.restrict(Position::new(1, 0), TileSet::water_family())
            .unwrap();
        resolve(&mut grid, 0, 0, TileKind::Sand);

        assert_eq!(propagate(&mut grid, &table), Ok(1));
        assert_eq!(domain(&grid, 1, 0), TileSet::single(TileKind::CoastalWater));
    }
}
