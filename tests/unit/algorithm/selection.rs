//! Tests for lowest-entropy selection and tie-breaking

#[cfg(test)]
mod tests {

    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use terrawave::algorithm::propagation::Contradiction;
    use terrawave::algorithm::selection::{Selection, lowest_entropy_positions, select_next_cell};
    use terrawave::spatial::grid::{Grid, Position};
    use terrawave::spatial::tiles::{TileKind, TileSet};

    // Tests all cells tie on a fresh grid, listed row-major
    // Verified by scanning columns first
    #[test]
    fn test_fresh_grid_all_tied() {
        let grid = Grid::new(3, 2);
        let (positions, entropy) = lowest_entropy_positions(&grid).unwrap();
        assert_eq!(entropy, TileKind::COUNT);
        assert_eq!(positions.len(), 6);
        assert_eq!(positions.first(), Some(&Position::new(0, 0)));
        assert_eq!(positions.get(3), Some(&Position::new(0, 1)));
    }

    // Tests the smallest domain wins and resolved cells are skipped
    // Verified by including resolved cells in the scan
    #[test]
    fn test_lowest_entropy_wins() {
        let mut grid = Grid::new(3, 3);
        grid.restrict(Position::new(2, 1), TileSet::water_family())
            .unwrap();
        grid.restrict(Position::new(0, 2), TileSet::water_family())
            .unwrap();
        if let Some(cell) = grid.cell_mut(Position::new(1, 1)) {
            cell.resolve(TileKind::Sand);
        }

        let (positions, entropy) = lowest_entropy_positions(&grid).unwrap();
        assert_eq!(entropy, 3);
        assert_eq!(positions, vec![Position::new(2, 1), Position::new(0, 2)]);

        let mut rng = StdRng::seed_from_u64(7);
        assert!(matches!(
            select_next_cell(&grid, &mut rng),
            Selection::Target(position) if positions.contains(&position)
        ));
    }

    // Tests an empty domain is reported before any minimum is returned
    // Verified by skipping zero-entropy cells
    #[test]
    fn test_empty_domain_is_contradiction() {
        let mut grid = Grid::new(2, 2);
        grid.restrict(Position::new(1, 1), TileSet::empty()).unwrap();

        assert_eq!(
            select_next_cell(&grid, &mut StdRng::seed_from_u64(0)),
            Selection::Contradiction(Contradiction {
                position: Position::new(1, 1)
            })
        );
    }

    // Tests a fully resolved grid reports completion
    // Verified by returning a target for resolved cells
    #[test]
    fn test_complete_grid() {
        let mut grid = Grid::new(1, 2);
        for y in 0..2 {
            if let Some(cell) = grid.cell_mut(Position::new(0, y)) {
                cell.resolve(TileKind::Water);
            }
        }
        assert_eq!(
            select_next_cell(&grid, &mut StdRng::seed_from_u64(0)),
            Selection::Complete
        );
    }

    // Tests the same random stream yields the same choice
    // Verified by drawing from thread_rng instead of the provided stream
    #[test]
    fn test_tie_break_is_reproducible() {
        let grid = Grid::new(6, 6);
        let first = select_next_cell(&grid, &mut StdRng::seed_from_u64(99));
        let second = select_next_cell(&grid, &mut StdRng::seed_from_u64(99));
        assert_eq!(first, second);
    }
}
