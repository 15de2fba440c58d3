//! Tests for the Game-of-Life automaton

#[cfg(test)]
mod tests {

    use ndarray::{Array2, array};
    use terrawave::generators::life::{
        ALIVE, DEAD, apply_paint, from_matrix, generate, life_rules, step,
    };
    use terrawave::io::error::AlgorithmError;
    use terrawave::spatial::tiles::TileKind;

    fn blinker() -> Array2<TileKind> {
        let mut grid = Array2::from_elem((5, 5), DEAD);
        for x in 1..=3 {
            grid[[2, x]] = ALIVE;
        }
        grid
    }

    // Tests the survival, birth and death rules
    // Verified by letting live cells survive with four neighbours
    #[test]
    fn test_rules() {
        let rules = life_rules();
        let next = |tile: TileKind, alive: usize| {
            rules
                .iter()
                .find(|rule| rule.applies(tile, alive))
                .map_or(tile, |rule| rule.target)
        };

        assert_eq!(next(ALIVE, 2), ALIVE);
        assert_eq!(next(ALIVE, 3), ALIVE);
        assert_eq!(next(ALIVE, 1), DEAD);
        assert_eq!(next(ALIVE, 4), DEAD);
        assert_eq!(next(DEAD, 3), ALIVE);
        assert_eq!(next(DEAD, 2), DEAD);
        assert_eq!(next(DEAD, 6), DEAD);
    }

    // Tests a blinker oscillates with period two
    // Verified by updating cells in place instead of synchronously
    #[test]
    fn test_blinker_oscillates() {
        let start = blinker();
        let once = step(&start, 1);

        let mut vertical = Array2::from_elem((5, 5), DEAD);
        for y in 1..=3 {
            vertical[[y, 2]] = ALIVE;
        }
        assert_eq!(once, vertical);
        assert_eq!(step(&start, 2), start);
        assert_eq!(step(&start, 0), start);
    }

    // Tests only bushes and sand paint affects the grid
    // Verified by painting every provided tile
    #[test]
    fn test_apply_paint() {
        let mut grid = Array2::from_elem((2, 2), DEAD);
        let painted = array![
            [Some(TileKind::Bushes), Some(TileKind::Water)],
            [None, Some(TileKind::Sand)]
        ];
        apply_paint(&mut grid, &painted);
        assert_eq!(grid, array![[ALIVE, DEAD], [DEAD, DEAD]]);
    }

    // Tests previous grids are decoded and unknown ordinals rejected
    // Verified by mapping unknown ordinals to sand
    #[test]
    fn test_from_matrix() {
        let decoded = from_matrix(&array![[6_u8, 4], [4, 6]]).unwrap();
        assert_eq!(decoded, array![[ALIVE, DEAD], [DEAD, ALIVE]]);
        assert!(matches!(
            from_matrix(&array![[6_u8, 9]]),
            Err(AlgorithmError::InvalidConfiguration { .. })
        ));
    }

    // Tests generated maps only hold bushes and sand and are reproducible
    // Verified by seeding the initial grid from entropy
    #[test]
    fn test_generate() {
        let first = generate(10, 7, 3, 5);
        assert_eq!(first.dim(), (7, 10));
        assert!(
            first
                .iter()
                .all(|&t| t == ALIVE.ordinal() || t == DEAD.ordinal())
        );
        assert_eq!(first, generate(10, 7, 3, 5));
    }
}
