//! Game-of-Life automaton drawn with bushes (alive) and sand (dead)

use crate::generators::EIGHT_NEIGHBORHOOD;
use crate::io::configuration::LIFE_PROBABILITY;
use crate::io::error::{Result, invalid_configuration};
use crate::spatial::grid::TileMatrix;
use crate::spatial::tiles::TileKind;
use ndarray::Array2;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Tile drawn for a live cell
pub const ALIVE: TileKind = TileKind::Bushes;
/// Tile drawn for a dead cell
pub const DEAD: TileKind = TileKind::Sand;

/// Rewrite rule keyed on the number of live neighbours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifeRule {
    /// Required current state, `None` matches any
    pub current: Option<TileKind>,
    /// State written when the rule fires
    pub target: TileKind,
    /// Inclusive lower bound on live neighbours
    pub min_count: usize,
    /// Inclusive upper bound on live neighbours, `None` for unbounded
    pub max_count: Option<usize>,
}

impl LifeRule {
    /// Whether the rule applies to a cell with `alive` live neighbours
    pub fn applies(&self, tile: TileKind, alive: usize) -> bool {
        if self.current.is_some_and(|current| current != tile) {
            return false;
        }
        alive >= self.min_count && self.max_count.is_none_or(|max| alive <= max)
    }
}

/// Conway rules: survival on 2–3, birth on 3, death otherwise
pub const fn life_rules() -> [LifeRule; 4] {
    [
        LifeRule {
            current: Some(ALIVE),
            target: ALIVE,
            min_count: 2,
            max_count: Some(3),
        },
        LifeRule {
            current: Some(DEAD),
            target: ALIVE,
            min_count: 3,
            max_count: Some(3),
        },
        LifeRule {
            current: None,
            target: DEAD,
            min_count: 0,
            max_count: Some(1),
        },
        LifeRule {
            current: None,
            target: DEAD,
            min_count: 4,
            max_count: None,
        },
    ]
}

/// Random grid where each cell is alive with `LIFE_PROBABILITY`
pub fn random_grid<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Array2<TileKind> {
    Array2::from_shape_fn((height, width), |_| {
        if rng.random::<f64>() < LIFE_PROBABILITY {
            ALIVE
        } else {
            DEAD
        }
    })
}

/// Rebuild a life grid from a previous tile matrix
///
/// # Errors
///
/// Returns `InvalidConfiguration` if the matrix contains an unknown ordinal
pub fn from_matrix(matrix: &TileMatrix) -> Result<Array2<TileKind>> {
    let tiles = matrix
        .iter()
        .map(|&ordinal| {
            TileKind::from_ordinal(ordinal).ok_or_else(|| {
                invalid_configuration(&format!("previous grid holds unknown tile {ordinal}"))
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Array2::from_shape_vec(matrix.dim(), tiles).map_err(|e| invalid_configuration(&e))
}

/// Force painted cells alive (bushes) or dead (sand); other paint is ignored
pub fn apply_paint(grid: &mut Array2<TileKind>, painted: &Array2<Option<TileKind>>) {
    for ((y, x), tile) in painted.indexed_iter() {
        let state = match tile {
            Some(TileKind::Bushes) => ALIVE,
            Some(TileKind::Sand) => DEAD,
            _ => continue,
        };
        if let Some(cell) = grid.get_mut([y, x]) {
            *cell = state;
        }
    }
}

/// Apply `iterations` synchronous steps
pub fn step(grid: &Array2<TileKind>, iterations: usize) -> Array2<TileKind> {
    let rules = life_rules();
    let mut current = grid.clone();

    for iteration in 0..iterations {
        let (height, width) = current.dim();
        current = Array2::from_shape_fn((height, width), |(y, x)| {
            let tile = current.get([y, x]).copied().unwrap_or(DEAD);
            let alive = live_neighbors(&current, x, y);
            rules
                .iter()
                .find(|rule| rule.applies(tile, alive))
                .map_or(tile, |rule| rule.target)
        });
        tracing::debug!(iteration, "life iteration complete");
    }

    current
}

/// Random start followed by `iterations` steps
pub fn generate(width: usize, height: usize, iterations: usize, seed: u64) -> TileMatrix {
    let mut rng = StdRng::seed_from_u64(seed);
    step(&random_grid(width, height, &mut rng), iterations).mapv(TileKind::ordinal)
}

// Edge cells simply have fewer neighbours
fn live_neighbors(grid: &Array2<TileKind>, x: usize, y: usize) -> usize {
    EIGHT_NEIGHBORHOOD
        .iter()
        .filter_map(|&(dx, dy)| {
            let nx = x.checked_add_signed(dx)?;
            let ny = y.checked_add_signed(dy)?;
            grid.get([ny, nx]).copied()
        })
        .filter(|&tile| tile == ALIVE)
        .count()
}
