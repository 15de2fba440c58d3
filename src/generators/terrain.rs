//! Layered terrain-rule cellular automaton
//!
//! Every step rewrites the whole grid synchronously. For each cell the rules
//! are tried in priority order and the first matching one decides the next
//! tile; unmatched cells keep their tile. Neighbourhoods are 8-directional
//! and positions beyond the edge count as deep water.

use crate::generators::{EIGHT_NEIGHBORHOOD, random_tile};
use crate::io::error::{Result, invalid_configuration, invalid_parameter};
use crate::spatial::grid::TileMatrix;
use crate::spatial::tiles::{TileKind, TileSet};
use ndarray::Array2;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Rewrite `source` into `target` when the count of neighbours in
/// `neighbors` lies within the optional bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerrainRule {
    /// Tile the rule applies to
    pub source: TileKind,
    /// Tile written when the rule fires
    pub target: TileKind,
    /// Neighbour kinds that are counted
    pub neighbors: TileSet,
    /// Inclusive lower bound on the count
    pub min_count: Option<usize>,
    /// Inclusive upper bound on the count
    pub max_count: Option<usize>,
}

impl TerrainRule {
    const fn new(
        source: TileKind,
        target: TileKind,
        neighbors: TileSet,
        min_count: Option<usize>,
        max_count: Option<usize>,
    ) -> Self {
        Self {
            source,
            target,
            neighbors,
            min_count,
            max_count,
        }
    }

    /// Whether the count bounds accept `count`
    pub fn count_matches(&self, count: usize) -> bool {
        self.min_count.is_none_or(|min| count >= min) && self.max_count.is_none_or(|max| count <= max)
    }

    /// Whether the rule fires for a tile with the given neighbours
    ///
    /// A zero `randomness` makes the rule deterministic; otherwise a matching
    /// rule fires only when a uniform draw falls below `randomness`.
    pub fn fires<R: Rng + ?Sized>(
        &self,
        tile: TileKind,
        neighbors: &[TileKind],
        randomness: f64,
        rng: &mut R,
    ) -> bool {
        if tile != self.source {
            return false;
        }
        let count = neighbors
            .iter()
            .filter(|&&n| self.neighbors.contains(n))
            .count();
        if !self.count_matches(count) {
            return false;
        }
        randomness == 0.0 || rng.random::<f64>() < randomness
    }
}

/// Default rule stack: coastal cleanup, beaches, terrain transitions, vegetation
pub fn default_rules() -> Vec<TerrainRule> {
    use TileKind::{Bushes, CoastalWater, DeepWater, Forest, Grass, Sand, Water, WetSand};

    let water = TileSet::water_family();
    let land = TileSet::from_kinds(&[Forest, Bushes, Grass, Sand, WetSand]);
    let grass = TileSet::single(Grass);
    let bushes = TileSet::single(Bushes);
    let forest = TileSet::single(Forest);

    vec![
        // Foliage touching water becomes sand
        TerrainRule::new(Forest, Sand, water, Some(1), None),
        TerrainRule::new(Bushes, Sand, water, Some(1), None),
        // Beaches
        TerrainRule::new(Grass, Sand, water, Some(1), None),
        TerrainRule::new(Sand, WetSand, water, Some(2), None),
        // Erosion toward water
        TerrainRule::new(WetSand, CoastalWater, land, None, Some(4)),
        TerrainRule::new(CoastalWater, Water, land, None, Some(2)),
        TerrainRule::new(Water, DeepWater, land, None, Some(1)),
        // Sediment buildup away from water
        TerrainRule::new(DeepWater, Water, land, Some(1), None),
        TerrainRule::new(Water, CoastalWater, land, Some(2), None),
        TerrainRule::new(CoastalWater, WetSand, land, Some(5), None),
        TerrainRule::new(WetSand, Sand, land, Some(6), None),
        TerrainRule::new(Sand, Grass, land, Some(7), None),
        // Vegetation birth
        TerrainRule::new(Grass, Bushes, grass, Some(8), Some(8)),
        TerrainRule::new(Grass, Bushes, bushes, Some(2), Some(7)),
        TerrainRule::new(Bushes, Forest, bushes, Some(8), Some(8)),
        TerrainRule::new(Bushes, Forest, forest, Some(3), Some(6)),
        // Vegetation survival
        TerrainRule::new(Bushes, Bushes, bushes, Some(2), Some(7)),
        TerrainRule::new(Forest, Forest, forest, Some(3), Some(6)),
        // Vegetation dying
        TerrainRule::new(Bushes, Grass, bushes, None, Some(1)),
        TerrainRule::new(Bushes, Grass, bushes, Some(8), Some(8)),
        TerrainRule::new(Forest, Bushes, forest, None, Some(2)),
        TerrainRule::new(Forest, Bushes, forest, Some(7), Some(8)),
    ]
}

/// Settings for a terrain automaton run
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainConfig {
    /// Number of columns
    pub width: usize,
    /// Number of rows
    pub height: usize,
    /// Number of synchronous steps
    pub iterations: usize,
    /// Chance that a matching rule fires, `0.0` for deterministic rules
    pub randomness: f64,
    /// Seed for the random initial grid and rule draws
    pub seed: u64,
}

/// Terrain automaton with its rule stack
#[derive(Debug, Clone)]
pub struct TerrainAutomaton {
    rules: Vec<TerrainRule>,
}

impl Default for TerrainAutomaton {
    fn default() -> Self {
        Self::new(default_rules())
    }
}

impl TerrainAutomaton {
    /// Automaton with a custom rule stack
    pub const fn new(rules: Vec<TerrainRule>) -> Self {
        Self { rules }
    }

    /// Rules in priority order
    pub fn rules(&self) -> &[TerrainRule] {
        &self.rules
    }

    /// Build the starting grid: painted tiles are kept, the rest is random
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if `painted` does not match the dimensions
    pub fn initialize<R: Rng + ?Sized>(
        width: usize,
        height: usize,
        painted: Option<&Array2<Option<TileKind>>>,
        rng: &mut R,
    ) -> Result<Array2<TileKind>> {
        if let Some(painted) = painted {
            if painted.dim() != (height, width) {
                return Err(invalid_configuration(&format!(
                    "painted tiles do not match the {width}x{height} grid"
                )));
            }
        }

        let mut painted_count = 0;
        let grid = Array2::from_shape_fn((height, width), |(y, x)| {
            match painted.and_then(|p| p.get([y, x]).copied().flatten()) {
                Some(tile) => {
                    painted_count += 1;
                    tile
                }
                None => random_tile(rng),
            }
        });
        tracing::debug!(
            painted = painted_count,
            random = width * height - painted_count,
            "initialized terrain grid"
        );
        Ok(grid)
    }

    /// Apply one synchronous step
    pub fn step<R: Rng + ?Sized>(
        &self,
        grid: &Array2<TileKind>,
        randomness: f64,
        rng: &mut R,
    ) -> Array2<TileKind> {
        let (height, width) = grid.dim();
        let mut neighbors = Vec::with_capacity(EIGHT_NEIGHBORHOOD.len());

        Array2::from_shape_fn((height, width), |(y, x)| {
            let tile = grid.get([y, x]).copied().unwrap_or(TileKind::DeepWater);
            padded_neighbors(grid, x, y, &mut neighbors);
            self.rules
                .iter()
                .find(|rule| rule.fires(tile, &neighbors, randomness, rng))
                .map_or(tile, |rule| rule.target)
        })
    }

    /// Run the automaton from a random (optionally painted) grid
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `InvalidParameter`: randomness lies outside `[0, 1]`
    /// - `InvalidConfiguration`: painted tiles do not match the dimensions
    pub fn generate(
        &self,
        config: &TerrainConfig,
        painted: Option<&Array2<Option<TileKind>>>,
    ) -> Result<TileMatrix> {
        if !(0.0..=1.0).contains(&config.randomness) {
            return Err(invalid_parameter(
                "randomness",
                &config.randomness,
                &"must lie within [0, 1]",
            ));
        }

        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut grid = Self::initialize(config.width, config.height, painted, &mut rng)?;

        for iteration in 0..config.iterations {
            grid = self.step(&grid, config.randomness, &mut rng);
            tracing::debug!(iteration, "terrain iteration complete");
        }

        Ok(grid.mapv(TileKind::ordinal))
    }
}

// Beyond the edge counts as deep water so coasts form along the border
fn padded_neighbors(grid: &Array2<TileKind>, x: usize, y: usize, out: &mut Vec<TileKind>) {
    out.clear();
    for (dx, dy) in EIGHT_NEIGHBORHOOD {
        let tile = x
            .checked_add_signed(dx)
            .zip(y.checked_add_signed(dy))
            .and_then(|(nx, ny)| grid.get([ny, nx]).copied())
            .unwrap_or(TileKind::DeepWater);
        out.push(tile);
    }
}
