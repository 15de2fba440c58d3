//! Fractal Perlin noise thresholded into the tile gradient
//!
//! Samples are taken at `(x / width * scale, y / height * scale)`, mapped
//! from `[-1, 1]` to `[0, 1]` and bucketed by [`THRESHOLDS`]. Low values
//! become deep water and high values forest.

use crate::io::configuration::{
    DEFAULT_NOISE_LACUNARITY, DEFAULT_NOISE_OCTAVES, DEFAULT_NOISE_PERSISTENCE, DEFAULT_NOISE_SCALE,
    DEFAULT_SEED,
};
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::grid::TileMatrix;
use crate::spatial::tiles::TileKind;
use ndarray::Array2;
use noise::{Fbm, MultiFractal, NoiseFn, Perlin};

/// Upper bound of each normalised noise bucket and the tile it maps to
pub const THRESHOLDS: [(f64, TileKind); 8] = [
    (0.2, TileKind::DeepWater),
    (0.4, TileKind::Water),
    (0.5, TileKind::CoastalWater),
    (0.55, TileKind::WetSand),
    (0.6, TileKind::Sand),
    (0.7, TileKind::Grass),
    (0.8, TileKind::Bushes),
    (1.0, TileKind::Forest),
];

/// Map a normalised noise value onto the tile gradient
pub fn tile_for_value(value: f64) -> TileKind {
    THRESHOLDS
        .iter()
        .find(|&&(max, _)| value <= max)
        .map_or(TileKind::Forest, |&(_, tile)| tile)
}

/// Fold a 64-bit seed into the 32-bit noise seed, keeping the high bits
pub const fn fold_seed(seed: u64) -> u32 {
    (seed ^ (seed >> 32)) as u32
}

/// Parameters of the fractal noise
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseConfig {
    /// Noise seed
    pub seed: u32,
    /// Coordinate scale across the whole grid
    pub scale: f64,
    /// Number of fBm octaves
    pub octaves: usize,
    /// Amplitude factor between octaves
    pub persistence: f64,
    /// Frequency factor between octaves
    pub lacunarity: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            seed: fold_seed(DEFAULT_SEED),
            scale: DEFAULT_NOISE_SCALE,
            octaves: DEFAULT_NOISE_OCTAVES,
            persistence: DEFAULT_NOISE_PERSISTENCE,
            lacunarity: DEFAULT_NOISE_LACUNARITY,
        }
    }
}

impl NoiseConfig {
    /// Reject parameters the noise source cannot use
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for zero octaves or a non-finite or
    /// non-positive scale, persistence or lacunarity
    pub fn validate(&self) -> Result<()> {
        if self.octaves == 0 || self.octaves > Fbm::<Perlin>::MAX_OCTAVES {
            return Err(invalid_parameter(
                "octaves",
                &self.octaves,
                &format!("must lie within 1..={}", Fbm::<Perlin>::MAX_OCTAVES),
            ));
        }
        for (parameter, value) in [
            ("scale", self.scale),
            ("persistence", self.persistence),
            ("lacunarity", self.lacunarity),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid_parameter(parameter, &value, &"must be positive"));
            }
        }
        Ok(())
    }
}

/// Noise-based map generator
#[derive(Debug, Clone)]
pub struct NoiseGenerator {
    config: NoiseConfig,
    source: Fbm<Perlin>,
}

impl NoiseGenerator {
    /// Build the fBm source for `config`
    ///
    /// # Errors
    ///
    /// See [`NoiseConfig::validate`]
    pub fn new(config: NoiseConfig) -> Result<Self> {
        config.validate()?;
        let source = Fbm::<Perlin>::new(config.seed)
            .set_octaves(config.octaves)
            .set_persistence(config.persistence)
            .set_lacunarity(config.lacunarity);
        Ok(Self { config, source })
    }

    /// Parameters in use
    pub const fn config(&self) -> &NoiseConfig {
        &self.config
    }

    /// Normalised noise value in `[0, 1]` at a cell
    pub fn sample(&self, x: usize, y: usize, width: usize, height: usize) -> f64 {
        let nx = x as f64 / width.max(1) as f64 * self.config.scale;
        let ny = y as f64 / height.max(1) as f64 * self.config.scale;
        let raw = self.source.get([nx, ny]);
        ((raw + 1.0) * 0.5).clamp(0.0, 1.0)
    }

    /// Generate a `height x width` tile matrix
    pub fn generate(&self, width: usize, height: usize) -> TileMatrix {
        let values = Array2::from_shape_fn((height, width), |(y, x)| {
            self.sample(x, y, width, height)
        });

        if !values.is_empty() {
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            tracing::debug!(
                scale = self.config.scale,
                min,
                max,
                mean = values.mean().unwrap_or_default(),
                samples = values.len(),
                "sampled perlin noise"
            );
        }

        values.mapv(|value| tile_for_value(value).ordinal())
    }
}
