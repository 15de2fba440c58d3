//! Generate request and response model with the method dispatcher
//!
//! The JSON shape uses camelCase field names. Dimensions arrive as signed
//! integers and are validated before any generator runs.

use crate::algorithm::executor::{Solver, SolverConfig};
use crate::analysis::report::MetricsReport;
use crate::generators::life;
use crate::generators::noise::{NoiseConfig, NoiseGenerator, fold_seed};
use crate::generators::terrain::{TerrainAutomaton, TerrainConfig};
use crate::io::configuration::{
    AUTOCORRELATION_MAX_LAG, DEFAULT_ITERATIONS, DEFAULT_MAX_RETRIES, DEFAULT_NOISE_LACUNARITY,
    DEFAULT_NOISE_OCTAVES, DEFAULT_NOISE_PERSISTENCE, DEFAULT_NOISE_SCALE, DEFAULT_SEED,
    MAX_GRID_DIMENSION, palette_hex,
};
use crate::io::error::{Result, invalid_configuration, invalid_parameter, require_positive};
use crate::io::prefill::{SeedConfiguration, parse_painted};
use crate::spatial::grid::{TileMatrix, from_rows, to_rows};
use crate::spatial::tiles::TileKind;
use clap::ValueEnum;
use ndarray::Array2;
use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Map generation method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMethod {
    /// Constraint-propagation tile solver
    Wfc,
    /// Layered terrain-rule automaton
    #[serde(alias = "mlca")]
    #[value(alias = "mlca")]
    Terrain,
    /// Game-of-Life automaton
    #[serde(alias = "ca")]
    #[value(alias = "ca")]
    Life,
    /// Thresholded fractal noise
    Noise,
}

impl fmt::Display for GenerationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Wfc => "wfc",
            Self::Terrain => "terrain",
            Self::Life => "life",
            Self::Noise => "noise",
        })
    }
}

const fn default_iterations() -> usize {
    DEFAULT_ITERATIONS
}

/// Parameters of one generation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Generator to run
    pub generation_method: GenerationMethod,
    /// Number of columns, must be positive
    pub width: i64,
    /// Number of rows, must be positive
    pub height: i64,
    /// Automaton steps
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    /// Chance that a matching terrain rule fires
    #[serde(default)]
    pub randomness_factor: f64,
    /// Grid to continue from (life automaton only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev_grid: Option<Vec<Vec<u8>>>,
    /// Painted tile ordinals, negative for unpainted cells
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub painted_tiles: Vec<Vec<i64>>,
    /// Seed for the automata and the noise source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Noise coordinate scale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noise_scale: Option<f64>,
    /// Noise octave count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noise_octaves: Option<usize>,
    /// Noise amplitude factor per octave
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noise_persistence: Option<f64>,
    /// Noise frequency factor per octave
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noise_lacunarity: Option<f64>,
    /// Solver seed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wfc_seed: Option<u64>,
    /// Solver attempt bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wfc_max_retries: Option<i64>,
    /// Restrict the solver's outer ring to water
    #[serde(default)]
    pub wfc_border_water: bool,
    /// Restrict a central disk to land
    #[serde(default)]
    pub wfc_island: bool,
}

impl GenerateRequest {
    /// Request with default parameters for `method`
    pub const fn new(generation_method: GenerationMethod, width: i64, height: i64) -> Self {
        Self {
            generation_method,
            width,
            height,
            iterations: DEFAULT_ITERATIONS,
            randomness_factor: 0.0,
            prev_grid: None,
            painted_tiles: Vec::new(),
            seed: None,
            noise_scale: None,
            noise_octaves: None,
            noise_persistence: None,
            noise_lacunarity: None,
            wfc_seed: None,
            wfc_max_retries: None,
            wfc_border_water: false,
            wfc_island: false,
        }
    }

    /// Noise parameters with defaults for the unset fields
    pub fn noise_config(&self) -> NoiseConfig {
        NoiseConfig {
            seed: fold_seed(self.seed.unwrap_or(DEFAULT_SEED)),
            scale: self.noise_scale.unwrap_or(DEFAULT_NOISE_SCALE),
            octaves: self.noise_octaves.unwrap_or(DEFAULT_NOISE_OCTAVES),
            persistence: self.noise_persistence.unwrap_or(DEFAULT_NOISE_PERSISTENCE),
            lacunarity: self.noise_lacunarity.unwrap_or(DEFAULT_NOISE_LACUNARITY),
        }
    }

    /// Solver seeding derived from the painted tiles and boolean flags
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` for painted values that are not tile kinds
    pub fn seed_configuration(&self) -> Result<SeedConfiguration> {
        let mut seeding = if self.painted_tiles.is_empty() {
            SeedConfiguration::new()
        } else {
            SeedConfiguration::from_painted(&self.painted_tiles)?
        };
        if self.wfc_border_water {
            seeding = seeding.with_border_water();
        }
        if self.wfc_island {
            seeding = seeding.with_island();
        }
        Ok(seeding)
    }
}

/// Generated grid with its palette and metrics
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    /// Tile ordinals, row-major
    pub grid: Vec<Vec<u8>>,
    /// Hex colour for each tile ordinal
    pub colors: Vec<String>,
    /// Metrics over `grid`
    #[serde(flatten)]
    pub metrics: MetricsReport,
}

impl GenerateResponse {
    /// Attach palette and metrics to a generated matrix
    pub fn from_tiles(tiles: &TileMatrix) -> Self {
        Self {
            grid: to_rows(tiles),
            colors: palette_hex(),
            metrics: MetricsReport::compute(tiles, AUTOCORRELATION_MAX_LAG),
        }
    }
}

/// Validate a request and run its generator
///
/// # Errors
///
/// Returns an error if:
/// - `InvalidDimensions`: width, height or solver retry bound is not positive
/// - `InvalidConfiguration`: painted tiles or a previous grid do not fit
/// - `InvalidParameter`: a generator parameter is out of range
/// - `SolveExhausted`: the solver found no consistent grid
pub fn generate_tiles(request: &GenerateRequest) -> Result<TileMatrix> {
    let width = require_positive("width", request.width)?;
    let height = require_positive("height", request.height)?;
    for (parameter, value) in [("width", width), ("height", height)] {
        if value > MAX_GRID_DIMENSION {
            return Err(invalid_parameter(
                parameter,
                &value,
                &format!("must not exceed {MAX_GRID_DIMENSION}"),
            ));
        }
    }
    let seed = request.seed.unwrap_or(DEFAULT_SEED);

    match request.generation_method {
        GenerationMethod::Wfc => {
            let max_retries = request
                .wfc_max_retries
                .map_or(Ok(DEFAULT_MAX_RETRIES), |value| {
                    require_positive("max_retries", value)
                })?;
            let config = SolverConfig::new(width, height)
                .with_max_retries(max_retries)
                .with_seed(request.wfc_seed.unwrap_or(DEFAULT_SEED));
            let seeding = request.seed_configuration()?;
            let outcome = Solver::new().solve(&config, (!seeding.is_empty()).then_some(&seeding))?;
            Ok(outcome.tiles)
        }
        GenerationMethod::Terrain => {
            let painted = painted_matrix(&request.painted_tiles, width, height)?;
            let config = TerrainConfig {
                width,
                height,
                iterations: request.iterations,
                randomness: request.randomness_factor,
                seed,
            };
            TerrainAutomaton::default().generate(&config, painted.as_ref())
        }
        GenerationMethod::Life => {
            let mut grid = match request.prev_grid.as_deref() {
                Some(rows) if !rows.is_empty() => {
                    let matrix = from_rows(rows)?;
                    if matrix.dim() != (height, width) {
                        return Err(invalid_configuration(&format!(
                            "previous grid does not match the {width}x{height} grid"
                        )));
                    }
                    life::from_matrix(&matrix)?
                }
                _ => {
                    let mut rng = StdRng::seed_from_u64(seed);
                    life::random_grid(width, height, &mut rng)
                }
            };
            if let Some(painted) = painted_matrix(&request.painted_tiles, width, height)? {
                life::apply_paint(&mut grid, &painted);
            }
            Ok(life::step(&grid, request.iterations).mapv(TileKind::ordinal))
        }
        GenerationMethod::Noise => {
            Ok(NoiseGenerator::new(request.noise_config())?.generate(width, height))
        }
    }
}

/// Validate a request, run its generator and compute the metrics
///
/// # Errors
///
/// See [`generate_tiles`]
pub fn handle_generate(request: &GenerateRequest) -> Result<GenerateResponse> {
    let tiles = generate_tiles(request)?;
    tracing::debug!(
        method = %request.generation_method,
        width = tiles.ncols(),
        height = tiles.nrows(),
        "generated map"
    );
    Ok(GenerateResponse::from_tiles(&tiles))
}

// Empty input means nothing was painted
fn painted_matrix(
    rows: &[Vec<i64>],
    width: usize,
    height: usize,
) -> Result<Option<Array2<Option<TileKind>>>> {
    if rows.is_empty() {
        return Ok(None);
    }
    let tiles = parse_painted(rows)?;
    if tiles.len() != height || tiles.iter().any(|row| row.len() != width) {
        return Err(invalid_configuration(&format!(
            "painted tiles do not match the {width}x{height} grid"
        )));
    }
    Array2::from_shape_vec((height, width), tiles.concat())
        .map(Some)
        .map_err(|e| invalid_configuration(&e))
}
