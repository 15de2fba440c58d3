//! Generation constants and runtime configuration defaults

// Solver defaults
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;
/// Whole-grid attempts before the solver gives up
pub const DEFAULT_MAX_RETRIES: usize = 50;
/// Radius of the land disk placed at the grid centre by island seeding
pub const ISLAND_RADIUS: usize = 3;

// Automaton defaults
/// Default number of synchronous automaton steps
pub const DEFAULT_ITERATIONS: usize = 5;
/// Default chance that a matching terrain rule actually fires
pub const DEFAULT_RANDOMNESS_FACTOR: f64 = 0.0;
/// Probability that a life cell starts alive
pub const LIFE_PROBABILITY: f64 = 0.5;

// Noise defaults
/// Coordinate scale applied before sampling noise
pub const DEFAULT_NOISE_SCALE: f64 = 1.0;
/// Number of fractal octaves
pub const DEFAULT_NOISE_OCTAVES: usize = 4;
/// Amplitude falloff per octave
pub const DEFAULT_NOISE_PERSISTENCE: f64 = 0.9;
/// Frequency multiplier per octave
pub const DEFAULT_NOISE_LACUNARITY: f64 = 1.8;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

// Metrics
/// Largest lag in each axis for spatial autocorrelation
pub const AUTOCORRELATION_MAX_LAG: usize = 5;

// Batch settings
/// Maps generated per method in a batch sweep
pub const BATCH_MAPS_PER_METHOD: usize = 100;
/// Grid width used in batch sweeps
pub const BATCH_WIDTH: usize = 25;
/// Grid height used in batch sweeps
pub const BATCH_HEIGHT: usize = 25;
/// Default directory for batch output
pub const BATCH_OUTPUT_DIR: &str = "output_maps";

// Batch summary settings
/// Per-map metrics table written by the summary
pub const SUMMARY_INDIVIDUAL_FILE: &str = "map_metrics_individual.csv";
/// Per-method averages table written by the summary
pub const SUMMARY_AVERAGES_FILE: &str = "map_metrics_averages.csv";
/// The low-frequency band spans `1 / LOW_FREQUENCY_DIVISOR` of each spectrum axis
pub const LOW_FREQUENCY_DIVISOR: usize = 4;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

// Output settings
/// Default pixel size of one tile in PNG exports
pub const DEFAULT_PIXELS_PER_TILE: u32 = 8;

/// RGBA colour for each tile ordinal, deep water first
pub const TILE_PALETTE: [[u8; 4]; 8] = [
    [0x0b, 0x2e, 0x6b, 0xff],
    [0x1f, 0x5f, 0xb4, 0xff],
    [0x4f, 0x9d, 0xd9, 0xff],
    [0xc9, 0xb2, 0x7c, 0xff],
    [0xec, 0xd9, 0x9c, 0xff],
    [0x7b, 0xc0, 0x4f, 0xff],
    [0x3f, 0x8f, 0x3a, 0xff],
    [0x1d, 0x5a, 0x26, 0xff],
];

/// Palette colours formatted as `#rrggbb` strings
pub fn palette_hex() -> Vec<String> {
    TILE_PALETTE
        .iter()
        .map(|[r, g, b, _]| format!("#{r:02x}{g:02x}{b:02x}"))
        .collect()
}
