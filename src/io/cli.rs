//! Command-line interface for single maps and batch sweeps

use crate::io::batch::{BatchConfig, BatchRunner};
use crate::io::configuration::{
    BATCH_HEIGHT, BATCH_MAPS_PER_METHOD, BATCH_OUTPUT_DIR, BATCH_WIDTH, DEFAULT_ITERATIONS,
    DEFAULT_PIXELS_PER_TILE, DEFAULT_RANDOMNESS_FACTOR,
};
use crate::io::error::{AlgorithmError, Result};
use crate::io::image::export_tiles_as_png;
use crate::io::prefill::read_painted_png;
use crate::io::request::{GenerateRequest, GenerateResponse, GenerationMethod, generate_tiles};
use crate::io::summary::{SummaryConfig, summarize};
use crate::spatial::grid::to_rows;
use clap::{Args, Parser, Subcommand};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "terrawave")]
#[command(
    author,
    version,
    about = "Generate terrain tile maps with constraint propagation, automata or noise"
)]
/// Command-line arguments for the map generation tool
pub struct Cli {
    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Operation to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available operations
#[derive(Subcommand)]
pub enum Command {
    /// Generate one map and print or store its metrics
    Generate(GenerateArgs),
    /// Sweep generator parameters and store one JSON result per map
    Batch(BatchArgs),
    /// Summarise stored batch results into CSV tables
    Analyze(AnalyzeArgs),
}

/// Arguments of the `generate` command
#[derive(Args)]
pub struct GenerateArgs {
    /// Generation method
    #[arg(short, long, value_enum, default_value_t = GenerationMethod::Wfc)]
    pub method: GenerationMethod,

    /// Grid width in tiles
    #[arg(short = 'w', long, default_value_t = BATCH_WIDTH as i64)]
    pub width: i64,

    /// Grid height in tiles
    #[arg(short = 'H', long, default_value_t = BATCH_HEIGHT as i64)]
    pub height: i64,

    /// Random seed for reproducible generation
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Solver attempts before giving up
    #[arg(long)]
    pub max_retries: Option<i64>,

    /// Automaton steps
    #[arg(short, long, default_value_t = DEFAULT_ITERATIONS)]
    pub iterations: usize,

    /// Chance that a matching terrain rule fires
    #[arg(short, long, default_value_t = DEFAULT_RANDOMNESS_FACTOR)]
    pub randomness: f64,

    /// Noise coordinate scale
    #[arg(long)]
    pub noise_scale: Option<f64>,

    /// Noise octave count
    #[arg(long)]
    pub noise_octaves: Option<usize>,

    /// Noise amplitude factor per octave
    #[arg(long)]
    pub noise_persistence: Option<f64>,

    /// Noise frequency factor per octave
    #[arg(long)]
    pub noise_lacunarity: Option<f64>,

    /// Restrict the outer ring to water (solver only)
    #[arg(long)]
    pub border_water: bool,

    /// Restrict a central disk to land (solver only)
    #[arg(long)]
    pub island: bool,

    /// Painted tiles as a JSON matrix of ordinals or a palette PNG
    #[arg(short, long, value_name = "FILE")]
    pub painted: Option<PathBuf>,

    /// Previous grid as a JSON matrix (life automaton only)
    #[arg(long, value_name = "FILE")]
    pub prev_grid: Option<PathBuf>,

    /// Read the whole request from a JSON file, ignoring the other options
    #[arg(long, value_name = "FILE")]
    pub request: Option<PathBuf>,

    /// Write the JSON response here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Also export the map as PNG
    #[arg(long, value_name = "FILE")]
    pub png: Option<PathBuf>,

    /// Pixels per tile in the PNG export
    #[arg(long, default_value_t = DEFAULT_PIXELS_PER_TILE)]
    pub scale: u32,

    /// Skip computing metrics and only print the grid
    #[arg(long)]
    pub grid_only: bool,
}

/// Arguments of the `batch` command
#[derive(Args)]
pub struct BatchArgs {
    /// Root directory for the results
    #[arg(short, long, default_value = BATCH_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Methods to sweep
    #[arg(short, long, value_enum, value_delimiter = ',', default_values_t = [
        GenerationMethod::Terrain,
        GenerationMethod::Noise,
        GenerationMethod::Wfc,
    ])]
    pub methods: Vec<GenerationMethod>,

    /// Maximum maps per method
    #[arg(short = 'n', long, default_value_t = BATCH_MAPS_PER_METHOD)]
    pub maps: usize,

    /// Grid width in tiles
    #[arg(short = 'w', long, default_value_t = BATCH_WIDTH as i64)]
    pub width: i64,

    /// Grid height in tiles
    #[arg(short = 'H', long, default_value_t = BATCH_HEIGHT as i64)]
    pub height: i64,
}

/// Arguments of the `analyze` command
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Batch output directory to read
    #[arg(short, long, default_value = BATCH_OUTPUT_DIR)]
    pub input_dir: PathBuf,

    /// Directory receiving the CSV tables
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Methods to summarise, in table order
    #[arg(short, long, value_enum, value_delimiter = ',', default_values_t = [
        GenerationMethod::Terrain,
        GenerationMethod::Noise,
        GenerationMethod::Wfc,
    ])]
    pub methods: Vec<GenerationMethod>,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Run the selected command
    ///
    /// # Errors
    ///
    /// Returns an error if input files cannot be read, generation fails or
    /// output cannot be written
    pub fn run(self) -> Result<()> {
        let show_progress = self.should_show_progress();
        match self.command {
            Command::Generate(args) => run_generate(&args),
            Command::Batch(args) => {
                let config = BatchConfig {
                    output_dir: args.output_dir,
                    methods: args.methods,
                    maps_per_method: args.maps,
                    width: args.width,
                    height: args.height,
                };
                BatchRunner::new(config, show_progress).run().map(|_| ())
            }
            Command::Analyze(args) => {
                let config = SummaryConfig {
                    input_dir: args.input_dir,
                    output_dir: args.output_dir,
                    methods: args.methods,
                };
                summarize(&config).map(|_| ())
            }
        }
    }
}

impl GenerateArgs {
    /// Build the request from the options or the request file
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced file cannot be read or parsed
    pub fn to_request(&self) -> Result<GenerateRequest> {
        if let Some(ref path) = self.request {
            return read_json(path);
        }

        let painted_tiles = match self.painted {
            Some(ref path) if is_png(path) => read_painted_png(path)?
                .into_iter()
                .map(|row| {
                    row.into_iter()
                        .map(|tile| tile.map_or(-1, |t| i64::from(t.ordinal())))
                        .collect()
                })
                .collect(),
            Some(ref path) => read_json(path)?,
            None => Vec::new(),
        };
        let prev_grid = self.prev_grid.as_deref().map(read_json).transpose()?;

        Ok(GenerateRequest {
            iterations: self.iterations,
            randomness_factor: self.randomness,
            prev_grid,
            painted_tiles,
            seed: self.seed,
            noise_scale: self.noise_scale,
            noise_octaves: self.noise_octaves,
            noise_persistence: self.noise_persistence,
            noise_lacunarity: self.noise_lacunarity,
            wfc_seed: self.seed,
            wfc_max_retries: self.max_retries,
            wfc_border_water: self.border_water,
            wfc_island: self.island,
            ..GenerateRequest::new(self.method, self.width, self.height)
        })
    }
}

fn run_generate(args: &GenerateArgs) -> Result<()> {
    let request = args.to_request()?;
    let tiles = generate_tiles(&request)?;

    if let Some(ref png) = args.png {
        export_tiles_as_png(&tiles, args.scale, png)?;
        tracing::info!(path = %png.display(), "exported map image");
    }

    let destination = args.output.as_deref();
    if args.grid_only {
        write_json(destination, &to_rows(&tiles))
    } else {
        write_json(destination, &GenerateResponse::from_tiles(&tiles))
    }
}

fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|e| AlgorithmError::FileSystem {
        path: path.to_path_buf(),
        operation: "open file",
        source: e,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| AlgorithmError::Serialization {
        path: path.to_path_buf(),
        source: e,
    })
}

fn write_json<T: serde::Serialize>(destination: Option<&Path>, value: &T) -> Result<()> {
    let (mut writer, path): (Box<dyn Write>, PathBuf) = match destination {
        Some(path) => {
            let file = File::create(path).map_err(|e| AlgorithmError::FileSystem {
                path: path.to_path_buf(),
                operation: "create file",
                source: e,
            })?;
            (Box::new(BufWriter::new(file)), path.to_path_buf())
        }
        None => (Box::new(std::io::stdout().lock()), PathBuf::from("<stdout>")),
    };

    serde_json::to_writer_pretty(&mut writer, value).map_err(|e| {
        AlgorithmError::Serialization {
            path: path.clone(),
            source: e,
        }
    })?;
    writeln!(writer).and_then(|()| writer.flush()).map_err(|e| AlgorithmError::FileSystem {
        path,
        operation: "write output",
        source: e,
    })
}
