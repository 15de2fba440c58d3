//! Parameter sweeps that write one JSON result per generated map
//!
//! Each method gets its own subdirectory under the output directory. A map
//! that fails to generate or write is logged and skipped; the sweep goes on.

use crate::io::configuration::{
    BATCH_HEIGHT, BATCH_MAPS_PER_METHOD, BATCH_WIDTH, DEFAULT_NOISE_LACUNARITY,
    DEFAULT_NOISE_PERSISTENCE,
};
use crate::io::error::{AlgorithmError, Result};
use crate::io::progress::ProgressManager;
use crate::io::request::{GenerateRequest, GenerateResponse, GenerationMethod, handle_generate};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Stored record of one batch map
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultData {
    /// Request that produced the map
    pub request_params: GenerateRequest,
    /// Generated grid and its metrics
    pub response_metrics: GenerateResponse,
    /// Wall-clock generation time
    pub generation_time_ms: u64,
}

/// One planned map: the request and its output file name
#[derive(Debug, Clone, PartialEq)]
pub struct BatchItem {
    /// Request to run
    pub request: GenerateRequest,
    /// File name within the method directory
    pub file_name: String,
}

/// Outcome counts of a sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Maps written
    pub written: usize,
    /// Maps skipped after an error
    pub failed: usize,
}

/// Sweep settings
#[derive(Debug, Clone, PartialEq)]
pub struct BatchConfig {
    /// Root directory for the per-method subdirectories
    pub output_dir: PathBuf,
    /// Methods to sweep, in order
    pub methods: Vec<GenerationMethod>,
    /// Upper bound on maps per method
    pub maps_per_method: usize,
    /// Grid width of every map
    pub width: i64,
    /// Grid height of every map
    pub height: i64,
}

impl BatchConfig {
    /// Standard sweep over the terrain, noise and solver methods
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            methods: vec![
                GenerationMethod::Terrain,
                GenerationMethod::Noise,
                GenerationMethod::Wfc,
            ],
            maps_per_method: BATCH_MAPS_PER_METHOD,
            width: BATCH_WIDTH as i64,
            height: BATCH_HEIGHT as i64,
        }
    }
}

/// Planned maps for one method, capped at `config.maps_per_method`
///
/// - terrain: iterations `1..=10` crossed with randomness `0.0..=0.9`
/// - noise: scale `0.2..=2.0` crossed with octaves `1..=10`
/// - wfc: solver seeds `1..=maps_per_method`
/// - life: automaton seeds `1..=maps_per_method`
pub fn plan(config: &BatchConfig, method: GenerationMethod) -> Vec<BatchItem> {
    let base = GenerateRequest::new(method, config.width, config.height);

    let items: Vec<BatchItem> = match method {
        GenerationMethod::Terrain => (1..=10)
            .flat_map(|iterations| (0..10).map(move |j| (iterations, f64::from(j) * 0.1)))
            .map(|(iterations, randomness)| BatchItem {
                request: GenerateRequest {
                    iterations,
                    randomness_factor: randomness,
                    ..base.clone()
                },
                file_name: format!("terrain_iter_{iterations}_rand_{randomness:.2}.json"),
            })
            .collect(),
        GenerationMethod::Noise => (0..10)
            .flat_map(|i| (1..=10).map(move |octaves| (f64::from(i).mul_add(0.2, 0.2), octaves)))
            .map(|(scale, octaves)| BatchItem {
                request: GenerateRequest {
                    noise_scale: Some(scale),
                    noise_octaves: Some(octaves),
                    noise_persistence: Some(DEFAULT_NOISE_PERSISTENCE),
                    noise_lacunarity: Some(DEFAULT_NOISE_LACUNARITY),
                    ..base.clone()
                },
                file_name: format!("noise_scale_{scale:.2}_oct_{octaves}.json"),
            })
            .collect(),
        GenerationMethod::Wfc => (1..=config.maps_per_method as u64)
            .map(|seed| BatchItem {
                request: GenerateRequest {
                    wfc_seed: Some(seed),
                    ..base.clone()
                },
                file_name: format!("wfc_seed_{seed}.json"),
            })
            .collect(),
        GenerationMethod::Life => (1..=config.maps_per_method as u64)
            .map(|seed| BatchItem {
                request: GenerateRequest {
                    seed: Some(seed),
                    ..base.clone()
                },
                file_name: format!("life_seed_{seed}.json"),
            })
            .collect(),
    };

    items.into_iter().take(config.maps_per_method).collect()
}

/// Runs a sweep and writes its result files
pub struct BatchRunner {
    config: BatchConfig,
    progress: Option<ProgressManager>,
}

impl BatchRunner {
    /// Runner with optional progress display
    pub fn new(config: BatchConfig, show_progress: bool) -> Self {
        Self {
            config,
            progress: show_progress.then(ProgressManager::new),
        }
    }

    /// Settings in use
    pub const fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Generate and store every planned map
    ///
    /// # Errors
    ///
    /// Returns `FileSystem` if a method directory cannot be created; failures
    /// of individual maps are counted in the summary instead
    pub fn run(&mut self) -> Result<BatchSummary> {
        let plans: Vec<(GenerationMethod, Vec<BatchItem>)> = self
            .config
            .methods
            .iter()
            .map(|&method| (method, plan(&self.config, method)))
            .collect();

        if let Some(ref mut pm) = self.progress {
            pm.initialize(plans.iter().map(|(_, items)| items.len()).sum());
        }

        let mut summary = BatchSummary::default();
        for (method, items) in plans {
            let method_dir = self.config.output_dir.join(method.to_string());
            std::fs::create_dir_all(&method_dir).map_err(|e| AlgorithmError::FileSystem {
                path: method_dir.clone(),
                operation: "create directory",
                source: e,
            })?;
            tracing::info!(%method, maps = items.len(), "starting batch generation");

            let bar = self
                .progress
                .as_mut()
                .map(|pm| pm.add_method(&method.to_string(), items.len()));

            for item in &items {
                let path = method_dir.join(&item.file_name);
                match generate_and_save(&item.request, &path) {
                    Ok(elapsed_ms) => {
                        summary.written += 1;
                        tracing::info!(path = %path.display(), elapsed_ms, "saved map");
                    }
                    Err(e) => {
                        summary.failed += 1;
                        tracing::warn!(path = %path.display(), error = %e, "map failed");
                    }
                }
                if let (Some(pm), Some(index)) = (&self.progress, bar) {
                    pm.advance(index, &item.file_name);
                }
            }

            if let (Some(pm), Some(index)) = (&self.progress, bar) {
                pm.finish_method(index);
            }
        }

        if let Some(ref pm) = self.progress {
            pm.finish();
        }
        tracing::info!(
            written = summary.written,
            failed = summary.failed,
            "batch generation complete"
        );
        Ok(summary)
    }
}

/// Run one request and write its pretty-printed `ResultData`, returning the elapsed milliseconds
///
/// # Errors
///
/// Returns the generation error, or `FileSystem`/`Serialization` if the
/// result cannot be written
pub fn generate_and_save(request: &GenerateRequest, path: &Path) -> Result<u64> {
    let start = Instant::now();
    let response = handle_generate(request)?;
    let generation_time_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

    let result = ResultData {
        request_params: request.clone(),
        response_metrics: response,
        generation_time_ms,
    };

    let file = File::create(path).map_err(|e| AlgorithmError::FileSystem {
        path: path.to_path_buf(),
        operation: "create file",
        source: e,
    })?;
    serde_json::to_writer_pretty(BufWriter::new(file), &result).map_err(|e| {
        AlgorithmError::Serialization {
            path: path.to_path_buf(),
            source: e,
        }
    })?;

    Ok(generation_time_ms)
}
