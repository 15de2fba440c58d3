//! Summaries over stored batch results
//!
//! Reads the `*.json` records a batch sweep leaves under `<input>/<method>/`,
//! reduces each map to a few scalar metrics and writes two CSV tables: one
//! row per map and one row of averages per method. Metrics that cannot be
//! derived for a map are left out of its method's averages.

use crate::io::configuration::{
    LOW_FREQUENCY_DIVISOR, SUMMARY_AVERAGES_FILE, SUMMARY_INDIVIDUAL_FILE,
};
use crate::io::error::{AlgorithmError, Result};
use crate::io::request::GenerationMethod;
use crate::spatial::tiles::TileKind;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredResult {
    request_params: StoredRequest,
    response_metrics: StoredMetrics,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredRequest {
    generation_method: GenerationMethod,
}

// Non-finite floats are stored as null, so scalar metrics may be missing
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredMetrics {
    #[serde(default)]
    entropy: Option<f64>,
    #[serde(default)]
    fractal_dim: Option<f64>,
    #[serde(default)]
    adjacency: BTreeMap<u8, BTreeMap<u8, usize>>,
    #[serde(default)]
    frequencies: BTreeMap<u8, f64>,
    #[serde(default)]
    autocorr: BTreeMap<String, Option<f64>>,
    #[serde(default)]
    spectrum: Vec<Vec<f64>>,
}

/// Scalar metrics of one stored map
#[derive(Debug, Clone, PartialEq)]
pub struct MapSummary {
    /// File name of the stored record
    pub file_name: String,
    /// Method recorded in the request
    pub method: GenerationMethod,
    /// Shannon entropy as stored
    pub entropy: Option<f64>,
    /// Box-counting dimension as stored
    pub fractal_dim: Option<f64>,
    /// Share of cells from wet sand up to forest
    pub land_ratio: f64,
    /// Distinct unordered tile pairs that touch at least once
    pub unique_adjacency_pairs: usize,
    /// Mean of the horizontal and vertical lag-one autocorrelation
    pub autocorr_lag1: Option<f64>,
    /// Share of spectral magnitude in the low-frequency corner
    pub low_frequency_ratio: Option<f64>,
}

impl MapSummary {
    /// Read one stored batch record
    ///
    /// # Errors
    ///
    /// Returns `FileSystem` if the file cannot be opened or `Serialization`
    /// if it is not a batch record
    pub fn read(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| AlgorithmError::FileSystem {
            path: path.to_path_buf(),
            operation: "open file",
            source: e,
        })?;
        let stored: StoredResult = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            AlgorithmError::Serialization {
                path: path.to_path_buf(),
                source: e,
            }
        })?;

        let metrics = stored.response_metrics;
        let lag = |key: &str| metrics.autocorr.get(key).copied().flatten();
        Ok(Self {
            file_name: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            method: stored.request_params.generation_method,
            entropy: metrics.entropy,
            fractal_dim: metrics.fractal_dim,
            land_ratio: land_ratio(&metrics.frequencies),
            unique_adjacency_pairs: unique_adjacency_pairs(&metrics.adjacency),
            autocorr_lag1: lag_one_autocorrelation(lag("1,0"), lag("0,1")),
            low_frequency_ratio: low_frequency_ratio(&metrics.spectrum),
        })
    }
}

/// Summed frequency of the tiles from wet sand upward
pub fn land_ratio(frequencies: &BTreeMap<u8, f64>) -> f64 {
    frequencies
        .range(TileKind::WetSand.ordinal()..=TileKind::Forest.ordinal())
        .map(|(_, frequency)| frequency)
        .sum()
}

/// Number of distinct unordered pairs with a positive adjacency count
pub fn unique_adjacency_pairs(adjacency: &BTreeMap<u8, BTreeMap<u8, usize>>) -> usize {
    adjacency
        .iter()
        .flat_map(|(&a, row)| {
            row.iter()
                .filter(|&(_, &count)| count > 0)
                .map(move |(&b, _)| (a.min(b), a.max(b)))
        })
        .collect::<BTreeSet<_>>()
        .len()
}

/// Mean of the available, finite lag-one coefficients
pub fn lag_one_autocorrelation(horizontal: Option<f64>, vertical: Option<f64>) -> Option<f64> {
    let values: Vec<f64> = [horizontal, vertical]
        .into_iter()
        .flatten()
        .filter(|value| value.is_finite())
        .collect();
    (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64)
}

/// Share of absolute magnitude in the leading quarter of rows and columns
///
/// The band is at least one row and one column wide. Empty or all-zero
/// spectra have no ratio.
pub fn low_frequency_ratio(spectrum: &[Vec<f64>]) -> Option<f64> {
    let rows = spectrum.len();
    let cols = spectrum.first().map_or(0, Vec::len);
    if rows == 0 || cols == 0 {
        return None;
    }
    let band_rows = (rows / LOW_FREQUENCY_DIVISOR).max(1);
    let band_cols = (cols / LOW_FREQUENCY_DIVISOR).max(1);

    let mut low = 0.0;
    let mut total = 0.0;
    for (r, row) in spectrum.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            let magnitude = value.abs();
            if r < band_rows && c < band_cols {
                low += magnitude;
            }
            total += magnitude;
        }
    }
    (total > 0.0).then(|| low / total)
}

#[derive(Debug, Clone, Copy, Default)]
struct Mean {
    sum: f64,
    count: usize,
}

impl Mean {
    fn add(&mut self, value: Option<f64>) {
        if let Some(value) = value.filter(|v| !v.is_nan()) {
            self.sum += value;
            self.count += 1;
        }
    }

    fn value(self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Averaged metrics of one method
#[derive(Debug, Clone, PartialEq)]
pub struct MethodAverages {
    /// Method the row describes
    pub method: GenerationMethod,
    /// Mean entropy
    pub entropy: Option<f64>,
    /// Mean fractal dimension
    pub fractal_dim: Option<f64>,
    /// Mean land ratio
    pub land_ratio: Option<f64>,
    /// Mean number of distinct touching pairs
    pub unique_adjacency_pairs: Option<f64>,
    /// Mean lag-one autocorrelation
    pub autocorr_lag1: Option<f64>,
    /// Mean low-frequency ratio
    pub low_frequency_ratio: Option<f64>,
    /// Largest number of values behind any one average
    pub sample_count: usize,
}

/// Average every metric per method, in the order of `methods`
///
/// Missing values are skipped metric by metric. Maps of methods outside
/// `methods` are ignored.
pub fn method_averages(maps: &[MapSummary], methods: &[GenerationMethod]) -> Vec<MethodAverages> {
    methods
        .iter()
        .map(|&method| {
            let mut means = [Mean::default(); 6];
            for map in maps.iter().filter(|map| map.method == method) {
                let values = [
                    map.entropy,
                    map.fractal_dim,
                    Some(map.land_ratio),
                    Some(map.unique_adjacency_pairs as f64),
                    map.autocorr_lag1,
                    map.low_frequency_ratio,
                ];
                for (mean, value) in means.iter_mut().zip(values) {
                    mean.add(value);
                }
            }

            let [entropy, fractal_dim, land_ratio, pairs, autocorr, low_frequency] = means;
            MethodAverages {
                method,
                entropy: entropy.value(),
                fractal_dim: fractal_dim.value(),
                land_ratio: land_ratio.value(),
                unique_adjacency_pairs: pairs.value(),
                autocorr_lag1: autocorr.value(),
                low_frequency_ratio: low_frequency.value(),
                sample_count: means.iter().map(|mean| mean.count).max().unwrap_or(0),
            }
        })
        .collect()
}

/// Read every stored record of `methods` under `input_dir`
///
/// Files are read in name order within each method directory. Unreadable
/// records and missing directories are logged and skipped.
pub fn collect_summaries(input_dir: &Path, methods: &[GenerationMethod]) -> Vec<MapSummary> {
    let mut maps = Vec::new();

    for method in methods {
        let method_dir = input_dir.join(method.to_string());
        let entries = match std::fs::read_dir(&method_dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(path = %method_dir.display(), error = %e, "skipping method directory");
                continue;
            }
        };

        let mut paths: Vec<PathBuf> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().is_some_and(|ext| ext == "json")
            })
            .collect();
        paths.sort();

        for path in paths {
            match MapSummary::read(&path) {
                Ok(map) => maps.push(map),
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "skipping record"),
            }
        }
    }

    tracing::info!(records = maps.len(), "read stored results");
    maps
}

fn format_metric(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "NaN".to_owned(), |v| format!("{v:.precision$}"))
}

fn write_lines(path: &Path, header: &str, rows: impl Iterator<Item = String>) -> Result<()> {
    let io_error = |e| AlgorithmError::FileSystem {
        path: path.to_path_buf(),
        operation: "write summary",
        source: e,
    };

    let mut writer = BufWriter::new(File::create(path).map_err(io_error)?);
    writeln!(writer, "{header}").map_err(io_error)?;
    for row in rows {
        writeln!(writer, "{row}").map_err(io_error)?;
    }
    writer.flush().map_err(io_error)
}

/// Write one CSV row per map
///
/// # Errors
///
/// Returns `FileSystem` if the file cannot be written
pub fn write_individual_csv(maps: &[MapSummary], path: &Path) -> Result<()> {
    write_lines(
        path,
        "FilePath,Method,Entropy,FractalDim,LandRatio,NumUniqueAdjacencyPairs,AvgAutocorrLag1,LowFreqEnergyRatio",
        maps.iter().map(|map| {
            format!(
                "{},{},{},{},{:.4},{},{},{}",
                map.file_name,
                map.method,
                format_metric(map.entropy, 4),
                format_metric(map.fractal_dim, 4),
                map.land_ratio,
                map.unique_adjacency_pairs,
                format_metric(map.autocorr_lag1, 4),
                format_metric(map.low_frequency_ratio, 4),
            )
        }),
    )
}

/// Write one CSV row of averages per method
///
/// # Errors
///
/// Returns `FileSystem` if the file cannot be written
pub fn write_averages_csv(averages: &[MethodAverages], path: &Path) -> Result<()> {
    write_lines(
        path,
        "Method,AvgEntropy,AvgFractalDim,AvgLandRatio,AvgNumUniqueAdjacencyPairs,AvgAvgAutocorrLag1,AvgLowFreqEnergyRatio,SampleCount",
        averages.iter().map(|row| {
            format!(
                "{},{},{},{},{},{},{},{}",
                row.method,
                format_metric(row.entropy, 4),
                format_metric(row.fractal_dim, 4),
                format_metric(row.land_ratio, 4),
                format_metric(row.unique_adjacency_pairs, 2),
                format_metric(row.autocorr_lag1, 4),
                format_metric(row.low_frequency_ratio, 4),
                row.sample_count,
            )
        }),
    )
}

/// Locations and methods of a summary run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryConfig {
    /// Batch output directory holding one subdirectory per method
    pub input_dir: PathBuf,
    /// Directory receiving both CSV tables
    pub output_dir: PathBuf,
    /// Methods to read, also the row order of the averages
    pub methods: Vec<GenerationMethod>,
}

/// Summarise a batch output directory into the two CSV tables
///
/// Nothing is written when no record could be read.
///
/// # Errors
///
/// Returns `FileSystem` if a table cannot be written
pub fn summarize(config: &SummaryConfig) -> Result<Vec<MethodAverages>> {
    let maps = collect_summaries(&config.input_dir, &config.methods);
    if maps.is_empty() {
        tracing::warn!(path = %config.input_dir.display(), "no stored results to summarise");
        return Ok(Vec::new());
    }

    let averages = method_averages(&maps, &config.methods);
    for row in &averages {
        tracing::info!(
            method = %row.method,
            samples = row.sample_count,
            entropy = row.entropy,
            land_ratio = row.land_ratio,
            "method averages"
        );
    }

    write_individual_csv(&maps, &config.output_dir.join(SUMMARY_INDIVIDUAL_FILE))?;
    write_averages_csv(&averages, &config.output_dir.join(SUMMARY_AVERAGES_FILE))?;
    Ok(averages)
}
