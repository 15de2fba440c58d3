//! Metrics computed over exported tile matrices

/// Spatial autocorrelation
pub mod correlation;
/// Box-counting fractal dimension
pub mod fractal;
/// Aggregated, serialisable metrics report
pub mod report;
/// DFT magnitude spectrum
pub mod spectral;
/// Entropy, frequencies, adjacency and clusters
pub mod statistics;
