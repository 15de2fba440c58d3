//! Mathematical utilities for the metrics suite

/// Least-squares line fitting
pub mod regression;
