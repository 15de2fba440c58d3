//! Input/output: seeding, request handling, batch sweeps, summaries and exports

/// Parameter sweeps writing one JSON result per map
pub mod batch;
/// Command-line interface
pub mod cli;
/// Constants and defaults
pub mod configuration;
/// Error types
pub mod error;
/// PNG export of tile matrices
pub mod image;
/// Seed configurations narrowing initial domains
pub mod prefill;
/// Batch progress display
pub mod progress;
/// Generate request model and dispatcher
pub mod request;
/// CSV summaries over stored batch results
pub mod summary;
