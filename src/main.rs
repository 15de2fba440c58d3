//! CLI entry point for terrain tile map generation

use clap::Parser;
use terrawave::io::cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() -> terrawave::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.quiet { "warn" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    cli.run()
}
