use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ge_cli::commands::estimate::{self, EstimateOptions};
use ge_cli::{Cli, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr, stdout is reserved for the report
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let options = EstimateOptions::resolve(&cli, config);
    estimate::run(&options)
}
