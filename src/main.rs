//! aqimeter - AQI calculator CLI
//!
//! Turns pollutant concentration readings into AQI sub-indices and
//! severity categories using the EPA breakpoint tables.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    // Parse CLI args and run
    let cli = aqimeter::cli::Cli::parse();
    aqimeter::cli::run(cli)
}
