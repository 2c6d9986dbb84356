//! CLI command definitions and handlers

mod report;
mod sample;
mod tables;

use anyhow::Result;
use clap::{Parser, Subcommand};
use console::style;
use std::path::PathBuf;

use crate::config::UserConfig;
use crate::models::{Category, Reading, ReadingError};

/// Parse a NAME=VALUE reading argument
fn parse_reading(s: &str) -> Result<Reading, String> {
    let malformed = || {
        ReadingError::Malformed {
            input: s.to_string(),
        }
        .to_string()
    };
    let (name, value) = s.split_once('=').ok_or_else(malformed)?;
    let concentration: f64 = value.trim().parse().map_err(|_| malformed())?;
    Reading::new(name.trim(), concentration).map_err(|e| e.to_string())
}

/// Parse a category name for --fail-on
fn parse_category(s: &str) -> Result<Category, String> {
    Category::parse(s).ok_or_else(|| {
        format!(
            "'{}' is not a category. Valid: good, moderate, unhealthy-sensitive, \
             unhealthy, very-unhealthy, hazardous",
            s
        )
    })
}

/// aqimeter - EPA breakpoint AQI calculator
///
/// Computes AQI sub-indices for particulate readings and reports them
/// as a terminal table, JSON, or Markdown.
#[derive(Parser, Debug)]
#[command(name = "aqimeter")]
#[command(
    version,
    about = "AQI calculator for particulate pollutants — breakpoint interpolation, severity categories, and reports",
    after_help = "\
Examples:
  aqimeter report -r pm2.5=35.0 -r pm10=80     Terminal table
  aqimeter report -r pm2.5=35.0 --format json  JSON output for scripting
  aqimeter tables                              Show the breakpoint tables in effect
  aqimeter sample --seed 7                     Demo report from random readings"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute AQI sub-indices for a set of readings
    #[command(after_help = "\
Examples:
  aqimeter report -r pm2.5=35.0 -r pm10=80                    Terminal table
  aqimeter report -r pm2.5=35.0 --format json                 JSON for scripting
  aqimeter report --input readings.json                       Readings from a JSON file
  aqimeter report -i - --format markdown -o report.md         Stdin to Markdown file
  aqimeter report -r pm2.5=160 --fail-on unhealthy            Exit 1 at Unhealthy or worse")]
    Report {
        /// Pollutant reading as NAME=VALUE in µg/m³ (repeatable)
        #[arg(long = "reading", short = 'r', value_parser = parse_reading)]
        readings: Vec<Reading>,

        /// JSON file mapping pollutant names to concentrations ("-" for stdin)
        #[arg(long, short = 'i')]
        input: Option<PathBuf>,

        /// Output format: text, json, markdown (or md); default from config
        #[arg(long, short = 'f', value_parser = ["text", "json", "markdown", "md"])]
        format: Option<String>,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Exit with code 1 if the overall category is this severe or worse
        #[arg(long, value_parser = parse_category)]
        fail_on: Option<Category>,

        /// Disable colored terminal output
        #[arg(long)]
        no_color: bool,
    },

    /// Print the breakpoint tables in effect (built-in and configured)
    Tables {
        /// Only the table for this pollutant
        #[arg(long, short = 'p')]
        pollutant: Option<String>,
    },

    /// Report random in-range readings (demo stand-in for live sensor input)
    Sample {
        /// Seed for reproducible readings
        #[arg(long)]
        seed: Option<u64>,

        /// Output format: text, json, markdown (or md)
        #[arg(long, short = 'f', value_parser = ["text", "json", "markdown", "md"])]
        format: Option<String>,
    },

    /// Manage configuration (init or show config values)
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Initialize config file with example settings
    Init,
    /// Show current config and paths
    Show,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Report {
            readings,
            input,
            format,
            output,
            fail_on,
            no_color,
        } => report::run(
            readings,
            input.as_deref(),
            format.as_deref(),
            output.as_deref(),
            fail_on,
            no_color,
        ),

        Commands::Tables { pollutant } => tables::run(pollutant.as_deref()),

        Commands::Sample { seed, format } => sample::run(seed, format.as_deref()),

        Commands::Config { action } => run_config_action(action),

        Commands::Version => {
            println!("aqimeter {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn run_config_action(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Init => {
            let path = UserConfig::init_user_config()?;
            println!("Config initialized: {}", style(path.display()).cyan());
            Ok(())
        }
        ConfigAction::Show => {
            let config = UserConfig::load()?;
            let registry = config.registry()?;

            println!("\naqimeter Config\n");
            match UserConfig::user_config_path() {
                Some(path) if path.exists() => {
                    println!("  File: {}", style(path.display()).cyan());
                }
                Some(path) => {
                    println!(
                        "  File: {} {}",
                        style(path.display()).dim(),
                        style("(not created; run `aqimeter config init`)").dim()
                    );
                }
                None => println!("  File: {}", style("unavailable").dim()),
            }
            println!("  Default format: {}", style(config.format()).cyan());
            println!("  Color: {}", style(config.color()).cyan());
            println!("  Tables: {}", style(registry.names().join(", ")).cyan());
            println!();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reading_valid() {
        let reading = parse_reading("pm2.5=35.0").unwrap();
        assert_eq!(reading.pollutant, "pm2.5");
        assert_eq!(reading.concentration, 35.0);
    }

    #[test]
    fn test_parse_reading_trims_name_and_value() {
        let reading = parse_reading("PM10 = 80").unwrap();
        assert_eq!(reading.pollutant, "PM10");
        assert_eq!(reading.concentration, 80.0);
    }

    #[test]
    fn test_parse_reading_rejects_missing_equals() {
        assert!(parse_reading("pm2.5").is_err());
    }

    #[test]
    fn test_parse_reading_rejects_non_numeric() {
        let err = parse_reading("pm2.5=abc").unwrap_err();
        assert!(err.contains("malformed"));
    }

    #[test]
    fn test_parse_reading_rejects_negative() {
        let err = parse_reading("pm2.5=-1").unwrap_err();
        assert!(err.contains("non-negative"));
    }

    #[test]
    fn test_parse_category() {
        assert_eq!(parse_category("unhealthy").unwrap(), Category::Unhealthy);
        assert!(parse_category("bogus").is_err());
    }
}
