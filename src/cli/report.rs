//! Report command - compute and render AQI for a reading set

use crate::calculator;
use crate::config::UserConfig;
use crate::models::{Category, Reading};
use crate::reporters;
use anyhow::{bail, Context, Result};
use std::collections::BTreeMap;
use std::io::Read as _;
use std::path::Path;
use tracing::debug;

/// Run the report command
pub fn run(
    readings: Vec<Reading>,
    input: Option<&Path>,
    format: Option<&str>,
    output: Option<&Path>,
    fail_on: Option<Category>,
    no_color: bool,
) -> Result<()> {
    let config = UserConfig::load()?;

    // File readings first, -r flags appended after
    let mut all_readings = match input {
        Some(path) => read_input(path)?,
        None => Vec::new(),
    };
    all_readings.extend(readings);

    if all_readings.is_empty() {
        bail!("no readings given. Use -r NAME=VALUE or --input FILE.");
    }

    let registry = config.registry()?;
    let report = calculator::compute_for_pollutants(&all_readings, &registry);
    debug!(
        readings = report.readings.len(),
        overall = ?report.overall.map(|o| o.index),
        "report computed"
    );

    let format = format.unwrap_or_else(|| config.format());
    let color = !no_color && config.color() && output.is_none();
    let rendered = reporters::report(&report, format, color)?;

    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("failed to write report: {}", path.display()))?;
            println!("Report written to {}", path.display());
        }
        None => print!("{rendered}"),
    }

    if let Some(threshold) = fail_on {
        if let Some(overall) = &report.overall {
            if overall.category >= threshold {
                debug!(category = %overall.category, "overall category at or above --fail-on threshold");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// Read a JSON object of pollutant -> concentration from a file or stdin
fn read_input(path: &Path) -> Result<Vec<Reading>> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input: {}", path.display()))?
    };

    let map: BTreeMap<String, f64> = serde_json::from_str(&content)
        .context("input must be a JSON object mapping pollutant names to concentrations")?;

    map.into_iter()
        .map(|(name, value)| Reading::new(name, value).map_err(Into::into))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_input_parses_json_map() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("readings.json");
        std::fs::write(&path, r#"{"PM2.5": 35.0, "PM10": 80}"#).unwrap();

        let readings = read_input(&path).unwrap();
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].pollutant, "PM10");
        assert_eq!(readings[0].concentration, 80.0);
    }

    #[test]
    fn test_read_input_rejects_negative_concentration() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("readings.json");
        std::fs::write(&path, r#"{"PM2.5": -1.0}"#).unwrap();
        assert!(read_input(&path).is_err());
    }

    #[test]
    fn test_read_input_rejects_non_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("readings.json");
        std::fs::write(&path, r#"[1, 2, 3]"#).unwrap();
        assert!(read_input(&path).is_err());
    }

    #[test]
    fn test_read_input_missing_file() {
        assert!(read_input(Path::new("/nonexistent/readings.json")).is_err());
    }
}
