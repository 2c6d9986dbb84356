//! Sample command - random readings as a stand-in for live sensor input

use crate::calculator;
use crate::config::UserConfig;
use crate::models::Reading;
use crate::reporters;
use anyhow::Result;
use console::style;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Run the sample command: draw one in-range concentration per
/// registered table and report the result set.
pub fn run(seed: Option<u64>, format: Option<&str>) -> Result<()> {
    let config = UserConfig::load()?;
    let registry = config.registry()?;

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut readings = Vec::new();
    for (name, table) in registry.iter() {
        let Some(top) = table.last() else { continue };
        // One decimal, matching how particulate sensors report
        let value = (rng.random_range(0.0..=top.conc_hi) * 10.0).round() / 10.0;
        readings.push(Reading::new(name.to_uppercase(), value)?);
    }
    debug!(readings = readings.len(), seed = ?seed, "sampled readings");

    let report = calculator::compute_for_pollutants(&readings, &registry);

    let format = format.unwrap_or_else(|| config.format());
    let rendered = reporters::report(&report, format, config.color())?;

    if format == "text" || format == "txt" || format == "terminal" {
        println!(
            "{}",
            style("Simulated readings (not live sensor data)").dim()
        );
    }
    print!("{rendered}");
    Ok(())
}
