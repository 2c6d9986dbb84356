//! Tables command - print the breakpoint tables in effect

use crate::config::UserConfig;
use anyhow::{bail, Result};
use console::style;

/// Run the tables command
pub fn run(pollutant: Option<&str>) -> Result<()> {
    let config = UserConfig::load()?;
    let registry = config.registry()?;

    let only = match pollutant {
        Some(name) => match registry.resolve(name) {
            Some(key) => Some(key.to_string()),
            None => bail!(
                "no breakpoint table for '{}'. Known tables: {}",
                name,
                registry.names().join(", ")
            ),
        },
        None => None,
    };

    for (name, table) in registry.iter() {
        if only.as_deref().is_some_and(|wanted| wanted != name) {
            continue;
        }

        println!("\n{}", style(name.to_uppercase()).bold());
        println!(
            "{}",
            style("      CONC LO       CONC HI   INDEX LO   INDEX HI").dim()
        );
        for bp in table {
            println!(
                "  {:>11.1}  {:>12.1}  {:>9}  {:>9}",
                bp.conc_lo, bp.conc_hi, bp.index_lo, bp.index_hi
            );
        }
    }
    println!();
    Ok(())
}
