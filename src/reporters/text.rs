//! Text (terminal) reporter with colors and formatting

use crate::models::{AqiReport, Category};
use anyhow::Result;

/// Category colors (ANSI escape codes, approximating the EPA palette)
fn category_color(category: Category) -> &'static str {
    match category {
        Category::Good => "\x1b[32m",               // Green
        Category::Moderate => "\x1b[33m",           // Yellow
        Category::UnhealthySensitive => "\x1b[91m", // Orange
        Category::Unhealthy => "\x1b[31m",          // Red
        Category::VeryUnhealthy => "\x1b[35m",      // Purple
        Category::Hazardous => "\x1b[95m",          // Maroon
    }
}

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Advisory line for the overall category
fn advisory(category: Category) -> &'static str {
    match category {
        Category::Good => "Air quality is satisfactory.",
        Category::Moderate => "Acceptable; unusually sensitive people should consider reducing prolonged exertion.",
        Category::UnhealthySensitive => "Members of sensitive groups may experience health effects.",
        Category::Unhealthy => "Everyone may begin to experience health effects.",
        Category::VeryUnhealthy => "Health alert: everyone may experience more serious health effects.",
        Category::Hazardous => "Health warning of emergency conditions.",
    }
}

/// Render report as formatted terminal output
pub fn render(report: &AqiReport, color: bool) -> Result<String> {
    let mut out = String::new();
    let (reset, bold, dim) = if color {
        (RESET, BOLD, DIM)
    } else {
        ("", "", "")
    };

    // Header
    out.push_str(&format!("\n{bold}Air Quality Report{reset}\n"));
    out.push_str(&format!(
        "{dim}──────────────────────────────────────────────────────{reset}\n"
    ));

    // Readings table
    out.push_str(&format!(
        "{dim}  POLLUTANT    CONC (µg/m³)    AQI   CATEGORY{reset}\n"
    ));
    for row in &report.readings {
        let index = match row.index {
            Some(index) => index.to_string(),
            None => "n/a".to_string(),
        };
        let category = match row.category {
            Some(category) => {
                let cat_c = if color { category_color(category) } else { "" };
                format!("{cat_c}{}{reset}", category.label())
            }
            None => "n/a".to_string(),
        };
        out.push_str(&format!(
            "  {:<12} {:>12.1}  {:>5}   {}\n",
            row.pollutant.trim(),
            row.concentration,
            index,
            category
        ));
    }
    out.push('\n');

    // Overall line
    match &report.overall {
        Some(overall) => {
            let cat_c = if color {
                category_color(overall.category)
            } else {
                ""
            };
            out.push_str(&format!(
                "Overall AQI: {bold}{}{reset} {cat_c}({}){reset}\n",
                overall.index,
                overall.category.label()
            ));
            out.push_str(&format!("{dim}{}{reset}\n", advisory(overall.category)));
        }
        None => {
            out.push_str(&format!(
                "{dim}No supported pollutant readings to compute an overall AQI.{reset}\n"
            ));
        }
    }

    Ok(out)
}
