//! Markdown reporter for GitHub-flavored Markdown output
//!
//! Generates reports suitable for:
//! - README files
//! - Issue and pull request comments
//! - Dashboards that render Markdown

use crate::models::{AqiReport, Category};
use anyhow::Result;
use chrono::Local;

/// Render report as GitHub-flavored Markdown
pub fn render(report: &AqiReport) -> Result<String> {
    let mut md = String::new();

    md.push_str(&render_header(report));
    md.push('\n');

    md.push_str(&render_readings(report));
    md.push('\n');

    md.push_str(&render_overall(report));
    md.push('\n');

    md.push_str(&render_footer());

    Ok(md)
}

fn render_header(report: &AqiReport) -> String {
    let (emoji, headline) = match &report.overall {
        Some(overall) => (
            category_emoji(overall.category),
            format!(
                "**Overall AQI: {}** ({})",
                overall.index,
                overall.category.label()
            ),
        ),
        None => ("❓", "**Overall AQI: undefined**".to_string()),
    };

    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");

    format!(
        r#"# {} Air Quality Report

{}

Generated: {}
"#,
        emoji, headline, timestamp
    )
}

fn render_readings(report: &AqiReport) -> String {
    let mut md = String::from(
        "## Readings\n\n| Pollutant | Concentration (µg/m³) | AQI | Category |\n|-----------|----------------------:|----:|----------|\n",
    );

    for row in &report.readings {
        let index = row
            .index
            .map(|index| index.to_string())
            .unwrap_or_else(|| "n/a".to_string());
        let category = match row.category {
            Some(category) => format!("{} {}", category_emoji(category), category.label()),
            None => "n/a".to_string(),
        };
        md.push_str(&format!(
            "| {} | {:.1} | {} | {} |\n",
            row.pollutant.trim(),
            row.concentration,
            index,
            category
        ));
    }

    md
}

fn render_overall(report: &AqiReport) -> String {
    match &report.overall {
        Some(overall) => format!(
            "## Assessment\n\n{} **{}** — {}\n",
            category_emoji(overall.category),
            overall.category.label(),
            assessment(overall.category)
        ),
        None => {
            "## Assessment\n\nNo supported pollutant readings to compute an overall AQI.\n"
                .to_string()
        }
    }
}

fn render_footer() -> String {
    "---\n\n*Generated by aqimeter — EPA breakpoint AQI calculator*\n".to_string()
}

fn assessment(category: Category) -> &'static str {
    match category {
        Category::Good => "Air quality is satisfactory",
        Category::Moderate => "Acceptable for most; sensitive people should limit prolonged exertion",
        Category::UnhealthySensitive => "Sensitive groups may experience health effects",
        Category::Unhealthy => "Everyone may begin to experience health effects",
        Category::VeryUnhealthy => "Health alert conditions",
        Category::Hazardous => "Emergency conditions",
    }
}

fn category_emoji(category: Category) -> &'static str {
    match category {
        Category::Good => "🟢",
        Category::Moderate => "🟡",
        Category::UnhealthySensitive => "🟠",
        Category::Unhealthy => "🔴",
        Category::VeryUnhealthy => "🟣",
        Category::Hazardous => "🟤",
    }
}
