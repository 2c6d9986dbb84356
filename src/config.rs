//! User-level configuration for aqimeter
//!
//! Supports loading config from:
//! - Environment variables
//! - ~/.config/aqimeter/config.toml
//!
//! The config can also register breakpoint tables for pollutants beyond
//! the built-in particulates; those are validated against the table
//! invariant before they take effect.

use crate::breakpoints::{Breakpoint, TableRegistry};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UserConfig {
    #[serde(default)]
    pub output: OutputConfig,

    /// Extra breakpoint tables, keyed by pollutant identifier
    #[serde(default)]
    pub tables: BTreeMap<String, Vec<Breakpoint>>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Default output format: text, json, markdown
    pub format: Option<String>,

    /// Colored terminal output (default: on)
    pub color: Option<bool>,
}

impl UserConfig {
    /// Load config from all sources, with priority:
    /// 1. Environment variables (highest)
    /// 2. User config (~/.config/aqimeter/config.toml)
    ///
    /// A missing config file yields defaults; an unparseable one or an
    /// invalid custom table is an error, since silently dropping a user
    /// table would change results without any signal.
    pub fn load() -> Result<Self> {
        let mut config = UserConfig::default();

        if let Some(path) = Self::user_config_path().filter(|p| p.exists()) {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let file_config: UserConfig = toml::from_str(&content)
                .with_context(|| format!("invalid config: {}", path.display()))?;
            config.merge(file_config);
        }

        // Environment variables override everything
        if let Ok(format) = std::env::var("AQIMETER_FORMAT") {
            config.output.format = Some(format);
        }

        Ok(config)
    }

    /// Get the user config file path
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("aqimeter").join("config.toml"))
    }

    /// Merge another config into this one (other takes priority)
    fn merge(&mut self, other: UserConfig) {
        if other.output.format.is_some() {
            self.output.format = other.output.format;
        }
        if other.output.color.is_some() {
            self.output.color = other.output.color;
        }
        self.tables.extend(other.tables);
    }

    /// Default output format ("text" unless configured)
    pub fn format(&self) -> &str {
        self.output.format.as_deref().unwrap_or("text")
    }

    /// Whether colored terminal output is enabled
    pub fn color(&self) -> bool {
        self.output.color.unwrap_or(true)
    }

    /// Build the table registry in effect: built-in particulate tables
    /// plus validated config tables.
    pub fn registry(&self) -> Result<TableRegistry> {
        let mut registry = TableRegistry::builtin();
        for (name, rows) in &self.tables {
            registry
                .insert(name, rows.clone())
                .with_context(|| format!("invalid breakpoint table '{name}' in config"))?;
        }
        Ok(registry)
    }

    /// Initialize user config directory and create example config
    pub fn init_user_config() -> Result<PathBuf> {
        let config_path = Self::user_config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        if !config_path.exists() {
            let example = r#"# aqimeter User Configuration

[output]
# Default output format: "text", "json", or "markdown"
# format = "text"

# Colored terminal output
# color = true

# Extra breakpoint tables for pollutants without a built-in one.
# Rows are closed concentration ranges mapped onto index ranges and
# must be ascending, non-overlapping, and within index 0..=500.
#
# [tables]
# o3 = [
#     { conc_lo = 0.0, conc_hi = 54.0, index_lo = 0, index_hi = 50 },
#     { conc_lo = 55.0, conc_hi = 70.0, index_lo = 51, index_hi = 100 },
# ]
"#;
            std::fs::write(&config_path, example)?;
        }

        Ok(config_path)
    }
}
