//! Core data models for aqimeter
//!
//! These models are shared by the calculator, reporters, and CLI for
//! representing pollutants, readings, and computed index results.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors for inputs that cannot enter the calculator.
///
/// Out-of-range concentrations and unknown pollutants are NOT errors;
/// they produce undefined index results. Only malformed input is
/// rejected.
#[derive(Debug, Error)]
pub enum ReadingError {
    #[error("invalid concentration {value} for '{pollutant}': must be a finite, non-negative number")]
    InvalidConcentration { pollutant: String, value: f64 },

    #[error("malformed reading '{input}': expected NAME=VALUE (e.g. pm2.5=35.0)")]
    Malformed { input: String },
}

/// Normalize a pollutant identifier for table lookup
pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Pollutants with built-in breakpoint tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pollutant {
    Pm25,
    Pm10,
}

impl Pollutant {
    pub const ALL: [Pollutant; 2] = [Pollutant::Pm25, Pollutant::Pm10];

    /// Parse a pollutant identifier (case-insensitive, whitespace
    /// ignored). "pm2.5" and "pm25" both name PM2.5.
    pub fn parse(name: &str) -> Option<Self> {
        match normalize(name).as_str() {
            "pm2.5" | "pm25" => Some(Pollutant::Pm25),
            "pm10" => Some(Pollutant::Pm10),
            _ => None,
        }
    }

    /// Canonical registry key
    pub fn key(&self) -> &'static str {
        match self {
            Pollutant::Pm25 => "pm2.5",
            Pollutant::Pm10 => "pm10",
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Pollutant::Pm25 => "PM2.5",
            Pollutant::Pm10 => "PM10",
        }
    }
}

impl std::fmt::Display for Pollutant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The six AQI severity categories, ordered from least to most severe
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Good,
    Moderate,
    UnhealthySensitive,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl Category {
    /// Category for a computed index. Band thresholds are 50, 100, 150,
    /// 200, 300; everything above 300 is Hazardous.
    pub fn for_index(index: u16) -> Self {
        match index {
            0..=50 => Category::Good,
            51..=100 => Category::Moderate,
            101..=150 => Category::UnhealthySensitive,
            151..=200 => Category::Unhealthy,
            201..=300 => Category::VeryUnhealthy,
            _ => Category::Hazardous,
        }
    }

    /// Parse a category name as used by `--fail-on`
    pub fn parse(name: &str) -> Option<Self> {
        match normalize(name).as_str() {
            "good" => Some(Category::Good),
            "moderate" => Some(Category::Moderate),
            "unhealthy-sensitive" | "usg" | "unhealthy-for-sensitive-groups" => {
                Some(Category::UnhealthySensitive)
            }
            "unhealthy" => Some(Category::Unhealthy),
            "very-unhealthy" => Some(Category::VeryUnhealthy),
            "hazardous" => Some(Category::Hazardous),
            _ => None,
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Category::Good => "Good",
            Category::Moderate => "Moderate",
            Category::UnhealthySensitive => "Unhealthy for Sensitive Groups",
            Category::Unhealthy => "Unhealthy",
            Category::VeryUnhealthy => "Very Unhealthy",
            Category::Hazardous => "Hazardous",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A validated pollutant concentration reading (µg/m³)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reading {
    /// Pollutant name as given by the caller
    pub pollutant: String,
    pub concentration: f64,
}

impl Reading {
    /// Validate and construct a reading. A non-finite or negative
    /// concentration is the one rejected input; everything else flows
    /// through to the calculator.
    pub fn new(pollutant: impl Into<String>, concentration: f64) -> Result<Self, ReadingError> {
        let pollutant = pollutant.into();
        if !concentration.is_finite() || concentration < 0.0 {
            return Err(ReadingError::InvalidConcentration {
                pollutant,
                value: concentration,
            });
        }
        Ok(Self {
            pollutant,
            concentration,
        })
    }
}

/// One computed row of an AQI report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubIndex {
    pub pollutant: String,
    pub concentration: f64,
    /// None when the concentration falls outside every breakpoint range
    /// or the pollutant has no registered table
    pub index: Option<u16>,
    pub category: Option<Category>,
}

/// Overall AQI for a reading set: the maximum defined sub-index
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OverallAqi {
    pub index: u16,
    pub category: Category,
}

/// Full report for a set of readings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AqiReport {
    pub readings: Vec<SubIndex>,
    pub overall: Option<OverallAqi>,
}
