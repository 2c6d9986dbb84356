//! EPA breakpoint tables and the pollutant table registry
//!
//! Each breakpoint maps a closed concentration range `[conc_lo, conc_hi]`
//! onto an index range `[index_lo, index_hi]`. The built-in PM2.5 and
//! PM10 tables reproduce the published EPA values, including the gaps
//! between adjacent ranges (12.0/12.1 for PM2.5, 54/55 for PM10); a
//! concentration inside a gap has no defined index.

use crate::models::{normalize, Pollutant};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// A single row of a breakpoint table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub conc_lo: f64,
    pub conc_hi: f64,
    pub index_lo: u16,
    pub index_hi: u16,
}

/// Shorthand for the table literals below
const fn bp(conc_lo: f64, conc_hi: f64, index_lo: u16, index_hi: u16) -> Breakpoint {
    Breakpoint {
        conc_lo,
        conc_hi,
        index_lo,
        index_hi,
    }
}

/// PM2.5, µg/m³ (24-hour)
pub const PM25_BREAKPOINTS: &[Breakpoint] = &[
    bp(0.0, 12.0, 0, 50),
    bp(12.1, 35.4, 51, 100),
    bp(35.5, 55.4, 101, 150),
    bp(55.5, 150.4, 151, 200),
    bp(150.5, 250.4, 201, 300),
    bp(250.5, 350.4, 301, 400),
    bp(350.5, 500.4, 401, 500),
];

/// PM10, µg/m³ (24-hour). Integer bounds as published, so 54.5 falls in
/// a gap and has no index.
pub const PM10_BREAKPOINTS: &[Breakpoint] = &[
    bp(0.0, 54.0, 0, 50),
    bp(55.0, 154.0, 51, 100),
    bp(155.0, 254.0, 101, 150),
    bp(255.0, 354.0, 151, 200),
    bp(355.0, 424.0, 201, 300),
    bp(425.0, 504.0, 301, 400),
    bp(505.0, 604.0, 401, 500),
];

/// Built-in table for a pollutant
pub fn table_for(pollutant: Pollutant) -> &'static [Breakpoint] {
    match pollutant {
        Pollutant::Pm25 => PM25_BREAKPOINTS,
        Pollutant::Pm10 => PM10_BREAKPOINTS,
    }
}

/// Violations of the table invariant
#[derive(Debug, Error)]
pub enum TableError {
    #[error("table '{table}' is empty")]
    Empty { table: String },

    #[error("table '{table}' row {row}: concentration range {conc_lo}..{conc_hi} is not ascending")]
    BadRange {
        table: String,
        row: usize,
        conc_lo: f64,
        conc_hi: f64,
    },

    #[error("table '{table}' row {row}: range starts at {conc_lo} but the previous range ends at {prev_hi}")]
    Overlap {
        table: String,
        row: usize,
        conc_lo: f64,
        prev_hi: f64,
    },

    #[error("table '{table}' row {row}: index range {index_lo}..{index_hi} must be ascending and within 0..=500")]
    BadIndex {
        table: String,
        row: usize,
        index_lo: u16,
        index_hi: u16,
    },
}

/// Check the table invariant: non-overlapping, monotonically increasing
/// concentration ranges, and ascending index ranges within `[0, 500]`.
pub fn validate(name: &str, rows: &[Breakpoint]) -> Result<(), TableError> {
    if rows.is_empty() {
        return Err(TableError::Empty {
            table: name.to_string(),
        });
    }
    let mut prev_hi: Option<f64> = None;
    let mut prev_index_hi: Option<u16> = None;
    for (row, bp) in rows.iter().enumerate() {
        if !bp.conc_lo.is_finite() || !bp.conc_hi.is_finite() || bp.conc_lo >= bp.conc_hi {
            return Err(TableError::BadRange {
                table: name.to_string(),
                row,
                conc_lo: bp.conc_lo,
                conc_hi: bp.conc_hi,
            });
        }
        if let Some(prev_hi) = prev_hi {
            if bp.conc_lo <= prev_hi {
                return Err(TableError::Overlap {
                    table: name.to_string(),
                    row,
                    conc_lo: bp.conc_lo,
                    prev_hi,
                });
            }
        }
        let index_ok = bp.index_lo < bp.index_hi
            && bp.index_hi <= 500
            && prev_index_hi.map_or(true, |prev| bp.index_lo >= prev);
        if !index_ok {
            return Err(TableError::BadIndex {
                table: name.to_string(),
                row,
                index_lo: bp.index_lo,
                index_hi: bp.index_hi,
            });
        }
        prev_hi = Some(bp.conc_hi);
        prev_index_hi = Some(bp.index_hi);
    }
    Ok(())
}

/// Breakpoint tables in effect, keyed by normalized pollutant identifier
///
/// Holds the built-in particulate tables plus any user-defined tables
/// from the config file. Lookup resolves identifier aliases ("pm25" for
/// "pm2.5") before consulting the map.
#[derive(Debug, Clone)]
pub struct TableRegistry {
    tables: BTreeMap<String, Vec<Breakpoint>>,
}

impl TableRegistry {
    /// Registry with the built-in particulate tables
    pub fn builtin() -> Self {
        let mut tables = BTreeMap::new();
        for pollutant in Pollutant::ALL {
            tables.insert(pollutant.key().to_string(), table_for(pollutant).to_vec());
        }
        Self { tables }
    }

    /// Register a table under a pollutant identifier. The table is
    /// validated before it becomes visible to lookups.
    pub fn insert(&mut self, name: &str, rows: Vec<Breakpoint>) -> Result<(), TableError> {
        validate(name, &rows)?;
        self.tables.insert(canonical(name), rows);
        Ok(())
    }

    /// Table for a pollutant identifier, if one is registered
    pub fn lookup(&self, name: &str) -> Option<&[Breakpoint]> {
        self.tables.get(&canonical(name)).map(Vec::as_slice)
    }

    /// Canonical registry key for an identifier, if a table exists
    pub fn resolve(&self, name: &str) -> Option<&str> {
        let key = canonical(name);
        self.tables.get_key_value(&key).map(|(k, _)| k.as_str())
    }

    /// Registered identifiers, sorted
    pub fn names(&self) -> Vec<&str> {
        self.tables.keys().map(String::as_str).collect()
    }

    /// Iterate registered tables in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Breakpoint])> {
        self.tables
            .iter()
            .map(|(name, rows)| (name.as_str(), rows.as_slice()))
    }
}

/// Resolve identifier aliases onto the canonical registry key
fn canonical(name: &str) -> String {
    match Pollutant::parse(name) {
        Some(pollutant) => pollutant.key().to_string(),
        None => normalize(name),
    }
}
