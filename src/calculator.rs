//! Index calculator
//!
//! Pure lookup-and-interpolate over breakpoint tables. Out-of-range and
//! unknown-pollutant inputs produce undefined results, not errors: the
//! computation is total over its input set.

use crate::breakpoints::{Breakpoint, TableRegistry};
use crate::models::{AqiReport, Category, OverallAqi, Reading, SubIndex};
use tracing::debug;

/// AQI sub-index for a concentration against one table.
///
/// Scans the ordered table for the first range containing the value
/// (inclusive bounds) and linearly interpolates the index range:
/// `I = I_lo + (I_hi - I_lo) / (C_hi - C_lo) * (C - C_lo)`, rounded to
/// the nearest integer. `None` when no range contains the value.
pub fn index_for_concentration(value: f64, table: &[Breakpoint]) -> Option<u16> {
    for bp in table {
        if bp.conc_lo <= value && value <= bp.conc_hi {
            let span = f64::from(bp.index_hi - bp.index_lo);
            let index =
                f64::from(bp.index_lo) + span / (bp.conc_hi - bp.conc_lo) * (value - bp.conc_lo);
            return Some(index.round() as u16);
        }
    }
    None
}

/// Compute sub-indices for every reading in a set.
///
/// Total over the input: a reading with no matching table or an
/// out-of-range concentration yields a row with an undefined index.
pub fn compute_for_pollutants(readings: &[Reading], registry: &TableRegistry) -> AqiReport {
    let mut rows = Vec::with_capacity(readings.len());
    for reading in readings {
        let index = match registry.lookup(&reading.pollutant) {
            Some(table) => {
                let index = index_for_concentration(reading.concentration, table);
                if index.is_none() {
                    debug!(
                        pollutant = %reading.pollutant,
                        concentration = reading.concentration,
                        "concentration outside all breakpoint ranges"
                    );
                }
                index
            }
            None => {
                debug!(pollutant = %reading.pollutant, "no breakpoint table registered");
                None
            }
        };
        rows.push(SubIndex {
            pollutant: reading.pollutant.clone(),
            concentration: reading.concentration,
            index,
            category: index.map(Category::for_index),
        });
    }
    let overall = overall_index(&rows);
    AqiReport {
        readings: rows,
        overall,
    }
}

/// Overall AQI: the maximum defined sub-index of a reading set,
/// undefined when no reading produced one.
pub fn overall_index(rows: &[SubIndex]) -> Option<OverallAqi> {
    rows.iter().filter_map(|row| row.index).max().map(|index| OverallAqi {
        index,
        category: Category::for_index(index),
    })
}
