//! Text layouts shared by the CLI: the version banner and the boost table.

use crate::common::constants::{EMULATOR_NAME, EMULATOR_VERSION_MAJOR, EMULATOR_VERSION_MINOR};
use crate::domain::EmulatorResult;
use std::fmt::Write as _;

pub const REDSHIFT_BLOCK_MARKER: &str = "Next redshift";

pub fn banner_line() -> String {
    format!(
        "# {} Version {}.{}",
        EMULATOR_NAME, EMULATOR_VERSION_MAJOR, EMULATOR_VERSION_MINOR
    )
}

/// Six-decimal fixed notation, the layout of C's `%f`.
pub fn format_fixed_f64(value: f64) -> String {
    format!("{value:.6}")
}

/// One marker line per redshift, then `k<TAB>boost` for every wavenumber.
pub fn render_boost_table(result: &EmulatorResult) -> String {
    let mut table = String::with_capacity(result.boost().len() * 20 + result.redshift_count() * 14);
    for block in result.blocks() {
        table.push_str(REDSHIFT_BLOCK_MARKER);
        table.push('\n');
        for (k, boost) in result.k_values().iter().zip(block) {
            let _ = writeln!(table, "{}\t{}", format_fixed_f64(*k), format_fixed_f64(*boost));
        }
    }
    table
}
