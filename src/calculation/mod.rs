//! Calculation logic for the PPh 21 engine.
//!
//! This module contains the PTKP lookup, progressive tax, TER rate lookup,
//! deductions, the top-level [`calculate`] orchestration, and the flat-rate
//! taxes.

mod deductions;
mod flat_rate;
mod money;
mod pph21;
mod progressive_tax;
mod ptkp;
mod ter_rate;

pub use deductions::{
    BIAYA_JABATAN_CAP, BIAYA_JABATAN_RATE, DeductionsResult, biaya_jabatan, calculate_deductions,
};
pub use flat_rate::{FlatRateTax, FlatTaxResult, calculate_flat_tax};
pub use money::{
    MONTHS_PER_YEAR, PKP_ROUNDING_UNIT, max, min, per_month, percentage_of,
    round_down_to_thousand,
};
pub use pph21::{
    BONUS_OUTSIDE_WORK_PERIOD, TER_TABLE_MONTHS, WORK_MONTHS_CLAMPED, calculate,
    calculate_with_tables,
};
pub use progressive_tax::{
    BracketSlice, ProgressiveTaxResult, calculate_progressive_tax, progressive_tax,
};
pub use ptkp::{PtkpLookupResult, UNKNOWN_PTKP_STATUS, get_ptkp, normalize_ptkp_status, resolve_ptkp};
pub use ter_rate::{
    TER_RATE_FALLBACK, TerRateLookup, fallback_ter_rate, lookup_ter_rate, ter_rate,
};
