//! Built-in Indonesian 2025 rate tables.
//!
//! These mirror the files shipped under `config/pph21_2025/` and are what
//! [`crate::calculation::calculate`] uses when no tables are loaded.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::types::{PtkpEntry, RateTables, TaxBracket, TaxYearMetadata, TerBracket};

static INDONESIA_2025: LazyLock<RateTables> = LazyLock::new(build_indonesia_2025);

impl RateTables {
    /// Returns the shared built-in 2025 tables.
    pub fn indonesia_2025() -> &'static RateTables {
        &INDONESIA_2025
    }
}

const PTKP: [(&str, &str, Decimal); 8] = [
    ("TK", "Single, no dependents", dec!(54000000)),
    ("TK1", "Single, 1 dependent", dec!(58500000)),
    ("TK2", "Single, 2 dependents", dec!(63000000)),
    ("TK3", "Single, 3 dependents", dec!(67500000)),
    ("K0", "Married, no dependents", dec!(58500000)),
    ("K1", "Married, 1 dependent", dec!(63000000)),
    ("K2", "Married, 2 dependents", dec!(67500000)),
    ("K3", "Married, 3 dependents", dec!(72000000)),
];

const BRACKETS: [(Option<Decimal>, Decimal); 5] = [
    (Some(dec!(50000000)), dec!(0.05)),
    (Some(dec!(250000000)), dec!(0.15)),
    (Some(dec!(500000000)), dec!(0.25)),
    (Some(dec!(5000000000)), dec!(0.30)),
    (None, dec!(0.35)),
];

// min, max, A, B, C
const TER: [(Decimal, Option<Decimal>, Decimal, Decimal, Decimal); 9] = [
    (dec!(0), Some(dec!(5400000)), dec!(0), dec!(0), dec!(0)),
    (dec!(5400000), Some(dec!(6200000)), dec!(0.0025), dec!(0.0050), dec!(0.0075)),
    (dec!(6200000), Some(dec!(7500000)), dec!(0.0050), dec!(0.0100), dec!(0.0125)),
    (dec!(7500000), Some(dec!(10000000)), dec!(0.0100), dec!(0.0150), dec!(0.0200)),
    (dec!(10000000), Some(dec!(15000000)), dec!(0.0300), dec!(0.0400), dec!(0.0500)),
    (dec!(15000000), Some(dec!(25000000)), dec!(0.0600), dec!(0.0800), dec!(0.1000)),
    (dec!(25000000), Some(dec!(50000000)), dec!(0.0900), dec!(0.1200), dec!(0.1500)),
    (dec!(50000000), Some(dec!(100000000)), dec!(0.1200), dec!(0.1600), dec!(0.2000)),
    (dec!(100000000), None, dec!(0.1500), dec!(0.2000), dec!(0.2500)),
];

fn build_indonesia_2025() -> RateTables {
    let metadata = TaxYearMetadata {
        year: 2025,
        name: "PPh 21 Indonesia 2025".to_string(),
        regulations: vec![
            "UU 7/2021 (HPP) Pasal 17".to_string(),
            "PMK 101/PMK.010/2016 (PTKP)".to_string(),
            "PP 58/2023 (TER)".to_string(),
            "PMK 168/2023".to_string(),
        ],
        default_ptkp_status: "TK".to_string(),
    };

    let ptkp: BTreeMap<String, PtkpEntry> = PTKP
        .iter()
        .map(|(code, description, amount)| {
            (
                code.to_string(),
                PtkpEntry {
                    description: description.to_string(),
                    amount: *amount,
                },
            )
        })
        .collect();

    let brackets = BRACKETS
        .iter()
        .map(|(limit, rate)| TaxBracket {
            limit: *limit,
            rate: *rate,
        })
        .collect();

    let ter_brackets = TER
        .iter()
        .map(|(min, max, a, b, c)| TerBracket {
            min_income: *min,
            max_income: *max,
            rate_a: *a,
            rate_b: *b,
            rate_c: *c,
        })
        .collect();

    RateTables::assemble(metadata, ptkp, brackets, ter_brackets)
}
