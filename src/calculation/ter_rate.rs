//! TER (tarif efektif rata-rata) monthly rate lookup.
//!
//! Rows are scanned in order and the first row whose inclusive range holds
//! the income wins. If nothing matches (a negative income, or a table with a
//! hole), the category's top rate is used instead.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::warn;

use crate::config::RateTables;
use crate::models::TerCategory;

/// Regulation reference for TER rates.
pub const TER_REGULATION: &str = "PP 58/2023";

/// Warning code recorded when the fallback rate is used.
pub const TER_RATE_FALLBACK: &str = "TER_RATE_FALLBACK";

/// Rate used when no table row covers the income.
///
/// These equal the top row of the 2025 table and must stay as literals.
pub const fn fallback_ter_rate(category: TerCategory) -> Decimal {
    match category {
        TerCategory::A => dec!(0.15),
        TerCategory::B => dec!(0.20),
        TerCategory::C => dec!(0.25),
    }
}

/// A resolved TER rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerRateLookup {
    /// The rate to apply.
    pub rate: Decimal,
    /// Zero-based row index that matched, `None` when the fallback was used.
    pub row: Option<usize>,
}

impl TerRateLookup {
    /// Returns true if no table row matched.
    pub fn is_fallback(&self) -> bool {
        self.row.is_none()
    }
}

/// Finds the TER rate and the row it came from.
pub fn lookup_ter_rate(
    tables: &RateTables,
    monthly_income: Decimal,
    category: TerCategory,
) -> TerRateLookup {
    match tables
        .ter_brackets()
        .iter()
        .position(|row| row.contains(monthly_income))
    {
        Some(i) => TerRateLookup {
            rate: tables.ter_brackets()[i].rate_for(category),
            row: Some(i),
        },
        None => {
            warn!(
                monthly_income = %monthly_income,
                category = category.as_str(),
                "No TER row covers income, using top-bracket rate"
            );
            TerRateLookup {
                rate: fallback_ter_rate(category),
                row: None,
            }
        }
    }
}

/// Returns the TER rate for a monthly income and category.
///
/// # Examples
///
/// ```
/// use pph21_engine::calculation::ter_rate;
/// use pph21_engine::config::RateTables;
/// use pph21_engine::models::TerCategory;
/// use rust_decimal_macros::dec;
///
/// let tables = RateTables::indonesia_2025();
/// assert_eq!(ter_rate(tables, dec!(8000000), TerCategory::B), dec!(0.015));
/// assert_eq!(ter_rate(tables, dec!(-1), TerCategory::C), dec!(0.25));
/// ```
pub fn ter_rate(tables: &RateTables, monthly_income: Decimal, category: TerCategory) -> Decimal {
    lookup_ter_rate(tables, monthly_income, category).rate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{TaxBracket, TaxYearMetadata, TerBracket, PtkpEntry};
    use std::collections::BTreeMap;

    fn tables() -> &'static RateTables {
        RateTables::indonesia_2025()
    }

    #[test]
    fn test_scenario_b_eight_million_category_b() {
        assert_eq!(ter_rate(tables(), dec!(8000000), TerCategory::B), dec!(0.015));
    }

    #[test]
    fn test_category_selects_column() {
        assert_eq!(ter_rate(tables(), dec!(12000000), TerCategory::A), dec!(0.03));
        assert_eq!(ter_rate(tables(), dec!(12000000), TerCategory::B), dec!(0.04));
        assert_eq!(ter_rate(tables(), dec!(12000000), TerCategory::C), dec!(0.05));
    }

    #[test]
    fn test_low_income_is_zero_rated() {
        assert_eq!(ter_rate(tables(), dec!(0), TerCategory::C), dec!(0));
        assert_eq!(ter_rate(tables(), dec!(5400000), TerCategory::A), dec!(0));
    }

    #[test]
    fn test_shared_boundary_goes_to_lower_row() {
        let lookup = lookup_ter_rate(tables(), dec!(10000000), TerCategory::B);
        assert_eq!(lookup.row, Some(3));
        assert_eq!(lookup.rate, dec!(0.015));

        let lookup = lookup_ter_rate(tables(), dec!(10000000.01), TerCategory::B);
        assert_eq!(lookup.row, Some(4));
    }

    #[test]
    fn test_fractional_income_between_integer_bounds_is_covered() {
        let lookup = lookup_ter_rate(tables(), dec!(5400000.50), TerCategory::A);
        assert!(!lookup.is_fallback());
        assert_eq!(lookup.rate, dec!(0.0025));
    }

    #[test]
    fn test_top_row_is_unbounded() {
        let lookup = lookup_ter_rate(tables(), dec!(900000000000), TerCategory::A);
        assert_eq!(lookup.row, Some(8));
        assert_eq!(lookup.rate, dec!(0.15));
    }

    #[test]
    fn test_negative_income_uses_fallback() {
        let lookup = lookup_ter_rate(tables(), dec!(-1), TerCategory::A);
        assert!(lookup.is_fallback());
        assert_eq!(lookup.rate, dec!(0.15));
        assert_eq!(ter_rate(tables(), dec!(-1), TerCategory::B), dec!(0.20));
        assert_eq!(ter_rate(tables(), dec!(-1), TerCategory::C), dec!(0.25));
    }

    #[test]
    fn test_table_with_hole_uses_fallback() {
        let metadata = TaxYearMetadata {
            year: 2025,
            name: "holed".to_string(),
            regulations: vec![],
            default_ptkp_status: "TK".to_string(),
        };
        let mut ptkp = BTreeMap::new();
        ptkp.insert(
            "TK".to_string(),
            PtkpEntry {
                description: "single".to_string(),
                amount: dec!(54000000),
            },
        );
        let holed = RateTables::assemble(
            metadata,
            ptkp,
            vec![TaxBracket {
                limit: None,
                rate: dec!(0.05),
            }],
            vec![TerBracket {
                min_income: dec!(0),
                max_income: Some(dec!(1000000)),
                rate_a: dec!(0.01),
                rate_b: dec!(0.01),
                rate_c: dec!(0.01),
            }],
        );

        let lookup = lookup_ter_rate(&holed, dec!(2000000), TerCategory::B);
        assert!(lookup.is_fallback());
        assert_eq!(lookup.rate, dec!(0.20));
    }

    #[test]
    fn test_fallback_matches_builtin_top_row() {
        let top = tables().ter_brackets().last().unwrap();
        for category in [TerCategory::A, TerCategory::B, TerCategory::C] {
            assert_eq!(fallback_ter_rate(category), top.rate_for(category));
        }
    }
}
