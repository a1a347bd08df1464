//! Calculation input model and related types.
//!
//! This module defines [`CalculationInput`], the bonus list it carries and the
//! withholding [`Scheme`] selector.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default number of months worked in a tax year.
pub const FULL_YEAR_MONTHS: u32 = 12;

/// TER rate column, determined by PTKP status.
///
/// Category A covers TK/0, TK/1, K/0; B covers TK/2, TK/3, K/1, K/2;
/// C covers K/3.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerCategory {
    /// Category A.
    A,
    /// Category B.
    #[default]
    B,
    /// Category C.
    C,
}

impl TerCategory {
    /// Returns the single-letter code.
    pub fn as_str(&self) -> &'static str {
        match self {
            TerCategory::A => "A",
            TerCategory::B => "B",
            TerCategory::C => "C",
        }
    }
}

/// How monthly withholding is produced.
///
/// Both schemes arrive at the same annual liability; they differ only in how
/// it is spread over the year.
///
/// # Example
///
/// ```
/// use pph21_engine::models::{Scheme, TerCategory};
///
/// let scheme: Scheme = serde_json::from_str(r#"{"type":"ter","category":"C"}"#).unwrap();
/// assert_eq!(scheme, Scheme::Ter { category: TerCategory::C });
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Scheme {
    /// A single annual computation, spread evenly over twelve months.
    #[default]
    Traditional,
    /// Months 1-11 withheld at the TER effective rate, month 12 trued up.
    Ter {
        /// The TER rate column.
        #[serde(default)]
        category: TerCategory,
    },
}

impl Scheme {
    /// Returns the scheme name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Traditional => "traditional",
            Scheme::Ter { .. } => "ter",
        }
    }
}

/// An irregular payment made in a specific month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bonus {
    /// Label shown in the monthly breakdown (e.g. "THR").
    pub name: String,
    /// Amount paid.
    pub amount: Decimal,
    /// The month the bonus is paid, 1-12.
    pub month: u32,
}

impl Bonus {
    /// Creates a new bonus.
    pub fn new(name: impl Into<String>, amount: Decimal, month: u32) -> Self {
        Self {
            name: name.into(),
            amount,
            month,
        }
    }

    /// Zero-based slot of the bonus month, or `None` for month 0.
    pub fn month_index(&self) -> Option<usize> {
        self.month.checked_sub(1).map(|i| i as usize)
    }
}

/// Everything a PPh 21 calculation needs.
///
/// Monetary inputs are expected to be non-negative; validating that is the
/// caller's job (the HTTP layer does it before building an input).
///
/// # Example
///
/// ```
/// use pph21_engine::models::{Bonus, CalculationInput, Scheme, TerCategory};
/// use rust_decimal_macros::dec;
///
/// let input = CalculationInput::new(dec!(8000000), "K1")
///     .with_scheme(Scheme::Ter { category: TerCategory::B })
///     .with_bonus(Bonus::new("THR", dec!(8000000), 3));
///
/// assert_eq!(input.work_months, 12);
/// assert_eq!(input.bonuses.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationInput {
    /// Gross monthly salary.
    pub gross_monthly: Decimal,
    /// PTKP status code (e.g. "TK", "K1", "K/2").
    pub ptkp_status: String,
    /// Months actually worked; clamped into 1-12 during calculation.
    #[serde(default = "default_work_months")]
    pub work_months: u32,
    /// Withholding scheme.
    #[serde(default)]
    pub scheme: Scheme,
    /// Monthly pension contribution paid by the employee.
    #[serde(default)]
    pub pension_monthly: Decimal,
    /// Annual zakat or religious donation.
    #[serde(default)]
    pub zakat_annual: Decimal,
    /// Irregular payments during the year.
    #[serde(default)]
    pub bonuses: Vec<Bonus>,
}

fn default_work_months() -> u32 {
    FULL_YEAR_MONTHS
}

impl CalculationInput {
    /// Creates an input for a full year under the traditional scheme with no
    /// deductions or bonuses.
    pub fn new(gross_monthly: Decimal, ptkp_status: impl Into<String>) -> Self {
        Self {
            gross_monthly,
            ptkp_status: ptkp_status.into(),
            work_months: FULL_YEAR_MONTHS,
            scheme: Scheme::default(),
            pension_monthly: Decimal::ZERO,
            zakat_annual: Decimal::ZERO,
            bonuses: Vec::new(),
        }
    }

    /// Sets the number of months worked.
    pub fn with_work_months(mut self, work_months: u32) -> Self {
        self.work_months = work_months;
        self
    }

    /// Sets the withholding scheme.
    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Sets the monthly pension contribution.
    pub fn with_pension_monthly(mut self, pension_monthly: Decimal) -> Self {
        self.pension_monthly = pension_monthly;
        self
    }

    /// Sets the annual zakat/donation.
    pub fn with_zakat_annual(mut self, zakat_annual: Decimal) -> Self {
        self.zakat_annual = zakat_annual;
        self
    }

    /// Adds a bonus.
    pub fn with_bonus(mut self, bonus: Bonus) -> Self {
        self.bonuses.push(bonus);
        self
    }

    /// Months worked clamped into `[1, 12]`.
    pub fn effective_work_months(&self) -> u32 {
        self.work_months.clamp(1, FULL_YEAR_MONTHS)
    }

    /// Sum of all bonus amounts, including bonuses outside the worked period.
    pub fn bonus_total(&self) -> Decimal {
        self.bonuses.iter().map(|b| b.amount).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_deserialize_minimal_input_uses_defaults() {
        let json = r#"{
            "gross_monthly": "10000000",
            "ptkp_status": "TK"
        }"#;

        let input: CalculationInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.gross_monthly, dec!(10000000));
        assert_eq!(input.work_months, 12);
        assert_eq!(input.scheme, Scheme::Traditional);
        assert_eq!(input.pension_monthly, Decimal::ZERO);
        assert_eq!(input.zakat_annual, Decimal::ZERO);
        assert!(input.bonuses.is_empty());
    }

    #[test]
    fn test_deserialize_ter_input_with_bonus() {
        let json = r#"{
            "gross_monthly": "8000000",
            "ptkp_status": "K1",
            "work_months": 10,
            "scheme": { "type": "ter", "category": "A" },
            "bonuses": [{ "name": "THR", "amount": "8000000", "month": 4 }]
        }"#;

        let input: CalculationInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.scheme, Scheme::Ter { category: TerCategory::A });
        assert_eq!(input.work_months, 10);
        assert_eq!(input.bonuses[0], Bonus::new("THR", dec!(8000000), 4));
    }

    #[test]
    fn test_ter_scheme_defaults_to_category_b() {
        let scheme: Scheme = serde_json::from_str(r#"{"type":"ter"}"#).unwrap();
        assert_eq!(scheme, Scheme::Ter { category: TerCategory::B });
    }

    #[test]
    fn test_effective_work_months_clamps() {
        let input = CalculationInput::new(dec!(1), "TK");
        assert_eq!(input.clone().with_work_months(0).effective_work_months(), 1);
        assert_eq!(input.clone().with_work_months(7).effective_work_months(), 7);
        assert_eq!(input.with_work_months(13).effective_work_months(), 12);
    }

    #[test]
    fn test_bonus_month_index() {
        assert_eq!(Bonus::new("a", dec!(1), 1).month_index(), Some(0));
        assert_eq!(Bonus::new("a", dec!(1), 12).month_index(), Some(11));
        assert_eq!(Bonus::new("a", dec!(1), 0).month_index(), None);
    }

    #[test]
    fn test_bonus_total_sums_all_bonuses() {
        let input = CalculationInput::new(dec!(1), "TK")
            .with_bonus(Bonus::new("a", dec!(1000), 2))
            .with_bonus(Bonus::new("b", dec!(2500), 13));
        assert_eq!(input.bonus_total(), dec!(3500));
    }

    #[test]
    fn test_ter_category_as_str() {
        assert_eq!(TerCategory::A.as_str(), "A");
        assert_eq!(TerCategory::default().as_str(), "B");
        assert_eq!(TerCategory::C.as_str(), "C");
    }
}
