//! Calculation result models for the PPh 21 engine.
//!
//! This module contains the [`CalculationResult`] type and its associated
//! structures: the scheme-specific withholding view and the audit trace.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::TerCategory;

/// Withholding for a single month under the TER scheme.
///
/// # Example
///
/// ```
/// use pph21_engine::models::MonthlyWithholding;
/// use rust_decimal_macros::dec;
///
/// let month = MonthlyWithholding {
///     month: 6,
///     income: dec!(13000000),
///     rate: dec!(0.04),
///     tax: dec!(520000),
///     has_bonus: true,
///     bonus_names: vec!["Mid-year bonus".to_string()],
/// };
/// assert_eq!(month.income * month.rate, month.tax);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyWithholding {
    /// Month number, 1-11.
    pub month: u32,
    /// Salary plus any bonuses landing in this month.
    pub income: Decimal,
    /// TER rate applied.
    pub rate: Decimal,
    /// Tax withheld (income × rate).
    pub tax: Decimal,
    /// Whether at least one bonus landed in this month.
    pub has_bonus: bool,
    /// Names of the bonuses landing in this month.
    #[serde(default)]
    pub bonus_names: Vec<String>,
}

/// The month-by-month view produced by the TER scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerWithholding {
    /// The TER rate column used.
    pub category: TerCategory,
    /// Months 1 to min(11, work months).
    pub months: Vec<MonthlyWithholding>,
    /// Total withheld across `months`.
    pub ter_paid: Decimal,
    /// Amount due in the final month; negative means a refund.
    pub month12_adjustment: Decimal,
}

impl TerWithholding {
    /// Returns true when the final-month adjustment is a refund.
    pub fn is_refund(&self) -> bool {
        self.month12_adjustment < Decimal::ZERO
    }
}

/// The scheme-specific part of a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scheme", rename_all = "snake_case")]
pub enum Withholding {
    /// Annual tax spread evenly; no breakdown.
    Traditional,
    /// TER breakdown and reconciliation.
    Ter(TerWithholding),
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The regulation the rule comes from.
    pub regulation_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings mark inputs that fell back to a default rather than failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

impl AuditWarning {
    /// Creates a new warning.
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        severity: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity: severity.into(),
        }
    }
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

impl AuditTrace {
    /// Returns true if a warning with `code` was recorded.
    pub fn has_warning(&self, code: &str) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }
}

/// The complete result of a PPh 21 calculation.
///
/// Produced once per call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Gross monthly salary as supplied.
    pub gross_monthly: Decimal,
    /// Months worked after clamping into 1-12.
    pub work_months: u32,
    /// Gross monthly salary × months worked.
    pub gross_from_salary: Decimal,
    /// Sum of every bonus, including those outside the worked period.
    pub bonus_total: Decimal,
    /// Salary plus bonuses.
    pub gross_annual: Decimal,
    /// Position allowance deduction.
    pub biaya_jabatan: Decimal,
    /// Pension contribution × months worked.
    pub pension_annual: Decimal,
    /// Zakat/donation deduction.
    pub zakat_annual: Decimal,
    /// Sum of all deductions.
    pub total_deductions: Decimal,
    /// Gross annual minus deductions.
    pub netto_annual: Decimal,
    /// The PTKP status code actually applied.
    pub ptkp_status: String,
    /// Non-taxable amount for the applied status.
    pub ptkp: Decimal,
    /// Taxable income, floored to a multiple of 1,000.
    pub pkp: Decimal,
    /// Annual liability from the progressive brackets.
    pub annual_tax: Decimal,
    /// Annual tax / 12.
    pub monthly_tax: Decimal,
    /// Annual tax as a percentage of gross annual.
    pub effective_tax_rate: Decimal,
    /// Gross annual minus annual tax.
    pub take_home_annual: Decimal,
    /// Take-home annual / 12.
    pub take_home_monthly: Decimal,
    /// Scheme-specific withholding view.
    pub withholding: Withholding,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

impl CalculationResult {
    /// Returns the TER breakdown if the TER scheme was used.
    pub fn ter(&self) -> Option<&TerWithholding> {
        match &self.withholding {
            Withholding::Ter(ter) => Some(ter),
            Withholding::Traditional => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_ter() -> TerWithholding {
        TerWithholding {
            category: TerCategory::B,
            months: vec![MonthlyWithholding {
                month: 1,
                income: dec!(8000000),
                rate: dec!(0.015),
                tax: dec!(120000),
                has_bonus: false,
                bonus_names: vec![],
            }],
            ter_paid: dec!(120000),
            month12_adjustment: dec!(-20000),
        }
    }

    #[test]
    fn test_withholding_traditional_serialization() {
        let json = serde_json::to_value(Withholding::Traditional).unwrap();
        assert_eq!(json["scheme"], "traditional");
    }

    #[test]
    fn test_withholding_ter_serialization_flattens_fields() {
        let json = serde_json::to_value(Withholding::Ter(sample_ter())).unwrap();
        assert_eq!(json["scheme"], "ter");
        assert_eq!(json["category"], "B");
        assert_eq!(json["ter_paid"], "120000");
        assert_eq!(json["months"][0]["rate"], "0.015");
    }

    #[test]
    fn test_withholding_round_trips_through_json() {
        let original = Withholding::Ter(sample_ter());
        let json = serde_json::to_string(&original).unwrap();
        let parsed: Withholding = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_negative_adjustment_is_refund() {
        let mut ter = sample_ter();
        assert!(ter.is_refund());

        ter.month12_adjustment = dec!(0);
        assert!(!ter.is_refund());
    }

    #[test]
    fn test_audit_trace_has_warning() {
        let trace = AuditTrace {
            steps: vec![],
            warnings: vec![AuditWarning::new("TER_RATE_FALLBACK", "fallback", "medium")],
        };
        assert!(trace.has_warning("TER_RATE_FALLBACK"));
        assert!(!trace.has_warning("UNKNOWN_PTKP_STATUS"));
    }
}
