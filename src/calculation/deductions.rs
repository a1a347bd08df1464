//! Annual deductions: biaya jabatan, pension and zakat.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::AuditStep;

use super::money::{max, min};

/// Biaya jabatan rate (5% of gross).
pub const BIAYA_JABATAN_RATE: Decimal = dec!(0.05);

/// Annual ceiling for biaya jabatan.
pub const BIAYA_JABATAN_CAP: Decimal = dec!(6000000);

/// Regulation reference for biaya jabatan.
pub const BIAYA_JABATAN_REGULATION: &str = "PMK 250/PMK.03/2008";

/// Position allowance deduction: 5% of gross annual, capped at 6,000,000.
///
/// Never negative.
///
/// # Examples
///
/// ```
/// use pph21_engine::calculation::biaya_jabatan;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(biaya_jabatan(dec!(60000000)), dec!(3000000));
/// assert_eq!(biaya_jabatan(dec!(500000000)), dec!(6000000));
/// ```
pub fn biaya_jabatan(gross_annual: Decimal) -> Decimal {
    max(
        Decimal::ZERO,
        min(gross_annual * BIAYA_JABATAN_RATE, BIAYA_JABATAN_CAP),
    )
}

/// Deductions applied to gross annual income.
#[derive(Debug, Clone)]
pub struct DeductionsResult {
    /// Position allowance.
    pub biaya_jabatan: Decimal,
    /// Pension contribution for the months worked.
    pub pension_annual: Decimal,
    /// Zakat/donation, already annual.
    pub zakat_annual: Decimal,
    /// Sum of the three.
    pub total: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes all deductions for a year.
pub fn calculate_deductions(
    gross_annual: Decimal,
    pension_monthly: Decimal,
    work_months: u32,
    zakat_annual: Decimal,
    step_number: u32,
) -> DeductionsResult {
    let uncapped = gross_annual * BIAYA_JABATAN_RATE;
    let biaya_jabatan = biaya_jabatan(gross_annual);
    let cap_applied = uncapped > BIAYA_JABATAN_CAP;
    let pension_annual = pension_monthly * Decimal::from(work_months);
    let total = biaya_jabatan + pension_annual + zakat_annual;

    let biaya_reasoning = if cap_applied {
        format!(
            "biaya jabatan 5% × {} = {} (capped at {})",
            gross_annual.normalize(),
            uncapped.normalize(),
            BIAYA_JABATAN_CAP
        )
    } else {
        format!(
            "biaya jabatan 5% × {} = {}",
            gross_annual.normalize(),
            biaya_jabatan.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "deductions".to_string(),
        rule_name: "Annual Deductions".to_string(),
        regulation_ref: BIAYA_JABATAN_REGULATION.to_string(),
        input: serde_json::json!({
            "gross_annual": gross_annual.to_string(),
            "pension_monthly": pension_monthly.to_string(),
            "work_months": work_months,
            "zakat_annual": zakat_annual.to_string()
        }),
        output: serde_json::json!({
            "biaya_jabatan": biaya_jabatan.to_string(),
            "cap_applied": cap_applied,
            "pension_annual": pension_annual.to_string(),
            "zakat_annual": zakat_annual.to_string(),
            "total_deductions": total.to_string()
        }),
        reasoning: format!(
            "{}; pension {} × {} = {}; zakat {}; total {}",
            biaya_reasoning,
            pension_monthly.normalize(),
            work_months,
            pension_annual.normalize(),
            zakat_annual.normalize(),
            total.normalize()
        ),
    };

    DeductionsResult {
        biaya_jabatan,
        pension_annual,
        zakat_annual,
        total,
        audit_step,
    }
}
