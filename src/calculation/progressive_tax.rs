//! Progressive annual tax (Pasal 17).
//!
//! Each bracket taxes only the slice of PKP falling between the previous
//! bracket's limit and its own.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::config::RateTables;
use crate::models::AuditStep;

use super::money::min;

/// Regulation reference for the progressive brackets.
pub const PROGRESSIVE_REGULATION: &str = "UU 7/2021 (HPP) Pasal 17";

/// The portion of PKP taxed inside one bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BracketSlice {
    /// Lower bound of the bracket (the previous limit).
    pub floor: Decimal,
    /// Upper bound of the bracket, `None` for unbounded.
    pub limit: Option<Decimal>,
    /// Marginal rate.
    pub rate: Decimal,
    /// Income taxed in this bracket.
    pub taxable: Decimal,
    /// Tax due on `taxable`.
    pub tax: Decimal,
}

/// The result of a progressive tax computation.
#[derive(Debug, Clone)]
pub struct ProgressiveTaxResult {
    /// Total annual tax.
    pub tax: Decimal,
    /// Per-bracket slices that contributed.
    pub slices: Vec<BracketSlice>,
    /// The audit step recording this computation.
    pub audit_step: AuditStep,
}

fn bracket_slices(tables: &RateTables, pkp: Decimal) -> Vec<BracketSlice> {
    let mut slices = Vec::new();
    if pkp <= Decimal::ZERO {
        return slices;
    }

    let mut floor = Decimal::ZERO;
    for bracket in tables.brackets() {
        let upper = match bracket.limit {
            Some(limit) => min(pkp, limit),
            None => pkp,
        };
        let taxable = upper - floor;
        slices.push(BracketSlice {
            floor,
            limit: bracket.limit,
            rate: bracket.rate,
            taxable,
            tax: taxable * bracket.rate,
        });

        match bracket.limit {
            Some(limit) if pkp > limit => floor = limit,
            _ => break,
        }
    }
    slices
}

/// Computes annual tax on PKP. Returns 0 for PKP at or below zero.
///
/// # Examples
///
/// ```
/// use pph21_engine::calculation::progressive_tax;
/// use pph21_engine::config::RateTables;
/// use rust_decimal_macros::dec;
///
/// let tables = RateTables::indonesia_2025();
/// // 5% × 50,000,000 + 15% × 10,000,000
/// assert_eq!(progressive_tax(tables, dec!(60000000)), dec!(4000000));
/// assert_eq!(progressive_tax(tables, dec!(-5)), dec!(0));
/// ```
pub fn progressive_tax(tables: &RateTables, pkp: Decimal) -> Decimal {
    bracket_slices(tables, pkp).iter().map(|s| s.tax).sum()
}

/// Computes annual tax on PKP and records an audit step with the slices.
pub fn calculate_progressive_tax(
    tables: &RateTables,
    pkp: Decimal,
    step_number: u32,
) -> ProgressiveTaxResult {
    let slices = bracket_slices(tables, pkp);
    let tax: Decimal = slices.iter().map(|s| s.tax).sum();

    debug!(pkp = %pkp, tax = %tax, brackets_used = slices.len(), "Progressive tax computed");

    let reasoning = if slices.is_empty() {
        format!("PKP {} is not positive; no tax due", pkp)
    } else {
        let parts: Vec<String> = slices
            .iter()
            .map(|s| format!("{} × {}", s.rate.normalize(), s.taxable.normalize()))
            .collect();
        format!("{} = {}", parts.join(" + "), tax.normalize())
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "progressive_tax".to_string(),
        rule_name: "Progressive Annual Tax".to_string(),
        regulation_ref: PROGRESSIVE_REGULATION.to_string(),
        input: serde_json::json!({
            "pkp": pkp.to_string()
        }),
        output: serde_json::json!({
            "annual_tax": tax.to_string(),
            "slices": slices
        }),
        reasoning,
    };

    ProgressiveTaxResult {
        tax,
        slices,
        audit_step,
    }
}
