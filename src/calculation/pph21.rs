//! PPh 21 calculation.
//!
//! Both schemes share the same prefix (gross, deductions, PTKP, PKP) and the
//! same annual liability. They differ in the withholding view: the
//! traditional scheme spreads the annual tax evenly, while TER withholds
//! months 1-11 at the effective rate and settles the difference in month 12.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::config::RateTables;
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, CalculationInput, CalculationResult, FULL_YEAR_MONTHS,
    MonthlyWithholding, Scheme, TerCategory, TerWithholding, Withholding,
};

use super::deductions::calculate_deductions;
use super::money::{max, per_month, percentage_of, round_down_to_thousand};
use super::progressive_tax::{PROGRESSIVE_REGULATION, calculate_progressive_tax};
use super::ptkp::resolve_ptkp;
use super::ter_rate::{TER_RATE_FALLBACK, TER_REGULATION, lookup_ter_rate};

/// Months withheld through the TER table; the last month is a true-up.
pub const TER_TABLE_MONTHS: u32 = 11;

/// Warning code for a bonus dated outside the worked period.
pub const BONUS_OUTSIDE_WORK_PERIOD: &str = "BONUS_OUTSIDE_WORK_PERIOD";

/// Warning code for months worked outside 1-12.
pub const WORK_MONTHS_CLAMPED: &str = "WORK_MONTHS_CLAMPED";

/// Calculates PPh 21 with the built-in 2025 rate tables.
///
/// # Examples
///
/// ```
/// use pph21_engine::calculation::calculate;
/// use pph21_engine::models::CalculationInput;
/// use rust_decimal_macros::dec;
///
/// let result = calculate(&CalculationInput::new(dec!(10000000), "TK"));
///
/// assert_eq!(result.gross_annual, dec!(120000000));
/// assert_eq!(result.pkp, dec!(60000000));
/// assert_eq!(result.annual_tax, dec!(4000000));
/// ```
pub fn calculate(input: &CalculationInput) -> CalculationResult {
    calculate_with_tables(input, RateTables::indonesia_2025())
}

/// Calculates PPh 21 against the given rate tables.
///
/// Never fails: unknown statuses, uncovered TER incomes and bonuses in
/// unworked months all degrade to defined defaults and are recorded as
/// warnings in the audit trace.
pub fn calculate_with_tables(input: &CalculationInput, tables: &RateTables) -> CalculationResult {
    let mut steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();
    let mut step_number: u32 = 1;

    let work_months = input.effective_work_months();
    if work_months != input.work_months {
        warn!(
            requested = input.work_months,
            applied = work_months,
            "Work months outside 1-12, clamped"
        );
        warnings.push(AuditWarning::new(
            WORK_MONTHS_CLAMPED,
            format!(
                "work_months {} is outside 1-12; using {}",
                input.work_months, work_months
            ),
            "low",
        ));
    }

    // Gross
    let gross_from_salary = input.gross_monthly * Decimal::from(work_months);
    let bonus_total = input.bonus_total();
    let gross_annual = gross_from_salary + bonus_total;
    steps.push(AuditStep {
        step_number,
        rule_id: "gross_annual".to_string(),
        rule_name: "Gross Annual Income".to_string(),
        regulation_ref: PROGRESSIVE_REGULATION.to_string(),
        input: serde_json::json!({
            "gross_monthly": input.gross_monthly.to_string(),
            "work_months": work_months,
            "bonus_count": input.bonuses.len()
        }),
        output: serde_json::json!({
            "gross_from_salary": gross_from_salary.to_string(),
            "bonus_total": bonus_total.to_string(),
            "gross_annual": gross_annual.to_string()
        }),
        reasoning: format!(
            "{} × {} + bonuses {} = {}",
            input.gross_monthly.normalize(),
            work_months,
            bonus_total.normalize(),
            gross_annual.normalize()
        ),
    });
    step_number += 1;

    // Deductions and netto
    let deductions = calculate_deductions(
        gross_annual,
        input.pension_monthly,
        work_months,
        input.zakat_annual,
        step_number,
    );
    steps.push(deductions.audit_step);
    step_number += 1;
    let netto_annual = gross_annual - deductions.total;

    // PTKP
    let ptkp = resolve_ptkp(tables, &input.ptkp_status, step_number);
    steps.push(ptkp.audit_step);
    warnings.extend(ptkp.warning);
    step_number += 1;

    // PKP
    let unrounded_pkp = max(Decimal::ZERO, netto_annual - ptkp.amount);
    let pkp = round_down_to_thousand(unrounded_pkp);
    steps.push(AuditStep {
        step_number,
        rule_id: "pkp".to_string(),
        rule_name: "Taxable Income (PKP)".to_string(),
        regulation_ref: PROGRESSIVE_REGULATION.to_string(),
        input: serde_json::json!({
            "netto_annual": netto_annual.to_string(),
            "ptkp": ptkp.amount.to_string()
        }),
        output: serde_json::json!({
            "unrounded_pkp": unrounded_pkp.to_string(),
            "pkp": pkp.to_string()
        }),
        reasoning: format!(
            "max(0, {} - {}) = {}, floored to thousand = {}",
            netto_annual.normalize(),
            ptkp.amount.normalize(),
            unrounded_pkp.normalize(),
            pkp.normalize()
        ),
    });
    step_number += 1;

    let (annual_tax, withholding) = match input.scheme {
        Scheme::Traditional => {
            let progressive = calculate_progressive_tax(tables, pkp, step_number);
            steps.push(progressive.audit_step);
            (progressive.tax, Withholding::Traditional)
        }
        Scheme::Ter { category } => {
            let simulation =
                simulate_ter_months(tables, input, work_months, category, step_number);
            steps.push(simulation.audit_step);
            warnings.extend(simulation.warnings);
            step_number += 1;

            let progressive = calculate_progressive_tax(tables, pkp, step_number);
            steps.push(progressive.audit_step);
            step_number += 1;

            let annual_tax = progressive.tax;
            let month12_adjustment = annual_tax - simulation.ter_paid;
            steps.push(AuditStep {
                step_number,
                rule_id: "ter_reconciliation".to_string(),
                rule_name: "TER Month 12 Reconciliation".to_string(),
                regulation_ref: TER_REGULATION.to_string(),
                input: serde_json::json!({
                    "annual_tax": annual_tax.to_string(),
                    "ter_paid": simulation.ter_paid.to_string()
                }),
                output: serde_json::json!({
                    "month12_adjustment": month12_adjustment.to_string(),
                    "refund": month12_adjustment < Decimal::ZERO
                }),
                reasoning: format!(
                    "{} - {} = {}",
                    annual_tax.normalize(),
                    simulation.ter_paid.normalize(),
                    month12_adjustment.normalize()
                ),
            });

            (
                annual_tax,
                Withholding::Ter(TerWithholding {
                    category,
                    months: simulation.months,
                    ter_paid: simulation.ter_paid,
                    month12_adjustment,
                }),
            )
        }
    };

    let monthly_tax = per_month(annual_tax);
    let effective_tax_rate = percentage_of(annual_tax, gross_annual);
    let take_home_annual = gross_annual - annual_tax;
    let take_home_monthly = per_month(take_home_annual);

    debug!(
        gross_annual = %gross_annual,
        pkp = %pkp,
        annual_tax = %annual_tax,
        warnings = warnings.len(),
        "PPh 21 calculated"
    );

    CalculationResult {
        gross_monthly: input.gross_monthly,
        work_months,
        gross_from_salary,
        bonus_total,
        gross_annual,
        biaya_jabatan: deductions.biaya_jabatan,
        pension_annual: deductions.pension_annual,
        zakat_annual: deductions.zakat_annual,
        total_deductions: deductions.total,
        netto_annual,
        ptkp_status: ptkp.status,
        ptkp: ptkp.amount,
        pkp,
        annual_tax,
        monthly_tax,
        effective_tax_rate,
        take_home_annual,
        take_home_monthly,
        withholding,
        audit_trace: AuditTrace { steps, warnings },
    }
}

struct TerSimulation {
    months: Vec<MonthlyWithholding>,
    ter_paid: Decimal,
    warnings: Vec<AuditWarning>,
    audit_step: AuditStep,
}

/// Runs months 1 to min(11, work_months) through the TER table.
///
/// Bonuses land in their month's slot only when that month was worked; a
/// bonus in an unworked month stays in gross annual but is left out here.
fn simulate_ter_months(
    tables: &RateTables,
    input: &CalculationInput,
    work_months: u32,
    category: TerCategory,
    step_number: u32,
) -> TerSimulation {
    const SLOTS: usize = FULL_YEAR_MONTHS as usize;
    let worked = work_months as usize;
    let mut warnings = Vec::new();

    let mut incomes = [Decimal::ZERO; SLOTS];
    let mut bonus_names: [Vec<String>; SLOTS] = Default::default();
    for slot in incomes.iter_mut().take(worked) {
        *slot = input.gross_monthly;
    }

    for bonus in &input.bonuses {
        match bonus.month_index() {
            Some(i) if i < worked => {
                incomes[i] += bonus.amount;
                bonus_names[i].push(bonus.name.clone());
            }
            _ => {
                warn!(
                    bonus = %bonus.name,
                    month = bonus.month,
                    work_months,
                    "Bonus outside worked period excluded from TER months"
                );
                warnings.push(AuditWarning::new(
                    BONUS_OUTSIDE_WORK_PERIOD,
                    format!(
                        "Bonus '{}' in month {} is outside the {} worked months; \
                         counted in gross annual but not withheld monthly",
                        bonus.name, bonus.month, work_months
                    ),
                    "low",
                ));
            }
        }
    }

    let table_months = work_months.min(TER_TABLE_MONTHS) as usize;
    let mut months = Vec::with_capacity(table_months);
    let mut ter_paid = Decimal::ZERO;
    for (i, (income, names)) in incomes
        .iter()
        .zip(bonus_names.iter())
        .take(table_months)
        .enumerate()
    {
        let month = i as u32 + 1;
        let lookup = lookup_ter_rate(tables, *income, category);
        if lookup.is_fallback() {
            warnings.push(AuditWarning::new(
                TER_RATE_FALLBACK,
                format!(
                    "No TER row covers income {} in month {}; used top rate {}",
                    income, month, lookup.rate
                ),
                "medium",
            ));
        }
        let tax = *income * lookup.rate;
        ter_paid += tax;
        months.push(MonthlyWithholding {
            month,
            income: *income,
            rate: lookup.rate,
            tax,
            has_bonus: !names.is_empty(),
            bonus_names: names.clone(),
        });
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "ter_withholding".to_string(),
        rule_name: "TER Monthly Withholding".to_string(),
        regulation_ref: TER_REGULATION.to_string(),
        input: serde_json::json!({
            "category": category.as_str(),
            "work_months": work_months,
            "monthly_incomes": incomes.iter().map(|d| d.to_string()).collect::<Vec<_>>()
        }),
        output: serde_json::json!({
            "months_withheld": months.len(),
            "ter_paid": ter_paid.to_string()
        }),
        reasoning: format!(
            "Months 1-{} withheld at category {} rates, total {}",
            months.len(),
            category.as_str(),
            ter_paid.normalize()
        ),
    };

    TerSimulation {
        months,
        ter_paid,
        warnings,
        audit_step,
    }
}
