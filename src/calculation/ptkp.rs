//! PTKP (non-taxable income) lookup.
//!
//! Status codes are normalized before lookup so that "K/1", "k1" and "K1"
//! all select the same tier. An unrecognized code falls back to the table's
//! default tier; this is never an error.

use rust_decimal::Decimal;
use tracing::warn;

use crate::config::RateTables;
use crate::models::{AuditStep, AuditWarning};

/// Regulation reference for PTKP amounts.
pub const PTKP_REGULATION: &str = "PMK 101/PMK.010/2016";

/// Warning code recorded when a status falls back to the default tier.
pub const UNKNOWN_PTKP_STATUS: &str = "UNKNOWN_PTKP_STATUS";

/// The result of a PTKP lookup.
#[derive(Debug, Clone)]
pub struct PtkpLookupResult {
    /// The normalized status code actually applied.
    pub status: String,
    /// The annual non-taxable amount.
    pub amount: Decimal,
    /// Set when the requested status was unknown.
    pub warning: Option<AuditWarning>,
    /// The audit step recording this lookup.
    pub audit_step: AuditStep,
}

/// Normalizes a PTKP status code: trims, uppercases, drops '/', and maps
/// "TK0" to "TK".
///
/// # Examples
///
/// ```
/// use pph21_engine::calculation::normalize_ptkp_status;
///
/// assert_eq!(normalize_ptkp_status("k/1"), "K1");
/// assert_eq!(normalize_ptkp_status(" TK/0 "), "TK");
/// ```
pub fn normalize_ptkp_status(status: &str) -> String {
    let code: String = status
        .trim()
        .chars()
        .filter(|c| *c != '/')
        .collect::<String>()
        .to_uppercase();
    if code == "TK0" { "TK".to_string() } else { code }
}

/// Returns the PTKP amount for a status, falling back to the default tier.
///
/// # Examples
///
/// ```
/// use pph21_engine::calculation::get_ptkp;
/// use pph21_engine::config::RateTables;
/// use rust_decimal_macros::dec;
///
/// let tables = RateTables::indonesia_2025();
/// assert_eq!(get_ptkp(tables, "TK"), dec!(54000000));
/// assert_eq!(get_ptkp(tables, "unknown"), dec!(54000000));
/// ```
pub fn get_ptkp(tables: &RateTables, status: &str) -> Decimal {
    resolve_status(tables, status).1
}

fn resolve_status(tables: &RateTables, status: &str) -> (String, Decimal, bool) {
    let code = normalize_ptkp_status(status);
    match tables.ptkp().get(&code) {
        Some(entry) => (code, entry.amount, false),
        None => {
            let default = tables.metadata().default_ptkp_status.clone();
            let amount = tables
                .ptkp()
                .get(&default)
                .map(|entry| entry.amount)
                .unwrap_or_default();
            (default, amount, true)
        }
    }
}

/// Looks up the PTKP amount for a status and records an audit step.
pub fn resolve_ptkp(tables: &RateTables, status: &str, step_number: u32) -> PtkpLookupResult {
    let (applied, amount, fell_back) = resolve_status(tables, status);

    let warning = fell_back.then(|| {
        warn!(
            requested = status,
            applied = %applied,
            "Unknown PTKP status, using default tier"
        );
        AuditWarning::new(
            UNKNOWN_PTKP_STATUS,
            format!(
                "PTKP status '{}' is not recognized; applied default '{}'",
                status, applied
            ),
            "medium",
        )
    });

    let reasoning = if fell_back {
        format!(
            "Status '{}' not found; default status '{}' gives PTKP {}",
            status, applied, amount
        )
    } else {
        format!("Status '{}' gives PTKP {}", applied, amount)
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "ptkp_lookup".to_string(),
        rule_name: "PTKP Lookup".to_string(),
        regulation_ref: PTKP_REGULATION.to_string(),
        input: serde_json::json!({
            "requested_status": status
        }),
        output: serde_json::json!({
            "status": applied,
            "ptkp": amount.to_string(),
            "fallback": fell_back
        }),
        reasoning,
    };

    PtkpLookupResult {
        status: applied,
        amount,
        warning,
        audit_step,
    }
}
