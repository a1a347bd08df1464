//! Core data models for the PPh 21 engine.

mod calculation_result;
mod input;

pub use calculation_result::{
    AuditStep, AuditTrace, AuditWarning, CalculationResult, MonthlyWithholding, TerWithholding,
    Withholding,
};
pub use input::{Bonus, CalculationInput, FULL_YEAR_MONTHS, Scheme, TerCategory};
