//! Request types for the PPh 21 engine API.
//!
//! Requests carry flat, form-like fields; they are validated here and then
//! converted into the domain [`CalculationInput`].

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calculation::FlatRateTax;
use crate::error::{EngineError, EngineResult};
use crate::models::{Bonus, CalculationInput, FULL_YEAR_MONTHS, Scheme, TerCategory};

/// Scheme selector as it appears in requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemeName {
    /// Single annual computation.
    #[default]
    Traditional,
    /// TER monthly withholding.
    Ter,
}

/// Request body for the `/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Gross monthly salary.
    pub gross_monthly: Decimal,
    /// PTKP status code.
    pub ptkp_status: String,
    /// Months worked (clamped into 1-12 by the engine).
    #[serde(default = "default_work_months")]
    pub work_months: u32,
    /// Withholding scheme.
    #[serde(default)]
    pub scheme: SchemeName,
    /// TER category; only used when `scheme` is `ter`.
    #[serde(default)]
    pub ter_category: TerCategory,
    /// Monthly pension contribution.
    #[serde(default)]
    pub pension_monthly: Decimal,
    /// Annual zakat/donation.
    #[serde(default)]
    pub zakat_annual: Decimal,
    /// Bonuses paid during the year.
    #[serde(default)]
    pub bonuses: Vec<BonusRequest>,
}

fn default_work_months() -> u32 {
    FULL_YEAR_MONTHS
}

/// Bonus information in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BonusRequest {
    /// Label for the bonus.
    pub name: String,
    /// Amount paid; must be positive.
    pub amount: Decimal,
    /// Month paid, 1-12.
    pub month: u32,
}

/// Largest monetary amount a request may carry.
///
/// Keeps every annual product and bracket sum well inside `Decimal` range.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000000000);

fn within_bounds(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: field.to_string(),
            message: format!("must not be negative, got {}", value),
        });
    }
    if value > MAX_AMOUNT {
        return Err(EngineError::InvalidInput {
            field: field.to_string(),
            message: format!("must not exceed {}, got {}", MAX_AMOUNT, value),
        });
    }
    Ok(())
}

impl CalculationRequest {
    /// Validates monetary fields and bonus entries.
    pub fn validate(&self) -> EngineResult<()> {
        within_bounds("gross_monthly", self.gross_monthly)?;
        within_bounds("pension_monthly", self.pension_monthly)?;
        within_bounds("zakat_annual", self.zakat_annual)?;

        for (i, bonus) in self.bonuses.iter().enumerate() {
            let field = format!("bonuses[{}].amount", i);
            if bonus.amount.is_zero() {
                return Err(EngineError::InvalidInput {
                    field,
                    message: "must be positive, got 0".to_string(),
                });
            }
            within_bounds(&field, bonus.amount)?;
            if !(1..=FULL_YEAR_MONTHS).contains(&bonus.month) {
                return Err(EngineError::InvalidInput {
                    field: format!("bonuses[{}].month", i),
                    message: format!("must be between 1 and 12, got {}", bonus.month),
                });
            }
        }
        Ok(())
    }
}

impl TryFrom<CalculationRequest> for CalculationInput {
    type Error = EngineError;

    fn try_from(req: CalculationRequest) -> EngineResult<Self> {
        req.validate()?;

        let scheme = match req.scheme {
            SchemeName::Traditional => Scheme::Traditional,
            SchemeName::Ter => Scheme::Ter {
                category: req.ter_category,
            },
        };

        Ok(CalculationInput {
            gross_monthly: req.gross_monthly,
            ptkp_status: req.ptkp_status,
            work_months: req.work_months,
            scheme,
            pension_monthly: req.pension_monthly,
            zakat_annual: req.zakat_annual,
            bonuses: req
                .bonuses
                .into_iter()
                .map(|b| Bonus::new(b.name, b.amount, b.month))
                .collect(),
        })
    }
}

/// Request body for the `/flat-tax` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlatTaxRequest {
    /// Which tax to apply.
    pub tax: FlatRateTax,
    /// The amount taxed; must not be negative.
    pub base: Decimal,
}

impl FlatTaxRequest {
    /// Validates the base amount and, for PPNBM, that the rate is within 0-1.
    pub fn validate(&self) -> EngineResult<()> {
        within_bounds("base", self.base)?;
        if let FlatRateTax::Ppnbm { rate } = self.tax {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(EngineError::InvalidInput {
                    field: "tax.rate".to_string(),
                    message: format!("must be between 0 and 1, got {}", rate),
                });
            }
        }
        Ok(())
    }
}
