//! Configuration types for PPh 21 rate tables.
//!
//! This module contains the strongly-typed structures deserialized from the
//! YAML files of a tax-year directory, and the validated [`RateTables`]
//! aggregate the calculation functions read from.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{EngineError, EngineResult};
use crate::models::TerCategory;

/// Metadata about the tax year a set of tables belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearMetadata {
    /// The calendar tax year (e.g. 2025).
    pub year: i32,
    /// Human-readable name of the table set.
    pub name: String,
    /// Regulations the tables are taken from.
    #[serde(default)]
    pub regulations: Vec<String>,
    /// PTKP status used when a caller supplies an unknown code.
    pub default_ptkp_status: String,
}

/// A single PTKP tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PtkpEntry {
    /// Description of the marital/dependent status.
    pub description: String,
    /// Annual non-taxable amount.
    pub amount: Decimal,
}

/// PTKP configuration file structure (`ptkp.yaml`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PtkpConfig {
    /// Map of normalized status code to tier.
    pub statuses: BTreeMap<String, PtkpEntry>,
}

/// One progressive bracket: income up to `limit` is taxed at `rate`.
///
/// A `limit` of `None` marks the unbounded top bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Upper bound of the bracket (inclusive), `None` for unbounded.
    #[serde(default)]
    pub limit: Option<Decimal>,
    /// Marginal rate applied to the slice of income inside the bracket.
    pub rate: Decimal,
}

/// Progressive bracket configuration file structure (`brackets.yaml`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketsConfig {
    /// Brackets in ascending order of limit.
    pub brackets: Vec<TaxBracket>,
}

/// One row of the TER monthly effective-rate table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerBracket {
    /// Lowest monthly income covered by the row.
    pub min_income: Decimal,
    /// Highest monthly income covered by the row, `None` for unbounded.
    #[serde(default)]
    pub max_income: Option<Decimal>,
    /// Rate for category A.
    pub rate_a: Decimal,
    /// Rate for category B.
    pub rate_b: Decimal,
    /// Rate for category C.
    pub rate_c: Decimal,
}

impl TerBracket {
    /// Returns true when `income` falls inside `[min_income, max_income]`.
    pub fn contains(&self, income: Decimal) -> bool {
        income >= self.min_income && self.max_income.is_none_or(|max| income <= max)
    }

    /// Returns the rate column for a category.
    pub fn rate_for(&self, category: TerCategory) -> Decimal {
        match category {
            TerCategory::A => self.rate_a,
            TerCategory::B => self.rate_b,
            TerCategory::C => self.rate_c,
        }
    }
}

/// TER configuration file structure (`ter.yaml`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerConfig {
    /// Rows in ascending order of income.
    pub ter_brackets: Vec<TerBracket>,
}

/// The complete, validated set of rate tables for one tax year.
///
/// Tables are read-only after construction and safe to share across threads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateTables {
    metadata: TaxYearMetadata,
    ptkp: BTreeMap<String, PtkpEntry>,
    brackets: Vec<TaxBracket>,
    ter_brackets: Vec<TerBracket>,
}

impl RateTables {
    /// Creates a new `RateTables`, validating every table.
    ///
    /// Fails with [`EngineError::InvalidRateTable`] when:
    /// - the default PTKP status is missing from the PTKP table
    /// - bracket limits are not strictly increasing, or any bracket other than
    ///   the last is unbounded, or the last is bounded
    /// - TER rows do not start at zero, are not contiguous, or are not
    ///   unbounded at the top
    pub fn new(
        metadata: TaxYearMetadata,
        ptkp: BTreeMap<String, PtkpEntry>,
        brackets: Vec<TaxBracket>,
        ter_brackets: Vec<TerBracket>,
    ) -> EngineResult<Self> {
        let tables = Self::assemble(metadata, ptkp, brackets, ter_brackets);
        tables.validate()?;
        Ok(tables)
    }

    /// Builds tables without validation. Used for the built-in constants,
    /// whose validity is covered by tests.
    pub(crate) fn assemble(
        metadata: TaxYearMetadata,
        ptkp: BTreeMap<String, PtkpEntry>,
        brackets: Vec<TaxBracket>,
        ter_brackets: Vec<TerBracket>,
    ) -> Self {
        Self {
            metadata,
            ptkp,
            brackets,
            ter_brackets,
        }
    }

    /// Checks the structural invariants of every table.
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |table: &str, message: String| EngineError::InvalidRateTable {
            table: table.to_string(),
            message,
        };

        if !self.ptkp.contains_key(&self.metadata.default_ptkp_status) {
            return Err(invalid(
                "ptkp",
                format!(
                    "default status '{}' is not defined",
                    self.metadata.default_ptkp_status
                ),
            ));
        }

        if self.brackets.is_empty() {
            return Err(invalid("brackets", "at least one bracket is required".into()));
        }
        let last = self.brackets.len() - 1;
        let mut previous = Decimal::ZERO;
        for (i, bracket) in self.brackets.iter().enumerate() {
            match bracket.limit {
                Some(limit) if i == last => {
                    return Err(invalid(
                        "brackets",
                        format!("top bracket must be unbounded, found limit {}", limit),
                    ));
                }
                Some(limit) if limit <= previous => {
                    return Err(invalid(
                        "brackets",
                        format!("limits must be strictly increasing (bracket {})", i + 1),
                    ));
                }
                Some(limit) => previous = limit,
                None if i != last => {
                    return Err(invalid(
                        "brackets",
                        format!("only the top bracket may be unbounded (bracket {})", i + 1),
                    ));
                }
                None => {}
            }
        }

        let Some(first) = self.ter_brackets.first() else {
            return Err(invalid("ter", "at least one row is required".into()));
        };
        if first.min_income != Decimal::ZERO {
            return Err(invalid(
                "ter",
                format!("first row must start at 0, found {}", first.min_income),
            ));
        }
        for (i, pair) in self.ter_brackets.windows(2).enumerate() {
            match pair[0].max_income {
                None => {
                    return Err(invalid(
                        "ter",
                        format!("only the top row may be unbounded (row {})", i + 1),
                    ));
                }
                Some(max) if max <= pair[0].min_income => {
                    return Err(invalid("ter", format!("row {} has an empty range", i + 1)));
                }
                Some(max) if pair[1].min_income != max => {
                    return Err(invalid(
                        "ter",
                        format!(
                            "rows {} and {} are not contiguous ({} -> {})",
                            i + 1,
                            i + 2,
                            max,
                            pair[1].min_income
                        ),
                    ));
                }
                Some(_) => {}
            }
        }
        if let Some(top) = self.ter_brackets.last().and_then(|row| row.max_income) {
            return Err(invalid(
                "ter",
                format!("top row must be unbounded, found max {}", top),
            ));
        }

        Ok(())
    }

    /// Returns the tax-year metadata.
    pub fn metadata(&self) -> &TaxYearMetadata {
        &self.metadata
    }

    /// Returns all PTKP tiers keyed by normalized status code.
    pub fn ptkp(&self) -> &BTreeMap<String, PtkpEntry> {
        &self.ptkp
    }

    /// Returns the progressive brackets in ascending order.
    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Returns the TER rows in ascending order.
    pub fn ter_brackets(&self) -> &[TerBracket] {
        &self.ter_brackets
    }
}
