//! Flat-rate taxes: PPh 22, PPh 23, PPh 4(2), PPN and PPNBM.
//!
//! Each is a single multiplication of a base amount by a fixed rate.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// A flat-rate tax and its statutory rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FlatRateTax {
    /// PPh 22 on imports, importer holds an API number.
    Pph22ImportWithApi,
    /// PPh 22 on imports without an API number.
    Pph22ImportWithoutApi,
    /// PPh 23 on services.
    Pph23Services,
    /// PPh 23 on dividends, interest and royalties.
    Pph23Dividends,
    /// Final PPh 4(2) on land and building rental.
    Pph4_2Rental,
    /// Final PPh 4(2) for small businesses (PP 55/2022).
    Pph4_2Umkm,
    /// Value-added tax.
    Ppn,
    /// Luxury-goods sales tax; the rate depends on the goods group.
    Ppnbm {
        /// Rate for the goods group (e.g. 0.20).
        rate: Decimal,
    },
}

impl FlatRateTax {
    /// Returns the rate for this tax.
    ///
    /// # Examples
    ///
    /// ```
    /// use pph21_engine::calculation::FlatRateTax;
    /// use rust_decimal_macros::dec;
    ///
    /// assert_eq!(FlatRateTax::Ppn.rate(), dec!(0.12));
    /// assert_eq!(FlatRateTax::Ppnbm { rate: dec!(0.4) }.rate(), dec!(0.4));
    /// ```
    pub fn rate(&self) -> Decimal {
        match self {
            FlatRateTax::Pph22ImportWithApi => dec!(0.025),
            FlatRateTax::Pph22ImportWithoutApi => dec!(0.075),
            FlatRateTax::Pph23Services => dec!(0.02),
            FlatRateTax::Pph23Dividends => dec!(0.15),
            FlatRateTax::Pph4_2Rental => dec!(0.10),
            FlatRateTax::Pph4_2Umkm => dec!(0.005),
            FlatRateTax::Ppn => dec!(0.12),
            FlatRateTax::Ppnbm { rate } => *rate,
        }
    }
}

/// The result of a flat-rate calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatTaxResult {
    /// The tax applied.
    pub kind: FlatRateTax,
    /// The amount taxed.
    pub base: Decimal,
    /// The rate applied.
    pub rate: Decimal,
    /// base × rate.
    pub tax: Decimal,
}

/// Applies a flat-rate tax to a base amount.
pub fn calculate_flat_tax(kind: FlatRateTax, base: Decimal) -> FlatTaxResult {
    let rate = kind.rate();
    FlatTaxResult {
        kind,
        base,
        rate,
        tax: base * rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ppn_on_ten_million() {
        let result = calculate_flat_tax(FlatRateTax::Ppn, dec!(10000000));
        assert_eq!(result.rate, dec!(0.12));
        assert_eq!(result.tax, dec!(1200000));
    }

    #[test]
    fn test_pph23_services() {
        let result = calculate_flat_tax(FlatRateTax::Pph23Services, dec!(5000000));
        assert_eq!(result.tax, dec!(100000));
    }

    #[test]
    fn test_pph22_import_rates_differ_by_api() {
        let with_api = calculate_flat_tax(FlatRateTax::Pph22ImportWithApi, dec!(100000000));
        let without = calculate_flat_tax(FlatRateTax::Pph22ImportWithoutApi, dec!(100000000));
        assert_eq!(with_api.tax, dec!(2500000));
        assert_eq!(without.tax, dec!(7500000));
    }

    #[test]
    fn test_pph4_2_umkm_half_percent() {
        let result = calculate_flat_tax(FlatRateTax::Pph4_2Umkm, dec!(40000000));
        assert_eq!(result.tax, dec!(200000));
    }

    #[test]
    fn test_ppnbm_uses_supplied_rate() {
        let result = calculate_flat_tax(FlatRateTax::Ppnbm { rate: dec!(0.20) }, dec!(300000000));
        assert_eq!(result.tax, dec!(60000000));
    }

    #[test]
    fn test_kind_deserialization() {
        let kind: FlatRateTax = serde_json::from_str(r#"{"kind":"pph23_services"}"#).unwrap();
        assert_eq!(kind, FlatRateTax::Pph23Services);

        let kind: FlatRateTax =
            serde_json::from_str(r#"{"kind":"ppnbm","rate":"0.1"}"#).unwrap();
        assert_eq!(kind, FlatRateTax::Ppnbm { rate: dec!(0.1) });
    }
}
