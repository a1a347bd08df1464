//! Property tests for the PPh 21 calculation core.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use pph21_engine::calculation::{
    BIAYA_JABATAN_CAP, biaya_jabatan, calculate, progressive_tax, ter_rate,
};
use pph21_engine::config::RateTables;
use pph21_engine::models::{Bonus, CalculationInput, Scheme, TerCategory};

fn money(max: u64) -> impl Strategy<Value = Decimal> {
    (0..=max).prop_map(Decimal::from)
}

fn category() -> impl Strategy<Value = TerCategory> {
    prop_oneof![
        Just(TerCategory::A),
        Just(TerCategory::B),
        Just(TerCategory::C)
    ]
}

fn status() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("TK"),
        Just("TK1"),
        Just("TK2"),
        Just("TK3"),
        Just("K0"),
        Just("K1"),
        Just("K2"),
        Just("K3")
    ]
}

fn bonuses() -> impl Strategy<Value = Vec<Bonus>> {
    prop::collection::vec(
        (1u64..=50_000_000, 1u32..=12)
            .prop_map(|(amount, month)| Bonus::new("bonus", Decimal::from(amount), month)),
        0..4,
    )
}

fn input() -> impl Strategy<Value = CalculationInput> {
    (
        money(100_000_000),
        status(),
        1u32..=12,
        money(1_000_000),
        money(10_000_000),
        bonuses(),
    )
        .prop_map(|(gross, status, months, pension, zakat, bonuses)| {
            let mut input = CalculationInput::new(gross, status)
                .with_work_months(months)
                .with_pension_monthly(pension)
                .with_zakat_annual(zakat);
            input.bonuses = bonuses;
            input
        })
}

proptest! {
    #[test]
    fn progressive_tax_is_monotonic(a in money(10_000_000_000), b in money(10_000_000_000)) {
        let tables = RateTables::indonesia_2025();
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(progressive_tax(tables, low) <= progressive_tax(tables, high));
    }

    #[test]
    fn progressive_tax_never_exceeds_top_rate(pkp in money(10_000_000_000)) {
        let tax = progressive_tax(RateTables::indonesia_2025(), pkp);
        prop_assert!(tax >= Decimal::ZERO);
        prop_assert!(tax <= pkp * dec!(0.35));
    }

    #[test]
    fn biaya_jabatan_is_bounded(gross in money(2_000_000_000)) {
        let value = biaya_jabatan(gross);
        prop_assert!(value >= Decimal::ZERO);
        prop_assert!(value <= BIAYA_JABATAN_CAP);
        prop_assert!(value <= gross * dec!(0.05));
    }

    #[test]
    fn ter_rate_is_monotonic(a in money(200_000_000), b in money(200_000_000), cat in category()) {
        let tables = RateTables::indonesia_2025();
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(ter_rate(tables, low, cat) <= ter_rate(tables, high, cat));
    }

    #[test]
    fn pkp_is_whole_thousands_and_non_negative(input in input()) {
        let result = calculate(&input);
        prop_assert!(result.pkp >= Decimal::ZERO);
        prop_assert_eq!(result.pkp % dec!(1000), Decimal::ZERO);
        prop_assert!(result.annual_tax >= Decimal::ZERO);
    }

    #[test]
    fn gross_includes_every_bonus(input in input()) {
        let result = calculate(&input);
        let salary = input.gross_monthly * Decimal::from(input.work_months);
        let bonuses: Decimal = input.bonuses.iter().map(|b| b.amount).sum();
        prop_assert_eq!(result.gross_annual, salary + bonuses);
    }

    #[test]
    fn ter_reconciles_to_annual_tax(input in input(), cat in category()) {
        let result = calculate(&input.with_scheme(Scheme::Ter { category: cat }));
        let ter = result.ter().unwrap();
        prop_assert_eq!(ter.ter_paid + ter.month12_adjustment, result.annual_tax);
        prop_assert_eq!(ter.months.len() as u32, result.work_months.min(11));
    }

    #[test]
    fn scheme_does_not_change_annual_tax(input in input(), cat in category()) {
        let traditional = calculate(&input.clone().with_scheme(Scheme::Traditional));
        let ter = calculate(&input.with_scheme(Scheme::Ter { category: cat }));
        prop_assert_eq!(traditional.annual_tax, ter.annual_tax);
        prop_assert_eq!(traditional.pkp, ter.pkp);
    }
}
