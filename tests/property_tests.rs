//! Property-based tests for the Payslip Engine.
//!
//! Tests invariants that should hold for all inputs:
//! - PAYE is never negative and is zero up to the tax-free threshold
//! - PAYE does not fall as income rises, or as age rises
//! - UIF never exceeds the monthly cap
//! - Net pay is exactly gross pay less the sum of the deduction lines
//! - Any input up to the validator's upper bound calculates without overflow
//! - Formatted amounts always have the rand layout

use once_cell::sync::Lazy;
use proptest::prelude::*;
use regex::Regex;
use rust_decimal::Decimal;

use payslip_engine::calculation::{
    age_from_id, calculate_uif, compute_annual_tax, compute_monthly_paye, find_bracket,
    format_currency, generate_payslip, MAX_AMOUNT,
};
use payslip_engine::config::{
    AgeBand, ConfigLoader, PayeConfig, PayrollConfig, TaxBracket, TaxYearMetadata, UifConfig,
};
use payslip_engine::error::EngineError;
use payslip_engine::models::PayInput;

static EMBEDDED: Lazy<PayrollConfig> =
    Lazy::new(|| ConfigLoader::embedded().unwrap().config().clone());

/// A table whose bracket bases join up exactly at each boundary.
static CONTINUOUS: Lazy<PayrollConfig> = Lazy::new(|| {
    let paye = PayeConfig {
        brackets: vec![
            TaxBracket {
                upper_bound: Some(Decimal::from(100_000)),
                base_tax: Decimal::ZERO,
                rate: Decimal::new(10, 2),
            },
            TaxBracket {
                upper_bound: Some(Decimal::from(200_000)),
                base_tax: Decimal::from(5_000),
                rate: Decimal::new(20, 2),
            },
            TaxBracket {
                upper_bound: None,
                base_tax: Decimal::from(25_000),
                rate: Decimal::new(30, 2),
            },
        ],
        age_bands: vec![AgeBand {
            age_lower_bound: 0,
            tax_free_threshold: Decimal::from(50_000),
            rebate: Decimal::from(5_000),
        }],
    };
    let metadata = TaxYearMetadata {
        code: "TEST".to_string(),
        name: "Continuous test table".to_string(),
        version: "1".to_string(),
        source_url: String::new(),
    };
    let uif = UifConfig {
        rate: Decimal::new(1, 2),
        monthly_cap: Decimal::new(17712, 2),
    };
    PayrollConfig::new(metadata, paye, uif).unwrap()
});

static CURRENCY_LAYOUT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?R \d{1,3}( \d{3})*,\d{2}$").unwrap());

/// Rand amounts with cents, up to R50 million.
fn rand_amount() -> impl Strategy<Value = Decimal> {
    (0i64..5_000_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Amounts with cents, anywhere up to and including the validator's bound.
fn bounded_amount() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        Just(MAX_AMOUNT),
        (1i64..=100_000_000_000_000).prop_map(|cents| Decimal::new(cents, 2)),
    ]
}

/// Any non-negative `Decimal` with no fractional part.
fn any_whole_decimal() -> impl Strategy<Value = Decimal> {
    (any::<u32>(), any::<u32>(), any::<u32>())
        .prop_map(|(lo, mid, hi)| Decimal::from_parts(lo, mid, hi, false, 0))
}

/// Hours or rates with up to two decimals.
fn quantity(max: i64) -> impl Strategy<Value = Decimal> {
    (1i64..max * 100).prop_map(|hundredths| Decimal::new(hundredths, 2))
}

fn valid_input(
    normal_hours: Decimal,
    normal_rate: Decimal,
    overtime_hours: Decimal,
    loans: Decimal,
) -> PayInput {
    PayInput {
        company_name: "Acme Bakery".to_string(),
        company_address: "12 Long Street, Cape Town".to_string(),
        company_contact: "021 555 0100".to_string(),
        company_email: "payroll@acme.co.za".to_string(),
        employee_name: "Thandi Nkosi".to_string(),
        national_id_number: "9001015009087".to_string(),
        job_title: "Baker".to_string(),
        bank_name: "FNB".to_string(),
        account_no: "62012345678".to_string(),
        pay_period: "March 2025".to_string(),
        pay_date: "2025-03-25".to_string(),
        normal_hours,
        overtime_hours,
        normal_rate,
        overtime_rate: normal_rate * Decimal::new(15, 1),
        uif_enabled: true,
        paye_enabled: true,
        loans,
        ..PayInput::default()
    }
}

// ============================================================================
// PAYE
// ============================================================================

proptest! {
    #[test]
    fn prop_tax_never_negative(income in rand_amount(), age in 0u32..120) {
        prop_assert!(compute_annual_tax(income, age, EMBEDDED.paye()) >= Decimal::ZERO);
    }

    #[test]
    fn prop_tax_zero_up_to_threshold(fraction in 0u32..=100, age in 0u32..120) {
        let paye = EMBEDDED.paye();
        let income = paye.tax_free_threshold(age) * Decimal::from(fraction) / Decimal::ONE_HUNDRED;
        prop_assert_eq!(compute_annual_tax(income, age, paye), Decimal::ZERO);
    }

    #[test]
    fn prop_tax_monotonic_within_bracket(
        a in rand_amount(),
        b in rand_amount(),
        age in 0u32..120,
    ) {
        let paye = EMBEDDED.paye();
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let threshold = paye.tax_free_threshold(age);
        let low_bracket = find_bracket(low, threshold, paye).map(|m| m.index);
        let high_bracket = find_bracket(high, threshold, paye).map(|m| m.index);
        prop_assume!(low_bracket == high_bracket);

        prop_assert!(compute_annual_tax(low, age, paye) <= compute_annual_tax(high, age, paye));
    }

    #[test]
    fn prop_tax_monotonic_on_continuous_table(a in rand_amount(), b in rand_amount()) {
        let paye = CONTINUOUS.paye();
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(compute_annual_tax(low, 30, paye) <= compute_annual_tax(high, 30, paye));
    }

    #[test]
    fn prop_older_never_pays_more(income in rand_amount(), young in 0u32..120, gap in 0u32..60) {
        let paye = EMBEDDED.paye();
        let old = young + gap;
        prop_assert!(compute_annual_tax(income, old, paye) <= compute_annual_tax(income, young, paye));
    }

    #[test]
    fn prop_monthly_paye_is_whole_cents(gross in rand_amount(), age in 0u32..120) {
        let monthly = compute_monthly_paye(gross, age, EMBEDDED.paye());
        prop_assert_eq!(monthly, monthly.round_dp(2));
        prop_assert!(monthly >= Decimal::ZERO);
    }
}

// ============================================================================
// UIF and Net Pay
// ============================================================================

proptest! {
    #[test]
    fn prop_uif_never_exceeds_cap(gross in rand_amount()) {
        let uif = EMBEDDED.uif();
        let contribution = calculate_uif(gross, true, uif);
        prop_assert!(contribution <= uif.monthly_cap);
        prop_assert!(contribution >= Decimal::ZERO);
        prop_assert!(contribution <= (gross * uif.rate).round_dp(2));
    }

    #[test]
    fn prop_net_is_gross_less_lines(
        normal_hours in quantity(300),
        normal_rate in quantity(2_000),
        overtime_hours in quantity(100),
        loans in rand_amount(),
    ) {
        let input = valid_input(normal_hours, normal_rate, overtime_hours, loans);
        let payslip = generate_payslip(&input, &EMBEDDED, 2025).unwrap();
        let result = payslip.result;

        prop_assert_eq!(result.gross_pay(), result.normal_pay() + result.overtime_pay());
        prop_assert_eq!(
            result.total_deductions(),
            result.uif_deduction() + result.paye_deduction() + payslip.other_deductions.loans
        );
        prop_assert_eq!(result.net_pay(), result.gross_pay() - result.total_deductions());

        let statement_total = payslip.statement.deductions.last().unwrap();
        prop_assert_eq!(statement_total.amount, result.total_deductions());
    }
}

// ============================================================================
// Upper Bound
// ============================================================================

proptest! {
    #[test]
    fn prop_bounded_inputs_never_overflow(
        normal_hours in bounded_amount(),
        normal_rate in bounded_amount(),
        overtime_hours in bounded_amount(),
        overtime_rate in bounded_amount(),
        deduction in bounded_amount(),
    ) {
        let input = PayInput {
            overtime_rate,
            advances: deduction,
            additional_deduction1: deduction,
            ..valid_input(normal_hours, normal_rate, overtime_hours, deduction)
        };
        let payslip = generate_payslip(&input, &EMBEDDED, 2025).unwrap();
        let result = payslip.result;
        prop_assert_eq!(result.net_pay(), result.gross_pay() - result.total_deductions());
    }

    #[test]
    fn prop_amounts_over_bound_rejected(excess in 1i64..i64::MAX) {
        let input = valid_input(
            MAX_AMOUNT + Decimal::new(excess, 2),
            Decimal::from(100),
            Decimal::ZERO,
            Decimal::ZERO,
        );
        let is_rejected = matches!(
            generate_payslip(&input, &EMBEDDED, 2025),
            Err(EngineError::Validation { .. })
        );
        prop_assert!(is_rejected);
    }

    #[test]
    fn prop_monthly_paye_never_overflows(gross in any_whole_decimal(), age in 0u32..120) {
        let monthly = compute_monthly_paye(gross, age, EMBEDDED.paye());
        prop_assert!(monthly >= Decimal::ZERO);
    }
}

// ============================================================================
// Age and Formatting
// ============================================================================

proptest! {
    #[test]
    fn prop_age_is_year_difference(two_digit in 22u32..100, extra in 0i32..100) {
        let birth_year = 1900 + two_digit as i32;
        let id = format!("{:02}01015009087", two_digit);
        let as_of_year = birth_year + extra;
        prop_assert_eq!(age_from_id(&id, as_of_year).unwrap(), extra as u32);
    }

    #[test]
    fn prop_formatted_amount_layout(cents in -10_000_000_000i64..10_000_000_000) {
        let formatted = format_currency(Decimal::new(cents, 2));
        prop_assert!(CURRENCY_LAYOUT.is_match(&formatted), "{}", formatted);
        prop_assert_eq!(formatted.starts_with('-'), cents < 0);
    }
}
