//! Calculation logic for the Payslip Engine.
//!
//! This module contains the input validator, age derivation from the ID
//! number, earnings aggregation, the PAYE tax engine, UIF and deduction
//! totals, the currency formatter, and the payslip generator that runs
//! them in order.

mod age;
mod currency;
mod deductions;
mod earnings;
mod paye;
mod payslip;
mod validation;

pub use age::{
    AgeResult, CENTURY_CUTOFF, ID_NUMBER_LENGTH, age_from_id, birth_year_from_id, derive_age,
    is_well_formed_id,
};
pub use currency::{CURRENCY_SYMBOL, format_currency, round_to_cents};
pub use deductions::{
    DeductionBreakdown, DeductionsResult, calculate_deductions, calculate_uif, total_deductions,
};
pub use earnings::{EarningsBreakdown, EarningsResult, aggregate_pay, calculate_earnings};
pub use paye::{
    BracketMatch, MONTHS_PER_YEAR, PayeResult, bracket_tax, calculate_paye, compute_annual_tax,
    compute_monthly_paye, find_bracket,
};
pub use payslip::generate_payslip;
pub use validation::{MAX_AMOUNT, is_valid_account_number, is_valid_email, validate};
