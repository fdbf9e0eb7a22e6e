//! Rand amount rounding and display formatting.
//!
//! Every monetary line on a payslip is rounded to cents before it is summed,
//! and rendered in the South African style: `R 1 234,56`.

use rust_decimal::{Decimal, RoundingStrategy};

/// The currency symbol printed before every amount.
pub const CURRENCY_SYMBOL: &str = "R";

const THOUSANDS_SEPARATOR: char = ' ';
const DECIMAL_SEPARATOR: char = ',';

/// Rounds an amount to whole cents, halves away from zero.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::round_to_cents;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_to_cents(Decimal::from_str("2.345").unwrap()), Decimal::from_str("2.35").unwrap());
/// assert_eq!(round_to_cents(Decimal::from_str("-2.345").unwrap()), Decimal::from_str("-2.35").unwrap());
/// ```
pub fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount as a rand currency string.
///
/// The amount is rounded to cents first, so sub-cent inputs carry into the
/// whole part when they round up. Negative amounts put the sign before the
/// symbol; an amount that rounds to zero is printed unsigned.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::format_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(format_currency(Decimal::from(1000)), "R 1 000,00");
/// assert_eq!(format_currency(Decimal::from(-1000)), "-R 1 000,00");
/// assert_eq!(format_currency(Decimal::ZERO), "R 0,00");
/// assert_eq!(format_currency(Decimal::from_str("1234.56").unwrap()), "R 1 234,56");
/// ```
pub fn format_currency(amount: Decimal) -> String {
    let rounded = round_to_cents(amount);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();

    let magnitude = rounded.abs();
    let whole = magnitude.trunc();
    let cents = ((magnitude - whole) * Decimal::ONE_HUNDRED).trunc();

    let formatted = format!(
        "{} {}{}{:0>2}",
        CURRENCY_SYMBOL,
        group_thousands(&whole.to_string()),
        DECIMAL_SEPARATOR,
        cents.to_string()
    );

    if negative {
        format!("-{}", formatted)
    } else {
        formatted
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(THOUSANDS_SEPARATOR);
        }
        grouped.push(digit);
    }
    grouped
}
