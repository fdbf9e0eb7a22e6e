//! Input validation.
//!
//! Validation collects every problem with a [`PayInput`] in field order
//! rather than stopping at the first. An empty list means the input can be
//! calculated.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::models::PayInput;

use super::age::is_well_formed_id;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

const ACCOUNT_NUMBER_MIN_DIGITS: usize = 9;
const ACCOUNT_NUMBER_MAX_DIGITS: usize = 12;

/// The largest hours, rate or deduction amount accepted.
///
/// Hours x rate, doubled and annualised, stays well inside `Decimal`'s range
/// for any pair of values up to this bound.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Validates a payslip input.
///
/// Checks, in order:
/// - every text field is non-blank
/// - the company email has the shape `local@domain.tld`
/// - the ID number is exactly 13 digits
/// - the account number is 9 to 12 digits
/// - normal hours and rate are positive; overtime hours, overtime rate and
///   the user-entered deductions are non-negative
/// - no hours, rate or deduction exceeds [`MAX_AMOUNT`]
///
/// A blank ID number reports both a missing field and a malformed ID. A
/// blank email or account number reports only the missing field.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::validate;
/// use payslip_engine::models::PayInput;
///
/// let errors = validate(&PayInput::default());
/// assert!(errors.iter().any(|e| e.field() == "companyName"));
/// assert!(errors.iter().any(|e| e.code() == "MISSING_OR_MALFORMED_ID"));
/// ```
pub fn validate(input: &PayInput) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let required = [
        ("companyName", "Company Name", &input.company_name),
        ("companyAddress", "Company Address", &input.company_address),
        ("companyContact", "Company Contact", &input.company_contact),
        ("companyEmail", "Company Email", &input.company_email),
        ("employeeName", "Employee Name", &input.employee_name),
        ("nationalIdNumber", "ID Number", &input.national_id_number),
        ("jobTitle", "Job Title", &input.job_title),
        ("bankName", "Bank Name", &input.bank_name),
        ("accountNo", "Account Number", &input.account_no),
        ("payPeriod", "Pay Period", &input.pay_period),
        ("payDate", "Pay Date", &input.pay_date),
    ];
    for (field, label, value) in required {
        if is_blank(value) {
            errors.push(ValidationError::MissingField {
                field: field.to_string(),
                label: label.to_string(),
            });
        }
    }

    if !is_blank(&input.company_email) && !is_valid_email(&input.company_email) {
        errors.push(ValidationError::InvalidEmail);
    }

    if !is_well_formed_id(&input.national_id_number) {
        errors.push(ValidationError::MissingOrMalformedId);
    }

    if !is_blank(&input.account_no) && !is_valid_account_number(&input.account_no) {
        errors.push(ValidationError::MalformedAccountNumber);
    }

    check_positive(&mut errors, "normalHours", "Normal Hours", input.normal_hours);
    check_non_negative(
        &mut errors,
        "overtimeHours",
        "Overtime Hours",
        input.overtime_hours,
    );
    check_positive(&mut errors, "normalRate", "Normal Rate", input.normal_rate);
    check_non_negative(
        &mut errors,
        "overtimeRate",
        "Overtime Rate",
        input.overtime_rate,
    );
    check_non_negative(&mut errors, "loans", "Loans", input.loans);
    check_non_negative(&mut errors, "advances", "Advances", input.advances);
    check_non_negative(
        &mut errors,
        "additionalDeduction1",
        "Additional Deduction 1",
        input.additional_deduction1,
    );
    check_non_negative(
        &mut errors,
        "additionalDeduction2",
        "Additional Deduction 2",
        input.additional_deduction2,
    );

    errors
}

/// Returns true if `email` has the shape `local@domain.tld` with no
/// whitespace.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Returns true if `account_no` is 9 to 12 ASCII digits.
pub fn is_valid_account_number(account_no: &str) -> bool {
    (ACCOUNT_NUMBER_MIN_DIGITS..=ACCOUNT_NUMBER_MAX_DIGITS).contains(&account_no.len())
        && account_no.bytes().all(|b| b.is_ascii_digit())
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn check_positive(errors: &mut Vec<ValidationError>, field: &str, label: &str, value: Decimal) {
    if value <= Decimal::ZERO {
        errors.push(ValidationError::InvalidNumeric {
            field: field.to_string(),
            message: format!("{} must be a positive number", label),
        });
    } else {
        check_upper_bound(errors, field, label, value);
    }
}

fn check_non_negative(
    errors: &mut Vec<ValidationError>,
    field: &str,
    label: &str,
    value: Decimal,
) {
    if value < Decimal::ZERO {
        errors.push(ValidationError::InvalidNumeric {
            field: field.to_string(),
            message: format!("{} must be a non-negative number", label),
        });
    } else {
        check_upper_bound(errors, field, label, value);
    }
}

fn check_upper_bound(
    errors: &mut Vec<ValidationError>,
    field: &str,
    label: &str,
    value: Decimal,
) {
    if value > MAX_AMOUNT {
        errors.push(ValidationError::InvalidNumeric {
            field: field.to_string(),
            message: format!("{} must not exceed {}", label, MAX_AMOUNT),
        });
    }
}
