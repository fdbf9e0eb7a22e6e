//! Age derivation from South African identity numbers.
//!
//! The first six digits of an identity number encode the date of birth as
//! `YYMMDD`. Only the two-digit year is used here; the century is chosen by
//! a fixed cutoff.

use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

/// Length of a South African identity number.
pub const ID_NUMBER_LENGTH: usize = 13;

/// Two-digit birth years below this value are read as 20xx, the rest as 19xx.
///
/// This is a fixed policy, not derived from the current date. It will
/// misread the ages of people born in 2022 or later, and of centenarians.
pub const CENTURY_CUTOFF: u32 = 22;

/// The result of deriving an employee's age, including the audit step.
#[derive(Debug, Clone)]
pub struct AgeResult {
    /// Age in whole years as of the reference year.
    pub age: u32,
    /// The four-digit birth year after century disambiguation.
    pub birth_year: i32,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Returns true if `id` is exactly 13 ASCII digits.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::is_well_formed_id;
///
/// assert!(is_well_formed_id("9001015009087"));
/// assert!(!is_well_formed_id("900101500908"));
/// assert!(!is_well_formed_id("90010150090a7"));
/// ```
pub fn is_well_formed_id(id: &str) -> bool {
    id.len() == ID_NUMBER_LENGTH && id.bytes().all(|b| b.is_ascii_digit())
}

/// Returns the four-digit birth year encoded in an identity number.
///
/// Fails with `InvalidIdNumber` if the ID is not 13 digits.
pub fn birth_year_from_id(id: &str) -> EngineResult<i32> {
    if !is_well_formed_id(id) {
        return Err(EngineError::InvalidIdNumber {
            id: id.to_string(),
            reason: format!("must be exactly {} digits", ID_NUMBER_LENGTH),
        });
    }

    // Both bytes are ASCII digits, checked above.
    let bytes = id.as_bytes();
    let two_digit = u32::from(bytes[0] - b'0') * 10 + u32::from(bytes[1] - b'0');
    let century = if two_digit < CENTURY_CUTOFF { 2000 } else { 1900 };

    Ok((century + two_digit) as i32)
}

/// Derives an age in whole years from an identity number.
///
/// The age is `as_of_year - birth_year`; the month and day digits are not
/// consulted, so the result is the age the employee turns during
/// `as_of_year`.
///
/// # Errors
///
/// Returns `InvalidIdNumber` if the ID is not exactly 13 digits, or if
/// the birth year it encodes falls after `as_of_year`.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::age_from_id;
///
/// assert_eq!(age_from_id("9001015009087", 2025).unwrap(), 35);
/// assert_eq!(age_from_id("0507125009087", 2025).unwrap(), 20);
/// assert!(age_from_id("123", 2025).is_err());
/// ```
pub fn age_from_id(id: &str, as_of_year: i32) -> EngineResult<u32> {
    let birth_year = birth_year_from_id(id)?;

    u32::try_from(as_of_year - birth_year).map_err(|_| EngineError::InvalidIdNumber {
        id: id.to_string(),
        reason: format!("birth year {} is after {}", birth_year, as_of_year),
    })
}

/// Derives an employee's age and records the decision as an audit step.
pub fn derive_age(id: &str, as_of_year: i32, step_number: u32) -> EngineResult<AgeResult> {
    let birth_year = birth_year_from_id(id)?;
    let age = age_from_id(id, as_of_year)?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "age_from_id".to_string(),
        rule_name: "Age From ID Number".to_string(),
        input: serde_json::json!({
            "birth_year_digits": &id[..2],
            "as_of_year": as_of_year,
            "century_cutoff": CENTURY_CUTOFF
        }),
        output: serde_json::json!({
            "birth_year": birth_year,
            "age": age
        }),
        reasoning: format!("{} - {} = {} years", as_of_year, birth_year, age),
    };

    Ok(AgeResult {
        age,
        birth_year,
        audit_step,
    })
}
