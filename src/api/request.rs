//! Request types for the Payslip Engine API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::PayInput;

/// Request body for the `/payslip` endpoint.
///
/// The payslip fields sit at the top level of the JSON object alongside
/// the optional reference year.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayslipRequest {
    /// The payslip form fields.
    #[serde(flatten)]
    pub input: PayInput,
    /// Year the employee's age is measured against. Defaults to the current
    /// UTC year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_of_year: Option<i32>,
}

/// Request body for the `/paye` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayeRequest {
    /// Annual taxable income in rand.
    pub annual_income: Decimal,
    /// Employee age in whole years.
    pub age: u32,
}
