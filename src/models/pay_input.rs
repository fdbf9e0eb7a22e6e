//! Payslip input model.
//!
//! This module defines the [`PayInput`] record the form layer hands to the
//! engine. Field names serialize in camelCase so the record round-trips
//! with the preview and export renderers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The user-entered data for one monthly payslip.
///
/// Every field has a default so that a partially completed form still
/// deserializes; [`validate`](crate::calculation::validate) then reports
/// everything that is missing in one pass.
///
/// # Example
///
/// ```
/// use payslip_engine::models::PayInput;
///
/// let json = r#"{
///     "employeeName": "Thandi Nkosi",
///     "idNumber": "9001015009087",
///     "normalHours": "160",
///     "normalRate": "100",
///     "uifEnabled": true
/// }"#;
///
/// let input: PayInput = serde_json::from_str(json).unwrap();
/// assert_eq!(input.national_id_number, "9001015009087");
/// assert!(input.uif_enabled);
/// assert!(!input.paye_enabled);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PayInput {
    /// Employer's registered name.
    pub company_name: String,
    /// Employer's postal or street address.
    pub company_address: String,
    /// Employer's contact telephone number.
    pub company_contact: String,
    /// Employer's contact email address.
    pub company_email: String,
    /// Employee's full name.
    pub employee_name: String,
    /// 13-digit South African identity number.
    #[serde(alias = "idNumber")]
    pub national_id_number: String,
    /// Employee's job title.
    pub job_title: String,
    /// Name of the bank the salary is paid into.
    pub bank_name: String,
    /// Bank account number (9 to 12 digits).
    pub account_no: String,
    /// Free-text pay period label (e.g., "March 2025").
    pub pay_period: String,
    /// Free-text pay date as entered.
    pub pay_date: String,
    /// Ordinary hours worked in the month.
    pub normal_hours: Decimal,
    /// Overtime hours worked in the month.
    pub overtime_hours: Decimal,
    /// Hourly rate for ordinary hours.
    pub normal_rate: Decimal,
    /// Hourly rate for overtime hours.
    pub overtime_rate: Decimal,
    /// Whether the UIF contribution is withheld.
    pub uif_enabled: bool,
    /// Whether PAYE is withheld.
    pub paye_enabled: bool,
    /// Loan repayment deducted this month.
    pub loans: Decimal,
    /// Salary advance already paid out, recovered this month.
    pub advances: Decimal,
    /// First free-form deduction.
    pub additional_deduction1: Decimal,
    /// Second free-form deduction.
    pub additional_deduction2: Decimal,
}

impl PayInput {
    /// Returns the non-statutory deductions entered on the form.
    pub fn other_deductions(&self) -> OtherDeductions {
        OtherDeductions {
            loans: self.loans,
            advances: self.advances,
            additional_deduction1: self.additional_deduction1,
            additional_deduction2: self.additional_deduction2,
        }
    }
}

/// Deductions entered by the user rather than computed by the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtherDeductions {
    /// Loan repayment.
    pub loans: Decimal,
    /// Recovery of a salary advance.
    pub advances: Decimal,
    /// First free-form deduction.
    pub additional_deduction1: Decimal,
    /// Second free-form deduction.
    pub additional_deduction2: Decimal,
}
