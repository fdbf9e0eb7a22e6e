//! Payslip models for the Payslip Engine.
//!
//! This module contains the [`Payslip`] type and its associated structures
//! that capture all outputs from a payslip calculation, including the
//! display details, the computed figures and the audit trace.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{OtherDeductions, PayInput, PayResult, PayslipStatement};

/// Pass-through details printed on the payslip.
///
/// None of these take part in the calculation except the hours and rates,
/// which are echoed so the earnings table can show them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayslipDetails {
    /// Employer's registered name.
    pub company_name: String,
    /// Employer's address.
    pub company_address: String,
    /// Employer's contact number.
    pub company_contact: String,
    /// Employer's email address.
    pub company_email: String,
    /// Employee's full name.
    pub employee_name: String,
    /// Employee's job title.
    pub job_title: String,
    /// Bank the salary is paid into.
    pub bank_name: String,
    /// Bank account number.
    pub account_no: String,
    /// Pay period label.
    pub pay_period: String,
    /// Pay date as entered.
    pub pay_date: String,
    /// Ordinary hours worked.
    pub normal_hours: Decimal,
    /// Overtime hours worked.
    pub overtime_hours: Decimal,
    /// Hourly rate for ordinary hours.
    pub normal_rate: Decimal,
    /// Hourly rate for overtime hours.
    pub overtime_rate: Decimal,
}

impl From<&PayInput> for PayslipDetails {
    fn from(input: &PayInput) -> Self {
        PayslipDetails {
            company_name: input.company_name.clone(),
            company_address: input.company_address.clone(),
            company_contact: input.company_contact.clone(),
            company_email: input.company_email.clone(),
            employee_name: input.employee_name.clone(),
            job_title: input.job_title.clone(),
            bank_name: input.bank_name.clone(),
            account_no: input.account_no.clone(),
            pay_period: input.pay_period.clone(),
            pay_date: input.pay_date.clone(),
            normal_hours: input.normal_hours,
            overtime_hours: input.overtime_hours,
            normal_rate: input.normal_rate,
            overtime_rate: input.overtime_rate,
        }
    }
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag results that are valid but likely need a second look,
/// such as a negative net pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
///
/// # Example
///
/// ```
/// use payslip_engine::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 1234,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The complete result of generating a payslip.
///
/// Created fresh on every generation; it has no identity beyond the
/// calculation id and is not persisted by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payslip {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that produced this payslip.
    pub engine_version: String,
    /// Code of the tax table used (e.g., "ZA-2024-25").
    pub tax_year: String,
    /// Details echoed from the input for display.
    pub details: PayslipDetails,
    /// Employee age derived from the ID number.
    pub age: u32,
    /// The computed pay figures.
    pub result: PayResult,
    /// User-entered deductions, rounded to cents as applied.
    pub other_deductions: OtherDeductions,
    /// Formatted statement rows.
    pub statement: PayslipStatement,
    /// Complete audit trail of calculation decisions.
    pub audit_trace: AuditTrace,
}
