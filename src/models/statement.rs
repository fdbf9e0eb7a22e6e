//! Statement rows for display.
//!
//! A [`PayslipStatement`] is the flat list of labelled, formatted amounts a
//! payslip preview or printed document shows.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{OtherDeductions, PayResult};
use crate::calculation::format_currency;

/// One row of the earnings or deductions table.
///
/// # Example
///
/// ```
/// use payslip_engine::models::StatementLine;
/// use rust_decimal::Decimal;
///
/// let line = StatementLine {
///     description: "Gross Pay".to_string(),
///     amount: Decimal::from(17500),
///     formatted: "R 17 500,00".to_string(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementLine {
    /// The row label (e.g., "Overtime Pay").
    pub description: String,
    /// The amount in rand.
    pub amount: Decimal,
    /// The amount rendered as a currency string.
    pub formatted: String,
}

/// The rows a preview or exported document shows, already formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayslipStatement {
    /// Earnings rows, ending with the gross pay row.
    pub earnings: Vec<StatementLine>,
    /// Deduction rows, ending with the total deductions row.
    pub deductions: Vec<StatementLine>,
    /// The net pay row.
    pub net_pay: StatementLine,
}

impl StatementLine {
    /// Creates a line, formatting `amount` as rand.
    pub fn new(description: impl Into<String>, amount: Decimal) -> Self {
        StatementLine {
            description: description.into(),
            amount,
            formatted: format_currency(amount),
        }
    }
}

impl PayslipStatement {
    /// Builds the statement rows from the computed figures.
    ///
    /// Overtime and the user-entered deductions are listed only when they
    /// are non-zero; UIF and PAYE are always listed.
    pub fn from_parts(result: &PayResult, other: &OtherDeductions) -> Self {
        let mut earnings = vec![StatementLine::new("Normal Pay", result.normal_pay())];
        if result.overtime_pay() > Decimal::ZERO {
            earnings.push(StatementLine::new("Overtime Pay", result.overtime_pay()));
        }
        earnings.push(StatementLine::new("Gross Pay", result.gross_pay()));

        let mut deductions = vec![
            StatementLine::new("UIF Deduction", result.uif_deduction()),
            StatementLine::new("PAYE", result.paye_deduction()),
        ];
        let optional = [
            ("Loan Repayment", other.loans),
            ("Advances", other.advances),
            ("Additional Deduction 1", other.additional_deduction1),
            ("Additional Deduction 2", other.additional_deduction2),
        ];
        for (description, amount) in optional {
            if amount > Decimal::ZERO {
                deductions.push(StatementLine::new(description, amount));
            }
        }
        deductions.push(StatementLine::new(
            "Total Deductions",
            result.total_deductions(),
        ));

        PayslipStatement {
            earnings,
            deductions,
            net_pay: StatementLine::new("Net Pay", result.net_pay()),
        }
    }
}
