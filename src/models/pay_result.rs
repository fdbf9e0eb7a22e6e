//! Computed pay figures.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The monetary outcome of one payslip calculation.
///
/// All amounts are in rand, rounded to cents, and derived by the engine;
/// there are no setters. `net_pay` is always exactly
/// `gross_pay - total_deductions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayResult {
    normal_pay: Decimal,
    overtime_pay: Decimal,
    gross_pay: Decimal,
    uif_deduction: Decimal,
    paye_deduction: Decimal,
    total_deductions: Decimal,
    net_pay: Decimal,
}

impl PayResult {
    pub(crate) fn new(
        normal_pay: Decimal,
        overtime_pay: Decimal,
        gross_pay: Decimal,
        uif_deduction: Decimal,
        paye_deduction: Decimal,
        total_deductions: Decimal,
    ) -> Self {
        Self {
            normal_pay,
            overtime_pay,
            gross_pay,
            uif_deduction,
            paye_deduction,
            total_deductions,
            net_pay: gross_pay - total_deductions,
        }
    }

    /// Pay for ordinary hours.
    pub fn normal_pay(&self) -> Decimal {
        self.normal_pay
    }

    /// Pay for overtime hours.
    pub fn overtime_pay(&self) -> Decimal {
        self.overtime_pay
    }

    /// Total earnings before deductions.
    pub fn gross_pay(&self) -> Decimal {
        self.gross_pay
    }

    /// Employee UIF contribution.
    pub fn uif_deduction(&self) -> Decimal {
        self.uif_deduction
    }

    /// Monthly PAYE withheld.
    pub fn paye_deduction(&self) -> Decimal {
        self.paye_deduction
    }

    /// Sum of all deductions, statutory and user-entered.
    pub fn total_deductions(&self) -> Decimal {
        self.total_deductions
    }

    /// Take-home pay. May be negative.
    pub fn net_pay(&self) -> Decimal {
        self.net_pay
    }
}
