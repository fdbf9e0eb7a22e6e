//! Core data models for the Payslip Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod pay_input;
mod pay_result;
mod payslip;
mod statement;

pub use pay_input::{OtherDeductions, PayInput};
pub use pay_result::PayResult;
pub use payslip::{AuditStep, AuditTrace, AuditWarning, Payslip, PayslipDetails};
pub use statement::{PayslipStatement, StatementLine};
