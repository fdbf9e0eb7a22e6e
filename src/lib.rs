//! Payslip Engine for South African monthly payroll
//!
//! This crate validates payslip form input, derives the employee's age from
//! the national ID number, and calculates normal and overtime pay, PAYE
//! income tax, the UIF contribution, other deductions and net pay against a
//! configurable tax table. Results carry formatted statement lines and an
//! audit trace of every calculation step.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
