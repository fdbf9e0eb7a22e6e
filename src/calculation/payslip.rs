//! Payslip generation.
//!
//! Runs validation and every calculation stage in order, collecting one
//! audit step per stage, and assembles the [`Payslip`].

use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use crate::config::PayrollConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditTrace, AuditWarning, PayInput, PayResult, Payslip, PayslipDetails, PayslipStatement,
};

use super::age::derive_age;
use super::deductions::calculate_deductions;
use super::earnings::calculate_earnings;
use super::paye::calculate_paye;
use super::validation::validate;

/// Generates a payslip for one month.
///
/// `as_of_year` is the year ages are measured against. The configuration
/// is only read.
///
/// # Errors
///
/// Returns `Validation` carrying every problem found if the input is
/// invalid, or `InvalidIdNumber` if an age cannot be derived from the ID
/// number.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::generate_payslip;
/// use payslip_engine::config::ConfigLoader;
/// use payslip_engine::models::PayInput;
/// use rust_decimal::Decimal;
///
/// let config = ConfigLoader::embedded()?;
/// let input = PayInput {
///     company_name: "Acme Bakery".to_string(),
///     company_address: "12 Long Street, Cape Town".to_string(),
///     company_contact: "021 555 0100".to_string(),
///     company_email: "payroll@acme.co.za".to_string(),
///     employee_name: "Thandi Nkosi".to_string(),
///     national_id_number: "9001015009087".to_string(),
///     job_title: "Baker".to_string(),
///     bank_name: "FNB".to_string(),
///     account_no: "62012345678".to_string(),
///     pay_period: "March 2025".to_string(),
///     pay_date: "2025-03-25".to_string(),
///     normal_hours: Decimal::from(160),
///     overtime_hours: Decimal::from(10),
///     normal_rate: Decimal::from(100),
///     overtime_rate: Decimal::from(150),
///     uif_enabled: true,
///     paye_enabled: true,
///     ..PayInput::default()
/// };
///
/// let payslip = generate_payslip(&input, config.config(), 2020)?;
/// assert_eq!(payslip.result.net_pay(), Decimal::new(1704750, 2));
/// # Ok::<(), payslip_engine::error::EngineError>(())
/// ```
pub fn generate_payslip(
    input: &PayInput,
    config: &PayrollConfig,
    as_of_year: i32,
) -> EngineResult<Payslip> {
    let start_time = Instant::now();

    let errors = validate(input);
    if !errors.is_empty() {
        debug!(error_count = errors.len(), "Payslip input failed validation");
        return Err(EngineError::Validation { errors });
    }

    let mut steps = Vec::with_capacity(4);
    let mut warnings = Vec::new();

    let age_result = derive_age(&input.national_id_number, as_of_year, 1)?;
    let age = age_result.age;
    steps.push(age_result.audit_step);

    let earnings_result = calculate_earnings(
        input.normal_hours,
        input.overtime_hours,
        input.normal_rate,
        input.overtime_rate,
        2,
    );
    let earnings = earnings_result.earnings;
    steps.push(earnings_result.audit_step);

    let paye_result = calculate_paye(
        earnings.gross_pay,
        age,
        input.paye_enabled,
        config.paye(),
        3,
    );
    if !input.paye_enabled && paye_result.annual_tax > Decimal::ZERO {
        warnings.push(AuditWarning {
            code: "PAYE_DISABLED".to_string(),
            message: format!(
                "PAYE is disabled but R{} annual tax would be due",
                paye_result.annual_tax.normalize()
            ),
            severity: "medium".to_string(),
        });
    }
    steps.push(paye_result.audit_step);

    let deductions_result = calculate_deductions(
        earnings.gross_pay,
        input.uif_enabled,
        paye_result.monthly_paye,
        &input.other_deductions(),
        config.uif(),
        4,
    );
    let deductions = deductions_result.deductions;
    if deductions_result.net_pay < Decimal::ZERO {
        warnings.push(AuditWarning {
            code: "NEGATIVE_NET_PAY".to_string(),
            message: format!(
                "Deductions of R{} exceed gross pay of R{}",
                deductions.total, earnings.gross_pay
            ),
            severity: "high".to_string(),
        });
    }
    steps.push(deductions_result.audit_step);

    let result = PayResult::new(
        earnings.normal_pay,
        earnings.overtime_pay,
        earnings.gross_pay,
        deductions.uif,
        deductions.paye,
        deductions.total,
    );
    let statement = PayslipStatement::from_parts(&result, &deductions.other);

    let duration_us = start_time.elapsed().as_micros() as u64;
    debug!(
        age,
        gross_pay = %result.gross_pay(),
        net_pay = %result.net_pay(),
        warnings = warnings.len(),
        duration_us,
        "Payslip generated"
    );

    Ok(Payslip {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        tax_year: config.tax_year().code.clone(),
        details: PayslipDetails::from(input),
        age,
        result,
        other_deductions: deductions.other,
        statement,
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us,
        },
    })
}
