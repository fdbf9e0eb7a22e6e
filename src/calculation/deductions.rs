//! UIF contribution, deduction totals and net pay.

use rust_decimal::Decimal;

use crate::config::UifConfig;
use crate::models::{AuditStep, OtherDeductions};

use super::currency::round_to_cents;

/// Every deduction for the month, each rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeductionBreakdown {
    /// UIF employee contribution.
    pub uif: Decimal,
    /// PAYE withheld.
    pub paye: Decimal,
    /// Loan, advance and free-form deductions as applied.
    pub other: OtherDeductions,
    /// Sum of all of the above.
    pub total: Decimal,
}

/// The result of aggregating deductions, including the audit step.
#[derive(Debug, Clone)]
pub struct DeductionsResult {
    /// The computed deductions.
    pub deductions: DeductionBreakdown,
    /// Gross pay less total deductions. May be negative.
    pub net_pay: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes the UIF contribution on a month's gross pay.
///
/// The contribution is `gross x rate`, capped at the monthly maximum and
/// rounded to cents. Returns zero when UIF is not enabled.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::calculate_uif;
/// use payslip_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let config = ConfigLoader::embedded()?;
/// assert_eq!(calculate_uif(Decimal::from(17500), true, config.uif()), Decimal::from(175));
/// assert_eq!(calculate_uif(Decimal::from(50000), true, config.uif()), Decimal::new(17712, 2));
/// assert_eq!(calculate_uif(Decimal::from(17500), false, config.uif()), Decimal::ZERO);
/// # Ok::<(), payslip_engine::error::EngineError>(())
/// ```
pub fn calculate_uif(gross_pay: Decimal, enabled: bool, uif: &UifConfig) -> Decimal {
    if !enabled {
        return Decimal::ZERO;
    }
    round_to_cents((gross_pay * uif.rate).min(uif.monthly_cap))
}

/// Sums the deductions for the month.
///
/// User-entered amounts are rounded to cents before they are added, so the
/// total always equals the sum of the displayed lines.
pub fn total_deductions(uif: Decimal, paye: Decimal, other: &OtherDeductions) -> DeductionBreakdown {
    let other = OtherDeductions {
        loans: round_to_cents(other.loans),
        advances: round_to_cents(other.advances),
        additional_deduction1: round_to_cents(other.additional_deduction1),
        additional_deduction2: round_to_cents(other.additional_deduction2),
    };
    let total = uif
        + paye
        + other.loans
        + other.advances
        + other.additional_deduction1
        + other.additional_deduction2;

    DeductionBreakdown {
        uif,
        paye,
        other,
        total,
    }
}

/// Computes UIF, totals every deduction and derives net pay, recording the
/// result as an audit step.
///
/// Net pay is not floored; deductions larger than gross pay yield a
/// negative figure.
pub fn calculate_deductions(
    gross_pay: Decimal,
    uif_enabled: bool,
    paye: Decimal,
    other: &OtherDeductions,
    uif_config: &UifConfig,
    step_number: u32,
) -> DeductionsResult {
    let uif = calculate_uif(gross_pay, uif_enabled, uif_config);
    let deductions = total_deductions(uif, paye, other);
    let net_pay = gross_pay - deductions.total;

    let uif_reasoning = if !uif_enabled {
        "UIF not enabled".to_string()
    } else if gross_pay * uif_config.rate > uif_config.monthly_cap {
        format!("UIF capped at R{}", uif_config.monthly_cap.normalize())
    } else {
        format!(
            "UIF R{} x {} = R{}",
            gross_pay.normalize(),
            uif_config.rate.normalize(),
            uif
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "deductions".to_string(),
        rule_name: "Deductions and Net Pay".to_string(),
        input: serde_json::json!({
            "gross_pay": gross_pay.normalize().to_string(),
            "uif_enabled": uif_enabled,
            "uif_rate": uif_config.rate.normalize().to_string(),
            "uif_monthly_cap": uif_config.monthly_cap.normalize().to_string(),
            "paye": paye.to_string(),
            "loans": other.loans.normalize().to_string(),
            "advances": other.advances.normalize().to_string(),
            "additional_deduction1": other.additional_deduction1.normalize().to_string(),
            "additional_deduction2": other.additional_deduction2.normalize().to_string()
        }),
        output: serde_json::json!({
            "uif_deduction": uif.to_string(),
            "total_deductions": deductions.total.to_string(),
            "net_pay": net_pay.to_string()
        }),
        reasoning: format!(
            "{}; total deductions R{}; net pay R{}",
            uif_reasoning,
            deductions.total.normalize(),
            net_pay.normalize()
        ),
    };

    DeductionsResult {
        deductions,
        net_pay,
        audit_step,
    }
}
