//! Earnings aggregation.
//!
//! This module turns hours and hourly rates into normal pay, overtime pay
//! and gross pay.

use rust_decimal::Decimal;

use crate::models::AuditStep;

use super::currency::round_to_cents;

/// Normal, overtime and gross pay for the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EarningsBreakdown {
    /// Ordinary hours times the ordinary rate, rounded to cents.
    pub normal_pay: Decimal,
    /// Overtime hours times the overtime rate, rounded to cents.
    pub overtime_pay: Decimal,
    /// Sum of normal and overtime pay.
    pub gross_pay: Decimal,
}

/// The result of aggregating earnings, including the audit step.
#[derive(Debug, Clone)]
pub struct EarningsResult {
    /// The computed earnings.
    pub earnings: EarningsBreakdown,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes normal, overtime and gross pay.
///
/// Each product is rounded to cents before summing, so gross pay always
/// equals the two displayed lines added together. Salary advances are not
/// earnings and are handled as a deduction.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::aggregate_pay;
/// use rust_decimal::Decimal;
///
/// let pay = aggregate_pay(
///     Decimal::from(160),
///     Decimal::from(10),
///     Decimal::from(100),
///     Decimal::from(150),
/// );
/// assert_eq!(pay.normal_pay, Decimal::from(16000));
/// assert_eq!(pay.overtime_pay, Decimal::from(1500));
/// assert_eq!(pay.gross_pay, Decimal::from(17500));
/// ```
pub fn aggregate_pay(
    normal_hours: Decimal,
    overtime_hours: Decimal,
    normal_rate: Decimal,
    overtime_rate: Decimal,
) -> EarningsBreakdown {
    let normal_pay = round_to_cents(normal_hours * normal_rate);
    let overtime_pay = round_to_cents(overtime_hours * overtime_rate);

    EarningsBreakdown {
        normal_pay,
        overtime_pay,
        gross_pay: normal_pay + overtime_pay,
    }
}

/// Computes earnings and records them as an audit step.
pub fn calculate_earnings(
    normal_hours: Decimal,
    overtime_hours: Decimal,
    normal_rate: Decimal,
    overtime_rate: Decimal,
    step_number: u32,
) -> EarningsResult {
    let earnings = aggregate_pay(normal_hours, overtime_hours, normal_rate, overtime_rate);

    let audit_step = AuditStep {
        step_number,
        rule_id: "earnings".to_string(),
        rule_name: "Gross Earnings".to_string(),
        input: serde_json::json!({
            "normal_hours": normal_hours.normalize().to_string(),
            "normal_rate": normal_rate.normalize().to_string(),
            "overtime_hours": overtime_hours.normalize().to_string(),
            "overtime_rate": overtime_rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "normal_pay": earnings.normal_pay.to_string(),
            "overtime_pay": earnings.overtime_pay.to_string(),
            "gross_pay": earnings.gross_pay.to_string()
        }),
        reasoning: format!(
            "{}h x R{} + {}h x R{} = R{}",
            normal_hours.normalize(),
            normal_rate.normalize(),
            overtime_hours.normalize(),
            overtime_rate.normalize(),
            earnings.gross_pay.normalize()
        ),
    };

    EarningsResult {
        earnings,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_normal_and_overtime_pay() {
        let pay = aggregate_pay(dec("160"), dec("10"), dec("100"), dec("150"));
        assert_eq!(pay.normal_pay, dec("16000"));
        assert_eq!(pay.overtime_pay, dec("1500"));
        assert_eq!(pay.gross_pay, dec("17500"));
    }

    #[test]
    fn test_no_overtime() {
        let pay = aggregate_pay(dec("173.33"), Decimal::ZERO, dec("45.50"), Decimal::ZERO);
        // 173.33 * 45.50 = 7886.515
        assert_eq!(pay.normal_pay, dec("7886.52"));
        assert_eq!(pay.overtime_pay, Decimal::ZERO);
        assert_eq!(pay.gross_pay, dec("7886.52"));
    }

    #[test]
    fn test_gross_is_sum_of_rounded_lines() {
        // 7.5 * 33.333 = 249.9975 and 1.5 * 49.999 = 74.9985
        let pay = aggregate_pay(dec("7.5"), dec("1.5"), dec("33.333"), dec("49.999"));
        assert_eq!(pay.normal_pay, dec("250.00"));
        assert_eq!(pay.overtime_pay, dec("75.00"));
        assert_eq!(pay.gross_pay, pay.normal_pay + pay.overtime_pay);
    }

    #[test]
    fn test_zero_hour_month_is_zero_pay() {
        let pay = aggregate_pay(Decimal::ZERO, Decimal::ZERO, dec("100"), dec("150"));
        assert_eq!(pay.gross_pay, Decimal::ZERO);
    }

    #[test]
    fn test_calculate_earnings_audit_step() {
        let result = calculate_earnings(dec("160"), dec("10"), dec("100.00"), dec("150"), 2);

        assert_eq!(result.earnings.gross_pay, dec("17500"));
        assert_eq!(result.audit_step.step_number, 2);
        assert_eq!(result.audit_step.rule_id, "earnings");
        assert_eq!(result.audit_step.input["normal_rate"], "100");
        assert_eq!(result.audit_step.output["overtime_pay"], "1500");
        assert_eq!(
            result.audit_step.reasoning,
            "160h x R100 + 10h x R150 = R17500"
        );
    }
}
