//! PAYE income tax calculation.
//!
//! This module applies the progressive tax schedule to an annualised
//! income. The calculation runs in three fixed stages:
//!
//! 1. The age band's tax-free threshold. Income at or below it owes nothing.
//! 2. The first bracket whose upper bound covers the income supplies a base
//!    amount and a marginal rate.
//! 3. The cumulative age rebate is subtracted, flooring the result at zero.
//!
//! Monthly withholding is the annual figure for twelve times the month's
//! gross pay, divided by twelve.

use rust_decimal::Decimal;

use crate::config::{PayeConfig, TaxBracket};
use crate::models::AuditStep;

use super::currency::round_to_cents;

/// Number of pay periods in a tax year.
pub const MONTHS_PER_YEAR: u32 = 12;

/// The bracket an annual income falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketMatch<'a> {
    /// Zero-based position of the bracket in the table.
    pub index: usize,
    /// Income the bracket's marginal rate is measured from.
    pub lower_bound: Decimal,
    /// The matched bracket.
    pub bracket: &'a TaxBracket,
}

impl BracketMatch<'_> {
    /// Tax owed on `income` under this bracket, before rebates.
    pub fn tax_for(&self, income: Decimal) -> Decimal {
        self.bracket.base_tax + (income - self.lower_bound) * self.bracket.rate
    }
}

/// The result of the PAYE calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct PayeResult {
    /// PAYE withheld this month, rounded to cents. Zero when disabled.
    pub monthly_paye: Decimal,
    /// Monthly gross pay times twelve.
    pub annual_income: Decimal,
    /// Annual tax after rebates.
    pub annual_tax: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Finds the bracket that applies to an annual income.
///
/// Brackets are scanned in ascending order and the first whose upper bound
/// is at or above the income wins. The first bracket is measured from
/// `threshold`; each later bracket from its predecessor's upper bound.
/// Returns `None` only for a table without an open top bracket.
pub fn find_bracket(
    annual_income: Decimal,
    threshold: Decimal,
    table: &PayeConfig,
) -> Option<BracketMatch<'_>> {
    let mut lower_bound = threshold;
    for (index, bracket) in table.brackets.iter().enumerate() {
        if bracket.covers(annual_income) {
            return Some(BracketMatch {
                index,
                lower_bound,
                bracket,
            });
        }
        if let Some(upper) = bracket.upper_bound {
            lower_bound = upper;
        }
    }
    None
}

/// Computes the tax on an annual income before rebates.
///
/// Returns zero when the income does not exceed the age's tax-free threshold.
pub fn bracket_tax(annual_income: Decimal, age: u32, table: &PayeConfig) -> Decimal {
    let threshold = table.tax_free_threshold(age);
    if annual_income <= threshold {
        return Decimal::ZERO;
    }

    find_bracket(annual_income, threshold, table)
        .map(|matched| matched.tax_for(annual_income))
        .unwrap_or(Decimal::ZERO)
}

/// Computes the annual PAYE liability for an income and age.
///
/// The result is never negative. It is not rounded; callers round the
/// monthly figure.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::compute_annual_tax;
/// use payslip_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let config = ConfigLoader::embedded()?;
///
/// // (210000 - 95750) x 18% = 20565, less the primary rebate of 17235
/// let tax = compute_annual_tax(Decimal::from(210000), 30, config.paye());
/// assert_eq!(tax, Decimal::from(3330));
///
/// // At or below the threshold nothing is owed
/// assert_eq!(compute_annual_tax(Decimal::from(95750), 30, config.paye()), Decimal::ZERO);
/// # Ok::<(), payslip_engine::error::EngineError>(())
/// ```
pub fn compute_annual_tax(annual_income: Decimal, age: u32, table: &PayeConfig) -> Decimal {
    let tax = bracket_tax(annual_income, age, table);
    if tax.is_zero() {
        return Decimal::ZERO;
    }
    (tax - table.total_rebate(age)).max(Decimal::ZERO)
}

/// Computes the PAYE to withhold from one month's gross pay.
///
/// The monthly figure is annualised, taxed, divided back by twelve and
/// rounded to cents. Annualising saturates at `Decimal::MAX`.
pub fn compute_monthly_paye(monthly_gross: Decimal, age: u32, table: &PayeConfig) -> Decimal {
    let months = Decimal::from(MONTHS_PER_YEAR);
    let annual_income = monthly_gross.saturating_mul(months);
    round_to_cents(compute_annual_tax(annual_income, age, table) / months)
}

/// Computes this month's PAYE and records the decision as an audit step.
///
/// When `enabled` is false nothing is withheld, but the annual figures are
/// still reported in the audit step.
pub fn calculate_paye(
    gross_pay: Decimal,
    age: u32,
    enabled: bool,
    table: &PayeConfig,
    step_number: u32,
) -> PayeResult {
    let months = Decimal::from(MONTHS_PER_YEAR);
    let annual_income = gross_pay.saturating_mul(months);
    let threshold = table.tax_free_threshold(age);
    let rebate = table.total_rebate(age);
    let before_rebate = bracket_tax(annual_income, age, table);
    let annual_tax = compute_annual_tax(annual_income, age, table);

    let monthly_paye = if enabled {
        round_to_cents(annual_tax / months)
    } else {
        Decimal::ZERO
    };

    let bracket_index = if annual_income > threshold {
        find_bracket(annual_income, threshold, table).map(|matched| matched.index + 1)
    } else {
        None
    };

    let reasoning = if !enabled {
        "PAYE not enabled - nothing withheld".to_string()
    } else if annual_income <= threshold {
        format!(
            "Annual income R{} is within the age {} tax-free threshold of R{}",
            annual_income.normalize(),
            age,
            threshold.normalize()
        )
    } else {
        format!(
            "Bracket {}: R{} tax less R{} rebate = R{} per year / {} = R{}",
            bracket_index.unwrap_or_default(),
            before_rebate.normalize(),
            rebate.normalize(),
            annual_tax.normalize(),
            MONTHS_PER_YEAR,
            monthly_paye
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "paye".to_string(),
        rule_name: "PAYE Income Tax".to_string(),
        input: serde_json::json!({
            "gross_pay": gross_pay.normalize().to_string(),
            "age": age,
            "enabled": enabled
        }),
        output: serde_json::json!({
            "annual_income": annual_income.normalize().to_string(),
            "tax_free_threshold": threshold.normalize().to_string(),
            "bracket": bracket_index,
            "tax_before_rebate": before_rebate.normalize().to_string(),
            "rebate": rebate.normalize().to_string(),
            "annual_tax": annual_tax.normalize().to_string(),
            "monthly_paye": monthly_paye.to_string()
        }),
        reasoning,
    };

    PayeResult {
        monthly_paye,
        annual_income,
        annual_tax,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn table() -> PayeConfig {
        ConfigLoader::load("./config/za_2024_25")
            .expect("Failed to load config")
            .paye()
            .clone()
    }

    #[test]
    fn test_zero_at_each_threshold() {
        let table = table();
        assert_eq!(compute_annual_tax(dec("95750"), 30, &table), Decimal::ZERO);
        assert_eq!(compute_annual_tax(dec("148217"), 70, &table), Decimal::ZERO);
        assert_eq!(compute_annual_tax(dec("165689"), 80, &table), Decimal::ZERO);
    }

    #[test]
    fn test_zero_income() {
        assert_eq!(compute_annual_tax(Decimal::ZERO, 30, &table()), Decimal::ZERO);
    }

    #[test]
    fn test_first_bracket_measured_from_threshold() {
        // (210000 - 95750) * 0.18 = 20565; 20565 - 17235 = 3330
        assert_eq!(compute_annual_tax(dec("210000"), 30, &table()), dec("3330"));
    }

    #[test]
    fn test_rebate_floors_at_zero() {
        // (100000 - 95750) * 0.18 = 765, well below the rebate
        assert_eq!(compute_annual_tax(dec("100000"), 30, &table()), Decimal::ZERO);
    }

    #[test]
    fn test_first_bracket_upper_bound_inclusive() {
        let table = table();
        // (237100 - 95750) * 0.18 = 25443; less 17235 = 8208
        assert_eq!(compute_annual_tax(dec("237100"), 30, &table), dec("8208"));
        let matched = find_bracket(dec("237100"), dec("95750"), &table).unwrap();
        assert_eq!(matched.index, 0);
    }

    #[test]
    fn test_second_bracket() {
        // 25326 + (300000 - 237100) * 0.26 = 41680; less 17235 = 24445
        assert_eq!(compute_annual_tax(dec("300000"), 30, &table()), dec("24445"));
    }

    #[test]
    fn test_each_bracket_base_and_rate() {
        let table = table();
        let cases = [
            // (income, expected tax before rebate)
            ("400000", "69175"),   // 60030 + 29500 * 0.31
            ("600000", "135462"),  // 104070 + 87200 * 0.36
            ("700000", "172432"),  // 161902 + 27000 * 0.39
            ("1000000", "292283"), // 234022 + 142100 * 0.41
            ("2000000", "709304"), // 626954 + 183000 * 0.45
        ];
        for (income, expected) in cases {
            assert_eq!(
                bracket_tax(dec(income), 30, &table),
                dec(expected),
                "income {}",
                income
            );
            assert_eq!(
                compute_annual_tax(dec(income), 30, &table),
                dec(expected) - dec("17235"),
                "income {}",
                income
            );
        }
    }

    #[test]
    fn test_top_bracket_is_open() {
        let table = table();
        let matched = find_bracket(dec("50000000"), dec("95750"), &table).unwrap();
        assert_eq!(matched.index, 6);
        assert_eq!(matched.lower_bound, dec("1817000"));
    }

    #[test]
    fn test_secondary_rebate_from_65() {
        let table = table();
        // Threshold 148217: (200000 - 148217) * 0.18 = 9320.94 < 26679 rebate
        assert_eq!(compute_annual_tax(dec("200000"), 65, &table), Decimal::ZERO);
        // 25326 + (300000 - 237100) * 0.26 = 41680; less 26679 = 15001
        assert_eq!(compute_annual_tax(dec("300000"), 65, &table), dec("15001"));
        assert_eq!(compute_annual_tax(dec("300000"), 74, &table), dec("15001"));
    }

    #[test]
    fn test_tertiary_rebate_from_75() {
        // 41680 - (17235 + 9444 + 3145) = 11856
        assert_eq!(compute_annual_tax(dec("300000"), 75, &table()), dec("11856"));
    }

    #[test]
    fn test_age_64_uses_under_65_threshold() {
        let table = table();
        // 64: (148217 - 95750) * 0.18 = 9444.06 < 17235 -> 0
        assert_eq!(compute_annual_tax(dec("148217"), 64, &table), Decimal::ZERO);
        assert_eq!(bracket_tax(dec("148217"), 64, &table), dec("9444.06"));
        assert_eq!(bracket_tax(dec("148217"), 65, &table), Decimal::ZERO);
    }

    #[test]
    fn test_monthly_paye_example() {
        // 17500 * 12 = 210000 -> 3330 / 12 = 277.50
        assert_eq!(compute_monthly_paye(dec("17500"), 30, &table()), dec("277.50"));
    }

    #[test]
    fn test_monthly_paye_rounds_to_cents() {
        // 20000 * 12 = 240000: 25326 + 2900 * 0.26 = 26080 - 17235 = 8845 / 12 = 737.0833..
        assert_eq!(compute_monthly_paye(dec("20000"), 30, &table()), dec("737.08"));
    }

    #[test]
    fn test_calculate_paye_enabled() {
        let result = calculate_paye(dec("17500"), 30, true, &table(), 3);

        assert_eq!(result.monthly_paye, dec("277.50"));
        assert_eq!(result.annual_income, dec("210000"));
        assert_eq!(result.annual_tax, dec("3330"));
        assert_eq!(result.audit_step.rule_id, "paye");
        assert_eq!(result.audit_step.output["bracket"], 1);
        assert_eq!(result.audit_step.output["rebate"], "17235");
        assert!(result.audit_step.reasoning.starts_with("Bracket 1"));
    }

    #[test]
    fn test_calculate_paye_disabled_withholds_nothing() {
        let result = calculate_paye(dec("17500"), 30, false, &table(), 3);

        assert_eq!(result.monthly_paye, Decimal::ZERO);
        assert_eq!(result.annual_tax, dec("3330"));
        assert!(result.audit_step.reasoning.contains("not enabled"));
    }

    #[test]
    fn test_calculate_paye_below_threshold() {
        let result = calculate_paye(dec("5000"), 30, true, &table(), 3);

        assert_eq!(result.monthly_paye, Decimal::ZERO);
        assert!(result.audit_step.output["bracket"].is_null());
        assert!(result.audit_step.reasoning.contains("tax-free threshold"));
    }

    #[test]
    fn test_monthly_paye_on_huge_gross_saturates() {
        let gross = dec("10000000000000000000000000000");
        let monthly = compute_monthly_paye(gross, 30, &table());
        assert!(monthly > Decimal::ZERO);
        assert_eq!(monthly, monthly.round_dp(2));

        let result = calculate_paye(Decimal::MAX, 30, true, &table(), 3);
        assert_eq!(result.annual_income, Decimal::MAX);
        assert_eq!(result.audit_step.output["bracket"], 7);
    }
}
