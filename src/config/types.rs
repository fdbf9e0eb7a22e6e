//! Configuration types for payslip calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Metadata about the tax year a configuration describes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxYearMetadata {
    /// A short code for the tax year (e.g., "ZA-2024-25").
    pub code: String,
    /// The human-readable name of the tax table.
    pub name: String,
    /// The version or effective date of the table.
    pub version: String,
    /// URL to the official rate publication.
    pub source_url: String,
}

/// One row of the progressive income tax schedule.
///
/// Tax for income falling in this bracket is
/// `base_tax + (income - lower) * rate`, where `lower` is the previous
/// bracket's upper bound (or the age band's tax-free threshold for the
/// first bracket).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Inclusive annual income upper bound; `None` for the open top bracket.
    pub upper_bound: Option<Decimal>,
    /// Tax owed at the bracket's lower bound.
    pub base_tax: Decimal,
    /// Marginal rate applied to income above the lower bound.
    pub rate: Decimal,
}

impl TaxBracket {
    /// Returns true if `income` falls at or below this bracket's upper bound.
    pub fn covers(&self, income: Decimal) -> bool {
        self.upper_bound.is_none_or(|upper| income <= upper)
    }
}

/// An age-dependent tax-free threshold and rebate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeBand {
    /// The youngest age (in whole years) this band applies to.
    pub age_lower_bound: u32,
    /// Annual income at or below which no tax is owed.
    pub tax_free_threshold: Decimal,
    /// Rebate granted on reaching this band, added to those of younger bands.
    pub rebate: Decimal,
}

/// PAYE configuration from paye.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayeConfig {
    /// Brackets in ascending order of upper bound; the open bracket is last.
    pub brackets: Vec<TaxBracket>,
    /// Age bands; sorted ascending by lower bound on construction.
    pub age_bands: Vec<AgeBand>,
}

impl PayeConfig {
    /// Returns the highest age band the given age has reached.
    pub fn age_band(&self, age: u32) -> Option<&AgeBand> {
        self.age_bands
            .iter()
            .rev()
            .find(|band| band.age_lower_bound <= age)
    }

    /// Returns the tax-free threshold for the given age.
    ///
    /// A table without a matching band (only possible if it bypassed
    /// [`PayrollConfig::new`]) has no threshold.
    pub fn tax_free_threshold(&self, age: u32) -> Decimal {
        self.age_band(age)
            .map(|band| band.tax_free_threshold)
            .unwrap_or(Decimal::ZERO)
    }

    /// Returns the total rebate for the given age.
    ///
    /// Rebates are cumulative: a 75 year old receives the primary,
    /// secondary and tertiary rebates.
    pub fn total_rebate(&self, age: u32) -> Decimal {
        self.age_bands
            .iter()
            .filter(|band| band.age_lower_bound <= age)
            .map(|band| band.rebate)
            .sum()
    }

    /// Sorts the age bands and checks the table is usable.
    pub(crate) fn validate(&mut self) -> EngineResult<()> {
        if self.brackets.is_empty() {
            return Err(invalid("tax table has no brackets"));
        }

        let last = self.brackets.len() - 1;
        let mut previous: Option<Decimal> = None;
        for (index, bracket) in self.brackets.iter().enumerate() {
            match bracket.upper_bound {
                None if index != last => {
                    return Err(invalid("only the last bracket may be open-ended"));
                }
                Some(_) if index == last => {
                    return Err(invalid("the last bracket must be open-ended"));
                }
                Some(upper) => {
                    if previous.is_some_and(|prev| upper <= prev) {
                        return Err(invalid(format!(
                            "bracket upper bounds must ascend (found {} after {})",
                            upper,
                            previous.unwrap_or_default()
                        )));
                    }
                    previous = Some(upper);
                }
                None => {}
            }
            if bracket.rate < Decimal::ZERO || bracket.base_tax < Decimal::ZERO {
                return Err(invalid("bracket rates and base amounts must be non-negative"));
            }
        }

        self.age_bands.sort_by_key(|band| band.age_lower_bound);
        match self.age_bands.first() {
            Some(band) if band.age_lower_bound == 0 => {}
            _ => return Err(invalid("an age band starting at age 0 is required")),
        }
        if self
            .age_bands
            .windows(2)
            .any(|pair| pair[0].age_lower_bound == pair[1].age_lower_bound)
        {
            return Err(invalid("age bands must have distinct lower bounds"));
        }

        Ok(())
    }
}

/// Unemployment Insurance Fund contribution parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UifConfig {
    /// Employee contribution rate applied to gross pay.
    pub rate: Decimal,
    /// Maximum monthly contribution.
    pub monthly_cap: Decimal,
}

/// Contributions configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ContributionsConfig {
    /// UIF contribution parameters.
    pub uif: UifConfig,
}

/// The complete payroll configuration loaded from YAML files.
///
/// This is read-only shared data: every calculation borrows it and none
/// mutate it.
#[derive(Debug, Clone)]
pub struct PayrollConfig {
    metadata: TaxYearMetadata,
    paye: PayeConfig,
    uif: UifConfig,
}

impl PayrollConfig {
    /// Creates a new PayrollConfig from its component parts.
    ///
    /// Returns `InvalidConfig` if the tax table is inconsistent.
    pub fn new(
        metadata: TaxYearMetadata,
        mut paye: PayeConfig,
        uif: UifConfig,
    ) -> EngineResult<Self> {
        paye.validate()?;
        if uif.rate < Decimal::ZERO || uif.monthly_cap < Decimal::ZERO {
            return Err(invalid("UIF rate and cap must be non-negative"));
        }
        Ok(Self {
            metadata,
            paye,
            uif,
        })
    }

    /// Returns the tax year metadata.
    pub fn tax_year(&self) -> &TaxYearMetadata {
        &self.metadata
    }

    /// Returns the PAYE tax table.
    pub fn paye(&self) -> &PayeConfig {
        &self.paye
    }

    /// Returns the UIF parameters.
    pub fn uif(&self) -> &UifConfig {
        &self.uif
    }
}

fn invalid(message: impl Into<String>) -> EngineError {
    EngineError::InvalidConfig {
        message: message.into(),
    }
}
