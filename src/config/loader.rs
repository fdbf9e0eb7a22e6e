//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! configurations from YAML files, either from a directory on disk or from
//! the copy embedded in the crate.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{EngineError, EngineResult};

use super::types::{ContributionsConfig, PayeConfig, PayrollConfig, TaxYearMetadata, UifConfig};

const EMBEDDED_TAX_YEAR: &str = include_str!("../../config/za_2024_25/tax_year.yaml");
const EMBEDDED_PAYE: &str = include_str!("../../config/za_2024_25/paye.yaml");
const EMBEDDED_CONTRIBUTIONS: &str = include_str!("../../config/za_2024_25/contributions.yaml");

/// Loads and provides access to payroll configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/za_2024_25/
/// ├── tax_year.yaml       # Tax year metadata
/// ├── paye.yaml           # Tax brackets and age bands
/// └── contributions.yaml  # UIF rate and monthly cap
/// ```
///
/// # Example
///
/// ```no_run
/// use payslip_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/za_2024_25").unwrap();
/// println!("Tax table: {}", loader.tax_year().name);
/// assert_eq!(loader.paye().tax_free_threshold(30), Decimal::from(95750));
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The tax table is inconsistent (see [`PayrollConfig::new`])
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<TaxYearMetadata>(&path.join("tax_year.yaml"))?;
        let paye = Self::load_yaml::<PayeConfig>(&path.join("paye.yaml"))?;
        let contributions =
            Self::load_yaml::<ContributionsConfig>(&path.join("contributions.yaml"))?;

        let config = PayrollConfig::new(metadata, paye, contributions.uif)?;
        Ok(Self { config })
    }

    /// Loads the 2024/2025 South African configuration compiled into the crate.
    ///
    /// # Example
    ///
    /// ```
    /// use payslip_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::embedded()?;
    /// assert_eq!(loader.tax_year().code, "ZA-2024-25");
    /// # Ok::<(), payslip_engine::error::EngineError>(())
    /// ```
    pub fn embedded() -> EngineResult<Self> {
        let metadata =
            Self::parse_yaml::<TaxYearMetadata>(EMBEDDED_TAX_YEAR, "<embedded>/tax_year.yaml")?;
        let paye = Self::parse_yaml::<PayeConfig>(EMBEDDED_PAYE, "<embedded>/paye.yaml")?;
        let contributions = Self::parse_yaml::<ContributionsConfig>(
            EMBEDDED_CONTRIBUTIONS,
            "<embedded>/contributions.yaml",
        )?;

        let config = PayrollConfig::new(metadata, paye, contributions.uif)?;
        Ok(Self { config })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: PayrollConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::parse_yaml(&content, &path_str)
    }

    fn parse_yaml<T: DeserializeOwned>(content: &str, path: &str) -> EngineResult<T> {
        serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    /// Returns the underlying payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the tax year metadata.
    pub fn tax_year(&self) -> &TaxYearMetadata {
        self.config.tax_year()
    }

    /// Returns the PAYE tax table.
    pub fn paye(&self) -> &PayeConfig {
        self.config.paye()
    }

    /// Returns the UIF parameters.
    pub fn uif(&self) -> &UifConfig {
        self.config.uif()
    }

}
