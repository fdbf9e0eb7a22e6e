//! Configuration loading and management for the Payslip Engine.
//!
//! This module provides functionality to load the PAYE tax table and UIF
//! contribution parameters from YAML files, including tax year metadata,
//! progressive brackets, age-banded thresholds and rebates.
//!
//! # Example
//!
//! ```no_run
//! use payslip_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/za_2024_25").unwrap();
//! println!("Loaded tax table: {}", config.tax_year().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AgeBand, ContributionsConfig, PayeConfig, PayrollConfig, TaxBracket, TaxYearMetadata,
    UifConfig,
};
