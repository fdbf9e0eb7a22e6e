//! Error types for the Payslip Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while producing a payslip.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single problem found while validating a [`PayInput`](crate::models::PayInput).
///
/// Validation collects every problem rather than stopping at the first,
/// so callers receive a list of these.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    /// A required text field was empty or contained only whitespace.
    #[error("{label} is required")]
    MissingField {
        /// The camelCase input field name.
        field: String,
        /// The human-readable field label.
        label: String,
    },

    /// The company email does not look like `local@domain.tld`.
    #[error("Invalid Company Email format")]
    InvalidEmail,

    /// The national ID number is not exactly 13 digits.
    #[error("ID Number must be exactly 13 digits")]
    MissingOrMalformedId,

    /// The bank account number is not 9 to 12 digits.
    #[error("Account Number must be between 9 and 12 digits")]
    MalformedAccountNumber,

    /// A numeric field is outside its permitted range.
    #[error("{message}")]
    InvalidNumeric {
        /// The camelCase input field name.
        field: String,
        /// A description of the permitted range.
        message: String,
    },
}

impl ValidationError {
    /// Returns the camelCase name of the input field this error refers to.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::MissingField { field, .. } => field,
            ValidationError::InvalidEmail => "companyEmail",
            ValidationError::MissingOrMalformedId => "nationalIdNumber",
            ValidationError::MalformedAccountNumber => "accountNo",
            ValidationError::InvalidNumeric { field, .. } => field,
        }
    }

    /// Returns a stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::MissingField { .. } => "MISSING_FIELD",
            ValidationError::InvalidEmail => "INVALID_EMAIL",
            ValidationError::MissingOrMalformedId => "MISSING_OR_MALFORMED_ID",
            ValidationError::MalformedAccountNumber => "MALFORMED_ACCOUNT_NUMBER",
            ValidationError::InvalidNumeric { .. } => "INVALID_NUMERIC",
        }
    }
}

/// The main error type for the Payslip Engine.
///
/// # Example
///
/// ```
/// use payslip_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/paye.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/paye.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The input failed validation. Every problem found is listed.
    #[error("Validation failed with {} error(s)", .errors.len())]
    Validation {
        /// All validation problems, in field order.
        errors: Vec<ValidationError>,
    },

    /// A national ID number could not be used to derive an age.
    #[error("Invalid ID number '{id}': {reason}")]
    InvalidIdNumber {
        /// The offending ID number as supplied.
        id: String,
        /// Why the ID number was rejected.
        reason: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but is not a usable tax table.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of the inconsistency.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
