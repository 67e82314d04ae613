//! # Error Types
//!
//! Structured error types for sni_core. Validation findings are *not* errors:
//! they are returned as [`ValidationResult`](crate::validation::ValidationResult)
//! values. The types here cover the two remaining failure classes:
//!
//! - **Contract errors**: malformed input caught before any calculation runs
//!   (`InvalidInput`, `MissingField`).
//! - **Domain errors**: numeric impossibilities met during a calculation
//!   (`Domain`), such as a negative square-root argument in the flexural
//!   solution or a zero story height.
//!
//! ## Example
//!
//! ```rust
//! use sni_core::errors::{CalcError, CalcResult};
//!
//! fn validate_height(height_m: f64) -> CalcResult<()> {
//!     if height_m <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "height",
//!             height_m.to_string(),
//!             "Building height must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_height(-3.0).is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for sni_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Classification of calculation domain errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainErrorKind {
    /// Required capacity exceeds what the section can deliver
    /// (e.g. negative argument under the square root in the ρ solution)
    CapacityExceeded,
    /// A denominator evaluated to zero (period, story height, section size)
    DivisionByZero,
    /// A value about to enter the audit trail was NaN or infinite
    NonFinite,
}

impl fmt::Display for DomainErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DomainErrorKind::CapacityExceeded => "capacity exceeded",
            DomainErrorKind::DivisionByZero => "division by zero",
            DomainErrorKind::NonFinite => "non-finite value",
        };
        f.write_str(name)
    }
}

/// Structured error type for calculation operations.
///
/// Each variant provides specific context about what went wrong,
/// so callers can react programmatically instead of parsing strings.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, non-positive dimension, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Numeric impossibility met while calculating.
    ///
    /// `step` is the audit-trail index at which the calculation stopped.
    #[error("Calculation error ({kind}) at step {}: {message}", step_label(.step))]
    Domain {
        kind: DomainErrorKind,
        message: String,
        step: Option<usize>,
    },

    /// Calculation cannot proceed with the given configuration
    #[error("Calculation failed: {calculation_type} - {reason}")]
    CalculationFailed {
        calculation_type: String,
        reason: String,
    },
}

/// Audit-trail index for messages, `-` when the error precedes the first step
fn step_label(step: &Option<usize>) -> String {
    step.map_or_else(|| "-".to_string(), |n| n.to_string())
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create a Domain error at a given audit-trail step
    pub fn domain(kind: DomainErrorKind, message: impl Into<String>, step: Option<usize>) -> Self {
        CalcError::Domain {
            kind,
            message: message.into(),
            step,
        }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(calculation_type: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::CalculationFailed {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
        }
    }

    /// Domain error kind, if this is a domain error
    pub fn domain_kind(&self) -> Option<DomainErrorKind> {
        match self {
            CalcError::Domain { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Contract errors are fixed by correcting input before resubmitting
    pub fn is_contract_error(&self) -> bool {
        matches!(self, CalcError::InvalidInput { .. } | CalcError::MissingField { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::Domain { .. } => "CALCULATION_DOMAIN",
            CalcError::CalculationFailed { .. } => "CALCULATION_FAILED",
        }
    }
}
