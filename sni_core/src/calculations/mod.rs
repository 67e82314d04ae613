//! # Structural Calculations
//!
//! Closed-form SNI member and building-level calculators. Each calculator is a
//! pure function of its inputs that appends its intermediate values to a
//! [`CalculationLog`] and returns either a typed result or a [`CalcError`].
//!
//! The log is owned by the caller (normally [`analysis::analyze`]) and passed
//! down as `&mut`, so the audit trail is assembled in the order the stages run
//! without any shared state between calls.
//!
//! ## Available Calculations
//!
//! - [`seismic`] - Seismic weight, fundamental period, site coefficients,
//!   base shear, wind base shear
//! - [`drift`] - Story stiffness, elastic and design displacement, drift ratio
//! - [`flexure`] - Required tension steel and flexural capacity
//! - [`shear`] - Concrete shear capacity and stirrup spacing
//! - [`column`] - Interior column axial capacity
//! - [`analysis`] - The end-to-end orchestrator
//!
//! ## Example
//!
//! ```rust
//! use sni_core::calculations::{CalculationLog, CalculationStep};
//!
//! let mut log = CalculationLog::new();
//! let w = log.push(
//!     CalculationStep::new("Line load", "w = q·b")
//!         .with_calculation("12.0 × 5.0")
//!         .with_result(60.0, "kN/m"),
//! ).unwrap();
//! assert_eq!(w, 60.0);
//! assert_eq!(log.steps()[0].step, 1);
//! ```

pub mod analysis;
pub mod column;
pub mod drift;
pub mod flexure;
pub mod seismic;
pub mod shear;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::{CalcError, CalcResult, DomainErrorKind};

pub use analysis::{analyze, analyze_with, AnalysisOptions, StructuralAnalysisResults};
pub use column::{ColumnCheck, ColumnInput};
pub use drift::DriftCheck;
pub use flexure::FlexuralDesign;
pub use seismic::{PeriodEstimate, SeismicDemand, SiteCoefficientSource, SiteCoefficients, StructuralSystem};
pub use shear::ShearDesign;

/// One entry of the calculation audit trail.
///
/// ## JSON Example
///
/// ```json
/// {
///   "step": 4,
///   "description": "Design spectral acceleration (short period)",
///   "formula": "Sds = (2/3)·Ss·Fa",
///   "calculation": "(2/3) × 1.200 × 1.020",
///   "result": 0.816,
///   "unit": "g",
///   "code_reference": "SNI 1726:2019 Pasal 6.3",
///   "verified": true
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationStep {
    /// 1-based position in the log, assigned on push
    pub step: usize,
    pub description: String,
    pub formula: String,
    /// Formula with numbers substituted
    pub calculation: String,
    pub result: f64,
    pub unit: String,
    pub code_reference: String,
    /// False when the value is outside code limits or rests on an approximation
    pub verified: bool,
}

impl CalculationStep {
    /// Start a verified step with a description and symbolic formula
    pub fn new(description: impl Into<String>, formula: impl Into<String>) -> Self {
        CalculationStep {
            step: 0,
            description: description.into(),
            formula: formula.into(),
            calculation: String::new(),
            result: 0.0,
            unit: String::new(),
            code_reference: String::new(),
            verified: true,
        }
    }

    /// Set the substituted calculation text (builder pattern)
    pub fn with_calculation(mut self, calculation: impl Into<String>) -> Self {
        self.calculation = calculation.into();
        self
    }

    /// Set the numeric result and its unit (builder pattern)
    pub fn with_result(mut self, result: f64, unit: impl Into<String>) -> Self {
        self.result = result;
        self.unit = unit.into();
        self
    }

    /// Set the code clause (builder pattern)
    pub fn with_reference(mut self, code_reference: impl Into<String>) -> Self {
        self.code_reference = code_reference.into();
        self
    }

    /// Mark the step as not verified against the code
    pub fn unverified(mut self) -> Self {
        self.verified = false;
        self
    }
}

/// Ordered audit trail of one calculation run.
///
/// Steps are numbered in push order. A step whose result is NaN or infinite is
/// rejected with a [`DomainErrorKind::NonFinite`] error, so a finished log
/// never carries a non-finite number.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalculationLog {
    steps: Vec<CalculationStep>,
}

impl CalculationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step and return its result.
    pub fn push(&mut self, mut step: CalculationStep) -> CalcResult<f64> {
        let index = self.next_index();
        if !step.result.is_finite() {
            return Err(CalcError::domain(
                DomainErrorKind::NonFinite,
                format!("{} evaluated to {}", step.description, step.result),
                Some(index),
            ));
        }
        if !step.verified {
            warn!(step = index, description = %step.description, result = step.result, "unverified calculation step");
        }
        step.step = index;
        let result = step.result;
        self.steps.push(step);
        Ok(result)
    }

    /// Index the next pushed step will receive. Used to locate domain errors.
    pub fn next_index(&self) -> usize {
        self.steps.len() + 1
    }

    /// Result of the most recent step
    pub fn last_result(&self) -> Option<f64> {
        self.steps.last().map(|s| s.result)
    }

    pub fn steps(&self) -> &[CalculationStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Steps flagged `verified = false`
    pub fn unverified(&self) -> impl Iterator<Item = &CalculationStep> {
        self.steps.iter().filter(|s| !s.verified)
    }

    /// Code references in first-use order, without duplicates
    pub fn references(&self) -> Vec<String> {
        let mut refs: Vec<String> = Vec::new();
        for step in &self.steps {
            if !step.code_reference.is_empty() && !refs.contains(&step.code_reference) {
                refs.push(step.code_reference.clone());
            }
        }
        refs
    }

    pub fn into_steps(self) -> Vec<CalculationStep> {
        self.steps
    }
}

/// Domain error for a zero or negative denominator at the next log position
pub(crate) fn division_by_zero(log: &CalculationLog, what: impl Into<String>) -> CalcError {
    CalcError::domain(DomainErrorKind::DivisionByZero, what, Some(log.next_index()))
}
