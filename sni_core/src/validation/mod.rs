//! # Zero-Tolerance Validation
//!
//! Multi-layer gate that screens a project before it can be approved for
//! construction. Each validator is a static table of [`Rule`]s; every rule is
//! evaluated (no short-circuiting) so one pass reports the complete issue list.
//!
//! Validation never fails: every finding is a [`ValidationResult`]. A result
//! with `block_construction = true` from any validator puts the whole project
//! in the [`GateStatus::Blocked`] state.
//!
//! ## Order
//!
//! 1. Concrete material
//! 2. Steel material
//! 3. Seismic parameters
//! 4. Geometry
//! 5. Loads
//! 6. Professional sign-off
//!
//! ## Example
//!
//! ```rust
//! use sni_core::geometry::StructuralGeometry;
//! use sni_core::loads::{LoadConditions, SeismicParameters, SiteClass};
//! use sni_core::materials::{ConcreteProperties, MaterialProperties, SteelGrade, SteelProperties};
//! use sni_core::project::{ProjectData, ValidationContext};
//! use sni_core::validation::{validate, GateStatus};
//!
//! let project = ProjectData {
//!     name: "Kantor 5 lantai".to_string(),
//!     geometry: StructuralGeometry::new(25.0, 20.0, 15.0, 5, 5.0),
//!     materials: MaterialProperties {
//!         concrete: ConcreteProperties::new(30.0).with_certificate("LAB-01"),
//!         steel: SteelProperties::from_grade(SteelGrade::BjTS40).with_certificate("MILL-01"),
//!     },
//!     loads: LoadConditions {
//!         dead_load: 5.0,
//!         live_load: 4.0,
//!         wind_load: 0.0,
//!         seismic_parameters: SeismicParameters::new(1.2, 0.5, SiteClass::SD),
//!     },
//! };
//! let ctx = ValidationContext::new("office").with_license("ENG-001");
//!
//! let results = validate(&project, &ctx);
//! assert_ne!(GateStatus::from_results(&results), GateStatus::Blocked);
//! ```

pub mod concrete;
pub mod geometry;
pub mod loads;
pub mod professional;
pub mod seismic;
pub mod steel;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::project::{ProjectData, ValidationContext};

/// Severity of a validation finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

/// Concern a validation finding belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    /// Life-safety risk
    Safety,
    /// Non-conformance with a code provision
    Code,
    /// Engineering judgement / practicality
    Engineering,
    /// Licensing, certification and sign-off
    Professional,
}

/// A single validation finding. Produced once and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Identifier of the rule that produced this result (e.g., "CONC-FC-MIN")
    pub rule_id: String,
    /// False for CRITICAL and WARNING findings
    pub is_valid: bool,
    pub severity: Severity,
    pub category: Category,
    pub message: String,
    pub recommendation: String,
    pub code_reference: String,
    pub requires_engineer_review: bool,
    /// The finding alone withholds construction approval
    pub block_construction: bool,
}

impl ValidationResult {
    fn finding(rule_id: &str, severity: Severity, category: Category, message: impl Into<String>) -> Self {
        ValidationResult {
            rule_id: rule_id.to_string(),
            is_valid: severity == Severity::Info,
            severity,
            category,
            message: message.into(),
            recommendation: String::new(),
            code_reference: String::new(),
            requires_engineer_review: severity == Severity::Critical,
            block_construction: false,
        }
    }

    /// CRITICAL finding (requires engineer review by default)
    pub fn critical(rule_id: &str, category: Category, message: impl Into<String>) -> Self {
        Self::finding(rule_id, Severity::Critical, category, message)
    }

    /// WARNING finding
    pub fn warning(rule_id: &str, category: Category, message: impl Into<String>) -> Self {
        Self::finding(rule_id, Severity::Warning, category, message)
    }

    /// INFO finding (valid, advisory only)
    pub fn info(rule_id: &str, category: Category, message: impl Into<String>) -> Self {
        Self::finding(rule_id, Severity::Info, category, message)
    }

    /// Set the recommendation text (builder pattern)
    pub fn recommend(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendation = recommendation.into();
        self
    }

    /// Set the code reference (builder pattern)
    pub fn reference(mut self, code_reference: impl Into<String>) -> Self {
        self.code_reference = code_reference.into();
        self
    }

    /// Mark the finding as withholding construction approval
    pub fn blocking(mut self) -> Self {
        self.block_construction = true;
        self.requires_engineer_review = true;
        self
    }

    /// Flag the finding for engineer review
    pub fn needs_review(mut self) -> Self {
        self.requires_engineer_review = true;
        self
    }

    /// Hard stop: invalid and blocking
    pub fn is_blocking(&self) -> bool {
        !self.is_valid && self.block_construction
    }
}

/// One table-driven validation rule.
///
/// `applies` decides whether the rule fires; `build` produces the finding.
pub struct Rule<T: ?Sized> {
    pub id: &'static str,
    pub applies: fn(&T, &ValidationContext) -> bool,
    pub build: fn(&T, &ValidationContext) -> ValidationResult,
}

/// Evaluate every rule in order and collect the findings of those that fire.
pub fn run_rules<T: ?Sized>(rules: &[Rule<T>], input: &T, ctx: &ValidationContext) -> Vec<ValidationResult> {
    rules
        .iter()
        .filter(|rule| (rule.applies)(input, ctx))
        .map(|rule| (rule.build)(input, ctx))
        .collect()
}

/// Run all validators in fixed order and concatenate their findings.
///
/// Pure: no I/O, no clock, no shared mutable state.
pub fn validate(project: &ProjectData, ctx: &ValidationContext) -> Vec<ValidationResult> {
    let stages: [(&str, Vec<ValidationResult>); 6] = [
        ("concrete", concrete::validate(&project.materials.concrete, ctx)),
        ("steel", steel::validate(&project.materials.steel, ctx)),
        ("seismic", seismic::validate(&project.loads.seismic_parameters, ctx)),
        ("geometry", geometry::validate(&project.geometry, ctx)),
        ("loads", loads::validate(&project.loads, ctx)),
        ("professional", professional::validate(ctx)),
    ];

    let mut results = Vec::new();
    for (validator, findings) in stages {
        debug!(validator, findings = findings.len(), "validator finished");
        results.extend(findings);
    }

    let gate = GateStatus::from_results(&results);
    let blocking = results.iter().filter(|r| r.is_blocking()).count();
    if gate == GateStatus::Blocked {
        warn!(project = %project.name, blocking, "construction approval blocked");
    }
    info!(project = %project.name, findings = results.len(), blocking, ?gate, "validation complete");
    results
}

/// Validate many projects in parallel. Output order matches input order.
pub fn validate_batch(projects: &[(ProjectData, ValidationContext)]) -> Vec<Vec<ValidationResult>> {
    projects
        .par_iter()
        .map(|(project, ctx)| validate(project, ctx))
        .collect()
}

/// Aggregate construction-approval state of a result list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GateStatus {
    /// No findings that need attention
    Approved,
    /// Nothing blocks, but warnings or review flags are present
    ReviewRequired,
    /// At least one blocking finding
    Blocked,
}

impl GateStatus {
    /// Derive the gate from a list of findings
    pub fn from_results(results: &[ValidationResult]) -> Self {
        if results.iter().any(ValidationResult::is_blocking) {
            GateStatus::Blocked
        } else if results
            .iter()
            .any(|r| !r.is_valid || r.requires_engineer_review)
        {
            GateStatus::ReviewRequired
        } else {
            GateStatus::Approved
        }
    }
}

/// Counts per severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub critical: usize,
    pub warning: usize,
    pub info: usize,
    pub blocking: usize,
}

impl ValidationSummary {
    pub fn from_results(results: &[ValidationResult]) -> Self {
        results.iter().fold(ValidationSummary::default(), |mut s, r| {
            match r.severity {
                Severity::Critical => s.critical += 1,
                Severity::Warning => s.warning += 1,
                Severity::Info => s.info += 1,
            }
            if r.is_blocking() {
                s.blocking += 1;
            }
            s
        })
    }
}

/// Envelope handed to API/UI collaborators: findings plus identity and time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub project_name: String,
    pub gate: GateStatus,
    pub summary: ValidationSummary,
    pub results: Vec<ValidationResult>,
}

impl ValidationReport {
    /// Validate a project and wrap the findings in a report
    pub fn generate(project: &ProjectData, ctx: &ValidationContext) -> Self {
        Self::from_results(project.name.clone(), validate(project, ctx))
    }

    /// Wrap an existing result list
    pub fn from_results(project_name: impl Into<String>, results: Vec<ValidationResult>) -> Self {
        ValidationReport {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            project_name: project_name.into(),
            gate: GateStatus::from_results(&results),
            summary: ValidationSummary::from_results(&results),
            results,
        }
    }

    /// Blocking findings only
    pub fn blocking(&self) -> impl Iterator<Item = &ValidationResult> {
        self.results.iter().filter(|r| r.is_blocking())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn even(n: &i32, _: &ValidationContext) -> bool {
        n % 2 == 0
    }

    fn positive(n: &i32, _: &ValidationContext) -> bool {
        *n > 0
    }

    fn build_even(n: &i32, _: &ValidationContext) -> ValidationResult {
        ValidationResult::warning("EVEN", Category::Engineering, format!("{} is even", n))
    }

    fn build_positive(_: &i32, _: &ValidationContext) -> ValidationResult {
        ValidationResult::critical("POS", Category::Safety, "positive").blocking()
    }

    const RULES: &[Rule<i32>] = &[
        Rule { id: "EVEN", applies: even, build: build_even },
        Rule { id: "POS", applies: positive, build: build_positive },
    ];

    #[test]
    fn test_run_rules_evaluates_all_in_order() {
        let ctx = ValidationContext::new("office");
        let results = run_rules(RULES, &4, &ctx);
        let ids: Vec<_> = results.iter().map(|r| r.rule_id.as_str()).collect();
        assert_eq!(ids, vec!["EVEN", "POS"]);

        assert!(run_rules(RULES, &-3, &ctx).is_empty());
    }

    #[test]
    fn test_result_builders() {
        let r = ValidationResult::critical("X", Category::Safety, "msg").blocking();
        assert!(!r.is_valid);
        assert!(r.is_blocking());
        assert!(r.requires_engineer_review);

        let w = ValidationResult::warning("W", Category::Code, "msg");
        assert!(!w.is_valid);
        assert!(!w.requires_engineer_review);
        assert!(!w.is_blocking());

        let i = ValidationResult::info("I", Category::Professional, "msg").needs_review();
        assert!(i.is_valid);
        assert!(i.requires_engineer_review);
    }

    #[test]
    fn test_gate_status() {
        assert_eq!(GateStatus::from_results(&[]), GateStatus::Approved);

        let warning = ValidationResult::warning("W", Category::Code, "w");
        assert_eq!(GateStatus::from_results(&[warning.clone()]), GateStatus::ReviewRequired);

        let block = ValidationResult::critical("C", Category::Safety, "c").blocking();
        assert_eq!(GateStatus::from_results(&[warning, block]), GateStatus::Blocked);
    }

    #[test]
    fn test_summary_counts() {
        let results = vec![
            ValidationResult::critical("C1", Category::Safety, "c").blocking(),
            ValidationResult::critical("C2", Category::Safety, "c"),
            ValidationResult::warning("W", Category::Code, "w"),
            ValidationResult::info("I", Category::Professional, "i"),
        ];
        let summary = ValidationSummary::from_results(&results);
        assert_eq!(summary, ValidationSummary { critical: 2, warning: 1, info: 1, blocking: 1 });
    }

    #[test]
    fn test_result_json_shape() {
        let r = ValidationResult::critical("CONC-FC-MIN", Category::Safety, "low").blocking();
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["severity"], "CRITICAL");
        assert_eq!(json["category"], "SAFETY");
        assert_eq!(json["block_construction"], true);
    }
}
