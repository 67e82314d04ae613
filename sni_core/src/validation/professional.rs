//! Professional sign-off: licensed engineer of record and peer review

use super::{run_rules, Category, Rule, ValidationResult};
use crate::constants::{constants, sni_ref};
use crate::project::ValidationContext;

/// Sign-off rules, evaluated in order
pub static RULES: &[Rule<ValidationContext>] = &[
    Rule { id: "PRO-LICENSE", applies: license_missing, build: license_missing_result },
    Rule { id: "PRO-TABG", applies: peer_review_required, build: peer_review_result },
];

/// Check the sign-off requirements. Independent of every engineering result.
pub fn validate(ctx: &ValidationContext) -> Vec<ValidationResult> {
    run_rules(RULES, ctx, ctx)
}

fn license_missing(ctx: &ValidationContext, _: &ValidationContext) -> bool {
    !ctx.has_license()
}

fn license_missing_result(_: &ValidationContext, _: &ValidationContext) -> ValidationResult {
    ValidationResult::critical(
        "PRO-LICENSE",
        Category::Professional,
        "No licensed structural engineer is recorded for this project",
    )
    .recommend("Assign an engineer of record holding a valid STRI / SKK license")
    .reference(sni_ref::ENGINEER_LICENSE)
    .blocking()
}

fn peer_review_required(ctx: &ValidationContext, _: &ValidationContext) -> bool {
    ctx.has_license() && constants().is_high_risk(ctx.project_value, ctx.occupancy_count)
}

fn peer_review_result(ctx: &ValidationContext, _: &ValidationContext) -> ValidationResult {
    ValidationResult::info(
        "PRO-TABG",
        Category::Professional,
        format!(
            "High-risk project ({} occupants, value {:.0}): design must pass building expert team (TABG) review",
            ctx.occupancy_count, ctx.project_value
        ),
    )
    .recommend("Submit calculations and drawings for TABG review before permit application")
    .reference(sni_ref::TABG_REVIEW)
    .needs_review()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{GateStatus, Severity};

    #[test]
    fn test_missing_license_blocks() {
        let results = validate(&ValidationContext::new("office"));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].rule_id, "PRO-LICENSE");
        assert!(results[0].is_blocking());

        let blank = ValidationContext::new("office").with_license("");
        assert!(validate(&blank)[0].is_blocking());
    }

    #[test]
    fn test_licensed_low_risk_is_clean() {
        let ctx = ValidationContext::new("office").with_license("ENG-001");
        assert!(validate(&ctx).is_empty());
    }

    #[test]
    fn test_high_risk_gets_peer_review_advisory() {
        let mut ctx = ValidationContext::new("office").with_license("ENG-001");
        ctx.occupancy_count = 300;
        let results = validate(&ctx);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].severity, Severity::Info);
        assert!(results[0].is_valid);
        assert!(!results[0].block_construction);
        assert_eq!(GateStatus::from_results(&results), GateStatus::ReviewRequired);
    }
}
