//! Steel material validation (SNI 2052:2017, SNI 1729:2020)

use super::{run_rules, Category, Rule, ValidationResult};
use crate::constants::{constants, sni_ref};
use crate::materials::SteelProperties;
use crate::project::ValidationContext;

/// Steel rules, evaluated in order
pub static RULES: &[Rule<SteelProperties>] = &[
    Rule { id: "STEEL-FY-MIN", applies: fy_below_minimum, build: fy_below_minimum_result },
    Rule { id: "STEEL-DUCTILITY", applies: insufficient_ductility, build: ductility_result },
    Rule { id: "STEEL-GRADE", applies: grade_mismatch, build: grade_mismatch_result },
    Rule { id: "STEEL-CERT", applies: certificate_missing, build: certificate_result },
];

/// Validate steel properties against code minimums, grade table and certification.
pub fn validate(steel: &SteelProperties, ctx: &ValidationContext) -> Vec<ValidationResult> {
    run_rules(RULES, steel, ctx)
}

fn fy_below_minimum(s: &SteelProperties, _: &ValidationContext) -> bool {
    s.fy < constants().steel.min_fy_mpa
}

fn fy_below_minimum_result(s: &SteelProperties, _: &ValidationContext) -> ValidationResult {
    let min = constants().steel.min_fy_mpa;
    ValidationResult::critical(
        "STEEL-FY-MIN",
        Category::Safety,
        format!("Steel yield strength fy = {:.0} MPa is below the minimum of {:.0} MPa", s.fy, min),
    )
    .recommend("Use certified reinforcing steel of grade BjTS-24 or higher")
    .reference(sni_ref::STEEL_GRADE)
    .blocking()
}

fn insufficient_ductility(s: &SteelProperties, _: &ValidationContext) -> bool {
    s.strength_ratio() < constants().steel.min_fu_fy_ratio
}

fn ductility_result(s: &SteelProperties, _: &ValidationContext) -> ValidationResult {
    ValidationResult::critical(
        "STEEL-DUCTILITY",
        Category::Safety,
        format!(
            "fu/fy = {:.2} is below the required {:.2}; steel lacks ductility for seismic detailing",
            s.strength_ratio(),
            constants().steel.min_fu_fy_ratio
        ),
    )
    .recommend("Reject the batch or obtain steel with fu/fy ≥ 1.25")
    .reference(sni_ref::STEEL_DUCTILITY)
    .blocking()
}

fn grade_mismatch(s: &SteelProperties, _: &ValidationContext) -> bool {
    s.known_grade().is_some_and(|grade| {
        let expected = grade.nominal_fy();
        (s.fy - expected).abs() > constants().steel.grade_tolerance * expected
    })
}

fn grade_mismatch_result(s: &SteelProperties, _: &ValidationContext) -> ValidationResult {
    let (designation, expected) = s
        .known_grade()
        .map(|g| (g.designation(), g.nominal_fy()))
        .unwrap_or(("unknown", 0.0));
    ValidationResult::warning(
        "STEEL-GRADE",
        Category::Engineering,
        format!("Grade {} implies fy ≈ {:.0} MPa but fy = {:.0} MPa was specified", designation, expected, s.fy),
    )
    .recommend("Check the grade designation against the mill certificate")
    .reference(sni_ref::STEEL_GRADE)
}

fn certificate_missing(s: &SteelProperties, _: &ValidationContext) -> bool {
    !s.has_certificate()
}

fn certificate_result(_: &SteelProperties, _: &ValidationContext) -> ValidationResult {
    ValidationResult::critical(
        "STEEL-CERT",
        Category::Professional,
        "No mill certificate supplied for the reinforcing steel",
    )
    .recommend("Attach the mill test certificate for every heat supplied")
    .reference(sni_ref::STEEL_CERTIFICATE)
    .blocking()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::SteelGrade;

    fn ids(results: &[ValidationResult]) -> Vec<&str> {
        results.iter().map(|r| r.rule_id.as_str()).collect()
    }

    #[test]
    fn test_good_steel_has_no_findings() {
        let ctx = ValidationContext::new("office");
        let s = SteelProperties::from_grade(SteelGrade::BjTS40).with_certificate("MILL-1");
        assert!(validate(&s, &ctx).is_empty());
    }

    #[test]
    fn test_low_fy_and_ductility() {
        let ctx = ValidationContext::new("office");
        let s = SteelProperties::new(180.0, 200.0).with_certificate("MILL-1");
        let results = validate(&s, &ctx);
        assert_eq!(ids(&results), vec!["STEEL-FY-MIN", "STEEL-DUCTILITY"]);
        assert!(results.iter().all(|r| r.is_blocking() && r.category == Category::Safety));
    }

    #[test]
    fn test_ratio_boundary() {
        let ctx = ValidationContext::new("office");
        let ok = SteelProperties::new(400.0, 500.0).with_certificate("MILL-1");
        assert!(validate(&ok, &ctx).is_empty());
        let bad = SteelProperties::new(400.0, 499.0).with_certificate("MILL-1");
        assert_eq!(ids(&validate(&bad, &ctx)), vec!["STEEL-DUCTILITY"]);
    }

    #[test]
    fn test_grade_mismatch_warns() {
        let ctx = ValidationContext::new("office");
        let mut s = SteelProperties::new(300.0, 450.0).with_certificate("MILL-1");
        s.grade = Some("BjTS-40".to_string());
        let results = validate(&s, &ctx);
        assert_eq!(ids(&results), vec!["STEEL-GRADE"]);
        assert!(!results[0].block_construction);

        // within 10%
        s.fy = 370.0;
        s.fu = 500.0;
        assert!(validate(&s, &ctx).is_empty());
    }

    #[test]
    fn test_unknown_grade_is_not_checked() {
        let ctx = ValidationContext::new("office");
        let mut s = SteelProperties::new(300.0, 450.0).with_certificate("MILL-1");
        s.grade = Some("A615-60".to_string());
        assert!(validate(&s, &ctx).is_empty());
    }

    #[test]
    fn test_missing_certificate_blocks() {
        let ctx = ValidationContext::new("office");
        let results = validate(&SteelProperties::new(400.0, 540.0), &ctx);
        assert_eq!(ids(&results), vec!["STEEL-CERT"]);
        assert_eq!(results[0].category, Category::Professional);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn low_ratio_always_blocks(fy in 240.0_f64..700.0, ratio in 0.5_f64..1.2499) {
            let ctx = ValidationContext::new("office");
            let s = SteelProperties::new(fy, fy * ratio).with_certificate("MILL-1");
            let results = validate(&s, &ctx);
            prop_assert!(results.iter().any(|r| r.rule_id == "STEEL-DUCTILITY"
                && r.category == Category::Safety
                && r.is_blocking()));
        }
    }
}
