//! Concrete material validation (SNI 2847:2019)

use super::{run_rules, Category, Rule, ValidationResult};
use crate::constants::{constants, sni_ref};
use crate::materials::ConcreteProperties;
use crate::project::ValidationContext;

/// Concrete rules, evaluated in order
pub static RULES: &[Rule<ConcreteProperties>] = &[
    Rule { id: "CONC-FC-MIN", applies: fc_below_minimum, build: fc_below_minimum_result },
    Rule { id: "CONC-FC-MAX", applies: fc_above_maximum, build: fc_above_maximum_result },
    Rule { id: "CONC-DENSITY", applies: density_out_of_range, build: density_result },
    Rule { id: "CONC-CERT", applies: certificate_missing, build: certificate_result },
    Rule { id: "CONC-FC-HIGH-RISK", applies: high_risk_low_fc, build: high_risk_result },
];

/// Validate concrete properties against code minimums and certification.
pub fn validate(concrete: &ConcreteProperties, ctx: &ValidationContext) -> Vec<ValidationResult> {
    run_rules(RULES, concrete, ctx)
}

fn fc_below_minimum(c: &ConcreteProperties, _: &ValidationContext) -> bool {
    c.fc < constants().concrete.min_fc_mpa
}

fn fc_below_minimum_result(c: &ConcreteProperties, _: &ValidationContext) -> ValidationResult {
    let min = constants().concrete.min_fc_mpa;
    ValidationResult::critical(
        "CONC-FC-MIN",
        Category::Safety,
        format!("Concrete strength fc' = {:.1} MPa is below the structural minimum of {:.0} MPa", c.fc, min),
    )
    .recommend(format!("Specify fc' ≥ {:.0} MPa for structural concrete", min))
    .reference(sni_ref::CONCRETE_MIN_FC)
    .blocking()
}

fn fc_above_maximum(c: &ConcreteProperties, _: &ValidationContext) -> bool {
    c.fc > constants().concrete.max_fc_mpa
}

fn fc_above_maximum_result(c: &ConcreteProperties, _: &ValidationContext) -> ValidationResult {
    let max = constants().concrete.max_fc_mpa;
    ValidationResult::critical(
        "CONC-FC-MAX",
        Category::Engineering,
        format!("Concrete strength fc' = {:.1} MPa exceeds the {:.0} MPa covered by the design provisions", c.fc, max),
    )
    .recommend("High-strength concrete needs a special mix design, trial batches and specialist review")
    .reference(sni_ref::CONCRETE_MIN_FC)
    .blocking()
}

fn density_deviation(c: &ConcreteProperties) -> f64 {
    let nominal = constants().concrete.nominal_density_kg_m3;
    (c.density - nominal).abs() / nominal
}

fn density_out_of_range(c: &ConcreteProperties, _: &ValidationContext) -> bool {
    density_deviation(c) > constants().concrete.density_tolerance
}

fn density_result(c: &ConcreteProperties, _: &ValidationContext) -> ValidationResult {
    ValidationResult::warning(
        "CONC-DENSITY",
        Category::Engineering,
        format!(
            "Concrete density {:.0} kg/m³ deviates {:.0}% from the nominal {:.0} kg/m³",
            c.density,
            density_deviation(c) * 100.0,
            constants().concrete.nominal_density_kg_m3
        ),
    )
    .recommend("Confirm aggregate type; lightweight or heavyweight concrete changes Ec and self-weight")
    .reference(sni_ref::CONCRETE_DENSITY)
}

fn certificate_missing(c: &ConcreteProperties, _: &ValidationContext) -> bool {
    !c.has_certificate()
}

fn certificate_result(_: &ConcreteProperties, _: &ValidationContext) -> ValidationResult {
    ValidationResult::critical(
        "CONC-CERT",
        Category::Professional,
        "No concrete strength test certificate supplied",
    )
    .recommend("Attach cylinder test results from an accredited laboratory")
    .reference(sni_ref::CONCRETE_TESTING)
    .blocking()
}

fn high_risk_low_fc(c: &ConcreteProperties, ctx: &ValidationContext) -> bool {
    let k = constants();
    k.is_high_risk(ctx.project_value, ctx.occupancy_count) && c.fc < k.concrete.high_risk_min_fc_mpa
}

fn high_risk_result(c: &ConcreteProperties, ctx: &ValidationContext) -> ValidationResult {
    let min = constants().concrete.high_risk_min_fc_mpa;
    ValidationResult::critical(
        "CONC-FC-HIGH-RISK",
        Category::Safety,
        format!(
            "High-risk project (value {:.0}, {} occupants) requires fc' ≥ {:.0} MPa; specified {:.1} MPa",
            ctx.project_value, ctx.occupancy_count, min, c.fc
        ),
    )
    .recommend(format!("Raise the concrete class to at least fc' {:.0} MPa", min))
    .reference(sni_ref::CONCRETE_MIN_FC)
    .blocking()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn certified(fc: f64) -> ConcreteProperties {
        ConcreteProperties::new(fc).with_certificate("LAB-2025-01")
    }

    fn ids(results: &[ValidationResult]) -> Vec<&str> {
        results.iter().map(|r| r.rule_id.as_str()).collect()
    }

    #[test]
    fn test_good_concrete_has_no_findings() {
        let ctx = ValidationContext::new("office");
        assert!(validate(&certified(30.0), &ctx).is_empty());
    }

    #[test]
    fn test_low_fc_blocks() {
        let ctx = ValidationContext::new("office");
        let results = validate(&certified(10.0), &ctx);
        assert_eq!(ids(&results), vec!["CONC-FC-MIN"]);
        assert!(results[0].is_blocking());
        assert_eq!(results[0].category, Category::Safety);
    }

    #[test]
    fn test_high_fc_blocks_as_engineering() {
        let ctx = ValidationContext::new("office");
        let results = validate(&certified(90.0), &ctx);
        assert_eq!(ids(&results), vec!["CONC-FC-MAX"]);
        assert_eq!(results[0].category, Category::Engineering);
        assert!(results[0].block_construction);
    }

    #[test]
    fn test_density_warning_is_not_blocking() {
        let ctx = ValidationContext::new("office");
        let mut c = certified(30.0);
        c.density = 1800.0;
        let results = validate(&c, &ctx);
        assert_eq!(ids(&results), vec!["CONC-DENSITY"]);
        assert!(!results[0].block_construction);

        // exactly 10% is within tolerance
        c.density = 2640.0;
        assert!(validate(&c, &ctx).is_empty());
    }

    #[test]
    fn test_missing_certificate_blocks() {
        let ctx = ValidationContext::new("office");
        let results = validate(&ConcreteProperties::new(30.0), &ctx);
        assert_eq!(ids(&results), vec!["CONC-CERT"]);
        assert_eq!(results[0].category, Category::Professional);
        assert!(results[0].is_blocking());
    }

    #[test]
    fn test_high_risk_needs_stronger_concrete() {
        let mut ctx = ValidationContext::new("office");
        ctx.occupancy_count = 250;
        let results = validate(&certified(20.0), &ctx);
        assert_eq!(ids(&results), vec!["CONC-FC-HIGH-RISK"]);

        ctx.occupancy_count = 10;
        ctx.project_value = 5_000_000.0;
        assert_eq!(ids(&validate(&certified(20.0), &ctx)), vec!["CONC-FC-HIGH-RISK"]);
        assert!(validate(&certified(25.0), &ctx).is_empty());
    }

    #[test]
    fn test_rules_are_independent() {
        let mut ctx = ValidationContext::new("office");
        ctx.occupancy_count = 500;
        let mut c = ConcreteProperties::new(12.0);
        c.density = 3000.0;
        let results = validate(&c, &ctx);
        assert_eq!(ids(&results), vec!["CONC-FC-MIN", "CONC-DENSITY", "CONC-CERT", "CONC-FC-HIGH-RISK"]);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn low_fc_always_blocks_for_safety(fc in 0.0_f64..16.999) {
            let ctx = ValidationContext::new("office");
            let c = ConcreteProperties::new(fc).with_certificate("LAB-01");
            let results = validate(&c, &ctx);
            let blocks_for_safety = results.iter().any(|r| {
                r.severity == super::super::Severity::Critical
                    && r.category == Category::Safety
                    && r.block_construction
            });
            prop_assert!(blocks_for_safety);
        }

        #[test]
        fn normal_fc_never_blocks(fc in 17.0_f64..=80.0) {
            let ctx = ValidationContext::new("office");
            let c = ConcreteProperties::new(fc).with_certificate("LAB-01");
            prop_assert!(validate(&c, &ctx).iter().all(|r| !r.block_construction));
        }
    }
}
