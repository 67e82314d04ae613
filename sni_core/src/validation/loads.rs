//! Load magnitude screening (SNI 1727:2020)

use super::{run_rules, Category, Rule, ValidationResult};
use crate::constants::{constants, sni_ref};
use crate::loads::{minimum_live_load, LoadConditions};
use crate::project::ValidationContext;

/// Load rules, evaluated in order
pub static RULES: &[Rule<LoadConditions>] = &[
    Rule { id: "LOAD-DEAD-MIN", applies: dead_load_too_low, build: dead_load_result },
    Rule { id: "LOAD-LIVE-MIN", applies: live_load_below_code, build: live_load_result },
    Rule { id: "LOAD-LIVE-ESSENTIAL", applies: essential_live_load_low, build: essential_result },
];

/// Compare area loads against code minimums for the occupancy.
pub fn validate(loads: &LoadConditions, ctx: &ValidationContext) -> Vec<ValidationResult> {
    run_rules(RULES, loads, ctx)
}

fn dead_load_too_low(l: &LoadConditions, _: &ValidationContext) -> bool {
    l.dead_load < constants().loads.min_dead_load_kn_m2
}

fn dead_load_result(l: &LoadConditions, _: &ValidationContext) -> ValidationResult {
    ValidationResult::critical(
        "LOAD-DEAD-MIN",
        Category::Engineering,
        format!(
            "Dead load {:.2} kN/m² is below the {:.1} kN/m² expected for an RC floor system",
            l.dead_load,
            constants().loads.min_dead_load_kn_m2
        ),
    )
    .recommend("Include slab self-weight, finishes, ceiling and services")
    .reference(sni_ref::DEAD_LOAD)
    .blocking()
}

fn live_load_below_code(l: &LoadConditions, ctx: &ValidationContext) -> bool {
    l.live_load < constants().loads.live_load_tolerance * minimum_live_load(&ctx.project_type)
}

fn live_load_result(l: &LoadConditions, ctx: &ValidationContext) -> ValidationResult {
    let minimum = minimum_live_load(&ctx.project_type);
    ValidationResult::critical(
        "LOAD-LIVE-MIN",
        Category::Code,
        format!(
            "Live load {:.2} kN/m² is below the code minimum of {:.1} kN/m² for '{}' occupancy",
            l.live_load, minimum, ctx.project_type
        ),
    )
    .recommend(format!("Use at least {:.1} kN/m²", minimum))
    .reference(sni_ref::LIVE_LOAD_MIN)
    .blocking()
}

fn essential_live_load_low(l: &LoadConditions, ctx: &ValidationContext) -> bool {
    ctx.importance_category.is_elevated()
        && l.live_load < constants().loads.essential_live_load_factor * minimum_live_load(&ctx.project_type)
}

fn essential_result(l: &LoadConditions, ctx: &ValidationContext) -> ValidationResult {
    let target = constants().loads.essential_live_load_factor * minimum_live_load(&ctx.project_type);
    ValidationResult::warning(
        "LOAD-LIVE-ESSENTIAL",
        Category::Safety,
        format!(
            "Risk category {:?} facility: live load {:.2} kN/m² is below {:.2} kN/m²",
            ctx.importance_category, l.live_load, target
        ),
    )
    .recommend("Consider a higher live load for assembly or essential facilities")
    .reference(sni_ref::RISK_CATEGORY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::{SeismicParameters, SiteClass};
    use crate::project::ImportanceCategory;

    fn loads(dead: f64, live: f64) -> LoadConditions {
        LoadConditions {
            dead_load: dead,
            live_load: live,
            wind_load: 0.0,
            seismic_parameters: SeismicParameters::new(1.2, 0.5, SiteClass::SD),
        }
    }

    fn ids(results: &[ValidationResult]) -> Vec<&str> {
        results.iter().map(|r| r.rule_id.as_str()).collect()
    }

    #[test]
    fn test_office_loads_are_clean() {
        let ctx = ValidationContext::new("office");
        assert!(validate(&loads(5.0, 4.0), &ctx).is_empty());
    }

    #[test]
    fn test_low_dead_load_blocks() {
        let ctx = ValidationContext::new("office");
        let results = validate(&loads(2.0, 4.0), &ctx);
        assert_eq!(ids(&results), vec!["LOAD-DEAD-MIN"]);
        assert!(results[0].is_blocking());
    }

    #[test]
    fn test_live_load_tolerance() {
        let ctx = ValidationContext::new("warehouse");
        // 0.9 × 12 = 10.8
        assert!(validate(&loads(5.0, 10.8), &ctx).is_empty());
        let results = validate(&loads(5.0, 10.0), &ctx);
        assert_eq!(ids(&results), vec!["LOAD-LIVE-MIN"]);
        assert_eq!(results[0].category, Category::Code);
        assert!(results[0].is_blocking());
    }

    #[test]
    fn test_unknown_occupancy_uses_default() {
        let ctx = ValidationContext::new("observatory");
        assert_eq!(ids(&validate(&loads(5.0, 3.0), &ctx)), vec!["LOAD-LIVE-MIN"]);
    }

    #[test]
    fn test_essential_facility_warning() {
        let mut ctx = ValidationContext::new("office");
        ctx.importance_category = ImportanceCategory::IV;
        let results = validate(&loads(5.0, 4.0), &ctx);
        assert_eq!(ids(&results), vec!["LOAD-LIVE-ESSENTIAL"]);
        assert!(!results[0].block_construction);
        assert_eq!(results[0].category, Category::Safety);

        assert!(validate(&loads(5.0, 5.0), &ctx).is_empty());
    }
}
