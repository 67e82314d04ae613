//! Seismic parameter screening (SNI 1726:2019, Peta Gempa 2017)

use super::{run_rules, Category, Rule, ValidationResult};
use crate::constants::{constants, sni_ref};
use crate::loads::{SeismicParameters, SiteClass};
use crate::project::ValidationContext;

/// Seismic rules, evaluated in order
pub static RULES: &[Rule<SeismicParameters>] = &[
    Rule { id: "SEIS-LOW", applies: unusually_low, build: unusually_low_result },
    Rule { id: "SEIS-HIGH", applies: high_hazard, build: high_hazard_result },
    Rule { id: "SEIS-SITE-SF", applies: special_soil, build: special_soil_result },
    Rule { id: "SEIS-JAKARTA", applies: jakarta_underestimate, build: jakarta_result },
];

/// Screen mapped accelerations and site class.
pub fn validate(params: &SeismicParameters, ctx: &ValidationContext) -> Vec<ValidationResult> {
    run_rules(RULES, params, ctx)
}

fn unusually_low(p: &SeismicParameters, _: &ValidationContext) -> bool {
    let k = &constants().seismic;
    p.ss < k.low_ss_g || p.s1 < k.low_s1_g
}

fn unusually_low_result(p: &SeismicParameters, _: &ValidationContext) -> ValidationResult {
    ValidationResult::warning(
        "SEIS-LOW",
        Category::Code,
        format!("Very low mapped accelerations (Ss = {:.2}g, S1 = {:.2}g)", p.ss, p.s1),
    )
    .recommend("Verify the site coordinates against the national seismic hazard map")
    .reference(sni_ref::SEISMIC_MAPS)
}

fn high_hazard(p: &SeismicParameters, _: &ValidationContext) -> bool {
    let k = &constants().seismic;
    p.ss > k.high_ss_g || p.s1 > k.high_s1_g
}

fn high_hazard_result(p: &SeismicParameters, _: &ValidationContext) -> ValidationResult {
    ValidationResult::critical(
        "SEIS-HIGH",
        Category::Safety,
        format!("High seismic hazard (Ss = {:.2}g, S1 = {:.2}g); special provisions apply", p.ss, p.s1),
    )
    .recommend("Apply special moment frame detailing and seismic design category D-F requirements")
    .reference(sni_ref::DESIGN_SPECTRUM)
    .needs_review()
}

fn special_soil(p: &SeismicParameters, _: &ValidationContext) -> bool {
    p.site_class == SiteClass::SF
}

fn special_soil_result(_: &SeismicParameters, _: &ValidationContext) -> ValidationResult {
    ValidationResult::critical(
        "SEIS-SITE-SF",
        Category::Safety,
        "Site class SF requires a site-specific ground response analysis",
    )
    .recommend("Commission a geotechnical investigation and site-specific response spectrum")
    .reference(sni_ref::SITE_CLASS)
    .blocking()
}

fn jakarta_underestimate(p: &SeismicParameters, ctx: &ValidationContext) -> bool {
    ctx.location.to_lowercase().contains("jakarta") && p.ss < constants().seismic.jakarta_min_ss_g
}

fn jakarta_result(p: &SeismicParameters, _: &ValidationContext) -> ValidationResult {
    ValidationResult::warning(
        "SEIS-JAKARTA",
        Category::Code,
        format!(
            "Ss = {:.2}g is low for Jakarta (mapped values are typically ≥ {:.1}g)",
            p.ss,
            constants().seismic.jakarta_min_ss_g
        ),
    )
    .recommend("Re-read Ss from the hazard map for the exact site")
    .reference(sni_ref::SEISMIC_MAPS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(results: &[ValidationResult]) -> Vec<&str> {
        results.iter().map(|r| r.rule_id.as_str()).collect()
    }

    #[test]
    fn test_moderate_site_is_clean() {
        let ctx = ValidationContext::new("office");
        assert!(validate(&SeismicParameters::new(1.2, 0.5, SiteClass::SD), &ctx).is_empty());
    }

    #[test]
    fn test_low_values_warn() {
        let ctx = ValidationContext::new("office");
        let results = validate(&SeismicParameters::new(0.05, 0.2, SiteClass::SC), &ctx);
        assert_eq!(ids(&results), vec!["SEIS-LOW"]);
        assert!(!results[0].block_construction);
    }

    #[test]
    fn test_high_hazard_flags_without_blocking() {
        let ctx = ValidationContext::new("office");
        let results = validate(&SeismicParameters::new(3.5, 0.5, SiteClass::SD), &ctx);
        assert_eq!(ids(&results), vec!["SEIS-HIGH"]);
        assert!(!results[0].block_construction);
        assert!(results[0].requires_engineer_review);
        assert_eq!(results[0].category, Category::Safety);
    }

    #[test]
    fn test_site_class_sf_blocks() {
        let ctx = ValidationContext::new("office");
        let results = validate(&SeismicParameters::new(1.0, 0.4, SiteClass::SF), &ctx);
        assert_eq!(ids(&results), vec!["SEIS-SITE-SF"]);
        assert!(results[0].is_blocking());
    }

    #[test]
    fn test_jakarta_check_is_case_insensitive() {
        let mut ctx = ValidationContext::new("office");
        ctx.location = "Jakarta Selatan".to_string();
        let results = validate(&SeismicParameters::new(0.5, 0.3, SiteClass::SD), &ctx);
        assert_eq!(ids(&results), vec!["SEIS-JAKARTA"]);

        ctx.location = "Surabaya".to_string();
        assert!(validate(&SeismicParameters::new(0.5, 0.3, SiteClass::SD), &ctx).is_empty());
    }
}
