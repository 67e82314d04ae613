//! Building geometry screening

use super::{run_rules, Category, Rule, ValidationResult};
use crate::constants::{constants, sni_ref};
use crate::geometry::StructuralGeometry;
use crate::project::{SeismicZone, ValidationContext};

/// Geometry rules, evaluated in order
pub static RULES: &[Rule<StructuralGeometry>] = &[
    Rule { id: "GEO-MIN-PLAN", applies: plan_too_small, build: plan_too_small_result },
    Rule { id: "GEO-ASPECT", applies: slender_plan, build: slender_plan_result },
    Rule { id: "GEO-STORY-LOW", applies: story_too_low, build: story_too_low_result },
    Rule { id: "GEO-STORY-HIGH", applies: story_too_high, build: story_too_high_result },
    Rule { id: "GEO-BAY", applies: bay_too_long, build: bay_too_long_result },
    Rule { id: "GEO-HIGH-SEISMIC-HEIGHT", applies: tall_in_high_zone, build: tall_in_high_zone_result },
];

/// Screen plan dimensions, proportions, story heights and bays.
pub fn validate(geometry: &StructuralGeometry, ctx: &ValidationContext) -> Vec<ValidationResult> {
    run_rules(RULES, geometry, ctx)
}

fn plan_too_small(g: &StructuralGeometry, _: &ValidationContext) -> bool {
    let min = constants().geometry.min_plan_dimension_m;
    g.length < min || g.width < min
}

fn plan_too_small_result(g: &StructuralGeometry, _: &ValidationContext) -> ValidationResult {
    ValidationResult::critical(
        "GEO-MIN-PLAN",
        Category::Engineering,
        format!(
            "Plan {:.1} m × {:.1} m is below the {:.0} m minimum dimension",
            g.length,
            g.width,
            constants().geometry.min_plan_dimension_m
        ),
    )
    .recommend("Check the units of the plan dimensions")
    .reference(sni_ref::PLAN_IRREGULARITY)
    .blocking()
}

fn slender_plan(g: &StructuralGeometry, _: &ValidationContext) -> bool {
    g.aspect_ratio() > constants().geometry.max_aspect_ratio
}

fn slender_plan_result(g: &StructuralGeometry, _: &ValidationContext) -> ValidationResult {
    ValidationResult::warning(
        "GEO-ASPECT",
        Category::Engineering,
        format!(
            "Plan aspect ratio {:.2} exceeds {:.0}; diaphragm flexibility and torsion become significant",
            g.aspect_ratio(),
            constants().geometry.max_aspect_ratio
        ),
    )
    .recommend("Consider seismic joints to split the building into compact blocks")
    .reference(sni_ref::PLAN_IRREGULARITY)
}

fn story_too_low(g: &StructuralGeometry, _: &ValidationContext) -> bool {
    g.average_story_height() < constants().geometry.min_story_height_m
}

fn story_too_low_result(g: &StructuralGeometry, _: &ValidationContext) -> ValidationResult {
    ValidationResult::warning(
        "GEO-STORY-LOW",
        Category::Code,
        format!(
            "Average story height {:.2} m is below the {:.1} m minimum clear height",
            g.average_story_height(),
            constants().geometry.min_story_height_m
        ),
    )
    .recommend("Increase story height or verify the floor count")
    .reference(sni_ref::STORY_HEIGHT)
}

fn story_too_high(g: &StructuralGeometry, _: &ValidationContext) -> bool {
    g.average_story_height() > constants().geometry.max_story_height_m
}

fn story_too_high_result(g: &StructuralGeometry, _: &ValidationContext) -> ValidationResult {
    ValidationResult::warning(
        "GEO-STORY-HIGH",
        Category::Engineering,
        format!(
            "Average story height {:.2} m exceeds {:.1} m; check column slenderness",
            g.average_story_height(),
            constants().geometry.max_story_height_m
        ),
    )
    .recommend("Verify slenderness effects and soft-story irregularity")
    .reference(sni_ref::STORY_HEIGHT)
}

fn bay_too_long(g: &StructuralGeometry, _: &ValidationContext) -> bool {
    g.design_bay() > constants().geometry.max_bay_spacing_m
}

fn bay_too_long_result(g: &StructuralGeometry, _: &ValidationContext) -> ValidationResult {
    ValidationResult::critical(
        "GEO-BAY",
        Category::Engineering,
        format!(
            "Bay spacing {:.1} m exceeds {:.0} m for a conventional RC frame",
            g.design_bay(),
            constants().geometry.max_bay_spacing_m
        ),
    )
    .recommend("Redesign the grid or use prestressed / composite floor framing")
    .reference(sni_ref::BEAM_DEMAND)
}

fn tall_in_high_zone(g: &StructuralGeometry, ctx: &ValidationContext) -> bool {
    ctx.seismic_zone == SeismicZone::High && g.height > constants().geometry.high_seismic_max_height_m
}

fn tall_in_high_zone_result(g: &StructuralGeometry, _: &ValidationContext) -> ValidationResult {
    ValidationResult::critical(
        "GEO-HIGH-SEISMIC-HEIGHT",
        Category::Safety,
        format!(
            "Height {:.1} m exceeds {:.0} m in a high seismic zone",
            g.height,
            constants().geometry.high_seismic_max_height_m
        ),
    )
    .recommend("Use a dual system or shear walls and confirm the height limit for the chosen system")
    .reference(sni_ref::HEIGHT_LIMIT)
}
