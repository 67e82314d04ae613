//! # Comprehensive Analysis
//!
//! Runs the calculators in a fixed order over one [`CalculationLog`]:
//!
//! 1. Seismic weight
//! 2. Fundamental period
//! 3. Site coefficients, design spectrum, base shear
//! 4. Wind base shear and governing lateral case
//! 5. Story drift
//! 6. Beam demand from the governing load combination
//! 7. Flexural reinforcement and capacity
//! 8. Shear reinforcement
//! 9. Interior column axial check
//! 10. Utilizations, code compliance, references, review notes
//!
//! Each stage's returned value feeds the next stage. Analysis never consults
//! the validators; callers validate first or let the validation gate decide
//! construction approval independently.
//!
//! The result carries no ids or timestamps, so identical inputs give
//! identical results.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::column::{self, ColumnCheck, ColumnInput, DEFAULT_REINFORCEMENT_RATIO};
use super::drift::{self, DriftCheck};
use super::flexure::{self, FlexuralDesign};
use super::seismic::{self, SiteCoefficientSource, SiteCoefficients, StructuralSystem};
use super::shear::{self, ShearDesign, TWO_LEG_D10_MM2};
use super::{CalculationLog, CalculationStep};
use crate::constants::{constants, sni_ref};
use crate::errors::{CalcError, CalcResult};
use crate::geometry::StructuralGeometry;
use crate::loads::{active_combinations, find_governing_combination, minimum_live_load, LoadConditions};
use crate::materials::{ConcreteProperties, MaterialProperties};
use crate::units::{Meters, Millimeters};

/// Round-off allowance when a designed capacity exactly matches its demand
const UTILIZATION_TOLERANCE: f64 = 1e-9;

/// Per-run settings for [`analyze_with`].
///
/// Every field has a default, so `{}` is a valid JSON options file.
///
/// ## JSON Example
///
/// ```json
/// {
///   "structural_system": "concrete_moment_frame",
///   "beam_width_mm": 300.0,
///   "beam_depth_mm": 600.0,
///   "site_coefficients": "fixed_class_c",
///   "selected_combinations": ["U1", "U2a"],
///   "project_type": "office"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Lateral system for the period coefficients
    pub structural_system: StructuralSystem,
    /// Typical beam width b (mm)
    pub beam_width_mm: f64,
    /// Typical beam overall depth h (mm)
    pub beam_depth_mm: f64,
    /// Distance from tension face to steel centroid (mm); d = h − cover
    pub cover_mm: f64,
    /// Column section (mm)
    pub column_width_mm: f64,
    pub column_depth_mm: f64,
    /// Column longitudinal ratio ρg
    pub column_reinforcement_ratio: f64,
    /// Slab thickness for self-weight (mm)
    pub slab_thickness_mm: f64,
    /// Stirrup area Av over all legs (mm²)
    pub stirrup_area_mm2: f64,
    /// Source of Fa and Fv
    pub site_coefficients: SiteCoefficientSource,
    /// Explicit combination ids; `None` uses the default-active table
    pub selected_combinations: Option<Vec<String>>,
    /// Occupancy for the live-load compliance flag
    pub project_type: Option<String>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        AnalysisOptions {
            structural_system: StructuralSystem::default(),
            beam_width_mm: 300.0,
            beam_depth_mm: 600.0,
            cover_mm: 50.0,
            column_width_mm: 500.0,
            column_depth_mm: 500.0,
            column_reinforcement_ratio: DEFAULT_REINFORCEMENT_RATIO,
            slab_thickness_mm: 150.0,
            stirrup_area_mm2: TWO_LEG_D10_MM2,
            site_coefficients: SiteCoefficientSource::default(),
            selected_combinations: None,
            project_type: None,
        }
    }
}

impl AnalysisOptions {
    /// Beam effective depth d = h − cover (mm)
    pub fn effective_depth_mm(&self) -> f64 {
        self.beam_depth_mm - self.cover_mm
    }

    /// Slab self-weight (kN/m²)
    pub fn slab_self_weight(&self, concrete: &ConcreteProperties) -> f64 {
        self.slab_thickness_mm / 1000.0 * concrete.unit_weight_kn_m3(constants().gravity)
    }

    /// Contract checks before calculation
    pub fn validate(&self) -> CalcResult<()> {
        let dimensions = [
            ("beam_width_mm", self.beam_width_mm),
            ("beam_depth_mm", self.beam_depth_mm),
            ("column_width_mm", self.column_width_mm),
            ("column_depth_mm", self.column_depth_mm),
            ("stirrup_area_mm2", self.stirrup_area_mm2),
        ];
        for (field, value) in dimensions {
            if !(value > 0.0) || !value.is_finite() {
                return Err(CalcError::invalid_input(field, value.to_string(), "Must be a positive number"));
            }
        }
        if !(self.cover_mm >= 0.0) || self.cover_mm >= self.beam_depth_mm {
            return Err(CalcError::invalid_input(
                "cover_mm",
                self.cover_mm.to_string(),
                "Cover must be non-negative and smaller than the beam depth",
            ));
        }
        if !(self.slab_thickness_mm >= 0.0) {
            return Err(CalcError::invalid_input(
                "slab_thickness_mm",
                self.slab_thickness_mm.to_string(),
                "Slab thickness cannot be negative",
            ));
        }
        Ok(())
    }
}

/// Lateral load case with the larger base shear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LateralCase {
    Seismic,
    Wind,
}

/// Demand / capacity ratios (≤ 1.0 passes)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UtilizationRatios {
    /// Mu / φMn
    pub flexure: f64,
    /// Vu / φVn
    pub shear: f64,
    /// drift ratio / allowable drift ratio
    pub drift: f64,
    /// Pu / φPn
    pub column_axial: f64,
}

impl UtilizationRatios {
    /// Highest ratio
    pub fn governing(&self) -> f64 {
        self.flexure.max(self.shear).max(self.drift).max(self.column_axial)
    }
}

/// Per-standard compliance of the analyzed design
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeCompliance {
    /// Story drift within the allowable ratio
    pub sni_1726: bool,
    /// Live load at or above the occupancy minimum
    pub sni_1727: bool,
    /// Flexure, shear and column within capacity; ρ ≤ ρmax
    pub sni_2847: bool,
    /// Steel yield strength and ductility
    pub sni_1729: bool,
}

impl CodeCompliance {
    pub fn all(&self) -> bool {
        self.sni_1726 && self.sni_1727 && self.sni_2847 && self.sni_1729
    }
}

/// Output of [`analyze`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuralAnalysisResults {
    /// W (kN)
    pub seismic_weight_kn: f64,
    /// Design period T (s)
    pub fundamental_period_s: f64,
    /// Cu·Ta (s)
    pub period_upper_limit_s: f64,
    pub site_coefficients: SiteCoefficients,
    pub sds: f64,
    pub sd1: f64,
    pub seismic_response_coefficient: f64,
    /// Seismic base shear V (kN)
    pub base_shear_kn: f64,
    /// Wind base shear Vw (kN)
    pub wind_base_shear_kn: f64,
    pub governing_lateral: LateralCase,
    pub drift: DriftCheck,
    /// Governing factored floor load wu (kN/m²)
    pub factored_floor_load_kn_m2: f64,
    pub governing_combination: String,
    /// Mu (kN·m)
    pub beam_moment_knm: f64,
    /// Vu (kN)
    pub beam_shear_kn: f64,
    pub reinforcement: FlexuralDesign,
    /// φMn of the designed steel (kN·m)
    pub flexural_strength_knm: f64,
    pub shear: ShearDesign,
    pub column: ColumnCheck,
    pub utilization: UtilizationRatios,
    pub compliance: CodeCompliance,
    /// Audit trail in execution order
    pub calculation_steps: Vec<CalculationStep>,
    /// Code clauses used, in first-use order
    pub references: Vec<String>,
    pub review_notes: Vec<String>,
}

/// Analyze with [`AnalysisOptions::default`].
///
/// # Example
///
/// ```rust
/// use sni_core::calculations::analyze;
/// use sni_core::geometry::StructuralGeometry;
/// use sni_core::loads::{LoadConditions, SeismicParameters, SiteClass};
/// use sni_core::materials::{ConcreteProperties, MaterialProperties, SteelGrade, SteelProperties};
///
/// let geometry = StructuralGeometry::new(25.0, 20.0, 15.0, 5, 5.0);
/// let materials = MaterialProperties {
///     concrete: ConcreteProperties::new(30.0),
///     steel: SteelProperties::from_grade(SteelGrade::BjTS40),
/// };
/// let loads = LoadConditions {
///     dead_load: 5.0,
///     live_load: 4.0,
///     wind_load: 0.0,
///     seismic_parameters: SeismicParameters::new(1.2, 0.5, SiteClass::SD),
/// };
///
/// let results = analyze(&geometry, &materials, &loads).unwrap();
/// assert!(results.base_shear_kn > 0.0);
/// assert!(results.drift.compliant);
/// assert!(!results.calculation_steps.is_empty());
/// ```
pub fn analyze(
    geometry: &StructuralGeometry,
    materials: &MaterialProperties,
    loads: &LoadConditions,
) -> CalcResult<StructuralAnalysisResults> {
    analyze_with(geometry, materials, loads, &AnalysisOptions::default())
}

/// Run the full analysis pipeline.
///
/// Contract errors are reported before any step is logged. A domain error
/// from any stage aborts the run; no partial result is returned.
pub fn analyze_with(
    geometry: &StructuralGeometry,
    materials: &MaterialProperties,
    loads: &LoadConditions,
    options: &AnalysisOptions,
) -> CalcResult<StructuralAnalysisResults> {
    geometry.validate()?;
    materials.validate()?;
    loads.validate()?;
    options.validate()?;
    let combinations = active_combinations(options.selected_combinations.as_deref())?;

    let params = &loads.seismic_parameters;
    let mut log = CalculationLog::new();

    // 1-3: seismic demand
    let weight = seismic::seismic_weight(geometry, loads.dead_load, options.slab_thickness_mm, &materials.concrete, &mut log)?;
    let period = seismic::fundamental_period(geometry, options.structural_system, &mut log)?;
    let coefficients = options.site_coefficients.resolve(params)?;
    let demand = seismic::base_shear(weight, period.period, params, coefficients, &mut log)?;

    // 4: wind
    let wind_base_shear = seismic::wind_base_shear(loads.wind_load, geometry, &mut log)?;
    let governing_lateral = if wind_base_shear > demand.base_shear_kn {
        LateralCase::Wind
    } else {
        LateralCase::Seismic
    };
    debug!(?governing_lateral, "lateral demand");

    // 5: drift
    let story_height_mm = Millimeters::from(Meters(geometry.typical_story_height())).value();
    let stiffness = drift::story_stiffness(
        geometry.column_count()?,
        materials.concrete.elastic_modulus,
        options.column_width_mm,
        options.column_depth_mm,
        story_height_mm,
        &mut log,
    )?;
    let elastic = drift::elastic_displacement(demand.base_shear_kn, stiffness, &mut log)?;
    let drift = drift::story_drift(elastic, params.deflection_amplification, params.importance_factor, story_height_mm, &mut log)?;

    // 6: beam demand
    let floor_case = loads.floor_case(options.slab_self_weight(&materials.concrete));
    let (governing_load, governing_combination) = find_governing_combination(&floor_case, &combinations);
    let wu = log.push(
        CalculationStep::new("Governing factored floor load", "wu = max Σ γᵢ·Qᵢ")
            .with_calculation(governing_combination.clone())
            .with_result(governing_load, "kN/m²")
            .with_reference(sni_ref::LOAD_COMBINATIONS),
    )?;
    let span = geometry.design_bay();
    let line_load = log.push(
        CalculationStep::new("Beam line load", "w = wu·s")
            .with_calculation(format!("{:.3} kN/m² × {:.2} m", wu, span))
            .with_result(wu * span, "kN/m")
            .with_reference(sni_ref::BEAM_DEMAND),
    )?;
    let mu = log.push(
        CalculationStep::new("Beam factored moment", "Mu = w·L²/8")
            .with_calculation(format!("{:.2} × {:.2}² / 8", line_load, span))
            .with_result(line_load * span * span / 8.0, "kN·m")
            .with_reference(sni_ref::BEAM_DEMAND),
    )?;
    let vu = log.push(
        CalculationStep::new("Beam factored shear", "Vu = w·L/2")
            .with_calculation(format!("{:.2} × {:.2} / 2", line_load, span))
            .with_result(line_load * span / 2.0, "kN")
            .with_reference(sni_ref::BEAM_DEMAND),
    )?;
    debug!(wu, mu, vu, governing = %governing_combination, "beam demand");

    // 7: flexure
    let b = options.beam_width_mm;
    let d = options.effective_depth_mm();
    let reinforcement = flexure::required_steel(mu, b, d, materials, &mut log)?;
    let flexural_strength = flexure::flexural_capacity(reinforcement.as_required_mm2, b, d, materials, &mut log)?;
    let flexure_utilization = log.push(
        CalculationStep::new("Flexural utilization", "Mu/φMn ≤ 1.0")
            .with_calculation(format!("{:.2} / {:.2}", mu, flexural_strength))
            .with_result(mu / flexural_strength, "-")
            .with_reference(sni_ref::FLEXURE),
    )?;

    // 8: shear
    let shear = shear::design_shear(vu, b, d, options.stirrup_area_mm2, materials, &mut log)?;
    let shear_utilization = log.push(
        CalculationStep::new("Shear utilization", "Vu/φVn ≤ 1.0")
            .with_calculation(format!("{:.2} / {:.2}", vu, shear.design_strength_kn))
            .with_result(vu / shear.design_strength_kn, "-")
            .with_reference(sni_ref::SHEAR_VS),
    )?;

    // 9: column
    let pu = column::axial_demand(wu, span * span, geometry.floors, &mut log)?;
    let column = column::calculate(
        &ColumnInput {
            label: "Interior column".to_string(),
            axial_load_kn: pu,
            width_mm: options.column_width_mm,
            depth_mm: options.column_depth_mm,
            reinforcement_ratio: options.column_reinforcement_ratio,
        },
        materials,
        &mut log,
    )?;

    // 10: summary
    let utilization = UtilizationRatios {
        flexure: flexure_utilization,
        shear: shear_utilization,
        drift: drift.utilization(),
        column_axial: column.utilization,
    };
    let within = |u: f64| u <= 1.0 + UTILIZATION_TOLERANCE;
    let steel_limits = &constants().steel;
    let minimum_live = minimum_live_load(options.project_type.as_deref().unwrap_or_default());
    let compliance = CodeCompliance {
        sni_1726: drift.compliant,
        sni_1727: loads.live_load >= minimum_live,
        sni_2847: within(utilization.flexure)
            && within(utilization.shear)
            && within(utilization.column_axial)
            && !reinforcement.exceeds_rho_max,
        sni_1729: materials.steel.fy >= steel_limits.min_fy_mpa
            && materials.steel.strength_ratio() >= steel_limits.min_fu_fy_ratio,
    };

    let mut review_notes: Vec<String> = log
        .unverified()
        .map(|s| format!("Step {}: {} ({})", s.step, s.description, s.calculation))
        .collect();
    review_notes.push(format!(
        "Period cap uses Cu at a fixed SD1 = {:.2}g rather than the site value",
        constants().seismic.placeholder_sd1_g
    ));
    review_notes.push("Story drift uses a shear-building column stiffness estimate; confirm with a frame analysis".to_string());
    if options.site_coefficients == SiteCoefficientSource::FixedClassC {
        review_notes.push(format!(
            "Site coefficients assume site class C (Fa = {}, Fv = {}) regardless of site class {}",
            coefficients.fa, coefficients.fv, params.site_class
        ));
    }
    if governing_lateral == LateralCase::Wind {
        review_notes.push("Wind governs the lateral design; drift was checked for seismic base shear only".to_string());
    }
    if !compliance.sni_1727 {
        review_notes.push(format!(
            "Live load {:.2} kN/m² is below the occupancy minimum {:.2} kN/m²",
            loads.live_load, minimum_live
        ));
    }

    let references = log.references();
    info!(
        steps = log.len(),
        base_shear_kn = demand.base_shear_kn,
        governing = %governing_combination,
        max_utilization = utilization.governing(),
        compliant = compliance.all(),
        "analysis complete"
    );

    Ok(StructuralAnalysisResults {
        seismic_weight_kn: weight,
        fundamental_period_s: period.period,
        period_upper_limit_s: period.upper_limit,
        site_coefficients: coefficients,
        sds: demand.sds,
        sd1: demand.sd1,
        seismic_response_coefficient: demand.cs,
        base_shear_kn: demand.base_shear_kn,
        wind_base_shear_kn: wind_base_shear,
        governing_lateral,
        drift,
        factored_floor_load_kn_m2: wu,
        governing_combination,
        beam_moment_knm: mu,
        beam_shear_kn: vu,
        reinforcement,
        flexural_strength_knm: flexural_strength,
        shear,
        column,
        utilization,
        compliance,
        calculation_steps: log.into_steps(),
        references,
        review_notes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DomainErrorKind;
    use crate::loads::{SeismicParameters, SiteClass};
    use crate::materials::{SteelGrade, SteelProperties};

    fn geometry() -> StructuralGeometry {
        StructuralGeometry::new(25.0, 20.0, 15.0, 5, 5.0)
    }

    fn materials() -> MaterialProperties {
        MaterialProperties {
            concrete: ConcreteProperties::new(30.0),
            steel: SteelProperties::from_grade(SteelGrade::BjTS40),
        }
    }

    fn loads() -> LoadConditions {
        LoadConditions {
            dead_load: 5.0,
            live_load: 4.0,
            wind_load: 0.0,
            seismic_parameters: SeismicParameters::new(1.2, 0.5, SiteClass::SD),
        }
    }

    #[test]
    fn test_scenario_values() {
        let r = analyze(&geometry(), &materials(), &loads()).unwrap();

        // W = 5 × 500 × (5 + 3.5316)
        assert!((r.seismic_weight_kn - 21_329.0).abs() < 0.1);
        assert!((r.fundamental_period_s - 0.5332).abs() < 1e-3);
        assert!((r.site_coefficients.fa - 1.02).abs() < 1e-9);
        assert!((r.sds - 0.816).abs() < 1e-9);
        assert!((r.sd1 - 0.6).abs() < 1e-9);
        assert!((r.seismic_response_coefficient - 0.102).abs() < 1e-9);
        assert!((r.base_shear_kn - 0.102 * r.seismic_weight_kn).abs() < 1e-6);
        assert_eq!(r.governing_lateral, LateralCase::Seismic);

        // 1.2 × 8.5316 + 1.6 × 4
        assert!((r.factored_floor_load_kn_m2 - 16.638).abs() < 1e-3);
        assert!(r.governing_combination.starts_with("U2a"));
        assert!((r.beam_moment_knm - 259.97).abs() < 0.05);
        assert!((r.beam_shear_kn - 207.98).abs() < 0.05);

        assert!(r.drift.compliant);
        assert!(r.drift.drift_ratio < 0.005);
        assert!(r.compliance.all());
        assert!((r.utilization.flexure - 1.0).abs() < 1e-9);
        assert!(r.utilization.column_axial < 1.0);
    }

    #[test]
    fn test_steps_are_numbered_and_finite() {
        let r = analyze(&geometry(), &materials(), &loads()).unwrap();
        for (i, step) in r.calculation_steps.iter().enumerate() {
            assert_eq!(step.step, i + 1);
            assert!(step.result.is_finite());
        }
        assert_eq!(r.calculation_steps[0].description, "Slab self-weight");
        assert_eq!(r.calculation_steps.last().map(|s| s.description.as_str()), Some("Column axial utilization"));
        assert!(r.references.iter().any(|s| s == sni_ref::BASE_SHEAR));
    }

    #[test]
    fn test_analysis_is_idempotent() {
        let first = analyze(&geometry(), &materials(), &loads()).unwrap();
        let second = analyze(&geometry(), &materials(), &loads()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_fixed_site_coefficients_option() {
        let options = AnalysisOptions {
            site_coefficients: SiteCoefficientSource::FixedClassC,
            ..AnalysisOptions::default()
        };
        let r = analyze_with(&geometry(), &materials(), &loads(), &options).unwrap();
        assert_eq!(r.site_coefficients, SiteCoefficients { fa: 1.2, fv: 1.8 });
        assert!((r.sds - 0.96).abs() < 1e-9);
        assert!(r.review_notes.iter().any(|n| n.contains("site class C")));
    }

    #[test]
    fn test_tiny_bay_rejected_before_drift() {
        let mut g = geometry();
        g.length = 100.0;
        g.width = 100.0;
        g.bay_spacings = vec![0.0001];
        let err = analyze(&g, &materials(), &loads()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_site_class_sf_fails() {
        let mut l = loads();
        l.seismic_parameters.site_class = SiteClass::SF;
        let err = analyze(&geometry(), &materials(), &l).unwrap_err();
        assert_eq!(err.error_code(), "CALCULATION_FAILED");
    }

    #[test]
    fn test_combination_selection() {
        let options = AnalysisOptions {
            selected_combinations: Some(vec!["U1".to_string()]),
            ..AnalysisOptions::default()
        };
        let r = analyze_with(&geometry(), &materials(), &loads(), &options).unwrap();
        assert!(r.governing_combination.starts_with("U1"));
        assert!((r.factored_floor_load_kn_m2 - 1.4 * 8.5316).abs() < 1e-3);

        let bad = AnalysisOptions {
            selected_combinations: Some(vec!["U42".to_string()]),
            ..AnalysisOptions::default()
        };
        assert!(analyze_with(&geometry(), &materials(), &loads(), &bad).is_err());
    }

    #[test]
    fn test_wind_can_govern_lateral() {
        let mut l = loads();
        l.wind_load = 10.0;
        let r = analyze(&geometry(), &materials(), &l).unwrap();
        // 10 × 15 × 20 = 3000 kN > ~2176 kN
        assert!((r.wind_base_shear_kn - 3000.0).abs() < 1e-9);
        assert_eq!(r.governing_lateral, LateralCase::Wind);
    }

    #[test]
    fn test_long_span_exceeds_section() {
        let mut g = geometry();
        g.bay_spacings = vec![12.0];
        let err = analyze(&g, &materials(), &loads()).unwrap_err();
        assert_eq!(err.domain_kind(), Some(DomainErrorKind::CapacityExceeded));
    }

    #[test]
    fn test_contract_errors_before_calculation() {
        let mut g = geometry();
        g.length = -25.0;
        let err = analyze(&g, &materials(), &loads()).unwrap_err();
        assert!(err.is_contract_error());

        let options = AnalysisOptions {
            cover_mm: 700.0,
            ..AnalysisOptions::default()
        };
        assert!(analyze_with(&geometry(), &materials(), &loads(), &options).is_err());
    }

    #[test]
    fn test_low_live_load_not_compliant() {
        let options = AnalysisOptions {
            project_type: Some("warehouse".to_string()),
            ..AnalysisOptions::default()
        };
        let r = analyze_with(&geometry(), &materials(), &loads(), &options).unwrap();
        assert!(!r.compliance.sni_1727);
        assert!(!r.compliance.all());
    }

    #[test]
    fn test_options_from_empty_json() {
        let options: AnalysisOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, AnalysisOptions::default());
        assert!((options.effective_depth_mm() - 550.0).abs() < 1e-12);
    }

    #[test]
    fn test_results_json_round_trip() {
        let r = analyze(&geometry(), &materials(), &loads()).unwrap();
        let json = serde_json::to_string(&r).unwrap();
        let parsed: StructuralAnalysisResults = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.calculation_steps.len(), r.calculation_steps.len());
        assert_eq!(parsed.governing_combination, r.governing_combination);
    }
}
