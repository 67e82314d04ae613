//! # Engineering Constants
//!
//! Read-only reference values used by validators and calculators: material
//! bounds, strength-reduction factors, and code limits.
//!
//! The table is built once on first access and never mutated afterwards, so
//! any number of threads may read it concurrently without locking.
//!
//! ```rust
//! use sni_core::constants::constants;
//!
//! let c = constants();
//! assert_eq!(c.concrete.min_fc_mpa, 17.0);
//! assert_eq!(c.code_limits.drift_ratio_max, 0.025);
//! ```

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// SNI code clause references used in validation results and calculation steps.
pub mod sni_ref {
    // SNI 2847:2019 - Structural concrete
    /// Minimum concrete strength for structural members
    pub const CONCRETE_MIN_FC: &str = "SNI 2847:2019 Pasal 19.2.1";
    /// Concrete density and modulus assumptions
    pub const CONCRETE_DENSITY: &str = "SNI 2847:2019 Pasal 19.2.2";
    /// Material testing and acceptance
    pub const CONCRETE_TESTING: &str = "SNI 2847:2019 Pasal 26.12";
    /// Strength reduction factors
    pub const PHI_FACTORS: &str = "SNI 2847:2019 Pasal 21.2";
    /// Flexural strength, rectangular stress block
    pub const FLEXURE: &str = "SNI 2847:2019 Pasal 22.2";
    /// Minimum flexural reinforcement
    pub const RHO_MIN: &str = "SNI 2847:2019 Pasal 9.6.1.2";
    /// Maximum reinforcement for special moment frames
    pub const RHO_MAX: &str = "SNI 2847:2019 Pasal 18.6.3.1";
    /// One-way shear strength of concrete
    pub const SHEAR_VC: &str = "SNI 2847:2019 Pasal 22.5.5.1";
    /// Shear reinforcement strength and spacing
    pub const SHEAR_VS: &str = "SNI 2847:2019 Pasal 22.5.10.5";
    /// Maximum stirrup spacing
    pub const STIRRUP_SPACING: &str = "SNI 2847:2019 Pasal 9.7.6.2.2";
    /// Axial strength of tied columns
    pub const COLUMN_AXIAL: &str = "SNI 2847:2019 Pasal 22.4.2";

    // SNI 2052:2017 / SNI 1729:2020 - Steel
    /// Reinforcing steel grades
    pub const STEEL_GRADE: &str = "SNI 2052:2017";
    /// Steel ductility and minimum yield
    pub const STEEL_DUCTILITY: &str = "SNI 1729:2020 Pasal A3.1";
    /// Mill certificates
    pub const STEEL_CERTIFICATE: &str = "SNI 2052:2017 Pasal 8";

    // SNI 1726:2019 - Seismic
    /// Mapped spectral accelerations
    pub const SEISMIC_MAPS: &str = "SNI 1726:2019 Pasal 6.1";
    /// Site classification
    pub const SITE_CLASS: &str = "SNI 1726:2019 Pasal 5.3";
    /// Site coefficients Fa and Fv
    pub const SITE_COEFFICIENTS: &str = "SNI 1726:2019 Tabel 6 & 7";
    /// Design spectral accelerations
    pub const DESIGN_SPECTRUM: &str = "SNI 1726:2019 Pasal 6.3";
    /// Approximate fundamental period
    pub const PERIOD: &str = "SNI 1726:2019 Pasal 7.8.2.1";
    /// Period upper-limit coefficient Cu
    pub const PERIOD_LIMIT: &str = "SNI 1726:2019 Tabel 17";
    /// Seismic response coefficient
    pub const RESPONSE_COEFFICIENT: &str = "SNI 1726:2019 Pasal 7.8.1.1";
    /// Seismic base shear
    pub const BASE_SHEAR: &str = "SNI 1726:2019 Pasal 7.8.1";
    /// Effective seismic weight
    pub const SEISMIC_WEIGHT: &str = "SNI 1726:2019 Pasal 7.7.2";
    /// Story drift determination
    pub const DRIFT: &str = "SNI 1726:2019 Pasal 7.8.6";
    /// Allowable story drift
    pub const DRIFT_LIMIT: &str = "SNI 1726:2019 Tabel 20";
    /// Structural irregularities and height limits
    pub const HEIGHT_LIMIT: &str = "SNI 1726:2019 Tabel 12";
    /// Plan irregularity
    pub const PLAN_IRREGULARITY: &str = "SNI 1726:2019 Tabel 13";

    // SNI 1727:2020 - Loads
    /// Minimum uniformly distributed live loads
    pub const LIVE_LOAD_MIN: &str = "SNI 1727:2020 Tabel 4.3-1";
    /// Dead loads
    pub const DEAD_LOAD: &str = "SNI 1727:2020 Pasal 3.1";
    /// Strength design load combinations
    pub const LOAD_COMBINATIONS: &str = "SNI 1727:2020 Pasal 2.3.1";
    /// Wind loads on the main wind-force resisting system
    pub const WIND: &str = "SNI 1727:2020 Pasal 27";
    /// Importance categories
    pub const RISK_CATEGORY: &str = "SNI 1726:2019 Tabel 3";

    // Practice and regulation
    /// Story height / clear headroom
    pub const STORY_HEIGHT: &str = "SNI 03-1746-2000";
    /// Licensed engineer requirement
    pub const ENGINEER_LICENSE: &str = "UU No. 11/2014 tentang Keinsinyuran";
    /// Expert team review for high-risk buildings
    pub const TABG_REVIEW: &str = "PP No. 16/2021 Pasal 245";
    /// Simply-supported beam demand
    pub const BEAM_DEMAND: &str = "Statics: M = wL²/8, V = wL/2";
}

/// Concrete material bounds (SNI 2847)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcreteLimits {
    /// Minimum specified compressive strength fc' (MPa)
    pub min_fc_mpa: f64,
    /// Maximum fc' covered by the design provisions (MPa)
    pub max_fc_mpa: f64,
    /// Minimum fc' for high-value or high-occupancy projects (MPa)
    pub high_risk_min_fc_mpa: f64,
    /// Nominal normal-weight concrete density (kg/m³)
    pub nominal_density_kg_m3: f64,
    /// Allowed relative deviation from the nominal density
    pub density_tolerance: f64,
}

/// Steel material bounds (SNI 2052 / SNI 1729)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SteelLimits {
    /// Minimum yield strength fy (MPa)
    pub min_fy_mpa: f64,
    /// Minimum fu/fy ratio
    pub min_fu_fy_ratio: f64,
    /// Allowed relative deviation of fy from the nominal grade value
    pub grade_tolerance: f64,
}

/// Seismic parameter screening bounds and fixed coefficients (SNI 1726)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeismicLimits {
    /// Ss below this is unusually low for Indonesia (g)
    pub low_ss_g: f64,
    /// S1 below this is unusually low for Indonesia (g)
    pub low_s1_g: f64,
    /// Ss above this triggers special provisions (g)
    pub high_ss_g: f64,
    /// S1 above this triggers special provisions (g)
    pub high_s1_g: f64,
    /// Lowest plausible Ss for Jakarta sites (g)
    pub jakarta_min_ss_g: f64,
    /// Short-period site coefficient for the fixed site-class-C assumption
    pub fixed_fa: f64,
    /// Long-period site coefficient for the fixed site-class-C assumption
    pub fixed_fv: f64,
    /// Placeholder SD1 used to pick Cu for the period upper limit (g)
    pub placeholder_sd1_g: f64,
    /// Cs,min = factor · SDS · Ie
    pub cs_min_factor: f64,
    /// Absolute floor on Cs
    pub cs_floor: f64,
    /// S1 at or above which the long-period Cs minimum applies (g)
    pub long_period_s1_g: f64,
    /// Default deflection amplification factor Cd (SRPMK)
    pub default_cd: f64,
}

/// Geometry screening bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryLimits {
    /// Minimum plan dimension (m)
    pub min_plan_dimension_m: f64,
    /// Maximum plan aspect ratio
    pub max_aspect_ratio: f64,
    /// Minimum story height (m)
    pub min_story_height_m: f64,
    /// Maximum typical story height (m)
    pub max_story_height_m: f64,
    /// Maximum bay spacing for conventional framing (m)
    pub max_bay_spacing_m: f64,
    /// Height beyond which high-seismic buildings need special review (m)
    pub high_seismic_max_height_m: f64,
}

/// Load screening bounds (SNI 1727)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadLimits {
    /// Minimum superimposed + self dead load (kN/m²)
    pub min_dead_load_kn_m2: f64,
    /// Live load may not fall below this fraction of the code minimum
    pub live_load_tolerance: f64,
    /// Essential facilities should carry this multiple of the code minimum
    pub essential_live_load_factor: f64,
}

/// Strength reduction factors φ (SNI 2847 Pasal 21.2)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyFactors {
    /// Tension-controlled flexure
    pub phi_flexure: f64,
    /// Shear
    pub phi_shear: f64,
    /// Compression-controlled, tied columns
    pub phi_compression: f64,
}

/// Code limits for member design and serviceability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeLimits {
    /// Allowable story drift ratio Δ/h
    pub drift_ratio_max: f64,
    /// Maximum longitudinal reinforcement ratio
    pub rho_max: f64,
    /// Absolute stirrup spacing ceiling (mm)
    pub max_stirrup_spacing_mm: f64,
    /// Practical stirrup spacing ceiling (mm), paired with d/4 when Vs exceeds 0.33√fc·b·d
    pub reduced_stirrup_spacing_mm: f64,
    /// Smallest practical stirrup spacing (mm)
    pub min_stirrup_spacing_mm: f64,
}

/// Thresholds that mark a project as high-risk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskThresholds {
    /// Project value above which stricter rules apply (IDR, in the caller's unit)
    pub high_value: f64,
    /// Occupant count above which stricter rules apply
    pub high_occupancy: u32,
}

/// Immutable engineering constants table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineeringConstants {
    pub concrete: ConcreteLimits,
    pub steel: SteelLimits,
    pub seismic: SeismicLimits,
    pub geometry: GeometryLimits,
    pub loads: LoadLimits,
    pub safety_factors: SafetyFactors,
    pub code_limits: CodeLimits,
    pub risk: RiskThresholds,
    /// Gravitational acceleration (m/s²)
    pub gravity: f64,
}

impl EngineeringConstants {
    /// Values per SNI 1726:2019, SNI 1727:2020, SNI 2847:2019 and SNI 1729:2020.
    pub fn sni_defaults() -> Self {
        EngineeringConstants {
            concrete: ConcreteLimits {
                min_fc_mpa: 17.0,
                max_fc_mpa: 83.0,
                high_risk_min_fc_mpa: 25.0,
                nominal_density_kg_m3: 2400.0,
                density_tolerance: 0.10,
            },
            steel: SteelLimits {
                min_fy_mpa: 240.0,
                min_fu_fy_ratio: 1.25,
                grade_tolerance: 0.10,
            },
            seismic: SeismicLimits {
                low_ss_g: 0.1,
                low_s1_g: 0.05,
                high_ss_g: 1.5,
                high_s1_g: 0.6,
                jakarta_min_ss_g: 0.6,
                fixed_fa: 1.2,
                fixed_fv: 1.8,
                placeholder_sd1_g: 0.4,
                cs_min_factor: 0.044,
                cs_floor: 0.01,
                long_period_s1_g: 0.6,
                default_cd: 5.5,
            },
            geometry: GeometryLimits {
                min_plan_dimension_m: 3.0,
                max_aspect_ratio: 5.0,
                min_story_height_m: 2.4,
                max_story_height_m: 6.0,
                max_bay_spacing_m: 12.0,
                high_seismic_max_height_m: 40.0,
            },
            loads: LoadLimits {
                min_dead_load_kn_m2: 3.0,
                live_load_tolerance: 0.9,
                essential_live_load_factor: 1.25,
            },
            safety_factors: SafetyFactors {
                phi_flexure: 0.9,
                phi_shear: 0.75,
                phi_compression: 0.65,
            },
            code_limits: CodeLimits {
                drift_ratio_max: 0.025,
                rho_max: 0.025,
                max_stirrup_spacing_mm: 600.0,
                reduced_stirrup_spacing_mm: 300.0,
                min_stirrup_spacing_mm: 50.0,
            },
            risk: RiskThresholds {
                high_value: 1_000_000.0,
                high_occupancy: 100,
            },
            gravity: 9.81,
        }
    }

    /// Whether a project is high-risk by value or occupancy
    pub fn is_high_risk(&self, project_value: f64, occupancy_count: u32) -> bool {
        project_value > self.risk.high_value || occupancy_count > self.risk.high_occupancy
    }
}

impl Default for EngineeringConstants {
    fn default() -> Self {
        EngineeringConstants::sni_defaults()
    }
}

/// Process-wide constants table, initialized on first access.
pub static CONSTANTS: Lazy<EngineeringConstants> = Lazy::new(EngineeringConstants::sni_defaults);

/// Shared read-only access to [`CONSTANTS`].
pub fn constants() -> &'static EngineeringConstants {
    &CONSTANTS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_code_values() {
        let c = constants();
        assert_eq!(c.concrete.min_fc_mpa, 17.0);
        assert_eq!(c.concrete.max_fc_mpa, 83.0);
        assert_eq!(c.steel.min_fy_mpa, 240.0);
        assert_eq!(c.steel.min_fu_fy_ratio, 1.25);
        assert_eq!(c.safety_factors.phi_flexure, 0.9);
        assert_eq!(c.code_limits.rho_max, 0.025);
    }

    #[test]
    fn test_shared_table_is_single_instance() {
        let a: *const EngineeringConstants = constants();
        let b: *const EngineeringConstants = constants();
        assert_eq!(a, b);
    }

    #[test]
    fn test_concurrent_reads() {
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| constants().code_limits.drift_ratio_max))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 0.025);
        }
    }

    #[test]
    fn test_high_risk_thresholds() {
        let c = constants();
        assert!(c.is_high_risk(2_000_000.0, 10));
        assert!(c.is_high_risk(10.0, 150));
        assert!(!c.is_high_risk(1_000_000.0, 100));
    }
}
