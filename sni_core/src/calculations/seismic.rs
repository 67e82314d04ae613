//! # Seismic Calculator (SNI 1726:2019)
//!
//! Equivalent lateral force procedure:
//!
//! 1. Seismic weight W (kN)
//! 2. Approximate fundamental period Ta = Ct·hₙˣ, capped at Cu·Ta
//! 3. Site coefficients Fa, Fv (Tabel 6, 7) and design accelerations
//!    Sds = (2/3)·Ss·Fa, Sd1 = (2/3)·S1·Fv
//! 4. Response coefficient Cs and base shear V = Cs·W
//!
//! Wind base shear is computed beside it so the governing lateral case can be
//! reported.
//!
//! ## Known approximation
//!
//! The period cap uses Cu looked up at a fixed SD1 = 0.4 g rather than the
//! site's computed SD1. Because Cu ≥ 1 the cap never binds and T = Ta.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{division_by_zero, CalculationLog, CalculationStep};
use crate::constants::{constants, sni_ref};
use crate::errors::{CalcError, CalcResult};
use crate::geometry::StructuralGeometry;
use crate::loads::{SeismicParameters, SiteClass};
use crate::materials::ConcreteProperties;

/// Lateral system, selects the period coefficients Ct and x (Tabel 18)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructuralSystem {
    #[default]
    ConcreteMomentFrame,
    SteelMomentFrame,
    BracedFrame,
}

impl StructuralSystem {
    pub const ALL: [StructuralSystem; 3] = [
        StructuralSystem::ConcreteMomentFrame,
        StructuralSystem::SteelMomentFrame,
        StructuralSystem::BracedFrame,
    ];

    /// (Ct, x)
    pub fn period_coefficients(&self) -> (f64, f64) {
        match self {
            StructuralSystem::ConcreteMomentFrame => (0.0466, 0.9),
            StructuralSystem::SteelMomentFrame => (0.0724, 0.8),
            StructuralSystem::BracedFrame => (0.0731, 0.75),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            StructuralSystem::ConcreteMomentFrame => "Concrete moment frame",
            StructuralSystem::SteelMomentFrame => "Steel moment frame",
            StructuralSystem::BracedFrame => "Braced frame",
        }
    }

    /// Parse from common spellings ("concrete", "steel-moment", "braced", ...)
    pub fn from_str_flexible(s: &str) -> Option<Self> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "concrete" | "concrete_moment" | "concrete_moment_frame" | "srpmk" => {
                Some(StructuralSystem::ConcreteMomentFrame)
            }
            "steel" | "steel_moment" | "steel_moment_frame" => Some(StructuralSystem::SteelMomentFrame),
            "braced" | "braced_frame" | "eccentrically_braced" => Some(StructuralSystem::BracedFrame),
            _ => None,
        }
    }
}

/// Where Fa and Fv come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteCoefficientSource {
    /// Tabel 6 and 7 lookup by site class with interpolation
    #[default]
    Tabulated,
    /// Fa = 1.2, Fv = 1.8 regardless of site class (site class C assumption)
    FixedClassC,
}

/// Short- and long-period site amplification factors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SiteCoefficients {
    pub fa: f64,
    pub fv: f64,
}

impl SiteCoefficientSource {
    /// Resolve Fa and Fv for the given seismic input
    pub fn resolve(&self, params: &SeismicParameters) -> CalcResult<SiteCoefficients> {
        match self {
            SiteCoefficientSource::Tabulated => site_coefficients(params.site_class, params.ss, params.s1),
            SiteCoefficientSource::FixedClassC => {
                let k = &constants().seismic;
                Ok(SiteCoefficients { fa: k.fixed_fa, fv: k.fixed_fv })
            }
        }
    }
}

const SS_COLUMNS: [f64; 6] = [0.25, 0.5, 0.75, 1.0, 1.25, 1.5];
const S1_COLUMNS: [f64; 6] = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6];

// Tabel 6
fn fa_row(site: SiteClass) -> Option<[f64; 6]> {
    match site {
        SiteClass::SA => Some([0.8; 6]),
        SiteClass::SB => Some([0.9; 6]),
        SiteClass::SC => Some([1.3, 1.3, 1.2, 1.2, 1.2, 1.2]),
        SiteClass::SD => Some([1.6, 1.4, 1.2, 1.1, 1.0, 1.0]),
        SiteClass::SE => Some([2.4, 1.7, 1.3, 1.1, 0.9, 0.8]),
        SiteClass::SF => None,
    }
}

// Tabel 7
fn fv_row(site: SiteClass) -> Option<[f64; 6]> {
    match site {
        SiteClass::SA => Some([0.8; 6]),
        SiteClass::SB => Some([0.8; 6]),
        SiteClass::SC => Some([1.5, 1.5, 1.5, 1.5, 1.5, 1.4]),
        SiteClass::SD => Some([2.4, 2.2, 2.0, 1.9, 1.8, 1.7]),
        SiteClass::SE => Some([4.2, 3.3, 2.8, 2.4, 2.2, 2.0]),
        SiteClass::SF => None,
    }
}

/// Piecewise-linear lookup, clamped to the end values outside the table.
fn interpolate(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    if x <= xs[0] {
        return ys[0];
    }
    for i in 1..xs.len() {
        if x <= xs[i] {
            let t = (x - xs[i - 1]) / (xs[i] - xs[i - 1]);
            return ys[i - 1] + t * (ys[i] - ys[i - 1]);
        }
    }
    ys[ys.len() - 1]
}

/// Fa and Fv per SNI 1726:2019 Tabel 6 and 7.
///
/// Site class SF has no tabulated values and fails with `CalculationFailed`.
///
/// # Example
///
/// ```rust
/// use sni_core::calculations::seismic::site_coefficients;
/// use sni_core::loads::SiteClass;
///
/// let c = site_coefficients(SiteClass::SD, 1.2, 0.5).unwrap();
/// assert!((c.fa - 1.02).abs() < 1e-9);
/// assert!((c.fv - 1.8).abs() < 1e-9);
/// assert!(site_coefficients(SiteClass::SF, 1.2, 0.5).is_err());
/// ```
pub fn site_coefficients(site_class: SiteClass, ss: f64, s1: f64) -> CalcResult<SiteCoefficients> {
    match (fa_row(site_class), fv_row(site_class)) {
        (Some(fa), Some(fv)) => Ok(SiteCoefficients {
            fa: interpolate(&SS_COLUMNS, &fa, ss),
            fv: interpolate(&S1_COLUMNS, &fv, s1),
        }),
        _ => Err(CalcError::calculation_failed(
            "Site coefficients",
            format!("Site class {} requires a site-specific response analysis", site_class),
        )),
    }
}

/// Upper-limit coefficient Cu for the computed period (Tabel 17).
pub fn upper_limit_coefficient(sd1: f64) -> f64 {
    const SD1: [f64; 5] = [0.1, 0.15, 0.2, 0.3, 0.4];
    const CU: [f64; 5] = [1.7, 1.6, 1.5, 1.4, 1.4];
    interpolate(&SD1, &CU, sd1)
}

/// Seismic weight W = floors · L · B · (D + slab self-weight), in kN.
///
/// Geometry in meters, `slab_thickness_mm` in millimeters, dead load in kN/m².
pub fn seismic_weight(
    geometry: &StructuralGeometry,
    dead_load_kn_m2: f64,
    slab_thickness_mm: f64,
    concrete: &ConcreteProperties,
    log: &mut CalculationLog,
) -> CalcResult<f64> {
    let gamma = concrete.unit_weight_kn_m3(constants().gravity);
    let t_m = slab_thickness_mm / 1000.0;
    let self_weight = log.push(
        CalculationStep::new("Slab self-weight", "q_sw = t·γc")
            .with_calculation(format!("{:.3} m × {:.3} kN/m³", t_m, gamma))
            .with_result(t_m * gamma, "kN/m²")
            .with_reference(sni_ref::DEAD_LOAD),
    )?;

    let floors = geometry.floors as f64;
    let weight = floors * geometry.floor_area() * (dead_load_kn_m2 + self_weight);
    let weight = log.push(
        CalculationStep::new("Effective seismic weight", "W = n·L·B·(D + q_sw)")
            .with_calculation(format!(
                "{} × {:.2} m × {:.2} m × ({:.3} + {:.3}) kN/m²",
                geometry.floors, geometry.length, geometry.width, dead_load_kn_m2, self_weight
            ))
            .with_result(weight, "kN")
            .with_reference(sni_ref::SEISMIC_WEIGHT),
    )?;
    debug!(weight_kn = weight, "seismic weight");
    Ok(weight)
}

/// Fundamental period with its upper limit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodEstimate {
    /// Ta = Ct·hₙˣ (s)
    pub approximate: f64,
    /// Cu used for the cap
    pub cu: f64,
    /// Cu·Ta (s)
    pub upper_limit: f64,
    /// Design period min(Ta, Cu·Ta) (s)
    pub period: f64,
}

/// Approximate fundamental period for the building height (m).
///
/// # Example
///
/// ```rust
/// use sni_core::calculations::{CalculationLog, StructuralSystem};
/// use sni_core::calculations::seismic::fundamental_period;
/// use sni_core::geometry::StructuralGeometry;
///
/// let g = StructuralGeometry::new(25.0, 20.0, 15.0, 5, 5.0);
/// let mut log = CalculationLog::new();
/// let t = fundamental_period(&g, StructuralSystem::ConcreteMomentFrame, &mut log).unwrap();
/// // 0.0466 × 15^0.9
/// assert!((t.period - 0.5332).abs() < 1e-3);
/// assert_eq!(log.len(), 3);
/// ```
pub fn fundamental_period(
    geometry: &StructuralGeometry,
    system: StructuralSystem,
    log: &mut CalculationLog,
) -> CalcResult<PeriodEstimate> {
    if !(geometry.height > 0.0) {
        return Err(CalcError::invalid_input(
            "height",
            geometry.height.to_string(),
            "Building height must be positive",
        ));
    }
    let (ct, x) = system.period_coefficients();
    let ta = log.push(
        CalculationStep::new(format!("Approximate fundamental period ({})", system.display_name()), "Ta = Ct·hₙˣ")
            .with_calculation(format!("{} × {:.2}^{}", ct, geometry.height, x))
            .with_result(ct * geometry.height.powf(x), "s")
            .with_reference(sni_ref::PERIOD),
    )?;

    let placeholder_sd1 = constants().seismic.placeholder_sd1_g;
    let cu = log.push(
        CalculationStep::new("Upper-limit coefficient", "Cu from Tabel 17 at SD1")
            .with_calculation(format!("SD1 = {:.2}g (fixed)", placeholder_sd1))
            .with_result(upper_limit_coefficient(placeholder_sd1), "-")
            .with_reference(sni_ref::PERIOD_LIMIT),
    )?;

    let upper_limit = cu * ta;
    let period = log.push(
        CalculationStep::new("Design fundamental period", "T = min(Ta, Cu·Ta)")
            .with_calculation(format!("min({:.4}, {:.3} × {:.4})", ta, cu, ta))
            .with_result(ta.min(upper_limit), "s")
            .with_reference(sni_ref::PERIOD_LIMIT),
    )?;
    debug!(ta, cu, period, "fundamental period");

    Ok(PeriodEstimate {
        approximate: ta,
        cu,
        upper_limit,
        period,
    })
}

/// Spectral values and base shear for one seismic run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeismicDemand {
    pub fa: f64,
    pub fv: f64,
    pub sds: f64,
    pub sd1: f64,
    /// Seismic response coefficient after the upper and lower bounds
    pub cs: f64,
    /// V = Cs·W (kN)
    pub base_shear_kn: f64,
}

/// Base shear V = Cs·W for a seismic weight in kN and a period in seconds.
///
/// `Cs = Sds/(R/Ie)` is capped at `Sd1/(T·R/Ie)` and floored at
/// `max(0.044·Sds·Ie, 0.01)`, plus `0.5·S1/(R/Ie)` where S1 ≥ 0.6 g. When the
/// floor exceeds the cap, the floor governs. A zero period is a domain error.
pub fn base_shear(
    weight_kn: f64,
    period_s: f64,
    params: &SeismicParameters,
    coefficients: SiteCoefficients,
    log: &mut CalculationLog,
) -> CalcResult<SeismicDemand> {
    params.validate()?;
    if !(weight_kn >= 0.0) {
        return Err(CalcError::invalid_input(
            "weight",
            weight_kn.to_string(),
            "Seismic weight cannot be negative",
        ));
    }
    let k = &constants().seismic;
    let SiteCoefficients { fa, fv } = coefficients;

    log.push(
        CalculationStep::new("Short-period site coefficient", "Fa")
            .with_calculation(format!("Site class {}, Ss = {:.3}g", params.site_class, params.ss))
            .with_result(fa, "-")
            .with_reference(sni_ref::SITE_COEFFICIENTS),
    )?;
    log.push(
        CalculationStep::new("Long-period site coefficient", "Fv")
            .with_calculation(format!("Site class {}, S1 = {:.3}g", params.site_class, params.s1))
            .with_result(fv, "-")
            .with_reference(sni_ref::SITE_COEFFICIENTS),
    )?;

    let sds = log.push(
        CalculationStep::new("Design spectral acceleration (short period)", "Sds = (2/3)·Ss·Fa")
            .with_calculation(format!("(2/3) × {:.3} × {:.3}", params.ss, fa))
            .with_result(2.0 / 3.0 * params.ss * fa, "g")
            .with_reference(sni_ref::DESIGN_SPECTRUM),
    )?;
    let sd1 = log.push(
        CalculationStep::new("Design spectral acceleration (1 s)", "Sd1 = (2/3)·S1·Fv")
            .with_calculation(format!("(2/3) × {:.3} × {:.3}", params.s1, fv))
            .with_result(2.0 / 3.0 * params.s1 * fv, "g")
            .with_reference(sni_ref::DESIGN_SPECTRUM),
    )?;

    if !(period_s > 0.0) {
        return Err(division_by_zero(log, format!("Fundamental period T = {} s", period_s)));
    }

    let ratio = params.reduction_ratio();
    let ie = params.importance_factor;
    let cs_upper = sd1 / (period_s * ratio);
    let mut cs_lower = (k.cs_min_factor * sds * ie).max(k.cs_floor);
    if params.s1 >= k.long_period_s1_g {
        cs_lower = cs_lower.max(0.5 * params.s1 / ratio);
    }
    let cs = (sds / ratio).min(cs_upper).max(cs_lower);
    let cs = log.push(
        CalculationStep::new("Seismic response coefficient", "Cs = Sds/(R/Ie), Cs_min ≤ Cs ≤ Sd1/(T·R/Ie)")
            .with_calculation(format!(
                "{:.4}/{:.3} = {:.4}, bounds [{:.4}, {:.4}]",
                sds,
                ratio,
                sds / ratio,
                cs_lower,
                cs_upper
            ))
            .with_result(cs, "-")
            .with_reference(sni_ref::RESPONSE_COEFFICIENT),
    )?;

    let base_shear_kn = log.push(
        CalculationStep::new("Seismic base shear", "V = Cs·W")
            .with_calculation(format!("{:.4} × {:.1} kN", cs, weight_kn))
            .with_result(cs * weight_kn, "kN")
            .with_reference(sni_ref::BASE_SHEAR),
    )?;
    debug!(sds, sd1, cs, base_shear_kn, "base shear");

    Ok(SeismicDemand {
        fa,
        fv,
        sds,
        sd1,
        cs,
        base_shear_kn,
    })
}

/// Wind base shear V_w = q·H·B on the windward face, in kN.
///
/// `wind_load_kn_m2` is the design pressure; height and width in meters.
pub fn wind_base_shear(wind_load_kn_m2: f64, geometry: &StructuralGeometry, log: &mut CalculationLog) -> CalcResult<f64> {
    let v = log.push(
        CalculationStep::new("Wind base shear", "Vw = q·H·B")
            .with_calculation(format!(
                "{:.3} kN/m² × {:.2} m × {:.2} m",
                wind_load_kn_m2, geometry.height, geometry.width
            ))
            .with_result(wind_load_kn_m2 * geometry.height * geometry.width, "kN")
            .with_reference(sni_ref::WIND),
    )?;
    debug!(wind_base_shear_kn = v, "wind base shear");
    Ok(v)
}
