//! # Flexural Reinforcement (SNI 2847:2019 Pasal 22.2)
//!
//! Singly reinforced rectangular section with the Whitney stress block.
//!
//! ```text
//! Mn = Mu/φ                       φ = 0.90
//! m  = fy / (0.85·fc')
//! k  = 2·Mn / (b·d²·0.85·fc')
//! ρ  = (1/m)·(1 − √(1 − k))
//! As = ρ·b·d                      ρmin ≤ ρ ≤ ρmax
//! ```
//!
//! `k > 1` means the section cannot develop the required moment at any steel
//! ratio; it is reported as [`DomainErrorKind::CapacityExceeded`].
//!
//! Units: moment in **kN·m** at the boundary (converted to N·mm inside),
//! width and effective depth in **mm**, stresses in **MPa**, As in **mm²**.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{division_by_zero, CalculationLog, CalculationStep};
use crate::constants::{constants, sni_ref};
use crate::errors::{CalcError, CalcResult, DomainErrorKind};
use crate::materials::MaterialProperties;
use crate::units::{KiloNewtonMeters, NewtonMillimeters};

/// Designed tension reinforcement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlexuralDesign {
    /// Required nominal moment Mn = Mu/φ (kN·m)
    pub nominal_moment_knm: f64,
    /// Steel ratio solved from the demand, before limits
    pub rho_required: f64,
    pub rho_min: f64,
    pub rho_max: f64,
    /// Ratio after applying ρmin and ρmax
    pub rho_provided: f64,
    /// As = ρ·b·d (mm²)
    pub as_required_mm2: f64,
    /// ρ_required > ρmax: the section is over-reinforced for this demand
    pub exceeds_rho_max: bool,
}

fn check_section(width_mm: f64, effective_depth_mm: f64, log: &CalculationLog) -> CalcResult<()> {
    if !(width_mm > 0.0) || !(effective_depth_mm > 0.0) {
        return Err(division_by_zero(
            log,
            format!("Section b = {} mm, d = {} mm", width_mm, effective_depth_mm),
        ));
    }
    Ok(())
}

/// Required tension steel for a factored moment.
///
/// # Example
///
/// ```rust
/// use sni_core::calculations::CalculationLog;
/// use sni_core::calculations::flexure::required_steel;
/// use sni_core::materials::{ConcreteProperties, MaterialProperties, SteelProperties};
///
/// let materials = MaterialProperties {
///     concrete: ConcreteProperties::new(30.0),
///     steel: SteelProperties::new(400.0, 540.0),
/// };
/// let mut log = CalculationLog::new();
/// let design = required_steel(150.0, 300.0, 540.0, &materials, &mut log).unwrap();
/// assert!(design.as_required_mm2 > design.rho_min * 300.0 * 540.0);
/// assert!(!design.exceeds_rho_max);
/// ```
pub fn required_steel(
    moment_knm: f64,
    width_mm: f64,
    effective_depth_mm: f64,
    materials: &MaterialProperties,
    log: &mut CalculationLog,
) -> CalcResult<FlexuralDesign> {
    materials.validate()?;
    if !(moment_knm >= 0.0) {
        return Err(CalcError::invalid_input(
            "moment",
            moment_knm.to_string(),
            "Factored moment cannot be negative",
        ));
    }
    check_section(width_mm, effective_depth_mm, log)?;

    let k_consts = constants();
    let phi = k_consts.safety_factors.phi_flexure;
    let fc = materials.concrete.fc;
    let fy = materials.steel.fy;
    let (b, d) = (width_mm, effective_depth_mm);

    let mn_knm = log.push(
        CalculationStep::new("Required nominal moment", "Mn = Mu/φ")
            .with_calculation(format!("{:.2} kN·m / {}", moment_knm, phi))
            .with_result(moment_knm / phi, "kN·m")
            .with_reference(sni_ref::PHI_FACTORS),
    )?;
    let mn = NewtonMillimeters::from(KiloNewtonMeters(mn_knm)).value();

    let m = log.push(
        CalculationStep::new("Strength ratio", "m = fy/(0.85·fc')")
            .with_calculation(format!("{:.0} / (0.85 × {:.1})", fy, fc))
            .with_result(fy / (0.85 * fc), "-")
            .with_reference(sni_ref::FLEXURE),
    )?;

    let k = log.push(
        CalculationStep::new("Moment coefficient", "k = 2·Mn/(b·d²·0.85·fc')")
            .with_calculation(format!("2 × {:.4e} / ({:.0} × {:.0}² × 0.85 × {:.1})", mn, b, d, fc))
            .with_result(2.0 * mn / (b * d * d * 0.85 * fc), "-")
            .with_reference(sni_ref::FLEXURE),
    )?;

    if k > 1.0 {
        return Err(CalcError::domain(
            DomainErrorKind::CapacityExceeded,
            format!(
                "Required Mn = {:.1} kN·m exceeds the compression capacity of a {:.0} × {:.0} mm section (k = {:.3} > 1)",
                mn_knm, b, d, k
            ),
            Some(log.next_index()),
        ));
    }

    let rho_required = log.push(
        CalculationStep::new("Required reinforcement ratio", "ρ = (1/m)·(1 − √(1 − k))")
            .with_calculation(format!("(1/{:.3}) × (1 − √(1 − {:.4}))", m, k))
            .with_result((1.0 - (1.0 - k).sqrt()) / m, "-")
            .with_reference(sni_ref::FLEXURE),
    )?;

    let rho_min = log.push(
        CalculationStep::new("Minimum reinforcement ratio", "ρmin = max(1.4/fy, 0.25·√fc'/fy)")
            .with_calculation(format!("max(1.4/{:.0}, 0.25 × √{:.1}/{:.0})", fy, fc, fy))
            .with_result((1.4 / fy).max(0.25 * fc.sqrt() / fy), "-")
            .with_reference(sni_ref::RHO_MIN),
    )?;

    let rho_max = k_consts.code_limits.rho_max;
    let exceeds_rho_max = rho_required > rho_max;
    if exceeds_rho_max {
        log.push(
            CalculationStep::new("Reinforcement ratio exceeds maximum", "ρ ≤ ρmax")
                .with_calculation(format!("{:.5} > {:.3}; clamped to ρmax", rho_required, rho_max))
                .with_result(rho_required, "-")
                .with_reference(sni_ref::RHO_MAX)
                .unverified(),
        )?;
    }

    let rho_provided = rho_required.min(rho_max).max(rho_min);
    let rho_provided = log.push(
        CalculationStep::new("Design reinforcement ratio", "ρ = clamp(ρ, ρmin, ρmax)")
            .with_calculation(format!("clamp({:.5}, {:.5}, {:.3})", rho_required, rho_min, rho_max))
            .with_result(rho_provided, "-")
            .with_reference(sni_ref::RHO_MIN),
    )?;

    let as_required_mm2 = log.push(
        CalculationStep::new("Required tension steel", "As = ρ·b·d")
            .with_calculation(format!("{:.5} × {:.0} × {:.0}", rho_provided, b, d))
            .with_result(rho_provided * b * d, "mm²")
            .with_reference(sni_ref::FLEXURE),
    )?;
    debug!(rho_required, rho_provided, as_required_mm2, "flexural reinforcement");

    Ok(FlexuralDesign {
        nominal_moment_knm: mn_knm,
        rho_required,
        rho_min,
        rho_max,
        rho_provided,
        as_required_mm2,
        exceeds_rho_max,
    })
}

/// Design flexural strength φMn of a section with tension steel As (kN·m).
///
/// ```text
/// a   = As·fy / (0.85·fc'·b)
/// φMn = φ·As·fy·(d − a/2)
/// ```
pub fn flexural_capacity(
    as_mm2: f64,
    width_mm: f64,
    effective_depth_mm: f64,
    materials: &MaterialProperties,
    log: &mut CalculationLog,
) -> CalcResult<f64> {
    check_section(width_mm, effective_depth_mm, log)?;
    let phi = constants().safety_factors.phi_flexure;
    let fc = materials.concrete.fc;
    let fy = materials.steel.fy;

    let a = log.push(
        CalculationStep::new("Stress block depth", "a = As·fy/(0.85·fc'·b)")
            .with_calculation(format!("{:.1} × {:.0} / (0.85 × {:.1} × {:.0})", as_mm2, fy, fc, width_mm))
            .with_result(as_mm2 * fy / (0.85 * fc * width_mm), "mm")
            .with_reference(sni_ref::FLEXURE),
    )?;

    let lever = effective_depth_mm - a / 2.0;
    if lever <= 0.0 {
        return Err(CalcError::domain(
            DomainErrorKind::CapacityExceeded,
            format!("Stress block a = {:.1} mm leaves no lever arm in d = {:.0} mm", a, effective_depth_mm),
            Some(log.next_index()),
        ));
    }

    let phi_mn = KiloNewtonMeters::from(NewtonMillimeters(phi * as_mm2 * fy * lever)).value();
    let phi_mn = log.push(
        CalculationStep::new("Design flexural strength", "φMn = φ·As·fy·(d − a/2)")
            .with_calculation(format!("{} × {:.1} × {:.0} × ({:.0} − {:.1}/2)", phi, as_mm2, fy, effective_depth_mm, a))
            .with_result(phi_mn, "kN·m")
            .with_reference(sni_ref::FLEXURE),
    )?;
    Ok(phi_mn)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::materials::{ConcreteProperties, SteelProperties};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn steel_never_below_minimum(
            moment in 0.0_f64..2000.0,
            b in 200.0_f64..600.0,
            d in 250.0_f64..900.0,
            fc in 17.0_f64..60.0,
            fy in 240.0_f64..550.0,
        ) {
            let materials = MaterialProperties {
                concrete: ConcreteProperties::new(fc),
                steel: SteelProperties::new(fy, fy * 1.3),
            };
            match required_steel(moment, b, d, &materials, &mut CalculationLog::new()) {
                Ok(design) => prop_assert!(design.as_required_mm2 >= design.rho_min * b * d),
                Err(err) => prop_assert_eq!(err.domain_kind(), Some(DomainErrorKind::CapacityExceeded)),
            }
        }
    }
}
