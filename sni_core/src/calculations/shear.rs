//! # Shear Design (SNI 2847:2019 Pasal 22.5, 9.7.6)
//!
//! Concrete contribution and vertical stirrup spacing for a rectangular beam.
//! Width and effective depth in **mm**, forces in **kN**, stirrup leg area
//! in **mm²**.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{division_by_zero, CalculationLog, CalculationStep};
use crate::constants::{constants, sni_ref};
use crate::errors::{CalcError, CalcResult};
use crate::materials::MaterialProperties;

/// Area of two legs of a Ø10 stirrup (mm²)
pub const TWO_LEG_D10_MM2: f64 = 2.0 * std::f64::consts::PI * 25.0;

/// Stirrup design outcome
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShearDesign {
    /// Vc = 0.17·√fc'·b·d (kN)
    pub vc_kn: f64,
    /// Demand left for the stirrups, max(0, Vu − φVc) (kN)
    pub vs_required_kn: f64,
    /// Code maximum spacing for this demand level (mm)
    pub max_spacing_mm: f64,
    /// Adopted stirrup spacing (mm)
    pub stirrup_spacing_mm: f64,
    /// φ(Vc + Vs) with the adopted spacing (kN)
    pub design_strength_kn: f64,
}

/// Design stirrups for a factored shear `shear_kn`.
///
/// ```text
/// Vc      = 0.17·√fc'·b·d / 1000
/// Vs,req  = max(0, Vu − φ·Vc)                 φ = 0.75
/// s       = φ·Av·fy·d / (Vs,req·1000)
/// s_max   = min(d/2, 300, 600), or min(d/4, 300) when Vs,req/φ > 0.33·√fc'·b·d
/// ```
///
/// Spacing tighter than the practical minimum (50 mm) or a demand above the
/// section limit 0.66·√fc'·b·d is recorded as an unverified step.
pub fn design_shear(
    shear_kn: f64,
    width_mm: f64,
    effective_depth_mm: f64,
    stirrup_area_mm2: f64,
    materials: &MaterialProperties,
    log: &mut CalculationLog,
) -> CalcResult<ShearDesign> {
    if !(shear_kn >= 0.0) {
        return Err(CalcError::invalid_input("shear", shear_kn.to_string(), "Factored shear cannot be negative"));
    }
    if !(stirrup_area_mm2 > 0.0) {
        return Err(CalcError::invalid_input(
            "stirrup_area_mm2",
            stirrup_area_mm2.to_string(),
            "Stirrup area must be positive",
        ));
    }
    if !(width_mm > 0.0) || !(effective_depth_mm > 0.0) {
        return Err(division_by_zero(
            log,
            format!("Section b = {} mm, d = {} mm", width_mm, effective_depth_mm),
        ));
    }

    let k = constants();
    let phi = k.safety_factors.phi_shear;
    let limits = &k.code_limits;
    let fc = materials.concrete.fc;
    let fy = materials.steel.fy;
    let (b, d) = (width_mm, effective_depth_mm);
    let root_fc_bd = fc.sqrt() * b * d / 1000.0;

    let vc = log.push(
        CalculationStep::new("Concrete shear strength", "Vc = 0.17·√fc'·b·d")
            .with_calculation(format!("0.17 × √{:.1} × {:.0} × {:.0} / 1000", fc, b, d))
            .with_result(0.17 * root_fc_bd, "kN")
            .with_reference(sni_ref::SHEAR_VC),
    )?;

    let vs_required = log.push(
        CalculationStep::new("Shear demand on stirrups", "Vs,req = max(0, Vu − φ·Vc)")
            .with_calculation(format!("max(0, {:.2} − {} × {:.2})", shear_kn, phi, vc))
            .with_result((shear_kn - phi * vc).max(0.0), "kN")
            .with_reference(sni_ref::SHEAR_VS),
    )?;

    let vs_nominal = vs_required / phi;
    if vs_nominal > 0.66 * root_fc_bd {
        log.push(
            CalculationStep::new("Section too small for shear", "Vs ≤ 0.66·√fc'·b·d")
                .with_calculation(format!("{:.1} > {:.1} kN", vs_nominal, 0.66 * root_fc_bd))
                .with_result(vs_nominal, "kN")
                .with_reference(sni_ref::SHEAR_VS)
                .unverified(),
        )?;
    }

    let high_shear = vs_nominal > 0.33 * root_fc_bd;
    let max_spacing = if high_shear {
        (d / 4.0).min(limits.reduced_stirrup_spacing_mm)
    } else {
        (d / 2.0)
            .min(limits.reduced_stirrup_spacing_mm)
            .min(limits.max_stirrup_spacing_mm)
    };
    let max_spacing = log.push(
        CalculationStep::new(
            "Maximum stirrup spacing",
            if high_shear { "s_max = min(d/4, 300)" } else { "s_max = min(d/2, 300, 600)" },
        )
        .with_calculation(format!("d = {:.0} mm", d))
        .with_result(max_spacing, "mm")
        .with_reference(sni_ref::STIRRUP_SPACING),
    )?;

    let demand_spacing = if vs_required > 0.0 {
        phi * stirrup_area_mm2 * fy * d / (vs_required * 1000.0)
    } else {
        max_spacing
    };
    let mut spacing = demand_spacing.min(max_spacing);
    let mut step = CalculationStep::new("Stirrup spacing", "s = min(φ·Av·fy·d/Vs,req, s_max)")
        .with_calculation(format!(
            "min({} × {:.1} × {:.0} × {:.0} / ({:.2} × 1000), {:.0})",
            phi, stirrup_area_mm2, fy, d, vs_required, max_spacing
        ))
        .with_reference(sni_ref::STIRRUP_SPACING);
    if spacing < limits.min_stirrup_spacing_mm {
        spacing = limits.min_stirrup_spacing_mm;
        step = step.unverified();
    }
    let spacing = log.push(step.with_result(spacing, "mm"))?;

    let vs_provided = stirrup_area_mm2 * fy * d / spacing / 1000.0;
    let design_strength = log.push(
        CalculationStep::new("Design shear strength", "φVn = φ·(Vc + Av·fy·d/s)")
            .with_calculation(format!("{} × ({:.2} + {:.2})", phi, vc, vs_provided))
            .with_result(phi * (vc + vs_provided), "kN")
            .with_reference(sni_ref::SHEAR_VS),
    )?;
    debug!(vc, vs_required, spacing, design_strength, "shear design");

    Ok(ShearDesign {
        vc_kn: vc,
        vs_required_kn: vs_required,
        max_spacing_mm: max_spacing,
        stirrup_spacing_mm: spacing,
        design_strength_kn: design_strength,
    })
}
