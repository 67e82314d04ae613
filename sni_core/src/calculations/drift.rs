//! # Story Drift (SNI 1726:2019 Pasal 7.8.6, Tabel 20)
//!
//! Simplified shear-building estimate: the story stiffness is the sum of
//! fixed-fixed column stiffnesses `12·Ec·Ic/h³`, the elastic displacement is
//! `δe = V/K`, and the design displacement is amplified by `Cd/Ie`.
//!
//! All lengths here are **millimeters**, stiffness in **N/mm**, base shear
//! in **kN**.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{division_by_zero, CalculationLog, CalculationStep};
use crate::constants::{constants, sni_ref};
use crate::errors::{CalcError, CalcResult};

/// Drift check outcome
///
/// ## JSON Example
///
/// ```json
/// {
///   "elastic_displacement_mm": 1.22,
///   "design_displacement_mm": 6.70,
///   "story_height_mm": 3000.0,
///   "drift_ratio": 0.00223,
///   "limit": 0.025,
///   "compliant": true
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriftCheck {
    pub elastic_displacement_mm: f64,
    pub design_displacement_mm: f64,
    pub story_height_mm: f64,
    pub drift_ratio: f64,
    pub limit: f64,
    /// drift_ratio ≤ limit
    pub compliant: bool,
}

impl DriftCheck {
    /// drift_ratio / limit
    pub fn utilization(&self) -> f64 {
        self.drift_ratio / self.limit
    }
}

/// Lateral story stiffness K = n·12·Ec·Ic/h³ (N/mm).
///
/// Column section `column_width_mm × column_depth_mm`, bending about the
/// depth; `ec_mpa` in MPa; `story_height_mm` in mm.
pub fn story_stiffness(
    column_count: u32,
    ec_mpa: f64,
    column_width_mm: f64,
    column_depth_mm: f64,
    story_height_mm: f64,
    log: &mut CalculationLog,
) -> CalcResult<f64> {
    if !(story_height_mm > 0.0) {
        return Err(division_by_zero(log, format!("Story height h = {} mm", story_height_mm)));
    }
    let ic = column_width_mm * column_depth_mm.powi(3) / 12.0;
    let k_column = 12.0 * ec_mpa * ic / story_height_mm.powi(3);
    let k = log.push(
        CalculationStep::new("Story lateral stiffness", "K = n·12·Ec·Ic/h³")
            .with_calculation(format!(
                "{} × 12 × {:.0} MPa × {:.4e} mm⁴ / {:.0}³ mm³",
                column_count, ec_mpa, ic, story_height_mm
            ))
            .with_result(column_count as f64 * k_column, "N/mm")
            .with_reference(sni_ref::DRIFT),
    )?;
    Ok(k)
}

/// Elastic lateral displacement δe = V/K (mm) for V in kN and K in N/mm.
pub fn elastic_displacement(base_shear_kn: f64, stiffness_n_mm: f64, log: &mut CalculationLog) -> CalcResult<f64> {
    if !(stiffness_n_mm > 0.0) {
        return Err(division_by_zero(log, format!("Story stiffness K = {} N/mm", stiffness_n_mm)));
    }
    log.push(
        CalculationStep::new("Elastic displacement", "δe = V/K")
            .with_calculation(format!("{:.1} × 1000 N / {:.4e} N/mm", base_shear_kn, stiffness_n_mm))
            .with_result(base_shear_kn * 1000.0 / stiffness_n_mm, "mm")
            .with_reference(sni_ref::DRIFT),
    )
}

/// Design drift check: δd = Cd·δe/Ie, ratio = δd/h, compliant iff ratio ≤ 0.025.
///
/// # Example
///
/// ```rust
/// use sni_core::calculations::CalculationLog;
/// use sni_core::calculations::drift::story_drift;
///
/// let mut log = CalculationLog::new();
/// let check = story_drift(10.0, 5.5, 1.0, 3000.0, &mut log).unwrap();
/// assert!((check.design_displacement_mm - 55.0).abs() < 1e-9);
/// assert!(check.compliant);
/// ```
pub fn story_drift(
    elastic_displacement_mm: f64,
    cd: f64,
    importance_factor: f64,
    story_height_mm: f64,
    log: &mut CalculationLog,
) -> CalcResult<DriftCheck> {
    if !(importance_factor > 0.0) {
        return Err(CalcError::invalid_input(
            "importance_factor",
            importance_factor.to_string(),
            "Importance factor must be positive",
        ));
    }
    let design = log.push(
        CalculationStep::new("Design story displacement", "δd = Cd·δe/Ie")
            .with_calculation(format!("{:.2} × {:.3} mm / {:.2}", cd, elastic_displacement_mm, importance_factor))
            .with_result(cd * elastic_displacement_mm / importance_factor, "mm")
            .with_reference(sni_ref::DRIFT),
    )?;

    if !(story_height_mm > 0.0) {
        return Err(division_by_zero(log, format!("Story height h = {} mm", story_height_mm)));
    }
    let limit = constants().code_limits.drift_ratio_max;
    let ratio = design / story_height_mm;
    let compliant = ratio <= limit;
    let mut step = CalculationStep::new("Story drift ratio", "Δ/h = δd/h ≤ 0.025")
        .with_calculation(format!("{:.3} mm / {:.0} mm", design, story_height_mm))
        .with_result(ratio, "-")
        .with_reference(sni_ref::DRIFT_LIMIT);
    if !compliant {
        step = step.unverified();
    }
    let drift_ratio = log.push(step)?;
    debug!(drift_ratio, compliant, "story drift");

    Ok(DriftCheck {
        elastic_displacement_mm,
        design_displacement_mm: design,
        story_height_mm,
        drift_ratio,
        limit,
        compliant,
    })
}
