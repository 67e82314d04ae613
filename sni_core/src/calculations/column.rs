//! # Column Axial Check
//!
//! Tied reinforced-concrete column under concentric axial load,
//! SNI 2847:2019 Pasal 22.4.2.
//!
//! ## Assumptions
//!
//! - Interior column carrying the factored floor load over its tributary
//!   area on every floor
//! - Longitudinal steel ratio ρg = 1 % unless given
//! - Short column (slenderness effects not evaluated)
//!
//! ## Example
//!
//! ```rust
//! use sni_core::calculations::column::{calculate, ColumnInput};
//! use sni_core::calculations::CalculationLog;
//! use sni_core::materials::{ConcreteProperties, MaterialProperties, SteelProperties};
//!
//! let input = ColumnInput {
//!     label: "C-1".to_string(),
//!     axial_load_kn: 2000.0,
//!     width_mm: 500.0,
//!     depth_mm: 500.0,
//!     reinforcement_ratio: 0.01,
//! };
//! let materials = MaterialProperties {
//!     concrete: ConcreteProperties::new(30.0),
//!     steel: SteelProperties::new(400.0, 540.0),
//! };
//! let result = calculate(&input, &materials, &mut CalculationLog::new()).unwrap();
//! assert!(result.passes());
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{CalculationLog, CalculationStep};
use crate::constants::{constants, sni_ref};
use crate::errors::{CalcError, CalcResult};
use crate::materials::MaterialProperties;
use crate::units::{KiloNewtons, Newtons};

/// Default longitudinal reinforcement ratio ρg
pub const DEFAULT_REINFORCEMENT_RATIO: f64 = 0.01;

/// Factor on Po for tied columns (accidental eccentricity)
const TIED_COLUMN_FACTOR: f64 = 0.80;

/// Input parameters for a column axial check.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "C-1",
///   "axial_load_kn": 2080.0,
///   "width_mm": 500.0,
///   "depth_mm": 500.0,
///   "reinforcement_ratio": 0.01
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInput {
    /// User label for this column (e.g., "C-1", "Interior Column")
    pub label: String,

    /// Factored axial compression Pu (kN)
    pub axial_load_kn: f64,

    /// Section width (mm)
    pub width_mm: f64,

    /// Section depth (mm)
    pub depth_mm: f64,

    /// Longitudinal reinforcement ratio ρg = Ast/Ag
    pub reinforcement_ratio: f64,
}

impl ColumnInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.axial_load_kn >= 0.0) {
            return Err(CalcError::invalid_input(
                "axial_load_kn",
                self.axial_load_kn.to_string(),
                "Load cannot be negative",
            ));
        }
        if !(self.width_mm > 0.0) {
            return Err(CalcError::invalid_input(
                "width_mm",
                self.width_mm.to_string(),
                "Width must be positive",
            ));
        }
        if !(self.depth_mm > 0.0) {
            return Err(CalcError::invalid_input(
                "depth_mm",
                self.depth_mm.to_string(),
                "Depth must be positive",
            ));
        }
        if !(0.01..=0.08).contains(&self.reinforcement_ratio) {
            return Err(CalcError::invalid_input(
                "reinforcement_ratio",
                self.reinforcement_ratio.to_string(),
                "Longitudinal ratio must be between 1% and 8%",
            ));
        }
        Ok(())
    }

    /// Gross area Ag = b·h (mm²)
    pub fn gross_area_mm2(&self) -> f64 {
        self.width_mm * self.depth_mm
    }

    /// Longitudinal steel area Ast = ρg·Ag (mm²)
    pub fn steel_area_mm2(&self) -> f64 {
        self.reinforcement_ratio * self.gross_area_mm2()
    }
}

/// Results from the column axial check.
///
/// ## JSON Example
///
/// ```json
/// {
///   "gross_area_mm2": 250000.0,
///   "steel_area_mm2": 2500.0,
///   "design_strength_kn": 3801.8,
///   "axial_load_kn": 2080.0,
///   "utilization": 0.547
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnCheck {
    pub gross_area_mm2: f64,
    pub steel_area_mm2: f64,
    /// φPn,max = 0.80·φ·[0.85·fc'·(Ag − Ast) + fy·Ast] (kN)
    pub design_strength_kn: f64,
    /// Pu (kN)
    pub axial_load_kn: f64,
    /// Pu / φPn
    pub utilization: f64,
}

impl ColumnCheck {
    /// Check if the column passes (utilization ≤ 1.0)
    pub fn passes(&self) -> bool {
        self.utilization <= 1.0
    }
}

/// Factored axial demand on an interior column: Pu = wu·A_trib·n (kN).
pub fn axial_demand(
    factored_area_load_kn_m2: f64,
    tributary_area_m2: f64,
    floors: u32,
    log: &mut CalculationLog,
) -> CalcResult<f64> {
    log.push(
        CalculationStep::new("Interior column axial demand", "Pu = wu·A_trib·n")
            .with_calculation(format!(
                "{:.3} kN/m² × {:.2} m² × {}",
                factored_area_load_kn_m2, tributary_area_m2, floors
            ))
            .with_result(factored_area_load_kn_m2 * tributary_area_m2 * floors as f64, "kN")
            .with_reference(sni_ref::LOAD_COMBINATIONS),
    )
}

/// Check a column's axial capacity against its demand.
pub fn calculate(input: &ColumnInput, materials: &MaterialProperties, log: &mut CalculationLog) -> CalcResult<ColumnCheck> {
    input.validate()?;
    materials.validate()?;

    let phi = constants().safety_factors.phi_compression;
    let fc = materials.concrete.fc;
    let fy = materials.steel.fy;
    let ag = input.gross_area_mm2();
    let ast = input.steel_area_mm2();

    let design_strength = log.push(
        CalculationStep::new(
            format!("Column axial strength ({})", input.label),
            "φPn = 0.80·φ·[0.85·fc'·(Ag − Ast) + fy·Ast]",
        )
        .with_calculation(format!(
            "0.80 × {} × [0.85 × {:.1} × ({:.0} − {:.0}) + {:.0} × {:.0}] / 1000",
            phi, fc, ag, ast, fy, ast
        ))
        .with_result(
            KiloNewtons::from(Newtons(TIED_COLUMN_FACTOR * phi * (0.85 * fc * (ag - ast) + fy * ast))).value(),
            "kN",
        )
        .with_reference(sni_ref::COLUMN_AXIAL),
    )?;

    let mut step = CalculationStep::new("Column axial utilization", "Pu/φPn ≤ 1.0")
        .with_calculation(format!("{:.1} / {:.1}", input.axial_load_kn, design_strength))
        .with_result(input.axial_load_kn / design_strength, "-")
        .with_reference(sni_ref::COLUMN_AXIAL);
    if input.axial_load_kn > design_strength {
        step = step.unverified();
    }
    let utilization = log.push(step)?;
    debug!(label = %input.label, design_strength, utilization, "column axial check");

    Ok(ColumnCheck {
        gross_area_mm2: ag,
        steel_area_mm2: ast,
        design_strength_kn: design_strength,
        axial_load_kn: input.axial_load_kn,
        utilization,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::{ConcreteProperties, SteelProperties};

    fn test_column() -> ColumnInput {
        ColumnInput {
            label: "Test Column".to_string(),
            axial_load_kn: 2080.0,
            width_mm: 500.0,
            depth_mm: 500.0,
            reinforcement_ratio: DEFAULT_REINFORCEMENT_RATIO,
        }
    }

    fn materials() -> MaterialProperties {
        MaterialProperties {
            concrete: ConcreteProperties::new(30.0),
            steel: SteelProperties::new(400.0, 540.0),
        }
    }

    #[test]
    fn test_column_areas() {
        let col = test_column();
        assert!((col.gross_area_mm2() - 250_000.0).abs() < 1e-9);
        assert!((col.steel_area_mm2() - 2500.0).abs() < 1e-9);
    }

    #[test]
    fn test_column_calculation() {
        let result = calculate(&test_column(), &materials(), &mut CalculationLog::new()).unwrap();
        // 0.52 × (0.85 × 30 × 247500 + 400 × 2500) / 1000 = 3801.85
        assert!((result.design_strength_kn - 3801.85).abs() < 0.01);
        assert!((result.utilization - 2080.0 / 3801.85).abs() < 1e-4);
        assert!(result.passes());
    }

    #[test]
    fn test_overloaded_column_flagged() {
        let mut col = test_column();
        col.axial_load_kn = 5000.0;
        let mut log = CalculationLog::new();
        let result = calculate(&col, &materials(), &mut log).unwrap();
        assert!(!result.passes());
        assert_eq!(log.unverified().count(), 1);
    }

    #[test]
    fn test_axial_demand() {
        let mut log = CalculationLog::new();
        let pu = axial_demand(16.0, 25.0, 5, &mut log).unwrap();
        assert!((pu - 2000.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_input() {
        let mut col = test_column();
        col.width_mm = -5.0;
        assert!(calculate(&col, &materials(), &mut CalculationLog::new()).is_err());

        let mut col = test_column();
        col.reinforcement_ratio = 0.12;
        assert!(calculate(&col, &materials(), &mut CalculationLog::new()).is_err());
    }

    #[test]
    fn test_serialization() {
        let col = test_column();
        let json = serde_json::to_string_pretty(&col).unwrap();
        let roundtrip: ColumnInput = serde_json::from_str(&json).unwrap();
        assert_eq!(col, roundtrip);
    }
}
