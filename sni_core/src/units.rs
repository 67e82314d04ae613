//! # Unit Types
//!
//! Type-safe wrappers for the SI units used by SNI calculations. These are
//! plain `f64` newtypes that serialize as bare numbers.
//!
//! ## Mixed-unit convention
//!
//! Building-level geometry is entered in **meters** and area loads in
//! **kN/m²**. Member-level calculators (flexure, shear, drift, column axial)
//! work in **millimeters**, **N/mm² (MPa)**, **kN** and **kN·m**. The analysis
//! orchestrator performs every meter → millimeter conversion through these
//! types so the boundary is explicit:
//!
//! | Quantity     | Building level | Member level   |
//! |--------------|----------------|----------------|
//! | Length       | m              | mm             |
//! | Force        | kN             | kN (N inside)  |
//! | Moment       | kN·m           | kN·m (N·mm inside) |
//! | Stress       | -              | MPa            |
//!
//! ## Example
//!
//! ```rust
//! use sni_core::units::{Meters, Millimeters, KiloNewtonMeters, NewtonMillimeters};
//!
//! let story = Meters(3.0);
//! let story_mm: Millimeters = story.into();
//! assert_eq!(story_mm.0, 3000.0);
//!
//! let mu: NewtonMillimeters = KiloNewtonMeters(150.0).into();
//! assert_eq!(mu.0, 150.0e6);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Length Units
// ============================================================================

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

// ============================================================================
// Force Units
// ============================================================================

/// Force in newtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Newtons(pub f64);

/// Force in kilonewtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloNewtons(pub f64);

impl From<Newtons> for KiloNewtons {
    fn from(n: Newtons) -> Self {
        KiloNewtons(n.0 / 1000.0)
    }
}

impl From<KiloNewtons> for Newtons {
    fn from(kn: KiloNewtons) -> Self {
        Newtons(kn.0 * 1000.0)
    }
}

// ============================================================================
// Moment Units
// ============================================================================

/// Moment in kilonewton-meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloNewtonMeters(pub f64);

/// Moment in newton-millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewtonMillimeters(pub f64);

impl From<KiloNewtonMeters> for NewtonMillimeters {
    fn from(knm: KiloNewtonMeters) -> Self {
        NewtonMillimeters(knm.0 * 1.0e6)
    }
}

impl From<NewtonMillimeters> for KiloNewtonMeters {
    fn from(nmm: NewtonMillimeters) -> Self {
        KiloNewtonMeters(nmm.0 / 1.0e6)
    }
}

macro_rules! impl_value {
    ($($type:ty),+) => {
        $(
            impl $type {
                /// Get the raw f64 value
                pub fn value(self) -> f64 {
                    self.0
                }
            }
        )+
    };
}

impl_value!(Meters, Millimeters, Newtons, KiloNewtons, KiloNewtonMeters, NewtonMillimeters);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meters_to_millimeters() {
        let mm: Millimeters = Meters(3.2).into();
        assert!((mm.0 - 3200.0).abs() < 1e-9);
        let back: Meters = mm.into();
        assert!((back.0 - 3.2).abs() < 1e-12);
    }

    #[test]
    fn test_force_and_moment_conversions() {
        let n: Newtons = KiloNewtons(1.5).into();
        assert_eq!(n.0, 1500.0);
        let knm: KiloNewtonMeters = NewtonMillimeters(2.5e8).into();
        assert!((knm.0 - 250.0).abs() < 1e-9);
        assert_eq!(KiloNewtons::from(Newtons(3801.85e3)).value(), 3801.85);
    }

    #[test]
    fn test_serialization() {
        let m = Meters(12.5);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "12.5");
        let roundtrip: Meters = serde_json::from_str(&json).unwrap();
        assert_eq!(m, roundtrip);
    }
}
