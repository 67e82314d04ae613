//! # Materials
//!
//! Concrete and reinforcing steel definitions used by both the validators
//! and the calculators.
//!
//! ## Example
//!
//! ```rust
//! use sni_core::materials::{ConcreteProperties, MaterialProperties, SteelGrade, SteelProperties};
//!
//! let materials = MaterialProperties {
//!     concrete: ConcreteProperties::new(30.0).with_certificate("LAB-01"),
//!     steel: SteelProperties::from_grade(SteelGrade::BjTS40).with_certificate("MILL-77"),
//! };
//! assert!(materials.validate().is_ok());
//! ```

pub mod concrete;
pub mod steel;

pub use concrete::ConcreteProperties;
pub use steel::{SteelGrade, SteelProperties};

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;

/// Material pair for a reinforced-concrete frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperties {
    pub concrete: ConcreteProperties,
    pub steel: SteelProperties,
}

impl MaterialProperties {
    /// Contract checks for both materials
    pub fn validate(&self) -> CalcResult<()> {
        self.concrete.validate()?;
        self.steel.validate()
    }
}
