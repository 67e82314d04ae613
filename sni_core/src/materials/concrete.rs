//! Concrete material properties (SNI 2847:2019)

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Default Poisson's ratio for normal-weight concrete
const CONCRETE_POISSON: f64 = 0.2;

/// Normal-weight concrete density (kg/m³)
const CONCRETE_DENSITY_KG_M3: f64 = 2400.0;

/// Properties of the structural concrete.
///
/// ## JSON Example
///
/// ```json
/// {
///   "fc": 30.0,
///   "density": 2400.0,
///   "elastic_modulus": 25742.96,
///   "poisson_ratio": 0.2,
///   "test_certificate": "LAB-2025-0117"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcreteProperties {
    /// Specified compressive strength fc' (MPa)
    pub fc: f64,

    /// Density (kg/m³)
    pub density: f64,

    /// Modulus of elasticity Ec (MPa)
    pub elastic_modulus: f64,

    /// Poisson's ratio
    pub poisson_ratio: f64,

    /// Cylinder test certificate reference
    #[serde(default)]
    pub test_certificate: Option<String>,
}

impl ConcreteProperties {
    /// Normal-weight concrete of strength `fc` with Ec = 4700·√fc'.
    pub fn new(fc: f64) -> Self {
        ConcreteProperties {
            fc,
            density: CONCRETE_DENSITY_KG_M3,
            elastic_modulus: Self::modulus_for_strength(fc),
            poisson_ratio: CONCRETE_POISSON,
            test_certificate: None,
        }
    }

    /// Attach a test certificate reference (builder pattern)
    pub fn with_certificate(mut self, certificate: impl Into<String>) -> Self {
        self.test_certificate = Some(certificate.into());
        self
    }

    /// Ec = 4700·√fc' (MPa), SNI 2847 Pasal 19.2.2.1
    pub fn modulus_for_strength(fc: f64) -> f64 {
        4700.0 * fc.max(0.0).sqrt()
    }

    /// Unit weight γc (kN/m³) from density and gravity
    pub fn unit_weight_kn_m3(&self, gravity: f64) -> f64 {
        self.density * gravity / 1000.0
    }

    /// Whether a non-blank certificate reference is present
    pub fn has_certificate(&self) -> bool {
        self.test_certificate.as_deref().is_some_and(|c| !c.trim().is_empty())
    }

    /// Contract checks before calculation
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.fc > 0.0) {
            return Err(CalcError::invalid_input("concrete.fc", self.fc.to_string(), "Compressive strength must be positive"));
        }
        if !(self.density > 0.0) {
            return Err(CalcError::invalid_input("concrete.density", self.density.to_string(), "Density must be positive"));
        }
        if !(self.elastic_modulus > 0.0) {
            return Err(CalcError::invalid_input(
                "concrete.elastic_modulus",
                self.elastic_modulus.to_string(),
                "Elastic modulus must be positive",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modulus_from_strength() {
        let c = ConcreteProperties::new(25.0);
        assert!((c.elastic_modulus - 23_500.0).abs() < 1e-9);
    }

    #[test]
    fn test_unit_weight() {
        let c = ConcreteProperties::new(30.0);
        assert!((c.unit_weight_kn_m3(9.81) - 23.544).abs() < 1e-9);
    }

    #[test]
    fn test_certificate_presence() {
        let c = ConcreteProperties::new(30.0);
        assert!(!c.has_certificate());
        assert!(!c.clone().with_certificate("   ").has_certificate());
        assert!(c.with_certificate("LAB-01").has_certificate());
    }

    #[test]
    fn test_validate() {
        assert!(ConcreteProperties::new(30.0).validate().is_ok());
        assert!(ConcreteProperties::new(0.0).validate().is_err());
    }
}
