//! Seismic input parameters (SNI 1726:2019)

use serde::{Deserialize, Serialize};

use crate::constants::constants;
use crate::errors::{CalcError, CalcResult};

/// Site class per SNI 1726:2019 Pasal 5.3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SiteClass {
    /// Hard rock
    SA,
    /// Rock
    SB,
    /// Very dense soil and soft rock
    SC,
    /// Stiff soil
    SD,
    /// Soft soil
    SE,
    /// Soils requiring site-specific investigation
    SF,
}

impl SiteClass {
    pub const ALL: [SiteClass; 6] = [SiteClass::SA, SiteClass::SB, SiteClass::SC, SiteClass::SD, SiteClass::SE, SiteClass::SF];

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            SiteClass::SA => "Hard rock",
            SiteClass::SB => "Rock",
            SiteClass::SC => "Very dense soil / soft rock",
            SiteClass::SD => "Stiff soil",
            SiteClass::SE => "Soft soil",
            SiteClass::SF => "Special soil (site-specific investigation)",
        }
    }
}

impl std::fmt::Display for SiteClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

fn default_deflection_amplification() -> f64 {
    constants().seismic.default_cd
}

/// Mapped spectral accelerations and system factors.
///
/// ## JSON Example
///
/// ```json
/// {
///   "ss": 1.2,
///   "s1": 0.5,
///   "site_class": "SD",
///   "importance_factor": 1.0,
///   "response_modification": 8.0,
///   "deflection_amplification": 5.5
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeismicParameters {
    /// Mapped short-period spectral acceleration Ss (g)
    pub ss: f64,

    /// Mapped 1-second spectral acceleration S1 (g)
    pub s1: f64,

    /// Site class
    pub site_class: SiteClass,

    /// Seismic importance factor Ie
    pub importance_factor: f64,

    /// Response modification coefficient R
    pub response_modification: f64,

    /// Deflection amplification factor Cd
    #[serde(default = "default_deflection_amplification")]
    pub deflection_amplification: f64,
}

impl SeismicParameters {
    /// Parameters for a special moment frame (R = 8, Cd = 5.5, Ie = 1.0)
    pub fn new(ss: f64, s1: f64, site_class: SiteClass) -> Self {
        SeismicParameters {
            ss,
            s1,
            site_class,
            importance_factor: 1.0,
            response_modification: 8.0,
            deflection_amplification: default_deflection_amplification(),
        }
    }

    /// R / Ie
    pub fn reduction_ratio(&self) -> f64 {
        self.response_modification / self.importance_factor
    }

    /// Contract checks before calculation
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.ss >= 0.0) || !(self.s1 >= 0.0) {
            return Err(CalcError::invalid_input(
                "seismic_parameters.ss/s1",
                format!("{} / {}", self.ss, self.s1),
                "Spectral accelerations cannot be negative",
            ));
        }
        if !(self.importance_factor > 0.0) {
            return Err(CalcError::invalid_input(
                "seismic_parameters.importance_factor",
                self.importance_factor.to_string(),
                "Importance factor must be positive",
            ));
        }
        if !(self.response_modification > 0.0) {
            return Err(CalcError::invalid_input(
                "seismic_parameters.response_modification",
                self.response_modification.to_string(),
                "Response modification coefficient must be positive",
            ));
        }
        if !(self.deflection_amplification > 0.0) {
            return Err(CalcError::invalid_input(
                "seismic_parameters.deflection_amplification",
                self.deflection_amplification.to_string(),
                "Deflection amplification factor must be positive",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_class_serialization() {
        let json = serde_json::to_string(&SiteClass::SF).unwrap();
        assert_eq!(json, "\"SF\"");
        let parsed: SiteClass = serde_json::from_str("\"SD\"").unwrap();
        assert_eq!(parsed, SiteClass::SD);
    }

    #[test]
    fn test_default_cd_applied() {
        let json = r#"{"ss": 0.8, "s1": 0.35, "site_class": "SC", "importance_factor": 1.0, "response_modification": 8.0}"#;
        let params: SeismicParameters = serde_json::from_str(json).unwrap();
        assert_eq!(params.deflection_amplification, 5.5);
        assert_eq!(params.reduction_ratio(), 8.0);
    }

    #[test]
    fn test_validate() {
        assert!(SeismicParameters::new(1.2, 0.5, SiteClass::SD).validate().is_ok());
        let mut bad = SeismicParameters::new(1.2, 0.5, SiteClass::SD);
        bad.response_modification = 0.0;
        assert!(bad.validate().is_err());
    }
}
