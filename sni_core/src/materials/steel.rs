//! Reinforcing steel properties and grades (SNI 2052:2017)
//!
//! Indonesian deformed bar grades are designated `BjTS-xx`, where `xx` is the
//! nominal yield strength in kgf/mm² (×10 MPa).

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Known reinforcing steel grades
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SteelGrade {
    #[serde(rename = "BjTS-24")]
    BjTS24,
    #[serde(rename = "BjTS-37")]
    BjTS37,
    #[serde(rename = "BjTS-40")]
    BjTS40,
    #[serde(rename = "BjTS-50")]
    BjTS50,
}

impl SteelGrade {
    pub const ALL: [SteelGrade; 4] = [SteelGrade::BjTS24, SteelGrade::BjTS37, SteelGrade::BjTS40, SteelGrade::BjTS50];

    /// Designation string (e.g., "BjTS-40")
    pub fn designation(&self) -> &'static str {
        match self {
            SteelGrade::BjTS24 => "BjTS-24",
            SteelGrade::BjTS37 => "BjTS-37",
            SteelGrade::BjTS40 => "BjTS-40",
            SteelGrade::BjTS50 => "BjTS-50",
        }
    }

    /// Nominal yield strength for the grade (MPa)
    pub fn nominal_fy(&self) -> f64 {
        match self {
            SteelGrade::BjTS24 => 240.0,
            SteelGrade::BjTS37 => 370.0,
            SteelGrade::BjTS40 => 400.0,
            SteelGrade::BjTS50 => 500.0,
        }
    }

    /// Parse from common spellings ("BjTS-40", "bjts40", "BJTS 40")
    pub fn from_str_flexible(s: &str) -> Option<Self> {
        match s.to_uppercase().replace([' ', '-', '_'], "").as_str() {
            "BJTS24" => Some(SteelGrade::BjTS24),
            "BJTS37" => Some(SteelGrade::BjTS37),
            "BJTS40" => Some(SteelGrade::BjTS40),
            "BJTS50" => Some(SteelGrade::BjTS50),
            _ => None,
        }
    }
}

impl std::fmt::Display for SteelGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.designation())
    }
}

/// Properties of the reinforcing steel.
///
/// `fu > fy` is a ductility requirement checked by the steel validator,
/// not enforced by this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SteelProperties {
    /// Yield strength fy (MPa)
    pub fy: f64,

    /// Ultimate tensile strength fu (MPa)
    pub fu: f64,

    /// Modulus of elasticity Es (MPa)
    pub elastic_modulus: f64,

    /// Density (kg/m³)
    pub density: f64,

    /// Grade designation as supplied (e.g., "BjTS-40")
    #[serde(default)]
    pub grade: Option<String>,

    /// Mill certificate reference
    #[serde(default)]
    pub mill_certificate: Option<String>,
}

impl SteelProperties {
    /// Steel with the given strengths and standard modulus/density.
    pub fn new(fy: f64, fu: f64) -> Self {
        SteelProperties {
            fy,
            fu,
            elastic_modulus: 200_000.0,
            density: 7850.0,
            grade: None,
            mill_certificate: None,
        }
    }

    /// Steel at the nominal strength of a known grade (fu = 1.35·fy).
    pub fn from_grade(grade: SteelGrade) -> Self {
        let fy = grade.nominal_fy();
        SteelProperties {
            grade: Some(grade.designation().to_string()),
            ..SteelProperties::new(fy, 1.35 * fy)
        }
    }

    /// Attach a mill certificate reference (builder pattern)
    pub fn with_certificate(mut self, certificate: impl Into<String>) -> Self {
        self.mill_certificate = Some(certificate.into());
        self
    }

    /// fu / fy, or 0 when fy is not positive
    pub fn strength_ratio(&self) -> f64 {
        if self.fy > 0.0 {
            self.fu / self.fy
        } else {
            0.0
        }
    }

    /// Recognized grade, if the designation matches the table
    pub fn known_grade(&self) -> Option<SteelGrade> {
        self.grade.as_deref().and_then(SteelGrade::from_str_flexible)
    }

    /// Whether a non-blank certificate reference is present
    pub fn has_certificate(&self) -> bool {
        self.mill_certificate.as_deref().is_some_and(|c| !c.trim().is_empty())
    }

    /// Contract checks before calculation
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.fy > 0.0) {
            return Err(CalcError::invalid_input("steel.fy", self.fy.to_string(), "Yield strength must be positive"));
        }
        if !(self.fu > 0.0) {
            return Err(CalcError::invalid_input("steel.fu", self.fu.to_string(), "Tensile strength must be positive"));
        }
        Ok(())
    }
}
