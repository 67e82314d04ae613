//! # Project Data Structures
//!
//! [`ProjectData`] bundles everything the engine needs about a building;
//! [`ValidationContext`] carries the project metadata the validators consult
//! (occupancy, seismic zone, importance category, engineer license, risk).
//!
//! ## Structure
//!
//! ```text
//! ProjectData
//! ├── geometry: StructuralGeometry (m)
//! ├── materials: MaterialProperties (concrete + steel, MPa)
//! └── loads: LoadConditions (kN/m², seismic parameters)
//!
//! ValidationContext
//! ├── project_type, seismic_zone, importance_category
//! ├── engineer_license
//! └── project_value, occupancy_count, location
//! ```
//!
//! Both are read-only during a validation run.

use serde::{Deserialize, Serialize};

use crate::geometry::StructuralGeometry;
use crate::loads::LoadConditions;
use crate::materials::MaterialProperties;

/// Input bundle for validation and analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectData {
    /// Project name for reports
    #[serde(default)]
    pub name: String,

    /// Building dimensions (m)
    pub geometry: StructuralGeometry,

    /// Concrete and steel properties
    pub materials: MaterialProperties,

    /// Area loads and seismic input
    pub loads: LoadConditions,
}

/// Seismic hazard zone classification used for screening
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeismicZone {
    Low,
    #[default]
    Moderate,
    High,
}

/// Risk (importance) category per SNI 1726:2019 Tabel 3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ImportanceCategory {
    I,
    #[default]
    II,
    III,
    IV,
}

impl ImportanceCategory {
    /// Seismic importance factor Ie (SNI 1726:2019 Tabel 4)
    pub fn importance_factor(&self) -> f64 {
        match self {
            ImportanceCategory::I | ImportanceCategory::II => 1.0,
            ImportanceCategory::III => 1.25,
            ImportanceCategory::IV => 1.5,
        }
    }

    /// Categories III and IV (assembly, essential facilities)
    pub fn is_elevated(&self) -> bool {
        matches!(self, ImportanceCategory::III | ImportanceCategory::IV)
    }
}

/// Project metadata consulted by the validators.
///
/// ## JSON Example
///
/// ```json
/// {
///   "project_type": "office",
///   "seismic_zone": "high",
///   "importance_category": "II",
///   "engineer_license": "ENG-001",
///   "project_value": 500000.0,
///   "occupancy_count": 80,
///   "location": "Bandung"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationContext {
    /// Occupancy / project type (e.g., "office", "residential")
    pub project_type: String,

    /// Seismic zone classification
    #[serde(default)]
    pub seismic_zone: SeismicZone,

    /// Risk category
    #[serde(default)]
    pub importance_category: ImportanceCategory,

    /// Responsible engineer's license id (STRI / SKK)
    #[serde(default)]
    pub engineer_license: Option<String>,

    /// Project value
    #[serde(default)]
    pub project_value: f64,

    /// Expected number of occupants
    #[serde(default)]
    pub occupancy_count: u32,

    /// Site location (city / regency)
    #[serde(default)]
    pub location: String,
}

impl ValidationContext {
    /// Context with defaults for everything but the project type
    pub fn new(project_type: impl Into<String>) -> Self {
        ValidationContext {
            project_type: project_type.into(),
            seismic_zone: SeismicZone::default(),
            importance_category: ImportanceCategory::default(),
            engineer_license: None,
            project_value: 0.0,
            occupancy_count: 0,
            location: String::new(),
        }
    }

    /// Set the engineer license (builder pattern)
    pub fn with_license(mut self, license: impl Into<String>) -> Self {
        self.engineer_license = Some(license.into());
        self
    }

    /// Whether a non-blank license id is present
    pub fn has_license(&self) -> bool {
        self.engineer_license.as_deref().is_some_and(|l| !l.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_importance_factors() {
        assert_eq!(ImportanceCategory::II.importance_factor(), 1.0);
        assert_eq!(ImportanceCategory::III.importance_factor(), 1.25);
        assert_eq!(ImportanceCategory::IV.importance_factor(), 1.5);
        assert!(ImportanceCategory::IV.is_elevated());
        assert!(!ImportanceCategory::I.is_elevated());
    }

    #[test]
    fn test_importance_category_serialization() {
        let json = serde_json::to_string(&ImportanceCategory::III).unwrap();
        assert_eq!(json, "\"III\"");
        let roundtrip: ImportanceCategory = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, ImportanceCategory::III);
    }

    #[test]
    fn test_context_defaults() {
        let ctx: ValidationContext = serde_json::from_str(r#"{"project_type": "office"}"#).unwrap();
        assert_eq!(ctx.seismic_zone, SeismicZone::Moderate);
        assert_eq!(ctx.importance_category, ImportanceCategory::II);
        assert!(!ctx.has_license());
    }

    #[test]
    fn test_license_presence() {
        assert!(ValidationContext::new("office").with_license("ENG-001").has_license());
        assert!(!ValidationContext::new("office").with_license("  ").has_license());
    }
}
