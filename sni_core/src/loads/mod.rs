//! Loads, load combinations and seismic input per SNI 1727:2020 / SNI 1726:2019
//!
//! # Overview
//!
//! - [`LoadConditions`] - Area loads and seismic parameters for a project
//! - [`LoadType`] - SNI 1727 load categories (D, L, Lr, R, W, E)
//! - [`LoadCase`] - Load values for a specific scenario
//! - [`LoadCombination`] - Factors for the strength design combinations
//! - [`OccupancyType`] - Occupancy with its minimum uniform live load
//!
//! # Example
//!
//! ```
//! use sni_core::loads::{active_combinations, find_governing_combination, LoadCase, LoadType};
//!
//! let floor = LoadCase::new("Typical floor")
//!     .with_load(LoadType::Dead, 5.0)   // kN/m²
//!     .with_load(LoadType::Live, 4.0);  // kN/m²
//!
//! let combos = active_combinations(None).unwrap();
//! let (wu, governing) = find_governing_combination(&floor, &combos);
//! assert!(wu > 9.0);
//! assert!(!governing.is_empty());
//! ```

pub mod combinations;
pub mod load_types;
pub mod seismic;

pub use combinations::{
    active_combinations, find_governing_combination, sni1727_combinations, LoadCombination,
    DEFAULT_ACTIVE_COMBINATIONS,
};
pub use load_types::LoadType;
pub use seismic::{SeismicParameters, SiteClass};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Live load used when the occupancy type is not recognized (kN/m²)
pub const DEFAULT_MIN_LIVE_LOAD: f64 = 4.0;

/// Occupancy types with a tabulated minimum live load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OccupancyType {
    Residential,
    Office,
    Retail,
    Industrial,
    Warehouse,
}

impl OccupancyType {
    /// Minimum uniformly distributed live load (kN/m²)
    pub fn minimum_live_load(&self) -> f64 {
        match self {
            OccupancyType::Residential => 2.0,
            OccupancyType::Office => 4.0,
            OccupancyType::Retail => 5.0,
            OccupancyType::Industrial => 6.0,
            OccupancyType::Warehouse => 12.0,
        }
    }

    /// Parse from a project-type string, ignoring case and surrounding space
    pub fn from_str_flexible(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "residential" | "hunian" | "rumah" => Some(OccupancyType::Residential),
            "office" | "kantor" => Some(OccupancyType::Office),
            "retail" | "commercial" | "toko" => Some(OccupancyType::Retail),
            "industrial" | "industri" => Some(OccupancyType::Industrial),
            "warehouse" | "gudang" => Some(OccupancyType::Warehouse),
            _ => None,
        }
    }
}

/// Code-minimum live load for a project-type string (kN/m²).
///
/// Unknown types fall back to [`DEFAULT_MIN_LIVE_LOAD`].
pub fn minimum_live_load(project_type: &str) -> f64 {
    OccupancyType::from_str_flexible(project_type)
        .map(|o| o.minimum_live_load())
        .unwrap_or(DEFAULT_MIN_LIVE_LOAD)
}

/// Area loads (kN/m²) and seismic parameters for a project.
///
/// ## JSON Example
///
/// ```json
/// {
///   "dead_load": 5.0,
///   "live_load": 4.0,
///   "wind_load": 0.8,
///   "seismic_parameters": {
///     "ss": 1.2, "s1": 0.5, "site_class": "SD",
///     "importance_factor": 1.0, "response_modification": 8.0
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadConditions {
    /// Superimposed dead load (kN/m²)
    pub dead_load: f64,

    /// Floor live load (kN/m²)
    pub live_load: f64,

    /// Design wind pressure (kN/m²)
    #[serde(default)]
    pub wind_load: f64,

    /// Seismic input
    pub seismic_parameters: SeismicParameters,
}

impl LoadConditions {
    /// Contract checks before calculation
    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in [("dead_load", self.dead_load), ("live_load", self.live_load), ("wind_load", self.wind_load)] {
            if !(value >= 0.0) || !value.is_finite() {
                return Err(CalcError::invalid_input(field, value.to_string(), "Area load must be a non-negative number"));
            }
        }
        self.seismic_parameters.validate()
    }

    /// Floor load case with the given slab self-weight added to dead load
    pub fn floor_case(&self, self_weight_kn_m2: f64) -> LoadCase {
        LoadCase::new("Floor")
            .with_load(LoadType::Dead, self.dead_load + self_weight_kn_m2)
            .with_load(LoadType::Live, self.live_load)
    }
}

/// A collection of load values by type for a specific loading scenario
///
/// Stores unfactored (service) values; combine them with [`LoadCombination`].
///
/// # Example
/// ```
/// use sni_core::loads::{LoadCase, LoadType};
///
/// let case = LoadCase::new("Typical Floor")
///     .with_load(LoadType::Dead, 5.0)
///     .with_load(LoadType::Live, 2.0);
///
/// assert_eq!(case.get(LoadType::Dead), 5.0);
/// assert_eq!(case.get(LoadType::Wind), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadCase {
    /// Label for this load case
    pub label: String,

    /// Load values keyed by type (kN/m² at floor level)
    pub loads: BTreeMap<LoadType, f64>,
}

impl LoadCase {
    /// Create a new empty load case with a label
    pub fn new(label: impl Into<String>) -> Self {
        LoadCase {
            label: label.into(),
            loads: BTreeMap::new(),
        }
    }

    /// Add or update a load value (builder pattern)
    pub fn with_load(mut self, load_type: LoadType, value: f64) -> Self {
        self.loads.insert(load_type, value);
        self
    }

    /// Get the load value for a type, defaulting to 0.0 if not set
    pub fn get(&self, load_type: LoadType) -> f64 {
        self.loads.get(&load_type).copied().unwrap_or(0.0)
    }

    /// Total unfactored gravity load
    pub fn total_gravity(&self) -> f64 {
        self.loads
            .iter()
            .filter(|(lt, _)| lt.is_gravity())
            .map(|(_, v)| v)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_loads() -> LoadConditions {
        LoadConditions {
            dead_load: 5.0,
            live_load: 4.0,
            wind_load: 0.0,
            seismic_parameters: SeismicParameters::new(1.2, 0.5, SiteClass::SD),
        }
    }

    #[test]
    fn test_minimum_live_loads() {
        assert_eq!(minimum_live_load("residential"), 2.0);
        assert_eq!(minimum_live_load("Office"), 4.0);
        assert_eq!(minimum_live_load("retail"), 5.0);
        assert_eq!(minimum_live_load("industrial"), 6.0);
        assert_eq!(minimum_live_load("warehouse"), 12.0);
        assert_eq!(minimum_live_load("stadium"), DEFAULT_MIN_LIVE_LOAD);
    }

    #[test]
    fn test_floor_case_adds_self_weight() {
        let case = scenario_loads().floor_case(3.6);
        assert!((case.get(LoadType::Dead) - 8.6).abs() < 1e-12);
        assert_eq!(case.get(LoadType::Live), 4.0);
        assert!((case.total_gravity() - 12.6).abs() < 1e-12);
    }

    #[test]
    fn test_validate_rejects_negative_load() {
        let mut loads = scenario_loads();
        assert!(loads.validate().is_ok());
        loads.dead_load = -1.0;
        assert!(loads.validate().is_err());
    }

    #[test]
    fn test_load_case_serialization() {
        let case = LoadCase::new("Floor")
            .with_load(LoadType::Dead, 5.0)
            .with_load(LoadType::Live, 4.0);
        let json = serde_json::to_string(&case).unwrap();
        let parsed: LoadCase = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, case);
    }

    #[test]
    fn test_occupancy_serialization() {
        let json = serde_json::to_string(&OccupancyType::Warehouse).unwrap();
        assert_eq!(json, "\"warehouse\"");
    }
}
