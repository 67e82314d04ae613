//! SNI 1727:2020 strength design load combinations (Pasal 2.3.1)
//!
//! Which combinations take part in a run is decided by an explicit table,
//! [`DEFAULT_ACTIVE_COMBINATIONS`], or by a caller-supplied selection. A
//! combination is never treated as active merely because no selection exists.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::load_types::LoadType;
use super::LoadCase;
use crate::errors::{CalcError, CalcResult};

/// A load combination with factors for each load type
///
/// # Example
/// ```
/// use sni_core::loads::{LoadCase, LoadCombination, LoadType};
///
/// let combo = LoadCombination::new("U2a", "1.2D + 1.6L + 0.5Lr")
///     .with_factor(LoadType::Dead, 1.2)
///     .with_factor(LoadType::Live, 1.6)
///     .with_factor(LoadType::LiveRoof, 0.5);
///
/// let case = LoadCase::new("Floor")
///     .with_load(LoadType::Dead, 5.0)
///     .with_load(LoadType::Live, 4.0);
///
/// assert!((combo.apply(&case) - 12.4).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadCombination {
    /// Combination identifier (e.g., "U1", "U4a")
    pub name: String,

    /// Human-readable equation (e.g., "1.2D + 1.6L + 0.5Lr")
    pub equation: String,

    /// Load factors keyed by load type
    pub factors: BTreeMap<LoadType, f64>,
}

impl LoadCombination {
    /// Create a new load combination
    pub fn new(name: impl Into<String>, equation: impl Into<String>) -> Self {
        LoadCombination {
            name: name.into(),
            equation: equation.into(),
            factors: BTreeMap::new(),
        }
    }

    /// Add a load factor (builder pattern)
    pub fn with_factor(mut self, load_type: LoadType, factor: f64) -> Self {
        self.factors.insert(load_type, factor);
        self
    }

    /// Apply this combination to a LoadCase, returning the total factored load
    ///
    /// Load types missing from either side contribute zero. Factors are
    /// summed in load-type order so the result is reproducible bit for bit.
    pub fn apply(&self, case: &LoadCase) -> f64 {
        self.factors
            .iter()
            .map(|(load_type, factor)| factor * case.get(*load_type))
            .sum()
    }

    /// Get the factor for a specific load type (0.0 if not in combination)
    pub fn get_factor(&self, load_type: LoadType) -> f64 {
        self.factors.get(&load_type).copied().unwrap_or(0.0)
    }

    /// Label for reports, e.g. "U2a: 1.2D + 1.6L + 0.5Lr"
    pub fn label(&self) -> String {
        format!("{}: {}", self.name, self.equation)
    }
}

/// Combinations active when the caller makes no explicit selection.
///
/// Every basic strength combination participates by default, so the
/// governing case is the envelope of Pasal 2.3.1.
pub const DEFAULT_ACTIVE_COMBINATIONS: &[&str] = &[
    "U1", "U2a", "U2b", "U3a", "U3b", "U3c", "U3d", "U4a", "U4b", "U5", "U6", "U7",
];

/// All SNI 1727:2020 basic strength combinations.
///
/// # Example
/// ```
/// use sni_core::loads::{sni1727_combinations, LoadType};
///
/// let combos = sni1727_combinations();
/// let u1 = combos.iter().find(|c| c.name == "U1").unwrap();
/// assert_eq!(u1.get_factor(LoadType::Dead), 1.4);
/// ```
pub fn sni1727_combinations() -> Vec<LoadCombination> {
    vec![
        // 1. 1.4D
        LoadCombination::new("U1", "1.4D")
            .with_factor(LoadType::Dead, 1.4),

        // 2. 1.2D + 1.6L + 0.5(Lr or R)
        LoadCombination::new("U2a", "1.2D + 1.6L + 0.5Lr")
            .with_factor(LoadType::Dead, 1.2)
            .with_factor(LoadType::Live, 1.6)
            .with_factor(LoadType::LiveRoof, 0.5),
        LoadCombination::new("U2b", "1.2D + 1.6L + 0.5R")
            .with_factor(LoadType::Dead, 1.2)
            .with_factor(LoadType::Live, 1.6)
            .with_factor(LoadType::Rain, 0.5),

        // 3. 1.2D + 1.6(Lr or R) + (L or 0.5W)
        LoadCombination::new("U3a", "1.2D + 1.6Lr + L")
            .with_factor(LoadType::Dead, 1.2)
            .with_factor(LoadType::LiveRoof, 1.6)
            .with_factor(LoadType::Live, 1.0),
        LoadCombination::new("U3b", "1.2D + 1.6Lr + 0.5W")
            .with_factor(LoadType::Dead, 1.2)
            .with_factor(LoadType::LiveRoof, 1.6)
            .with_factor(LoadType::Wind, 0.5),
        LoadCombination::new("U3c", "1.2D + 1.6R + L")
            .with_factor(LoadType::Dead, 1.2)
            .with_factor(LoadType::Rain, 1.6)
            .with_factor(LoadType::Live, 1.0),
        LoadCombination::new("U3d", "1.2D + 1.6R + 0.5W")
            .with_factor(LoadType::Dead, 1.2)
            .with_factor(LoadType::Rain, 1.6)
            .with_factor(LoadType::Wind, 0.5),

        // 4. 1.2D + 1.0W + L + 0.5(Lr or R)
        LoadCombination::new("U4a", "1.2D + 1.0W + L + 0.5Lr")
            .with_factor(LoadType::Dead, 1.2)
            .with_factor(LoadType::Wind, 1.0)
            .with_factor(LoadType::Live, 1.0)
            .with_factor(LoadType::LiveRoof, 0.5),
        LoadCombination::new("U4b", "1.2D + 1.0W + L + 0.5R")
            .with_factor(LoadType::Dead, 1.2)
            .with_factor(LoadType::Wind, 1.0)
            .with_factor(LoadType::Live, 1.0)
            .with_factor(LoadType::Rain, 0.5),

        // 5. 0.9D + 1.0W
        LoadCombination::new("U5", "0.9D + 1.0W")
            .with_factor(LoadType::Dead, 0.9)
            .with_factor(LoadType::Wind, 1.0),

        // 6. 1.2D + 1.0E + L
        LoadCombination::new("U6", "1.2D + 1.0E + L")
            .with_factor(LoadType::Dead, 1.2)
            .with_factor(LoadType::Seismic, 1.0)
            .with_factor(LoadType::Live, 1.0),

        // 7. 0.9D + 1.0E
        LoadCombination::new("U7", "0.9D + 1.0E")
            .with_factor(LoadType::Dead, 0.9)
            .with_factor(LoadType::Seismic, 1.0),
    ]
}

/// Resolve the combinations taking part in a run.
///
/// `None` yields the [`DEFAULT_ACTIVE_COMBINATIONS`] table. A selection keeps
/// the standard order; an unknown id or an empty selection is an input error.
pub fn active_combinations(selection: Option<&[String]>) -> CalcResult<Vec<LoadCombination>> {
    let all = sni1727_combinations();
    match selection {
        None => Ok(all
            .into_iter()
            .filter(|c| DEFAULT_ACTIVE_COMBINATIONS.contains(&c.name.as_str()))
            .collect()),
        Some(ids) => {
            if ids.is_empty() {
                return Err(CalcError::invalid_input(
                    "selected_combinations",
                    "[]",
                    "Select at least one load combination or omit the selection",
                ));
            }
            if let Some(unknown) = ids.iter().find(|id| !all.iter().any(|c| &c.name == *id)) {
                return Err(CalcError::invalid_input(
                    "selected_combinations",
                    unknown.clone(),
                    "Unknown SNI 1727 combination id",
                ));
            }
            Ok(all.into_iter().filter(|c| ids.contains(&c.name)).collect())
        }
    }
}

/// Find the governing (maximum) load combination result
///
/// Returns the maximum factored load and the governing combination label.
/// Ties keep the first combination in standard order.
///
/// # Example
/// ```
/// use sni_core::loads::{find_governing_combination, sni1727_combinations, LoadCase, LoadType};
///
/// let case = LoadCase::new("Floor")
///     .with_load(LoadType::Dead, 5.0)
///     .with_load(LoadType::Live, 4.0);
///
/// let (wu, name) = find_governing_combination(&case, &sni1727_combinations());
/// assert!((wu - 12.4).abs() < 1e-9);
/// assert!(name.starts_with("U2"));
/// ```
pub fn find_governing_combination(case: &LoadCase, combinations: &[LoadCombination]) -> (f64, String) {
    let mut governing: Option<(f64, &LoadCombination)> = None;
    for combo in combinations {
        let value = combo.apply(case);
        match governing {
            Some((best, _)) if value <= best => {}
            _ => governing = Some((value, combo)),
        }
    }
    governing
        .map(|(value, combo)| (value, combo.label()))
        .unwrap_or((0.0, "None".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor_case() -> LoadCase {
        LoadCase::new("Floor")
            .with_load(LoadType::Dead, 5.0)
            .with_load(LoadType::Live, 4.0)
    }

    #[test]
    fn test_default_table_covers_every_combination() {
        let all = sni1727_combinations();
        assert_eq!(all.len(), DEFAULT_ACTIVE_COMBINATIONS.len());
        let active = active_combinations(None).unwrap();
        assert_eq!(active.len(), all.len());
    }

    #[test]
    fn test_selection_restricts_active_set() {
        let selection = vec!["U1".to_string(), "U6".to_string()];
        let active = active_combinations(Some(&selection)).unwrap();
        let names: Vec<_> = active.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["U1", "U6"]);
    }

    #[test]
    fn test_unknown_selection_rejected() {
        let selection = vec!["U99".to_string()];
        let err = active_combinations(Some(&selection)).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(active_combinations(Some(&[])).is_err());
    }

    #[test]
    fn test_governing_gravity() {
        let (wu, name) = find_governing_combination(&floor_case(), &sni1727_combinations());
        // 1.2·5 + 1.6·4 = 12.4 beats 1.4·5 = 7.0
        assert!((wu - 12.4).abs() < 1e-9);
        assert_eq!(name, "U2a: 1.2D + 1.6L + 0.5Lr");
    }

    #[test]
    fn test_selection_changes_governing() {
        let selection = vec!["U1".to_string()];
        let active = active_combinations(Some(&selection)).unwrap();
        let (wu, name) = find_governing_combination(&floor_case(), &active);
        assert!((wu - 7.0).abs() < 1e-9);
        assert!(name.starts_with("U1"));
    }

    #[test]
    fn test_wind_enters_u4() {
        let case = floor_case().with_load(LoadType::Wind, 10.0);
        let (wu, name) = find_governing_combination(&case, &sni1727_combinations());
        // U4a: 6 + 10 + 4 = 20
        assert!((wu - 20.0).abs() < 1e-9);
        assert!(name.starts_with("U4a"));
    }

    #[test]
    fn test_empty_combinations() {
        let (wu, name) = find_governing_combination(&floor_case(), &[]);
        assert_eq!(wu, 0.0);
        assert_eq!(name, "None");
    }
}
