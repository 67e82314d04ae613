//! # Building Geometry
//!
//! Overall building dimensions. All lengths are in **meters**; member-level
//! calculators receive millimeters converted through [`crate::units`].

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Overall dimensions of the building frame.
///
/// ## JSON Example
///
/// ```json
/// {
///   "length": 25.0,
///   "width": 20.0,
///   "height": 15.0,
///   "floors": 5,
///   "bay_spacings": [5.0, 5.0, 5.0, 5.0, 5.0],
///   "foundation_depth": 2.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuralGeometry {
    /// Plan length (m)
    pub length: f64,

    /// Plan width (m)
    pub width: f64,

    /// Total height above base (m)
    pub height: f64,

    /// Number of stories (≥ 1)
    pub floors: u32,

    /// Column-line spacings (m). The largest governs beam design.
    #[serde(default)]
    pub bay_spacings: Vec<f64>,

    /// Typical story height (m). Defaults to `height / floors` when absent.
    #[serde(default)]
    pub story_height: Option<f64>,

    /// Foundation embedment depth (m)
    #[serde(default)]
    pub foundation_depth: f64,
}

impl StructuralGeometry {
    /// Create a geometry with uniform bays and a derived story height.
    pub fn new(length: f64, width: f64, height: f64, floors: u32, bay_spacing: f64) -> Self {
        StructuralGeometry {
            length,
            width,
            height,
            floors,
            bay_spacings: vec![bay_spacing],
            story_height: None,
            foundation_depth: 0.0,
        }
    }

    /// Check the geometric invariants: all lengths > 0, floors ≥ 1.
    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in [("length", self.length), ("width", self.width), ("height", self.height)] {
            if !(value > 0.0) || !value.is_finite() {
                return Err(CalcError::invalid_input(field, value.to_string(), "Dimension must be a positive number of meters"));
            }
        }
        if self.floors < 1 {
            return Err(CalcError::invalid_input("floors", self.floors.to_string(), "Building must have at least one floor"));
        }
        if self.bay_spacings.is_empty() {
            return Err(CalcError::missing_field("bay_spacings"));
        }
        if let Some(bad) = self.bay_spacings.iter().find(|s| !(**s > 0.0) || !s.is_finite()) {
            return Err(CalcError::invalid_input("bay_spacings", bad.to_string(), "Bay spacing must be positive"));
        }
        if let Some(h) = self.story_height {
            if !(h > 0.0) || !h.is_finite() {
                return Err(CalcError::invalid_input("story_height", h.to_string(), "Story height must be positive"));
            }
        }
        if self.foundation_depth < 0.0 {
            return Err(CalcError::invalid_input(
                "foundation_depth",
                self.foundation_depth.to_string(),
                "Foundation depth cannot be negative",
            ));
        }
        Ok(())
    }

    /// Average story height `height / floors` (m). Zero floors yields 0.
    pub fn average_story_height(&self) -> f64 {
        if self.floors == 0 {
            0.0
        } else {
            self.height / self.floors as f64
        }
    }

    /// Story height used for drift checks (m).
    pub fn typical_story_height(&self) -> f64 {
        self.story_height.unwrap_or_else(|| self.average_story_height())
    }

    /// Plan aspect ratio max(L, B) / min(L, B).
    pub fn aspect_ratio(&self) -> f64 {
        let long = self.length.max(self.width);
        let short = self.length.min(self.width);
        if short > 0.0 {
            long / short
        } else {
            f64::INFINITY
        }
    }

    /// Plan area per floor (m²)
    pub fn floor_area(&self) -> f64 {
        self.length * self.width
    }

    /// Governing (largest) bay spacing (m), 0 when none given
    pub fn design_bay(&self) -> f64 {
        self.bay_spacings.iter().copied().fold(0.0, f64::max)
    }

    /// Number of column lines along a plan dimension for the governing bay,
    /// `None` when it does not fit in a `u32`.
    fn column_lines(&self, dimension: f64) -> Option<u32> {
        let bay = self.design_bay();
        if bay <= 0.0 {
            return Some(1);
        }
        let spans = (dimension / bay).ceil().max(1.0);
        if !(spans < u32::MAX as f64) {
            return None;
        }
        (spans as u32).checked_add(1)
    }

    /// Total columns per story assuming a regular grid at the governing bay.
    ///
    /// A bay so small relative to the plan that the count overflows is an
    /// `InvalidInput` error on `bay_spacings`.
    pub fn column_count(&self) -> CalcResult<u32> {
        self.column_lines(self.length)
            .zip(self.column_lines(self.width))
            .and_then(|(along_length, along_width)| along_length.checked_mul(along_width))
            .ok_or_else(|| {
                CalcError::invalid_input(
                    "bay_spacings",
                    self.design_bay().to_string(),
                    "Bay spacing is too small for the plan; the column grid cannot be counted",
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_geometry() -> StructuralGeometry {
        StructuralGeometry::new(25.0, 20.0, 15.0, 5, 5.0)
    }

    #[test]
    fn test_derived_quantities() {
        let g = scenario_geometry();
        assert!((g.average_story_height() - 3.0).abs() < 1e-12);
        assert!((g.typical_story_height() - 3.0).abs() < 1e-12);
        assert!((g.aspect_ratio() - 1.25).abs() < 1e-12);
        assert_eq!(g.floor_area(), 500.0);
        // 6 lines along 25 m, 5 lines along 20 m
        assert_eq!(g.column_count(), Ok(30));
    }

    #[test]
    fn test_column_count_overflow_is_an_error() {
        let g = StructuralGeometry::new(100.0, 100.0, 12.0, 3, 0.0001);
        assert!(g.validate().is_ok());
        let err = g.column_count().unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { ref field, .. } if field == "bay_spacings"), "{err:?}");
    }

    #[test]
    fn test_explicit_story_height_wins() {
        let mut g = scenario_geometry();
        g.story_height = Some(3.5);
        assert_eq!(g.typical_story_height(), 3.5);
        assert_eq!(g.average_story_height(), 3.0);
    }

    #[test]
    fn test_validate_rejects_bad_dimensions() {
        let mut g = scenario_geometry();
        g.height = -1.0;
        assert!(g.validate().is_err());

        let mut g = scenario_geometry();
        g.floors = 0;
        assert!(g.validate().is_err());

        let mut g = scenario_geometry();
        g.bay_spacings.clear();
        assert_eq!(g.validate(), Err(CalcError::missing_field("bay_spacings")));

        let mut g = scenario_geometry();
        g.width = f64::NAN;
        assert!(g.validate().is_err());
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let json = r#"{"length": 10.0, "width": 8.0, "height": 6.0, "floors": 2, "bay_spacings": [4.0]}"#;
        let g: StructuralGeometry = serde_json::from_str(json).unwrap();
        assert_eq!(g.story_height, None);
        assert_eq!(g.foundation_depth, 0.0);
        assert!(g.validate().is_ok());
    }
}
