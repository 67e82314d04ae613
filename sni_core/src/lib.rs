//! # sni_core - SNI Structural Calculation & Validation Engine
//!
//! `sni_core` checks reinforced-concrete building projects against the
//! Indonesian national standards (SNI 1726:2019 seismic, SNI 1727:2020
//! loads, SNI 2847:2019 concrete, SNI 1729:2020 steel) and produces an
//! auditable step-by-step structural calculation. All inputs and outputs are
//! JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **Zero tolerance**: Every validation rule runs; any blocking finding
//!   withholds construction approval
//! - **No silent NaN**: Numeric impossibilities are typed errors
//! - **Auditable**: Each calculated value is a numbered [`calculations::CalculationStep`]
//!
//! ## Quick Start
//!
//! ```rust
//! use sni_core::calculations::analyze;
//! use sni_core::geometry::StructuralGeometry;
//! use sni_core::loads::{LoadConditions, SeismicParameters, SiteClass};
//! use sni_core::materials::{ConcreteProperties, MaterialProperties, SteelGrade, SteelProperties};
//! use sni_core::project::{ProjectData, ValidationContext};
//! use sni_core::validation::{validate, GateStatus};
//!
//! let project = ProjectData {
//!     name: "Gedung Kantor".to_string(),
//!     geometry: StructuralGeometry::new(25.0, 20.0, 15.0, 5, 5.0),
//!     materials: MaterialProperties {
//!         concrete: ConcreteProperties::new(30.0).with_certificate("LAB-2025-118"),
//!         steel: SteelProperties::from_grade(SteelGrade::BjTS40).with_certificate("MILL-5521"),
//!     },
//!     loads: LoadConditions {
//!         dead_load: 5.0,
//!         live_load: 4.0,
//!         wind_load: 0.0,
//!         seismic_parameters: SeismicParameters::new(1.2, 0.5, SiteClass::SD),
//!     },
//! };
//! let ctx = ValidationContext::new("office").with_license("ENG-001");
//!
//! let findings = validate(&project, &ctx);
//! assert_ne!(GateStatus::from_results(&findings), GateStatus::Blocked);
//!
//! let results = analyze(&project.geometry, &project.materials, &project.loads).unwrap();
//! let json = serde_json::to_string_pretty(&results).unwrap();
//! assert!(json.contains("calculation_steps"));
//! ```
//!
//! ## Modules
//!
//! - [`validation`] - Zero-tolerance rule engine and approval gate
//! - [`calculations`] - Seismic, flexure, shear, drift, column calculators and the analysis orchestrator
//! - [`loads`] - Area loads, seismic input, SNI 1727 load combinations
//! - [`materials`] - Concrete and reinforcing steel
//! - [`geometry`] - Building dimensions
//! - [`project`] - Project bundle and validation context
//! - [`constants`] - Engineering constants and SNI clause references
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod constants;
pub mod errors;
pub mod geometry;
pub mod loads;
pub mod materials;
pub mod project;
pub mod units;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use calculations::{analyze, analyze_with, AnalysisOptions, CalculationLog, CalculationStep, StructuralAnalysisResults};
pub use constants::{constants, EngineeringConstants};
pub use errors::{CalcError, CalcResult, DomainErrorKind};
pub use project::{ProjectData, ValidationContext};
pub use validation::{validate, validate_batch, GateStatus, ValidationReport, ValidationResult};
