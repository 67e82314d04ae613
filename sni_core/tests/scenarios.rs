//! End-to-end checks over the public API: validation gate, analysis pipeline
//! and JSON interchange.

use sni_core::calculations::flexure::required_steel;
use sni_core::calculations::{analyze, analyze_with, AnalysisOptions, CalculationLog};
use sni_core::errors::{CalcError, DomainErrorKind};
use sni_core::geometry::StructuralGeometry;
use sni_core::loads::{LoadConditions, SeismicParameters, SiteClass};
use sni_core::materials::{ConcreteProperties, MaterialProperties, SteelProperties};
use sni_core::project::{ProjectData, ValidationContext};
use sni_core::validation::{validate, validate_batch, Category, GateStatus, Severity, ValidationReport};

fn office_building() -> ProjectData {
    ProjectData {
        name: "Gedung Kantor A".to_string(),
        geometry: StructuralGeometry::new(25.0, 20.0, 15.0, 5, 5.0),
        materials: MaterialProperties {
            concrete: ConcreteProperties::new(30.0).with_certificate("LAB-2025-118"),
            steel: SteelProperties::new(400.0, 540.0).with_certificate("MILL-5521"),
        },
        loads: LoadConditions {
            dead_load: 5.0,
            live_load: 4.0,
            wind_load: 0.0,
            seismic_parameters: SeismicParameters::new(1.2, 0.5, SiteClass::SD),
        },
    }
}

fn substandard_building() -> ProjectData {
    ProjectData {
        name: "Gudang B".to_string(),
        geometry: StructuralGeometry::new(50.0, 8.0, 12.0, 3, 6.0),
        materials: MaterialProperties {
            concrete: ConcreteProperties::new(10.0).with_certificate("LAB-2025-301"),
            steel: SteelProperties::new(180.0, 200.0).with_certificate("MILL-0007"),
        },
        loads: LoadConditions {
            dead_load: 5.0,
            live_load: 4.0,
            wind_load: 0.0,
            seismic_parameters: SeismicParameters::new(3.5, 0.5, SiteClass::SD),
        },
    }
}

#[test]
fn licensed_office_building_is_not_blocked() {
    let ctx = ValidationContext::new("office").with_license("ENG-001");
    let results = validate(&office_building(), &ctx);

    assert!(results.iter().all(|r| !r.block_construction), "{:#?}", results);
    assert_ne!(GateStatus::from_results(&results), GateStatus::Blocked);
}

#[test]
fn substandard_materials_and_missing_license_block_construction() {
    let ctx = ValidationContext::new("warehouse").with_license("");
    let results = validate(&substandard_building(), &ctx);

    let blocking: Vec<&str> = results
        .iter()
        .filter(|r| r.is_blocking() && r.severity == Severity::Critical)
        .map(|r| r.rule_id.as_str())
        .collect();
    assert!(blocking.len() >= 4, "blocking: {:?}", blocking);
    for id in ["CONC-FC-MIN", "STEEL-FY-MIN", "STEEL-DUCTILITY", "PRO-LICENSE"] {
        assert!(blocking.contains(&id), "missing {id} in {:?}", blocking);
    }

    // Slender plan is reported but does not block on its own
    let aspect = results.iter().find(|r| r.rule_id == "GEO-ASPECT").unwrap();
    assert_eq!(aspect.severity, Severity::Warning);
    assert!(!aspect.block_construction);

    // Very high hazard asks for review without blocking
    let hazard = results.iter().find(|r| r.rule_id == "SEIS-HIGH").unwrap();
    assert!(hazard.requires_engineer_review);
    assert!(!hazard.block_construction);

    assert_eq!(GateStatus::from_results(&results), GateStatus::Blocked);
}

#[test]
fn missing_license_is_a_professional_finding() {
    let ctx = ValidationContext::new("office");
    let results = validate(&office_building(), &ctx);
    let license = results.iter().find(|r| r.rule_id == "PRO-LICENSE").unwrap();
    assert_eq!(license.category, Category::Professional);
    assert!(license.is_blocking());
}

#[test]
fn oversized_moment_is_a_domain_error_not_nan() {
    let materials = office_building().materials;
    let mut log = CalculationLog::new();
    let err = required_steel(5000.0, 300.0, 550.0, &materials, &mut log).unwrap_err();

    assert_eq!(err.domain_kind(), Some(DomainErrorKind::CapacityExceeded));
    assert!(log.steps().iter().all(|s| s.result.is_finite()));
    match err {
        CalcError::Domain { step, .. } => assert_eq!(step, Some(log.next_index())),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn analysis_is_deterministic() {
    let p = office_building();
    let first = analyze(&p.geometry, &p.materials, &p.loads).unwrap();
    let second = analyze(&p.geometry, &p.materials, &p.loads).unwrap();
    assert_eq!(first, second);
}

#[test]
fn analysis_steps_are_numbered_and_finite() {
    let p = office_building();
    let results = analyze(&p.geometry, &p.materials, &p.loads).unwrap();

    assert!(!results.calculation_steps.is_empty());
    for (i, step) in results.calculation_steps.iter().enumerate() {
        assert_eq!(step.step, i + 1);
        assert!(step.result.is_finite(), "step {} not finite", step.step);
    }
    assert!(results.base_shear_kn > 0.0);
    assert!(results.compliance.all());
}

#[test]
fn special_soil_stops_the_analysis() {
    let mut p = office_building();
    p.loads.seismic_parameters.site_class = SiteClass::SF;
    let err = analyze(&p.geometry, &p.materials, &p.loads).unwrap_err();
    assert!(matches!(err, CalcError::CalculationFailed { .. }), "{err:?}");
}

#[test]
fn options_parse_from_partial_json() {
    let options: AnalysisOptions =
        serde_json::from_str(r#"{"selected_combinations": ["U1", "U2a"], "project_type": "office"}"#).unwrap();
    let p = office_building();
    let results = analyze_with(&p.geometry, &p.materials, &p.loads, &options).unwrap();
    assert!(results.governing_combination.starts_with("U2a"), "{}", results.governing_combination);
}

#[test]
fn batch_preserves_input_order() {
    let inputs = vec![
        (office_building(), ValidationContext::new("office").with_license("ENG-001")),
        (substandard_building(), ValidationContext::new("warehouse")),
        (office_building(), ValidationContext::new("office")),
    ];
    let batch = validate_batch(&inputs);

    assert_eq!(batch.len(), inputs.len());
    for ((project, ctx), results) in inputs.iter().zip(&batch) {
        assert_eq!(results, &validate(project, ctx));
    }
    assert_ne!(GateStatus::from_results(&batch[0]), GateStatus::Blocked);
    assert_eq!(GateStatus::from_results(&batch[1]), GateStatus::Blocked);
}

#[test]
fn report_round_trips_through_json() {
    let ctx = ValidationContext::new("warehouse");
    let report = ValidationReport::generate(&substandard_building(), &ctx);
    assert_eq!(report.gate, GateStatus::Blocked);
    assert_eq!(report.summary.blocking, report.blocking().count());

    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"BLOCKED\""));
    let parsed: ValidationReport = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, report);
}

#[test]
fn project_round_trips_through_json() {
    let project = office_building();
    let json = serde_json::to_string_pretty(&project).unwrap();
    let parsed: ProjectData = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, project);
}
