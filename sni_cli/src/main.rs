//! # SNI CLI
//!
//! Command-line front end for `sni_core`: validates project files, runs the
//! structural analysis, and prints a human summary or JSON.
//!
//! ## Project file
//!
//! ```json
//! {
//!   "project": { "name": "...", "geometry": {...}, "materials": {...}, "loads": {...} },
//!   "context": { "project_type": "office", "engineer_license": "ENG-001" },
//!   "options": { "structural_system": "concrete_moment_frame" }
//! }
//! ```
//!
//! `options` may be omitted; `--options <file>` overrides it.
//! Set `RUST_LOG=debug` to see per-stage calculation events.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use sni_core::calculations::{analyze_with, AnalysisOptions, StructuralAnalysisResults};
use sni_core::loads::{sni1727_combinations, DEFAULT_ACTIVE_COMBINATIONS};
use sni_core::project::{ProjectData, ValidationContext};
use sni_core::validation::{validate_batch, GateStatus, Severity, ValidationReport, ValidationResult};

#[derive(Parser)]
#[command(name = "sni_cli")]
#[command(about = "SNI structural validation and analysis", long_about = None)]
struct Cli {
    /// Print JSON instead of the human summary
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the zero-tolerance validation gate
    Validate {
        /// Path to the project JSON file
        project_path: PathBuf,
        /// Exit with an error when construction is blocked
        #[arg(long)]
        strict: bool,
    },
    /// Run the structural analysis
    Analyze {
        /// Path to the project JSON file
        project_path: PathBuf,
        /// Analysis options JSON file (overrides the project file's options)
        #[arg(short, long)]
        options: Option<PathBuf>,
    },
    /// Validate, then analyze
    Check {
        /// Path to the project JSON file
        project_path: PathBuf,
        /// Analysis options JSON file
        #[arg(short, long)]
        options: Option<PathBuf>,
    },
    /// Validate many project files in parallel
    Batch {
        /// Project JSON files
        #[arg(required = true)]
        project_paths: Vec<PathBuf>,
    },
    /// List the SNI 1727 strength combinations
    Combinations,
}

#[derive(Deserialize)]
struct ProjectFile {
    project: ProjectData,
    context: ValidationContext,
    #[serde(default)]
    options: AnalysisOptions,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { project_path, strict } => cmd_validate(&project_path, strict, cli.json),
        Commands::Analyze { project_path, options } => cmd_analyze(&project_path, options.as_deref(), cli.json),
        Commands::Check { project_path, options } => cmd_check(&project_path, options.as_deref(), cli.json),
        Commands::Batch { project_paths } => cmd_batch(&project_paths, cli.json),
        Commands::Combinations => cmd_combinations(cli.json),
    }
}

fn load_project(path: &Path) -> Result<ProjectFile> {
    debug!(path = %path.display(), "loading project file");
    let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid project file: {}", path.display()))
}

fn load_options(path: &Path) -> Result<AnalysisOptions> {
    let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid options file: {}", path.display()))
}

fn resolve_options(file: &ProjectFile, override_path: Option<&Path>) -> Result<AnalysisOptions> {
    match override_path {
        Some(path) => load_options(path),
        None => Ok(file.options.clone()),
    }
}

fn run_analysis(file: &ProjectFile, options: &AnalysisOptions) -> Result<StructuralAnalysisResults> {
    let p = &file.project;
    analyze_with(&p.geometry, &p.materials, &p.loads, options).map_err(|e| {
        if let Ok(json) = serde_json::to_string_pretty(&e) {
            eprintln!("Error JSON:");
            eprintln!("{}", json);
        }
        anyhow::Error::new(e).context("structural analysis failed")
    })
}

fn cmd_validate(path: &Path, strict: bool, json: bool) -> Result<()> {
    let file = load_project(path)?;
    let report = ValidationReport::generate(&file.project, &file.context);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if strict && report.gate == GateStatus::Blocked {
        bail!("construction blocked by {} finding(s)", report.summary.blocking);
    }
    Ok(())
}

fn cmd_analyze(path: &Path, options_path: Option<&Path>, json: bool) -> Result<()> {
    let file = load_project(path)?;
    let options = resolve_options(&file, options_path)?;
    let results = run_analysis(&file, &options)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print_analysis(&file.project.name, &results);
    }
    Ok(())
}

fn cmd_check(path: &Path, options_path: Option<&Path>, json: bool) -> Result<()> {
    let file = load_project(path)?;
    let options = resolve_options(&file, options_path)?;
    let report = ValidationReport::generate(&file.project, &file.context);
    let results = run_analysis(&file, &options)?;

    if json {
        let combined = serde_json::json!({ "validation": report, "analysis": results });
        println!("{}", serde_json::to_string_pretty(&combined)?);
    } else {
        print_report(&report);
        println!();
        print_analysis(&file.project.name, &results);
    }
    Ok(())
}

fn cmd_batch(paths: &[PathBuf], json: bool) -> Result<()> {
    let files = paths.iter().map(|p| load_project(p)).collect::<Result<Vec<_>>>()?;
    let inputs: Vec<(ProjectData, ValidationContext)> =
        files.into_iter().map(|f| (f.project, f.context)).collect();

    let reports: Vec<ValidationReport> = validate_batch(&inputs)
        .into_iter()
        .zip(&inputs)
        .map(|(results, (project, _))| ValidationReport::from_results(project.name.clone(), results))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    println!("{:<40} {:<16} {:>8} {:>8} {:>8}", "File", "Gate", "Critical", "Warning", "Blocking");
    println!("{}", "─".repeat(84));
    for (path, report) in paths.iter().zip(&reports) {
        println!(
            "{:<40} {:<16} {:>8} {:>8} {:>8}",
            path.display(),
            gate_label(report.gate),
            report.summary.critical,
            report.summary.warning,
            report.summary.blocking
        );
    }
    Ok(())
}

fn cmd_combinations(json: bool) -> Result<()> {
    let combos = sni1727_combinations();
    if json {
        println!("{}", serde_json::to_string_pretty(&combos)?);
        return Ok(());
    }
    println!("SNI 1727:2020 strength combinations");
    for combo in &combos {
        let active = DEFAULT_ACTIVE_COMBINATIONS.contains(&combo.name.as_str());
        println!("  {:<5} {:<28} {}", combo.name, combo.equation, if active { "(default)" } else { "" });
    }
    Ok(())
}

fn print_report(report: &ValidationReport) {
    println!("═══════════════════════════════════════");
    println!("  VALIDATION: {}", report.project_name);
    println!("═══════════════════════════════════════");
    if report.results.is_empty() {
        println!("  No findings.");
    }
    for r in &report.results {
        print_finding(r);
    }
    println!();
    println!(
        "  Critical: {}  Warning: {}  Info: {}  Blocking: {}",
        report.summary.critical, report.summary.warning, report.summary.info, report.summary.blocking
    );
    println!("═══════════════════════════════════════");
    println!("  GATE: {}", gate_label(report.gate));
    println!("═══════════════════════════════════════");
}

fn print_finding(r: &ValidationResult) {
    let severity = match r.severity {
        Severity::Critical => "CRITICAL",
        Severity::Warning => "WARNING",
        Severity::Info => "INFO",
    };
    let marker = if r.is_blocking() { "[BLOCK]" } else { "" };
    println!("  {:<9} {:<24} {} {}", severity, r.rule_id, r.message, marker);
    if !r.recommendation.is_empty() {
        println!("            → {}", r.recommendation);
    }
    if !r.code_reference.is_empty() {
        println!("            ({})", r.code_reference);
    }
}

fn print_analysis(name: &str, r: &StructuralAnalysisResults) {
    println!("═══════════════════════════════════════");
    println!("  ANALYSIS: {}", name);
    println!("═══════════════════════════════════════");
    println!();
    println!("Seismic:");
    println!("  W   = {:.1} kN", r.seismic_weight_kn);
    println!("  T   = {:.3} s (cap {:.3} s)", r.fundamental_period_s, r.period_upper_limit_s);
    println!("  Fa  = {:.3}, Fv = {:.3}", r.site_coefficients.fa, r.site_coefficients.fv);
    println!("  Sds = {:.3} g, Sd1 = {:.3} g, Cs = {:.4}", r.sds, r.sd1, r.seismic_response_coefficient);
    println!("  V   = {:.1} kN (wind {:.1} kN, governs: {:?})", r.base_shear_kn, r.wind_base_shear_kn, r.governing_lateral);
    println!();
    println!("Beam ({}):", r.governing_combination);
    println!("  wu = {:.2} kN/m², Mu = {:.1} kN·m, Vu = {:.1} kN", r.factored_floor_load_kn_m2, r.beam_moment_knm, r.beam_shear_kn);
    println!(
        "  As = {:.0} mm² (ρ = {:.4}), stirrups @ {:.0} mm",
        r.reinforcement.as_required_mm2, r.reinforcement.rho_provided, r.shear.stirrup_spacing_mm
    );
    println!();
    println!("Capacity Checks:");
    println!("  Flexure: {:.2} {}", r.utilization.flexure, status_icon(r.utilization.flexure <= 1.0 + 1e-9));
    println!("  Shear:   {:.2} {}", r.utilization.shear, status_icon(r.utilization.shear <= 1.0 + 1e-9));
    println!(
        "  Drift:   {:.2} (Δ/h = {:.5} vs {:.3}) {}",
        r.utilization.drift,
        r.drift.drift_ratio,
        r.drift.limit,
        status_icon(r.drift.compliant)
    );
    println!("  Column:  {:.2} {}", r.utilization.column_axial, status_icon(r.column.passes()));
    println!();
    println!("Compliance:");
    println!("  SNI 1726 {}", status_icon(r.compliance.sni_1726));
    println!("  SNI 1727 {}", status_icon(r.compliance.sni_1727));
    println!("  SNI 2847 {}", status_icon(r.compliance.sni_2847));
    println!("  SNI 1729 {}", status_icon(r.compliance.sni_1729));
    if !r.review_notes.is_empty() {
        println!();
        println!("Review notes:");
        for note in &r.review_notes {
            println!("  - {}", note);
        }
    }
    println!();
    println!("═══════════════════════════════════════");
    println!(
        "  RESULT: {} ({} calculation steps)",
        if r.compliance.all() { "PASS" } else { "FAIL" },
        r.calculation_steps.len()
    );
    println!("═══════════════════════════════════════");
}

fn gate_label(gate: GateStatus) -> &'static str {
    match gate {
        GateStatus::Approved => "APPROVED",
        GateStatus::ReviewRequired => "REVIEW REQUIRED",
        GateStatus::Blocked => "BLOCKED",
    }
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[FAIL]" }
}
