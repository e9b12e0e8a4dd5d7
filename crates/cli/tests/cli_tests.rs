//! CLI integration tests

use std::io::Write;
use std::process::{Command, Output};

fn boilerctl(args: &[&str]) -> Output {
    Command::new("cargo")
        .args(["run", "-q", "-p", "boiler-cli", "--"])
        .args(args)
        .output()
        .expect("Failed to execute command")
}

/// Ten samples with steady excess O₂ and high drum pressure
fn telemetry_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for i in 0..10 {
        writeln!(
            file,
            r#"{{"timestamp":"08:{:02}:00","steamPressure":64.0,"steamFlow":45.0,"stackTemp":165.0,"o2Level":4.5,"efficiency":85.0,"fuelFlow":5000.0,"fuelType":"Coal"}}"#,
            i
        )
        .unwrap();
    }
    file
}

/// Test that the CLI shows help
#[test]
fn test_cli_help() {
    let output = boilerctl(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI help should succeed");
    assert!(stdout.contains("boiler telemetry analytics"), "Should show app description");
    for command in ["anomalies", "failures", "energy", "health", "insights", "report"] {
        assert!(stdout.contains(command), "Should show {} command", command);
    }
}

/// Test that the CLI shows version
#[test]
fn test_cli_version() {
    let output = boilerctl(&["--version"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI version should succeed");
    assert!(stdout.contains("boilerctl"), "Should show binary name");
}

/// Test failures subcommand help
#[test]
fn test_failures_help() {
    let output = boilerctl(&["failures", "--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Failures help should succeed");
    assert!(stdout.contains("--input"), "Should show input option");
    assert!(stdout.contains("--seed"), "Should show seed option");
    assert!(stdout.contains("--fuel"), "Should show fuel option");
}

/// Test that input is required
#[test]
fn test_missing_input_fails() {
    let output = boilerctl(&["health"]);
    assert!(!output.status.success(), "Health without --input should fail");
}

/// Test insights JSON output on a known window
#[test]
fn test_insights_json() {
    let file = telemetry_file();
    let output = boilerctl(&[
        "insights",
        "--format",
        "json",
        "--input",
        file.path().to_str().unwrap(),
    ]);
    assert!(output.status.success(), "Insights should succeed");

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let titles: Vec<&str> = json["insights"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["title"].as_str().unwrap())
        .collect();
    assert_eq!(
        titles,
        vec!["Excess Air Reduction Opportunity", "Blowdown Heat Recovery System"]
    );
    assert_eq!(json["overallRiskScore"], 0.0);
}

/// Test seeded report is reproducible apart from its timestamp
#[test]
fn test_seeded_report_reproducible() {
    let file = telemetry_file();
    let path = file.path().to_str().unwrap();
    let args = ["report", "--format", "json", "--seed", "11", "--input", path];

    let first: serde_json::Value = serde_json::from_slice(&boilerctl(&args).stdout).unwrap();
    let second: serde_json::Value = serde_json::from_slice(&boilerctl(&args).stdout).unwrap();

    assert_eq!(first["failurePredictions"], second["failurePredictions"]);
    assert_eq!(first["healthScore"], second["healthScore"]);
    assert_eq!(first["samplesAnalyzed"], 10);
    assert_eq!(first["fuelType"], "Coal");
}

/// Test fuel override and baseline option on the energy command
#[test]
fn test_energy_baseline_override() {
    let file = telemetry_file();
    let output = boilerctl(&[
        "energy",
        "--format",
        "json",
        "--fuel",
        "gas",
        "--baseline",
        "88",
        "--input",
        file.path().to_str().unwrap(),
    ]);
    assert!(output.status.success(), "Energy should succeed");

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["normalEnergyLoss"], 12.0);
    assert_eq!(json["catastrophicEnergyLoss"], 15.0);
}
