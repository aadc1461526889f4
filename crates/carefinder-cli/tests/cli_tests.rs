//! Integration tests for the carefinder CLI.
//!
//! Each test runs the binary with the platform data directory pointed at an
//! empty location, so commands without `--data` use the bundled sample.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

fn small_network() -> String {
    fixtures_dir()
        .join("small_network.json")
        .to_string_lossy()
        .into_owned()
}

/// Binary with no ambient network configuration.
fn cli() -> Command {
    let empty_home = Path::new(env!("CARGO_TARGET_TMPDIR")).join("carefinder-empty-home");
    let mut cmd = Command::cargo_bin("carefinder-cli").expect("binary exists");
    cmd.env_remove("CAREFINDER_DATA")
        .env_remove("RUST_LOG")
        .env("HOME", &empty_home)
        .env("XDG_DATA_HOME", empty_home.join("data"))
        .env("NO_COLOR", "1");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).expect("utf-8 output")
}

#[test]
fn nearest_from_sample_area() {
    cli()
        .args(["nearest", "--from", "G-10"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Nearest facility from G-10: Maroof International (1.4 km, 1 hops)",
        ))
        .stdout(predicate::str::contains("Location: F-10 Markaz"));
}

#[test]
fn nearest_json_reports_path_and_details() {
    let stdout = stdout_of(cli().args(["--format", "json", "nearest", "--from", "G-9"]));
    let value: serde_json::Value = serde_json::from_str(&stdout).expect("valid json");

    assert_eq!(value["status"], "found");
    assert_eq!(value["facility"], "PIMS");
    assert_eq!(value["path"], serde_json::json!(["G-9", "G-8", "PIMS"]));
    assert_eq!(value["hops"], 2);
    let distance = value["distance"].as_f64().expect("numeric distance");
    assert!((distance - 3.6).abs() < 1e-9);
    assert_eq!(value["details"]["rating"], 3.8);
}

#[test]
fn note_format_is_compact() {
    cli()
        .args(["--format", "note", "nearest", "--from", "G-10"])
        .assert()
        .success()
        .stdout("G-10 -> Maroof International (1.4 km)\nG-10 -> Maroof\n");
}

#[test]
fn rich_format_uses_markup() {
    cli()
        .args(["--format", "rich", "nearest", "--from", "G-10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("**Nearest facility**"));
}

#[test]
fn unknown_area_fails_with_suggestion() {
    cli()
        .args(["nearest", "--from", "G10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown area name: G10"))
        .stderr(predicate::str::contains("Did you mean 'G-10'?"));
}

#[test]
fn unknown_area_fails_for_rank_too() {
    cli()
        .args(["rank", "--from", "Atlantis"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot search from 'Atlantis'"));
}

#[test]
fn areas_lists_non_facility_nodes() {
    cli()
        .arg("areas")
        .assert()
        .success()
        .stdout(predicate::str::contains("Areas in bundled sample network:"))
        .stdout(predicate::str::contains(" - Saddar\n"))
        .stdout(predicate::str::contains(" - F-7\n"))
        .stdout(predicate::str::contains(" - Shifa\n").not())
        .stdout(predicate::str::contains("18 nodes, 17 roads, 7 facilities"));
}

#[test]
fn rank_orders_by_score() {
    let stdout = stdout_of(cli().args(["rank", "--from", "G-10"]));
    let position = |name: &str| stdout.find(name).unwrap_or(usize::MAX);

    assert!(stdout.contains("  1. Maroof International"));
    assert!(stdout.contains("score 3.20"));
    assert!(position("Maroof International") < position("PIMS"));
    assert!(position("PIMS") < position("Shifa International"));
    assert!(position("Kulsum International") < position("Primax Medical Complex"));
    assert!(position("MH Hospital") < position("Marya Memorial Hospital"));
}

#[test]
fn distances_from_fixture_network() {
    cli()
        .args(["--data", &small_network(), "distances", "--from", "A"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Distances from A:"))
        .stdout(predicate::str::contains(" - A: 0.0 km"))
        .stdout(predicate::str::contains(" - D [facility]: 4.0 km"))
        .stdout(predicate::str::contains(" - C [facility]: 5.0 km"))
        .stdout(predicate::str::contains(" - Harbor: unreachable"));
}

#[test]
fn isolated_area_reports_no_facility() {
    cli()
        .args(["--data", &small_network(), "nearest", "--from", "Harbor"])
        .assert()
        .success()
        .stdout("No Facility Found (from Harbor)\n");
}

#[test]
fn isolated_area_json_keeps_sentinel_shape() {
    let stdout = stdout_of(cli().args([
        "--data",
        &small_network(),
        "--format",
        "json",
        "nearest",
        "--from",
        "Lighthouse",
    ]));
    let value: serde_json::Value = serde_json::from_str(&stdout).expect("valid json");

    assert_eq!(value["status"], "no_facility_reachable");
    assert_eq!(value["facility"], "No Facility Found");
    assert_eq!(value["distance"], -1.0);
    assert_eq!(value["path"], serde_json::json!([]));
}

#[test]
fn registry_override_replaces_rankings() {
    let registry = fixtures_dir().join("facilities.csv");
    let stdout = stdout_of(cli().args([
        "--data",
        &small_network(),
        "--registry",
        registry.to_str().expect("utf-8 path"),
        "rank",
        "--from",
        "A",
    ]));

    assert!(stdout.contains("  1. Dockside Hospital (9 Dock Street) | score 4.50 | 4.0 km"));
    assert!(stdout.contains("  2. Cedar Clinic (3 Cedar Road) | score 7.00 | 5.0 km"));
    assert!(!stdout.contains("Ghost Infirmary"));
    assert!(!stdout.contains("D Hospital"));
}

#[test]
fn data_directory_from_environment() {
    let temp_dir = TempDir::new().expect("create temp dir");
    fs::copy(
        fixtures_dir().join("small_network.json"),
        temp_dir.path().join("network.json"),
    )
    .expect("copy fixture");

    cli()
        .env("CAREFINDER_DATA", temp_dir.path())
        .args(["nearest", "--from", "B"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Nearest facility from B: C Clinic (3.0 km, 1 hops)",
        ));
}

#[test]
fn unsupported_network_format_is_reported() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("network.txt");
    fs::write(&path, "A B 1.0").expect("write file");

    cli()
        .args(["--data", path.to_str().expect("utf-8 path"), "areas"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported network format"));
}

#[test]
fn missing_network_is_reported() {
    cli()
        .args(["--data", "/definitely/not/here.json", "areas"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("network not found"));
}

#[test]
fn unmatched_registry_record_warns_once_per_query() {
    let registry = fixtures_dir().join("facilities.csv");
    let output = cli()
        .args([
            "--data",
            &small_network(),
            "--registry",
            registry.to_str().expect("utf-8 path"),
            "rank",
            "--from",
            "A",
        ])
        .assert()
        .success()
        .get_output()
        .stderr
        .clone();
    let stderr = String::from_utf8(output).expect("utf-8 output");

    assert_eq!(stderr.matches("Ghost Infirmary").count(), 1, "{stderr}");
}
