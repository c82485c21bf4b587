//! CLI tests for `gtncheck`.
//!
//! Spawns the binary and verifies exit codes and report output for
//! datasets that fail before or during loading.

use std::process::Command;

use gtncheck::exit_codes;
use gtncheck::test_support::{XLSX_MAGIC, mapping_json, write_dataset};

#[test]
fn checks_lists_all_eight() {
    let output = Command::new(env!("CARGO_BIN_EXE_gtncheck"))
        .arg("checks")
        .output()
        .expect("gtncheck checks");

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 8);
    assert!(stdout.starts_with("1 file_format"));
    assert!(stdout.contains("8 numeric_elements"));
}

#[test]
fn run_without_datasets_is_invalid() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = Command::new(env!("CARGO_BIN_EXE_gtncheck"))
        .current_dir(temp.path())
        .arg("run")
        .output()
        .expect("gtncheck run");

    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    assert!(String::from_utf8_lossy(&output.stderr).contains("no datasets given"));
}

#[test]
fn run_reports_format_failure_and_load_error() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path().join("datasets");
    write_dataset(
        &root,
        "unit_test1",
        &[
            ("GTN.csv", b"employee_id,GrossPay\n1,10\n".as_slice()),
            ("Payrun.xlsx", XLSX_MAGIC),
            ("mapping.json", mapping_json().as_bytes()),
        ],
    )
    .expect("dataset");

    let output = Command::new(env!("CARGO_BIN_EXE_gtncheck"))
        .current_dir(temp.path())
        .args(["run", "--root", "datasets"])
        .output()
        .expect("gtncheck run");

    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(
        "FAIL 1 file_format [FormatError] GTN file is not an Excel format: GTN.csv"
    ));
    assert!(stdout.contains("LoadError Failed to load"));
    assert!(stdout.contains("summary: datasets=1 pass=0 fail=0 error=1"));
}

#[test]
fn run_json_output_parses() {
    let temp = tempfile::tempdir().expect("tempdir");
    let dataset = write_dataset(temp.path(), "empty", &[]).expect("dataset");

    let output = Command::new(env!("CARGO_BIN_EXE_gtncheck"))
        .current_dir(temp.path())
        .args(["run", "--format", "json"])
        .arg(&dataset)
        .output()
        .expect("gtncheck run");

    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("json report");
    assert_eq!(value["datasets"][0]["outcome"], "error");
    assert_eq!(value["datasets"][0]["verdicts"][0]["check"], "file_format");
    assert_eq!(
        value["datasets"][0]["verdicts"][0]["offending"],
        serde_json::json!(["GTN (missing)", "Payrun (missing)"])
    );
}

#[test]
fn check_selection_runs_only_file_format() {
    let temp = tempfile::tempdir().expect("tempdir");
    let dataset = write_dataset(
        temp.path(),
        "d",
        &[("GTN.xlsx", XLSX_MAGIC), ("Payrun.xlsx", XLSX_MAGIC)],
    )
    .expect("dataset");

    let output = Command::new(env!("CARGO_BIN_EXE_gtncheck"))
        .current_dir(temp.path())
        .args(["run", "--check", "file_format"])
        .arg(&dataset)
        .output()
        .expect("gtncheck run");

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("  PASS 1 file_format"));
    assert!(!stdout.contains("empty_rows"));
}

#[test]
fn invalid_config_is_rejected() {
    let temp = tempfile::tempdir().expect("tempdir");
    std::fs::write(temp.path().join("gtncheck.toml"), "header_scan_rows = 0\n").expect("config");
    let dataset = write_dataset(temp.path(), "d", &[]).expect("dataset");

    let output = Command::new(env!("CARGO_BIN_EXE_gtncheck"))
        .current_dir(temp.path())
        .arg("run")
        .arg(&dataset)
        .output()
        .expect("gtncheck run");

    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    assert!(String::from_utf8_lossy(&output.stderr).contains("header_scan_rows must be > 0"));
    assert!(output.stdout.is_empty());
}
