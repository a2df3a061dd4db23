//! Command dispatch against department files on disk.

// Integration tests have relaxed clippy settings for test ergonomics.
// Production code (src/) must use strict zero-unwrap/panic patterns.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::{fs, path::Path};

use serde_json::json;
use staffing::cli::{build_cli, exit_code, handlers::dispatch};
use tempfile::TempDir;

fn run(args: &[&str]) -> anyhow::Result<()> {
    let matches = build_cli()
        .try_get_matches_from(std::iter::once("staffing").chain(args.iter().copied()))
        .expect("valid args");
    dispatch(&matches)
}

fn write_department(dir: &Path, employees: serde_json::Value) -> String {
    let path = dir.join("department.json");
    let document = json!({ "name": "Support", "employees": employees });
    fs::write(&path, document.to_string()).expect("write");
    path.to_string_lossy().into_owned()
}

fn good_records() -> serde_json::Value {
    json!([
        { "type": "employee", "id": 1, "name": "Ann", "department": "Support",
          "base_salary": 100.0 },
        { "type": "manager", "id": 2, "name": "Bo", "department": "Support",
          "base_salary": 200.0, "bonus": 50.0 }
    ])
}

#[test]
fn validate_accepts_clean_file() {
    let dir = TempDir::new().expect("tempdir");
    let file = write_department(dir.path(), good_records());
    assert!(run(&["department", "validate", &file]).is_ok());
}

#[test]
fn validate_rejects_bad_record_with_validation_code() {
    let dir = TempDir::new().expect("tempdir");
    let file = write_department(
        dir.path(),
        json!([{ "type": "manager", "id": 0, "name": "X", "department": "Support",
                 "base_salary": 1.0, "bonus": 0.0 }]),
    );
    let err = run(&["department", "validate", &file, "--json"]).expect_err("bad record");
    assert_eq!(exit_code(&err), 1);
}

#[test]
fn inspect_with_key_selects_rows() {
    let dir = TempDir::new().expect("tempdir");
    let file = write_department(dir.path(), good_records());
    assert!(run(&["department", "inspect", &file, "--key", "-1"]).is_ok());
    assert!(run(&["department", "inspect", &file, "--key", "0..", "--json"]).is_ok());
}

#[test]
fn inspect_out_of_range_key_is_state_error() {
    let dir = TempDir::new().expect("tempdir");
    let file = write_department(dir.path(), good_records());
    let err = run(&["department", "inspect", &file, "--key", "9"]).expect_err("out of range");
    assert_eq!(exit_code(&err), 4);
}

#[test]
fn inspect_unparseable_key_is_type_error() {
    let dir = TempDir::new().expect("tempdir");
    let file = write_department(dir.path(), good_records());
    let err = run(&["department", "inspect", &file, "--key", "abc"]).expect_err("bad key");
    assert_eq!(exit_code(&err), 1);
}

#[test]
fn missing_file_is_io_error() {
    let dir = TempDir::new().expect("tempdir");
    let file = dir.path().join("absent.json").to_string_lossy().into_owned();
    let err = run(&["department", "inspect", &file]).expect_err("missing");
    assert_eq!(exit_code(&err), 2);
}
