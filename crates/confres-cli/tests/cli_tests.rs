//! Integration tests for the list and resolve commands

use std::path::PathBuf;

use assert_cmd::Command;
use confres_test_utils::dir::ConfigDir;
use confres_test_utils::fixtures_root;
use predicates::prelude::*;
use serde_json::Value;

/// Get a Command for the confres binary
fn confres_cmd() -> Command {
    let mut cmd = Command::cargo_bin("confres").expect("Failed to find confres binary");
    cmd.env("RUST_LOG", "warn");
    cmd
}

fn example_root() -> PathBuf {
    fixtures_root().join("component-reference-example")
}

// ============================================================================
// list Command Tests
// ============================================================================

#[test]
fn test_list_shows_configurations_and_options() {
    confres_cmd()
        .arg("list")
        .arg(example_root())
        .assert()
        .success()
        .stdout(predicate::str::contains("Configurations"))
        .stdout(predicate::str::contains("component"))
        .stdout(predicate::str::contains("global.filters"))
        .stdout(predicate::str::contains("filter4-8"));
}

#[test]
fn test_list_empty_directory() {
    let dir = ConfigDir::new();
    confres_cmd()
        .arg("list")
        .arg(dir.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("No configurations found"));
}

#[test]
fn test_list_missing_root_fails() {
    let dir = ConfigDir::new();
    confres_cmd()
        .arg("list")
        .arg(dir.root().join("missing"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

// ============================================================================
// resolve Command Tests
// ============================================================================

#[test]
fn test_resolve_component_substitutes_reference() {
    let output = confres_cmd()
        .args(["resolve"])
        .arg(example_root())
        .arg("component")
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["binary"], Value::Bool(true));
    assert_eq!(value["numeric"], 1);
    assert_eq!(value["string"], "string");
    assert_eq!(value["description"], "4.0 8.0 3 BP causal");
    assert_eq!(value["lowFrequency"], 4.0);
    assert!(value.as_object().unwrap().keys().all(|k| !k.starts_with("$ref:")));
}

#[test]
fn test_resolve_with_selector() {
    confres_cmd()
        .arg("resolve")
        .arg(example_root())
        .arg("global.filters")
        .args(["-s", "name=filter1-3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"highFrequency\": 3.0"));
}

#[test]
fn test_resolve_without_match_fails() {
    confres_cmd()
        .arg("resolve")
        .arg(example_root())
        .arg("global.filters")
        .args(["-s", "name=nothing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No option of configuration"));
}

#[test]
fn test_resolve_unknown_configuration_fails() {
    confres_cmd()
        .arg("resolve")
        .arg(example_root())
        .arg("missing")
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing"));
}

#[test]
fn test_resolve_numeric_selector_from_temp_dir() {
    let dir = ConfigDir::new();
    dir.write(
        "stations",
        "options.yaml",
        r#"
- name: near
  constraints:
    - constraintType: NUMERIC_RANGE
      criterion: distance
      operator: {type: IN}
      priority: 1
      value: {min: 0.0, max: 10.0}
  parameters: {label: near}
- name: fallback
  constraints:
    - constraintType: DEFAULT
  parameters: {label: far}
"#,
    );

    confres_cmd()
        .arg("resolve")
        .arg(dir.root())
        .arg("stations")
        .args(["-s", "distance=4.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"label\": \"near\""));

    confres_cmd()
        .arg("resolve")
        .arg(dir.root())
        .arg("stations")
        .args(["-s", "distance=40"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"label\": \"far\""));
}

#[test]
fn test_resolve_rejects_malformed_selector() {
    confres_cmd()
        .arg("resolve")
        .arg(example_root())
        .arg("component")
        .args(["-s", "novalue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("criterion=value"));
}
