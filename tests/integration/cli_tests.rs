//! CLI integration tests
//!
//! These tests verify that the CLI works correctly with various options.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::cargo_bin("searchlabels").unwrap()
}

/// Write a config file and one component with a label resource file,
/// returning the config path.
fn fixture_project(temp: &Path) -> std::path::PathBuf {
    let component_dir = temp.join("common").join("config");
    fs::create_dir_all(&component_dir).unwrap();
    fs::write(
        component_dir.join("CommonLabels.xml"),
        r#"<?xml version="1.0" encoding="UTF-8"?>
<resource>
    <property key="CommonOk">
        <value xml:lang="en-US">OK</value>
        <value xml:lang="fr-FR">D'accord</value>
    </property>
</resource>"#,
    )
    .unwrap();

    let config_path = temp.join("searchlabels.toml");
    fs::write(
        &config_path,
        format!(
            r#"exclude = []

[[components]]
name = "common"
classpath = ["{}"]
"#,
            component_dir.display()
        ),
    )
    .unwrap();
    config_path
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_cli_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("searchlabels"))
        .stdout(predicate::str::contains("--only-unused"))
        .stdout(predicate::str::contains("--component"));
}

#[test]
fn test_cli_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("searchlabels"));
}

#[test]
fn test_cli_refuses_unparameterized_query() {
    let temp = TempDir::new().unwrap();
    let config_path = fixture_project(temp.path());

    cmd()
        .args(["--config", config_path.to_str().unwrap(), "--quiet"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unparameterized"));
}

// ============================================================================
// Query Tests
// ============================================================================

#[test]
fn test_cli_query_by_component_json() {
    let temp = TempDir::new().unwrap();
    let config_path = fixture_project(temp.path());

    cmd()
        .args([
            "--config",
            config_path.to_str().unwrap(),
            "--component",
            "common",
            "--format",
            "json",
            "--quiet",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"CommonOk\""))
        .stdout(predicate::str::contains("\"CommonLabels.xml\""))
        .stdout(predicate::str::contains("en-US"));
}

#[test]
fn test_cli_locale_filter_narrows_displayed_values() {
    let temp = TempDir::new().unwrap();
    let config_path = fixture_project(temp.path());

    cmd()
        .args([
            "--config",
            config_path.to_str().unwrap(),
            "--component",
            "common",
            "--locale",
            "fr-FR",
            "--format",
            "json",
            "--quiet",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"locale\": \"fr-FR\""))
        .stdout(predicate::str::contains("\"locale\": \"en-US\"").not());
}

// ============================================================================
// Edit Tests
// ============================================================================

#[test]
fn test_cli_set_writes_locale_value() {
    let temp = TempDir::new().unwrap();
    let config_path = fixture_project(temp.path());

    cmd()
        .args([
            "--config",
            config_path.to_str().unwrap(),
            "--file-name",
            "CommonLabels.xml",
            "--key",
            "CommonOk",
            "--set",
            "de-DE=In Ordnung",
            "--quiet",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 locale value(s) written"))
        .stdout(predicate::str::contains("de-DE"));
}

#[test]
fn test_cli_set_requires_key() {
    let temp = TempDir::new().unwrap();
    let config_path = fixture_project(temp.path());

    cmd()
        .args([
            "--config",
            config_path.to_str().unwrap(),
            "--file-name",
            "CommonLabels.xml",
            "--set",
            "de-DE=In Ordnung",
            "--quiet",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--set requires --key"));
}
