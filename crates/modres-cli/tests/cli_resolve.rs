mod common;

use common::{modres_cmd, project, APP};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_resolve_prints_load_order() {
    let tmp = project(APP);

    modres_cmd(tmp.path())
        .current_dir(tmp.path())
        .args(["resolve"])
        .assert()
        .success()
        .stdout("Core 1.0.0\nAuth 1.1.0\nAdmin 1.0.0\n")
        .stderr(predicate::str::contains("Resolving"));
}

#[test]
fn test_resolve_searches_parent_directories() {
    let tmp = project(APP);
    let nested = tmp.path().join("modules").join("admin");
    fs::create_dir_all(&nested).unwrap();

    modres_cmd(tmp.path())
        .current_dir(&nested)
        .args(["resolve"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Core 1.0.0\n"));
}

#[test]
fn test_resolve_json_format() {
    let tmp = project(APP);

    modres_cmd(tmp.path())
        .current_dir(tmp.path())
        .args(["resolve", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"order\""))
        .stdout(predicate::str::contains("\"Auth\""));
}

#[test]
fn test_resolve_format_from_config() {
    let tmp = project(APP);
    let home = TempDir::new().unwrap();
    fs::write(
        home.path().join("config.toml"),
        "[output]\nformat = \"json\"\ncolor = false\n",
    )
    .unwrap();

    modres_cmd(home.path())
        .current_dir(tmp.path())
        .args(["resolve"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"modules\""));
}

#[test]
fn test_resolve_rejects_unknown_format() {
    let tmp = project(APP);

    modres_cmd(tmp.path())
        .current_dir(tmp.path())
        .args(["resolve", "--format", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown output format"));
}

#[test]
fn test_resolve_explicit_manifest() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("boot.toml"), APP).unwrap();

    modres_cmd(tmp.path())
        .current_dir(tmp.path())
        .args(["resolve", "--manifest", "boot.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Admin 1.0.0"));
}

#[test]
fn test_resolve_without_manifest_fails() {
    let tmp = TempDir::new().unwrap();

    modres_cmd(tmp.path())
        .current_dir(tmp.path())
        .args(["resolve"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not find Modules.toml"));
}

#[test]
fn test_resolve_missing_dependency_fails() {
    let tmp = project(
        r#"
[[module]]
key = "X"
version = "1.0.0"

[module.requires]
Y = "^1.0"
"#,
    );

    modres_cmd(tmp.path())
        .current_dir(tmp.path())
        .args(["resolve"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("missing_dependency"));
}

#[test]
fn test_resolve_cycle_fails() {
    let tmp = project(
        r#"
[[module]]
key = "A"
version = "1.0.0"
requires = { B = "*" }

[[module]]
key = "B"
version = "1.0.0"
requires = { A = "*" }
"#,
    );

    modres_cmd(tmp.path())
        .current_dir(tmp.path())
        .args(["resolve"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("circular_dependency"));
}

#[test]
fn test_resolve_bad_constraint_fails() {
    let tmp = project(
        r#"
[[module]]
key = "A"
version = "1.0.0"
requires = { B = "~1.0" }
"#,
    );

    modres_cmd(tmp.path())
        .current_dir(tmp.path())
        .args(["resolve"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Manifest error"));
}
