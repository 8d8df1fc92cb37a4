mod common;

use common::{modres_cmd, project, APP};
use predicates::prelude::*;

#[test]
fn test_list_all_modules() {
    let tmp = project(APP);

    modres_cmd(tmp.path())
        .current_dir(tmp.path())
        .args(["list"])
        .assert()
        .success()
        .stdout(
            "Core 1.0.0 [base]\n\
             Admin 1.0.0 [backend]\n\
             Auth 1.1.0 implements AuthProvider [security, backend]\n",
        );
}

#[test]
fn test_list_by_tag_and_interface() {
    let tmp = project(APP);

    modres_cmd(tmp.path())
        .current_dir(tmp.path())
        .args(["list", "--tag", "backend", "--interface", "AuthProvider"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Auth 1.1.0"));
}

#[test]
fn test_list_no_match_shows_known_tags() {
    let tmp = project(APP);

    modres_cmd(tmp.path())
        .current_dir(tmp.path())
        .args(["list", "--tag", "billing"])
        .assert()
        .success()
        .stdout("No matching modules.\n")
        .stderr(predicate::str::contains("backend, base, security"));
}

#[test]
fn test_list_duplicate_key_fails() {
    let tmp = project(
        r#"
[[module]]
key = "Core"
version = "1.0.0"

[[module]]
key = "Core"
version = "2.0.0"
"#,
    );

    modres_cmd(tmp.path())
        .current_dir(tmp.path())
        .args(["list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already registered"));
}
