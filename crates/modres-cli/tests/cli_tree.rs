mod common;

use common::{modres_cmd, project, APP};
use predicates::prelude::*;

#[test]
fn test_tree_shows_dependencies() {
    let tmp = project(APP);

    modres_cmd(tmp.path())
        .current_dir(tmp.path())
        .args(["tree"])
        .assert()
        .success()
        .stdout(
            "\
Admin@1.0.0
├── Core@1.0.0
└── Auth@1.1.0
    └── Core@1.0.0
",
        );
}

#[test]
fn test_tree_why() {
    let tmp = project(APP);

    modres_cmd(tmp.path())
        .current_dir(tmp.path())
        .args(["tree", "--why", "Core"])
        .assert()
        .success()
        .stdout("Paths to Core:\nAdmin -> Core\n");
}

#[test]
fn test_tree_inverted() {
    let tmp = project(APP);

    modres_cmd(tmp.path())
        .current_dir(tmp.path())
        .args(["tree", "--inverted"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Core@1.0.0\n"));
}

#[test]
fn test_tree_warns_about_missing_dependencies() {
    let tmp = project(
        r#"
[[module]]
key = "X"
version = "1.0.0"
requires = { Y = "*" }
"#,
    );

    modres_cmd(tmp.path())
        .current_dir(tmp.path())
        .args(["tree"])
        .assert()
        .success()
        .stdout("X@1.0.0\n")
        .stderr(predicate::str::contains("X requires missing dependency Y"));
}
