#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub const APP: &str = r#"
[[module]]
key = "Core"
version = "1.0.0"
tags = ["base"]

[[module]]
key = "Admin"
version = "1.0.0"
tags = ["backend"]

[module.requires]
Auth = "^1.0"
Core = "^1.0"

[[module]]
key = "Auth"
version = "1.1.0"
interfaces = ["AuthProvider"]
tags = ["security", "backend"]

[module.requires]
Core = "^1.0"

[module.optional]
Theme = "*"
"#;

/// A `modres` invocation isolated from the user's config and environment.
#[allow(deprecated)]
pub fn modres_cmd(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("modres").unwrap();
    cmd.env("MODRES_HOME", home)
        .env_remove("MODRES_MANIFEST")
        .env_remove("RUST_LOG");
    cmd
}

/// A temp project containing `Modules.toml` with `content`.
pub fn project(content: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("Modules.toml"), content).unwrap();
    tmp
}
