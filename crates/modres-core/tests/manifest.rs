use modres_core::manifest::ModuleManifest;
use tempfile::TempDir;

const SAMPLE: &str = r#"
[[module]]
key = "Core"
version = "1.0.0"
tags = ["kernel"]

[[module]]
key = "Auth"
version = "1.0.0"
interfaces = ["AuthProvider"]

[module.requires]
Core = "^1.0"

[module.optional]
Theme = "*"

[[module]]
key = "Admin"
version = "1.0.0"
description = "Back office"

[module.requires]
Auth = "^1.0"
Core = "^1.0"

[module.conflicts]
LegacyAdmin = "*"
"#;

#[test]
fn test_parse_modules_in_file_order() {
    let manifest = ModuleManifest::from_str(SAMPLE).unwrap();
    let keys: Vec<&str> = manifest.modules.iter().map(|m| m.key.as_str()).collect();
    assert_eq!(keys, ["Core", "Auth", "Admin"]);
    assert_eq!(manifest.modules[2].description.as_deref(), Some("Back office"));
}

#[test]
fn test_to_descriptors_parses_constraints() {
    let manifest = ModuleManifest::from_str(SAMPLE).unwrap();
    let descriptors = manifest.to_descriptors().unwrap();
    assert_eq!(descriptors.len(), 3);

    let auth = &descriptors[1];
    assert_eq!(auth.required().len(), 1);
    assert!(auth.required()["Core"].satisfied_by("1.4.0"));
    assert!(auth.optional()["Theme"].is_any());
    assert!(auth.implements("AuthProvider"));

    let admin = &descriptors[2];
    assert_eq!(admin.required().len(), 2);
    assert_eq!(admin.conflicts().len(), 1);
}

#[test]
fn test_empty_manifest_has_no_modules() {
    let manifest = ModuleManifest::from_str("").unwrap();
    assert!(manifest.modules.is_empty());
    assert!(manifest.to_descriptors().unwrap().is_empty());
}

#[test]
fn test_bad_constraint_is_manifest_error() {
    let toml = r#"
[[module]]
key = "X"
version = "1.0.0"

[module.requires]
Y = "~1.0"
"#;
    let manifest = ModuleManifest::from_str(toml).unwrap();
    let err = manifest.to_descriptors().unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("Manifest error"), "got: {msg}");
    assert!(msg.contains("`X`"), "got: {msg}");
}

#[test]
fn test_missing_version_fails_to_parse() {
    let toml = r#"
[[module]]
key = "X"
"#;
    let err = ModuleManifest::from_str(toml).unwrap_err();
    assert!(err.to_string().contains("Failed to parse Modules.toml"));
}

#[test]
fn test_duplicate_keys_rejected_by_registry() {
    let toml = r#"
[[module]]
key = "Core"
version = "1.0.0"

[[module]]
key = "Core"
version = "2.0.0"
"#;
    let manifest = ModuleManifest::from_str(toml).unwrap();
    assert_eq!(manifest.to_descriptors().unwrap().len(), 2);
    let err = manifest.to_registry().unwrap_err();
    assert!(err.to_string().contains("already registered"));
}

#[test]
fn test_from_path_missing_file() {
    let tmp = TempDir::new().unwrap();
    let err = ModuleManifest::from_path(&tmp.path().join("Modules.toml")).unwrap_err();
    assert!(err.to_string().contains("Failed to read"));
}

#[test]
fn test_from_path_and_pretty_roundtrip() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("Modules.toml");
    std::fs::write(&path, SAMPLE).unwrap();
    let manifest = ModuleManifest::from_path(&path).unwrap();
    let rendered = toml::to_string_pretty(&manifest).unwrap();
    let reparsed = ModuleManifest::from_str(&rendered).unwrap();
    assert_eq!(reparsed.modules.len(), 3);
    assert_eq!(reparsed.modules[1].requires["Core"], "^1.0");
}
