use modres_core::config::{GlobalConfig, OutputFormat};
use tempfile::TempDir;

#[test]
fn test_global_config_defaults() {
    let config = GlobalConfig::default();
    assert_eq!(config.resolver.manifest, "Modules.toml");
    assert_eq!(config.output.format, OutputFormat::Text);
    assert!(config.output.color);
}

#[test]
fn test_global_config_defaults_from_empty_toml() {
    let config: GlobalConfig = toml::from_str("").unwrap();
    assert_eq!(config.resolver.manifest, "Modules.toml");
    assert!(config.output.color);
}

#[test]
fn test_global_config_parse_from_toml() {
    let toml = r#"
[resolver]
manifest = "app-modules.toml"

[output]
format = "json"
color = false
"#;
    let config: GlobalConfig = toml::from_str(toml).unwrap();
    assert_eq!(config.resolver.manifest, "app-modules.toml");
    assert_eq!(config.output.format, OutputFormat::Json);
    assert!(!config.output.color);
}

#[test]
fn test_load_from_missing_file_defaults() {
    let tmp = TempDir::new().unwrap();
    let config = GlobalConfig::load_from(&tmp.path().join("config.toml")).unwrap();
    assert_eq!(config.output.format, OutputFormat::Text);
}

#[test]
fn test_load_from_invalid_file_is_config_error() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.toml");
    std::fs::write(&path, "[output]\nformat = \"yaml\"\n").unwrap();
    let err = GlobalConfig::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("Config error"), "got: {err}");
}

#[test]
fn test_output_format_from_str() {
    assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
    assert_eq!("TEXT".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
    assert!("yaml".parse::<OutputFormat>().is_err());
    assert_eq!(OutputFormat::Json.to_string(), "json");
}
