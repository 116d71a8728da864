use api_metadata_cli::config::{self, AppConfig};
use api_metadata_cli::VersionToken;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("nested/apimeta.yaml");

    let cfg = AppConfig {
        metadata_file: Some("tables/metadata.json".into()),
        default_version: Some("2024-08-05".into()),
        command_prefix: Some("mycli api".into()),
        log_level: None,
    };
    config::save_config(&cfg, &config_path).unwrap();

    let written = fs::read_to_string(&config_path).unwrap();
    assert!(written.contains("defaultVersion:"));
    assert!(written.contains("2024-08-05"));
    assert!(!written.contains("logLevel"));

    let loaded = config::load_config(&config_path).unwrap();
    assert_eq!(loaded, cfg);
    assert_eq!(
        loaded.default_version().unwrap(),
        Some("2024-08-05".parse::<VersionToken>().unwrap())
    );
}

#[test]
fn test_empty_file_is_default_config() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("apimeta.yaml");
    fs::write(&config_path, "").unwrap();

    assert_eq!(config::load_config(&config_path).unwrap(), AppConfig::default());
}

#[test]
fn test_env_placeholders_expand_before_parsing() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("apimeta.yaml");
    fs::write(
        &config_path,
        "metadataFile: ${APIMETA_CFG_TEST_TABLE:-/opt/metadata.json}\nlogLevel: ${APIMETA_CFG_TEST_LEVEL:-info}\n",
    )
    .unwrap();
    std::env::remove_var("APIMETA_CFG_TEST_TABLE");
    std::env::set_var("APIMETA_CFG_TEST_LEVEL", "debug");

    let cfg = config::load_config(&config_path).unwrap();
    assert_eq!(cfg.metadata_file.as_deref(), Some("/opt/metadata.json"));
    assert_eq!(cfg.log_level(), "debug");
}

#[test]
fn test_invalid_yaml_names_the_file() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("apimeta.yaml");
    fs::write(&config_path, "commandPrefix: [unterminated\n").unwrap();

    let err = config::load_config(&config_path).unwrap_err();
    assert!(format!("{err:#}").contains("apimeta.yaml"));
}

#[test]
fn test_invalid_default_version_is_reported() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("apimeta.yaml");
    fs::write(&config_path, "defaultVersion: last tuesday\n").unwrap();

    let cfg = config::load_config(&config_path).unwrap();
    let err = cfg.default_version().unwrap_err();
    assert!(format!("{err:#}").contains("invalid API version 'last tuesday'"));
}
