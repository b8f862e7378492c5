use std::time::Duration;

use crate::config::{ClientConfig, ConfigManager, DEFAULT_TIMEOUT};

#[test]
fn test_defaults() {
    let config = ClientConfig::new("https://localhost:55000", "wazuh", "secret");
    assert!(config.verify_tls);
    assert!(config.version.is_none());
    assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
}

#[test]
fn test_builder_methods() {
    let config = ClientConfig::new("https://wazuh:55000", "wazuh", "secret")
        .with_version("4.7.3")
        .with_verify_tls(false)
        .with_timeout(Duration::from_secs(30));
    assert_eq!(config.version.as_deref(), Some("4.7.3"));
    assert!(!config.verify_tls);
    assert_eq!(config.timeout(), Duration::from_secs(30));
}

#[test]
fn test_minimal_toml_verifies_tls() {
    let config: ClientConfig = toml::from_str(
        r#"
        url = "https://wazuh:55000"
        username = "wazuh"
        password = "secret"
        "#,
    )
    .unwrap();
    assert!(config.verify_tls);
    assert!(config.timeout_secs.is_none());
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    let config = ClientConfig::new("https://wazuh:55000", "wazuh", "secret").with_version("4.2.1");

    ConfigManager::save_to(&config, &path).unwrap();
    let loaded = ConfigManager::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_load_missing_file_is_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ConfigManager::load_from(&dir.path().join("absent.toml")).unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn test_load_invalid_toml_is_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "url = ").unwrap();
    let err = ConfigManager::load_from(&path).unwrap_err();
    assert!(err.is_configuration());
    assert!(err.to_string().contains("cannot parse"));
}
