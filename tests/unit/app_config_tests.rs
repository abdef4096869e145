/*!
 * Tests for application configuration loading and validation
 */

use egrul_resolver::app_config::{Config, LogLevel};

/// Test the default configuration values
#[test]
fn test_config_default_withNoOverrides_shouldUseRegistryDefaults() {
    let config = Config::default();

    assert_eq!(config.registry.endpoint, "https://egrul.nalog.ru");
    assert_eq!(config.registry.timeout_secs, 30);
    assert_eq!(config.registry.poll_interval_ms, 1000);
    assert_eq!(config.registry.poll_max_attempts, 60);
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test partial JSON config with serde defaults filling the gaps
#[test]
fn test_config_parse_withPartialJson_shouldFillDefaults() {
    let json = r#"{
        "registry": { "poll_interval_ms": 250 },
        "log_level": "debug"
    }"#;

    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.registry.poll_interval_ms, 250);
    assert_eq!(config.registry.endpoint, "https://egrul.nalog.ru");
    assert_eq!(config.log_level, LogLevel::Debug);
    assert!(config.validate().is_ok());
}

/// Test empty JSON config
#[test]
fn test_config_parse_withEmptyJson_shouldEqualDefaults() {
    let config: Config = serde_json::from_str("{}").unwrap();
    assert_eq!(config.registry.endpoint, Config::default().registry.endpoint);
}

/// Test endpoint validation
#[test]
fn test_config_validate_withMalformedEndpoint_shouldFail() {
    let mut config = Config::default();
    config.registry.endpoint = "not a url".to_string();
    assert!(config.validate().is_err());
}

/// Test poll settings validation
#[test]
fn test_config_validate_withZeroPollSettings_shouldFail() {
    let mut config = Config::default();
    config.registry.poll_interval_ms = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.registry.poll_max_attempts = 0;
    assert!(config.validate().is_err());
}

/// Test loading from a missing file
#[test]
fn test_config_from_file_withMissingFile_shouldFail() {
    assert!(Config::from_file("definitely/not/here.json").is_err());
}
