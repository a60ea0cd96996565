//! Integration tests for configuration loading and validation
//!
//! Note: Tests that modify environment variables should be run with --test-threads=1
//! to avoid interference between tests.

use medvault::config::load_config;
use medvault::detection::DetectorBackend;
use secrecy::ExposeSecret;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("MEDVAULT_APPLICATION_LOG_LEVEL");
    std::env::remove_var("MEDVAULT_DETECTION_BACKEND");
    std::env::remove_var("MEDVAULT_PROCESSING_PARALLELISM");
    std::env::remove_var("MEDVAULT_AUDIT_LOG_PATH");
    std::env::remove_var("TEST_WEBHOOK_TOKEN");
}

#[test]
fn test_load_complete_config() {
    cleanup_env_vars();
    let toml_content = r#"
[application]
log_level = "debug"
default_mode = "patient"

[detection]
backend = "statistical"
confidence_threshold = 0.75
rule_library = "rules/custom.toml"

[audit]
log_path = "audit/test_audit.jsonl"

[alerts]
enabled = true
webhook_url = "https://alerts.example.com/hipaa"
auth_token = "token-123"
timeout_seconds = 30

[processing]
parallelism = 8

[logging]
console_enabled = false
file_enabled = true
directory = "logs/test"
rotation = "hourly"
"#;

    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(temp_file.path()).expect("Failed to load config");

    // Verify application config
    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.application.default_mode, "patient");

    // Verify detection config
    assert_eq!(config.detection.backend, DetectorBackend::Statistical);
    assert_eq!(config.detection.confidence_threshold, 0.75);
    assert_eq!(
        config.detection.rule_library,
        Some("rules/custom.toml".to_string())
    );

    // Verify audit config
    assert_eq!(config.audit.log_path, "audit/test_audit.jsonl");

    // Verify alert config
    assert!(config.alerts.enabled);
    assert_eq!(config.alerts.webhook_url, "https://alerts.example.com/hipaa");
    let token = config.alerts.auth_token.expect("auth token should be set");
    assert_eq!(token.expose_secret(), "token-123");
    assert_eq!(config.alerts.timeout_seconds, 30);

    // Verify processing config
    assert_eq!(config.processing.parallelism, 8);

    // Verify logging config
    assert!(!config.logging.console_enabled);
    assert!(config.logging.file_enabled);
    assert_eq!(config.logging.directory, "logs/test");
    assert_eq!(config.logging.rotation, "hourly");
}

#[test]
fn test_load_minimal_config_with_defaults() {
    cleanup_env_vars();

    let toml_content = r#"
[application]
log_level = "warn"
"#;

    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(temp_file.path()).expect("Failed to load config");

    // Named value kept, everything else defaulted
    assert_eq!(config.application.log_level, "warn");
    assert_eq!(config.application.default_mode, "research");
    assert_eq!(config.detection.backend, DetectorBackend::Rules);
    assert_eq!(config.detection.confidence_threshold, 0.6);
    assert!(config.detection.rule_library.is_none());
    assert_eq!(config.audit.log_path, "audit/medvault_audit.jsonl");
    assert!(!config.alerts.enabled);
    assert_eq!(config.alerts.timeout_seconds, 10);
    assert_eq!(config.processing.parallelism, 4);
    assert!(config.logging.console_enabled);
    assert!(!config.logging.file_enabled);
    assert_eq!(config.logging.rotation, "daily");
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_WEBHOOK_TOKEN", "secret-token");

    let toml_content = r#"
[alerts]
enabled = true
webhook_url = "https://alerts.example.com/hipaa"
auth_token = "${TEST_WEBHOOK_TOKEN}"
"#;

    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(temp_file.path()).expect("Failed to load config");

    let token = config.alerts.auth_token.expect("auth token should be set");
    assert_eq!(token.expose_secret(), "secret-token");

    std::env::remove_var("TEST_WEBHOOK_TOKEN");
}

#[test]
fn test_missing_env_var_fails() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[alerts]
enabled = true
webhook_url = "https://alerts.example.com/hipaa"
auth_token = "${MEDVAULT_DEFINITELY_UNSET_TOKEN}"
"#;

    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let result = load_config(temp_file.path());
    assert!(result.is_err());
}

#[test]
fn test_env_var_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("MEDVAULT_APPLICATION_LOG_LEVEL", "trace");
    std::env::set_var("MEDVAULT_DETECTION_BACKEND", "statistical");
    std::env::set_var("MEDVAULT_PROCESSING_PARALLELISM", "16");

    let toml_content = r#"
[application]
log_level = "info"

[detection]
backend = "rules"

[processing]
parallelism = 4
"#;

    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(temp_file.path()).expect("Failed to load config");

    // Verify env var overrides took effect
    assert_eq!(config.application.log_level, "trace");
    assert_eq!(config.detection.backend, DetectorBackend::Statistical);
    assert_eq!(config.processing.parallelism, 16);

    std::env::remove_var("MEDVAULT_APPLICATION_LOG_LEVEL");
    std::env::remove_var("MEDVAULT_DETECTION_BACKEND");
    std::env::remove_var("MEDVAULT_PROCESSING_PARALLELISM");
}

#[test]
fn test_invalid_config_validation() {
    cleanup_env_vars();

    let toml_content = r#"
[application]
log_level = "invalid_level"
"#;

    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let result = load_config(temp_file.path());
    assert!(result.is_err());
}

#[test]
fn test_alerts_enabled_requires_webhook_url() {
    cleanup_env_vars();

    let toml_content = r#"
[alerts]
enabled = true
"#;

    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let result = load_config(temp_file.path());
    assert!(result.is_err());
}
