//! Configuration schema types
//!
//! Defines the structure of the `medvault.toml` configuration file. Every
//! section has sensible defaults, so a missing section or a missing file
//! never blocks startup on its own.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::SecretString;
use crate::detection::DetectorBackend;

/// Disclosure modes accepted for `application.default_mode`
const VALID_MODES: [&str; 4] = ["research", "patient", "insurance", "legal"];

/// Main MedVault configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MedVaultConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Entity detection settings
    #[serde(default)]
    pub detection: DetectionConfig,

    /// Durable audit log settings
    #[serde(default)]
    pub audit: AuditConfig,

    /// Violation alert webhook settings
    #[serde(default)]
    pub alerts: AlertConfig,

    /// Batch processing settings
    #[serde(default)]
    pub processing: ProcessingConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl MedVaultConfig {
    /// Load, substitute, and validate a configuration file
    ///
    /// Convenience alias for [`crate::config::load_config`].
    pub fn from_file(path: impl AsRef<Path>) -> crate::domain::Result<Self> {
        crate::config::loader::load_config(path)
    }

    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.detection.validate()?;
        self.audit.validate()?;
        self.alerts.validate()?;
        self.processing.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Disclosure mode used when a request does not name one
    #[serde(default = "default_mode")]
    pub default_mode: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }

        if !VALID_MODES.contains(&self.default_mode.as_str()) {
            return Err(format!(
                "Invalid default_mode '{}'. Must be one of: {}",
                self.default_mode,
                VALID_MODES.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            default_mode: default_mode(),
        }
    }
}

/// Entity detection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Detector backend (rules or statistical)
    #[serde(default)]
    pub backend: DetectorBackend,

    /// Minimum posterior for the statistical backend to emit a span
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,

    /// Optional TOML rule library merged on top of the built-in rules
    #[serde(default)]
    pub rule_library: Option<String>,
}

impl DetectionConfig {
    fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(format!(
                "detection.confidence_threshold must be between 0.0 and 1.0, got {}",
                self.confidence_threshold
            ));
        }
        if let Some(path) = &self.rule_library {
            if path.is_empty() {
                return Err("detection.rule_library cannot be an empty path".to_string());
            }
        }
        Ok(())
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            backend: DetectorBackend::default(),
            confidence_threshold: default_confidence_threshold(),
            rule_library: None,
        }
    }
}

/// Durable audit log configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Path of the JSON-lines audit log file
    #[serde(default = "default_audit_log_path")]
    pub log_path: String,
}

impl AuditConfig {
    fn validate(&self) -> Result<(), String> {
        if self.log_path.is_empty() {
            return Err("audit.log_path cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            log_path: default_audit_log_path(),
        }
    }
}

/// Violation alert webhook configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertConfig {
    /// Whether violation alerts are delivered at all
    #[serde(default)]
    pub enabled: bool,

    /// Webhook endpoint receiving alert payloads
    #[serde(default)]
    pub webhook_url: String,

    /// Optional bearer token sent with each alert
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub auth_token: Option<SecretString>,

    /// Delivery timeout in seconds
    #[serde(default = "default_alert_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl AlertConfig {
    fn validate(&self) -> Result<(), String> {
        if self.enabled {
            if self.webhook_url.is_empty() {
                return Err(
                    "alerts.webhook_url cannot be empty when alerts are enabled".to_string()
                );
            }
            if !self.webhook_url.starts_with("http://")
                && !self.webhook_url.starts_with("https://")
            {
                return Err(
                    "alerts.webhook_url must start with http:// or https://".to_string()
                );
            }
        }

        if self.timeout_seconds == 0 || self.timeout_seconds > 300 {
            return Err(format!(
                "alerts.timeout_seconds must be between 1 and 300, got {}",
                self.timeout_seconds
            ));
        }
        Ok(())
    }
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            webhook_url: String::new(),
            auth_token: None,
            timeout_seconds: default_alert_timeout_seconds(),
        }
    }
}

/// Batch processing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Maximum number of documents processed concurrently
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,
}

impl ProcessingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.parallelism == 0 || self.parallelism > 64 {
            return Err(format!(
                "processing.parallelism must be between 1 and 64, got {}",
                self.parallelism
            ));
        }
        Ok(())
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            parallelism: default_parallelism(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log to stderr
    #[serde(default = "default_true")]
    pub console_enabled: bool,

    /// Also log to a rolling file
    #[serde(default)]
    pub file_enabled: bool,

    /// Directory for rolling log files
    #[serde(default = "default_log_directory")]
    pub directory: String,

    /// File rotation schedule (daily, hourly, never)
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.rotation.as_str()) {
            return Err(format!(
                "Invalid logging.rotation '{}'. Must be one of: {}",
                self.rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.file_enabled && self.directory.is_empty() {
            return Err(
                "logging.directory cannot be empty when file logging is enabled".to_string()
            );
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            console_enabled: true,
            file_enabled: false,
            directory: default_log_directory(),
            rotation: default_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_mode() -> String {
    "research".to_string()
}

fn default_confidence_threshold() -> f64 {
    0.6
}

fn default_audit_log_path() -> String {
    "audit/medvault_audit.jsonl".to_string()
}

fn default_alert_timeout_seconds() -> u64 {
    10
}

fn default_parallelism() -> usize {
    4
}

fn default_true() -> bool {
    true
}

fn default_log_directory() -> String {
    "logs".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_yields_defaults() {
        let config: MedVaultConfig = toml::from_str("").unwrap();

        assert_eq!(config.application.log_level, "info");
        assert_eq!(config.application.default_mode, "research");
        assert_eq!(config.detection.backend, DetectorBackend::Rules);
        assert_eq!(config.detection.confidence_threshold, 0.6);
        assert_eq!(config.audit.log_path, "audit/medvault_audit.jsonl");
        assert!(!config.alerts.enabled);
        assert_eq!(config.processing.parallelism, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig {
            log_level: "info".to_string(),
            default_mode: "research".to_string(),
        };
        assert!(config.validate().is_ok());

        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());

        config.log_level = "debug".to_string();
        config.default_mode = "celebrity".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_detection_config_validation() {
        let mut config = DetectionConfig::default();
        assert!(config.validate().is_ok());

        config.confidence_threshold = 1.5;
        assert!(config.validate().is_err());

        config.confidence_threshold = -0.1;
        assert!(config.validate().is_err());

        config.confidence_threshold = 0.6;
        config.rule_library = Some(String::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_alert_config_validation() {
        let mut config = AlertConfig::default();
        assert!(config.validate().is_ok());

        // Enabled alerts require a well-formed endpoint
        config.enabled = true;
        assert!(config.validate().is_err());

        config.webhook_url = "ftp://alerts.example.com".to_string();
        assert!(config.validate().is_err());

        config.webhook_url = "https://alerts.example.com/hook".to_string();
        assert!(config.validate().is_ok());

        config.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_processing_config_validation() {
        let mut config = ProcessingConfig::default();
        assert!(config.validate().is_ok());

        config.parallelism = 0;
        assert!(config.validate().is_err());

        config.parallelism = 65;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_logging_config_validation() {
        let mut config = LoggingConfig::default();
        assert!(config.validate().is_ok());

        config.rotation = "weekly".to_string();
        assert!(config.validate().is_err());

        config.rotation = "hourly".to_string();
        config.file_enabled = true;
        config.directory = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_backend_parses_from_toml() {
        let config: MedVaultConfig = toml::from_str(
            r#"
[detection]
backend = "statistical"
confidence_threshold = 0.75
"#,
        )
        .unwrap();

        assert_eq!(config.detection.backend, DetectorBackend::Statistical);
        assert_eq!(config.detection.confidence_threshold, 0.75);
    }
}
