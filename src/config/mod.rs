//! Configuration management for MedVault.
//!
//! TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! MedVault uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Environment variable overrides (`MEDVAULT_*` prefix)
//! - Default values for every setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use medvault::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("medvault.toml")?;
//!
//! println!("Default mode: {}", config.application.default_mode);
//! println!("Audit log: {}", config.audit.log_path);
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//! default_mode = "research"
//!
//! [detection]
//! backend = "rules"
//! confidence_threshold = 0.6
//!
//! [audit]
//! log_path = "audit/medvault_audit.jsonl"
//!
//! [alerts]
//! enabled = true
//! webhook_url = "https://alerts.example.com/hipaa"
//! auth_token = "${MEDVAULT_ALERT_TOKEN}"
//!
//! [processing]
//! parallelism = 4
//! ```
//!
//! Secrets are best supplied through `${VAR_NAME}` substitution or the
//! `MEDVAULT_*` override variables rather than written into the file.

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    AlertConfig, ApplicationConfig, AuditConfig, DetectionConfig, LoggingConfig, MedVaultConfig,
    ProcessingConfig,
};
pub use secret::{secret_string, secret_string_opt, SecretString, SecretValue};
