//! Domain error types
//!
//! This module defines the error hierarchy for MedVault. All errors are
//! domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main MedVault error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific failure classes and provides context for error handling.
#[derive(Debug, Error)]
pub enum MedVaultError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Rejected caller input (empty document content, malformed request fields)
    #[error("Invalid input: {0}")]
    Input(String),

    /// Disclosure mode not recognized by any redaction policy
    #[error("Unsupported disclosure mode: {0}")]
    UnsupportedMode(String),

    /// Audit chain integrity errors (hashing or payload canonicalization)
    #[error("Audit chain error: {0}")]
    Integrity(String),

    /// Durable audit store errors
    #[error("Audit storage error: {0}")]
    Storage(String),

    /// Violation alert delivery errors
    #[error("Alert delivery error: {0}")]
    Notification(String),

    /// Entity detection errors
    #[error("Detection error: {0}")]
    Detection(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for MedVaultError {
    fn from(err: std::io::Error) -> Self {
        MedVaultError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for MedVaultError {
    fn from(err: serde_json::Error) -> Self {
        MedVaultError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for MedVaultError {
    fn from(err: toml::de::Error) -> Self {
        MedVaultError::Configuration(format!("TOML parse error: {err}"))
    }
}
