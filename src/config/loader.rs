//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::MedVaultConfig;
use crate::config::secret::secret_string;
use crate::detection::DetectorBackend;
use crate::domain::errors::MedVaultError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into MedVaultConfig
/// 4. Applies environment variable overrides (MEDVAULT_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use medvault::config::load_config;
///
/// let config = load_config("medvault.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<MedVaultConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MedVaultError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        MedVaultError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: MedVaultConfig = toml::from_str(&contents)
        .map_err(|e| MedVaultError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        MedVaultError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched so placeholder examples in comments
/// do not have to be set.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();
    let mut processed_lines = Vec::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim_start();

        // Skip comment lines - don't process env vars in comments
        if trimmed.starts_with('#') {
            processed_lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        processed_lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(MedVaultError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    let mut result = processed_lines.join("\n");
    if input.ends_with('\n') {
        result.push('\n');
    }
    Ok(result)
}

/// Applies environment variable overrides using the MEDVAULT_* prefix
///
/// Environment variables follow the pattern: MEDVAULT_<SECTION>_<KEY>
/// For example: MEDVAULT_AUDIT_LOG_PATH, MEDVAULT_DETECTION_BACKEND
fn apply_env_overrides(config: &mut MedVaultConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("MEDVAULT_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("MEDVAULT_APPLICATION_DEFAULT_MODE") {
        config.application.default_mode = val;
    }

    // Detection overrides
    if let Ok(val) = std::env::var("MEDVAULT_DETECTION_BACKEND") {
        match val.as_str() {
            "rules" => config.detection.backend = DetectorBackend::Rules,
            "statistical" => config.detection.backend = DetectorBackend::Statistical,
            _ => {}
        }
    }
    if let Ok(val) = std::env::var("MEDVAULT_DETECTION_CONFIDENCE_THRESHOLD") {
        if let Ok(threshold) = val.parse() {
            config.detection.confidence_threshold = threshold;
        }
    }
    if let Ok(val) = std::env::var("MEDVAULT_DETECTION_RULE_LIBRARY") {
        config.detection.rule_library = Some(val);
    }

    // Audit overrides
    if let Ok(val) = std::env::var("MEDVAULT_AUDIT_LOG_PATH") {
        config.audit.log_path = val;
    }

    // Alert overrides
    if let Ok(val) = std::env::var("MEDVAULT_ALERTS_ENABLED") {
        config.alerts.enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("MEDVAULT_ALERTS_WEBHOOK_URL") {
        config.alerts.webhook_url = val;
    }
    if let Ok(val) = std::env::var("MEDVAULT_ALERTS_AUTH_TOKEN") {
        config.alerts.auth_token = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("MEDVAULT_ALERTS_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.alerts.timeout_seconds = timeout;
        }
    }

    // Processing overrides
    if let Ok(val) = std::env::var("MEDVAULT_PROCESSING_PARALLELISM") {
        if let Ok(parallelism) = val.parse() {
            config.processing.parallelism = parallelism;
        }
    }

    // Logging overrides
    if let Ok(val) = std::env::var("MEDVAULT_LOGGING_CONSOLE_ENABLED") {
        config.logging.console_enabled = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("MEDVAULT_LOGGING_FILE_ENABLED") {
        config.logging.file_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("MEDVAULT_LOGGING_DIRECTORY") {
        config.logging.directory = val;
    }
    if let Ok(val) = std::env::var("MEDVAULT_LOGGING_ROTATION") {
        config.logging.rotation = val;
    }
}
