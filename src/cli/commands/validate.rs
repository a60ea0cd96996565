//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the MedVault configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // Load configuration
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        // Validate configuration
        match config.validate() {
            Ok(_) => {
                println!("✅ Configuration is valid");
                println!();
                println!("Configuration Summary:");
                println!("  Log Level: {}", config.application.log_level);
                println!("  Default Mode: {}", config.application.default_mode);
                println!("  Detection Backend: {}", config.detection.backend);
                println!(
                    "  Confidence Threshold: {}",
                    config.detection.confidence_threshold
                );
                if let Some(ref library) = config.detection.rule_library {
                    println!("  Rule Library: {library}");
                }
                println!("  Audit Log Path: {}", config.audit.log_path);
                println!("  Alerts Enabled: {}", config.alerts.enabled);
                if config.alerts.enabled {
                    println!("  Alert Webhook: {}", config.alerts.webhook_url);
                    println!("  Alert Timeout: {}s", config.alerts.timeout_seconds);
                }
                println!("  Parallelism: {}", config.processing.parallelism);
                println!(
                    "  File Logging: {}",
                    if config.logging.file_enabled {
                        format!("{} ({})", config.logging.directory, config.logging.rotation)
                    } else {
                        "disabled".to_string()
                    }
                );
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                Ok(2) // Configuration error exit code
            }
        }
    }
}
