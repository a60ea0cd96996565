//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "medvault.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing MedVault configuration");
        println!();

        // Check if file already exists
        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        // Write to file
        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Pick a detection backend: 'rules' or 'statistical'");
                println!("  3. To enable violation alerts:");
                println!("     - Set alerts.enabled = true and alerts.webhook_url");
                println!("     - Put the bearer token in MEDVAULT_ALERT_TOKEN (.env works)");
                println!("  4. Validate configuration: medvault validate-config");
                println!("  5. Process documents: medvault process <files...>");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate the starter configuration
    fn generate_config() -> String {
        r#"# MedVault Configuration File
# Medical Document Compliance Core

[application]
log_level = "info"
default_mode = "research"  # research | patient | insurance | legal

[detection]
# Entity detection backend (rules or statistical)
backend = "rules"

# Minimum confidence for statistical detections (0.0 - 1.0)
confidence_threshold = 0.6

# Optional TOML file with extra detection rules, merged over the
# built-in table
# rule_library = "rules/custom_rules.toml"

[audit]
# Append-only JSON-lines audit log
log_path = "audit/medvault_audit.jsonl"

[alerts]
# Webhook notified when a document has HIPAA violations
enabled = false
# webhook_url = "https://alerts.example.com/hipaa"
# auth_token = "${MEDVAULT_ALERT_TOKEN}"
timeout_seconds = 10

[processing]
# Maximum documents processed concurrently in a batch
parallelism = 4

[logging]
console_enabled = true

# JSON file logging with rotation
file_enabled = false
directory = "logs"
rotation = "daily"  # daily | hourly | never
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_args_defaults() {
        let args = InitArgs {
            output: "medvault.toml".to_string(),
            force: false,
        };

        assert_eq!(args.output, "medvault.toml");
        assert!(!args.force);
    }

    #[test]
    fn test_generate_config_sections() {
        let config = InitArgs::generate_config();
        assert!(config.contains("[application]"));
        assert!(config.contains("[detection]"));
        assert!(config.contains("[audit]"));
        assert!(config.contains("[alerts]"));
        assert!(config.contains("[processing]"));
        assert!(config.contains("[logging]"));
    }

    #[test]
    fn test_generated_config_is_valid() {
        let config: crate::config::MedVaultConfig =
            toml::from_str(&InitArgs::generate_config()).unwrap();
        assert!(config.validate().is_ok());
    }
}
