//! Redact command implementation
//!
//! This module implements the `redact` command for removing protected
//! information from a document under a disclosure mode. Plain-text files
//! are redacted as one text; `.json` files are walked recursively with
//! every string leaf redacted independently.

use crate::config::load_config;
use crate::detection::build_detector;
use crate::redaction::{DisclosureMode, RedactionEngine};
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Arguments for the redact command
#[derive(Args, Debug)]
pub struct RedactArgs {
    /// Document file to redact
    pub file: PathBuf,

    /// Disclosure mode (research, patient, insurance, legal)
    #[arg(short, long)]
    pub mode: String,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl RedactArgs {
    /// Execute the redact command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(
            file = %self.file.display(),
            mode = %self.mode,
            "Redacting document"
        );

        // Load configuration
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let content = match fs::read_to_string(&self.file) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to read {}: {e}", self.file.display());
                return Ok(2);
            }
        };

        // Unrecognized modes degrade to no redaction at all; the fallback
        // is logged and surfaced to the user.
        let Some(mode) = DisclosureMode::resolve_lenient(&self.mode) else {
            eprintln!(
                "⚠️  Unrecognized mode '{}', output is unredacted",
                self.mode
            );
            self.emit(&content)?;
            return Ok(0);
        };

        let detector = match build_detector(&config.detection) {
            Ok(d) => d,
            Err(e) => {
                tracing::error!(error = %e, "Failed to build entity detector");
                eprintln!("Failed to initialize: {e}");
                return Ok(5); // Fatal error exit code
            }
        };
        let engine = RedactionEngine::new()?;

        let is_json = self
            .file
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        let redacted = if is_json {
            let value: serde_json::Value = match serde_json::from_str(&content) {
                Ok(v) => v,
                Err(e) => {
                    eprintln!("Failed to parse {} as JSON: {e}", self.file.display());
                    return Ok(2);
                }
            };
            let redacted_value = engine.redact_json(&value, detector.as_ref(), mode)?;
            serde_json::to_string_pretty(&redacted_value)?
        } else {
            let entities = detector.detect(&content)?;
            engine.redact(&content, &entities, mode)
        };

        self.emit(&redacted)?;
        Ok(0)
    }

    /// Write the result to the output file, or stdout without one
    fn emit(&self, text: &str) -> anyhow::Result<()> {
        match &self.output {
            Some(path) => {
                fs::write(path, text)?;
                println!("✅ Redacted document written to {}", path.display());
            }
            None => println!("{text}"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_args_creation() {
        let args = RedactArgs {
            file: PathBuf::from("notes.txt"),
            mode: "research".to_string(),
            output: None,
        };

        assert_eq!(args.mode, "research");
        assert!(args.output.is_none());
    }

    #[test]
    fn test_redact_args_with_output() {
        let args = RedactArgs {
            file: PathBuf::from("record.json"),
            mode: "legal".to_string(),
            output: Some(PathBuf::from("redacted.json")),
        };

        assert_eq!(args.output, Some(PathBuf::from("redacted.json")));
    }
}
