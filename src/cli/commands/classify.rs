//! Classify command implementation
//!
//! This module implements the `classify` command for classifying a
//! document into a clinical category. Classification is a pure read:
//! nothing is written to the audit trail.

use crate::classifier::DocumentClassifier;
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Arguments for the classify command
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Document file to classify
    pub file: PathBuf,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

impl ClassifyArgs {
    /// Execute the classify command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(file = %self.file.display(), "Classifying document");

        let content = match fs::read_to_string(&self.file) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to read {}: {e}", self.file.display());
                return Ok(2); // Usage error exit code
            }
        };

        let classifier = DocumentClassifier::new()?;
        let result = classifier.classify(&content);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!("📋 Classification Result:");
            println!("  Label: {}", result.label);
            println!("  Confidence: {:.4}", result.confidence);
            if !result.scores.is_empty() {
                println!("  Scores:");
                for (category, score) in &result.scores {
                    println!("    {category}: {score:.3}");
                }
            }
            if !result.evidence.is_empty() {
                println!("  Evidence:");
                for cue in &result.evidence {
                    println!("    - {cue}");
                }
            }
        }

        Ok(0)
    }
}
