//! Chain command implementation
//!
//! This module implements the `chain` command for printing the audit
//! chain and checking its integrity. The chain lives for one process:
//! given document files, the command runs the compliance pass over them
//! first and then prints the ledger that run produced. Without files
//! only the genesis block is listed.

use crate::config::load_config;
use crate::core::batch::{DocumentInput, DocumentPipeline};
use crate::domain::document::DocumentId;
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Arguments for the chain command
#[derive(Args, Debug)]
pub struct ChainArgs {
    /// Document files to process before printing the chain
    pub files: Vec<PathBuf>,

    /// Verify chain integrity after listing
    #[arg(long)]
    pub verify: bool,
}

impl ChainArgs {
    /// Execute the chain command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(files = self.files.len(), "Starting chain command");

        // Load configuration
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let pipeline = match DocumentPipeline::from_config(&config).await {
            Ok(p) => p,
            Err(e) => {
                tracing::error!(error = %e, "Failed to assemble pipeline");
                eprintln!("Failed to initialize: {e}");
                return Ok(5); // Fatal error exit code
            }
        };

        // Populate the chain from the given documents
        if !self.files.is_empty() {
            let mut inputs = Vec::with_capacity(self.files.len());
            for path in &self.files {
                let content = match fs::read_to_string(path) {
                    Ok(c) => c,
                    Err(e) => {
                        eprintln!("Failed to read {}: {e}", path.display());
                        return Ok(2);
                    }
                };
                let stem = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("document");
                let doc_id = match DocumentId::new(stem) {
                    Ok(id) => id,
                    Err(e) => {
                        eprintln!("Invalid document id for {}: {e}", path.display());
                        return Ok(2);
                    }
                };
                inputs.push(DocumentInput::new(doc_id, content));
            }

            let summary = pipeline
                .process_batch(inputs, "audit_check", "admin", None)
                .await;
            println!(
                "🚀 Processed {} document(s), {} failed",
                summary.total_documents, summary.failed
            );
            println!();
        }

        let chain = pipeline.orchestrator().chain();
        let blocks = chain.snapshot().await;

        println!("🔗 Audit Chain ({} block(s)):", blocks.len());
        println!("{}", serde_json::to_string_pretty(&blocks)?);
        println!();

        if self.verify {
            let verification = chain.verify().await;
            println!("{}", serde_json::to_string_pretty(&verification)?);
            if verification.valid {
                println!("✅ Chain integrity verified");
                Ok(0)
            } else {
                println!("❌ Chain integrity check failed");
                Ok(1) // Findings exit code
            }
        } else {
            Ok(0)
        }
    }
}
