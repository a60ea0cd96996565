//! Process command implementation
//!
//! This module implements the `process` command: the full compliance
//! pipeline (scan, audit, chain, classify, redact) over one or more
//! document files.

use crate::config::load_config;
use crate::core::batch::{DocumentInput, DocumentPipeline};
use crate::domain::document::DocumentId;
use crate::log_document_start;
use crate::redaction::DisclosureMode;
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Arguments for the process command
#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// Document files to process
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Disclosure mode for redaction (research, patient, insurance, legal)
    ///
    /// Without a mode, documents pass through unredacted.
    #[arg(short, long)]
    pub mode: Option<String>,

    /// Action recorded in the audit trail
    #[arg(long, default_value = "audit_check")]
    pub action: String,

    /// User recorded in the audit trail
    #[arg(long, default_value = "admin")]
    pub user: String,

    /// Print outcomes as JSON instead of a summary
    #[arg(long)]
    pub json: bool,

    /// Directory to write redacted documents into
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Print the audit chain after processing
    #[arg(long)]
    pub show_chain: bool,
}

impl ProcessArgs {
    /// Execute the process command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(files = self.files.len(), "Starting process command");

        // Load configuration
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        // Resolve the disclosure mode leniently: an unrecognized value is
        // logged and means no redaction.
        let mode = self.mode.as_deref().and_then(DisclosureMode::resolve_lenient);
        if self.mode.is_some() && mode.is_none() {
            eprintln!(
                "⚠️  Unrecognized mode '{}', output will not be redacted",
                self.mode.as_deref().unwrap_or_default()
            );
        }

        // Read the input documents
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
            log_document_start!(&doc_id, self.action.as_str());
            inputs.push(DocumentInput::new(doc_id, content));
        }

        // Assemble the pipeline
        let pipeline = match DocumentPipeline::from_config(&config).await {
            Ok(p) => p,
            Err(e) => {
                tracing::error!(error = %e, "Failed to assemble pipeline");
                eprintln!("Failed to initialize: {e}");
                return Ok(5); // Fatal error exit code
            }
        };

        println!("🚀 Processing {} document(s)...", inputs.len());
        println!();

        let summary = pipeline
            .process_batch(inputs, &self.action, &self.user, mode)
            .await;

        // Write redacted documents if requested
        if let Some(dir) = &self.output_dir {
            if let Err(e) = fs::create_dir_all(dir) {
                eprintln!("Failed to create output directory: {e}");
                return Ok(5);
            }
            for outcome in &summary.outcomes {
                let path = dir.join(format!("{}.redacted.txt", outcome.doc_id));
                if let Err(e) = fs::write(&path, &outcome.redacted) {
                    eprintln!("Failed to write {}: {e}", path.display());
                    return Ok(5);
                }
            }
            println!("📝 Redacted documents written to {}", dir.display());
            println!();
        }

        // Display outcomes
        if self.json {
            println!("{}", serde_json::to_string_pretty(&summary.outcomes)?);
        } else {
            for outcome in &summary.outcomes {
                let report = &outcome.report;
                println!(
                    "  {}: risk {}, violations [{}], label {}",
                    outcome.doc_id,
                    report.risk,
                    report.violations.join(", "),
                    report.classification.label
                );
            }
            println!();
            println!("📊 Batch Summary:");
            println!("  Total Documents: {}", summary.total_documents);
            println!("  Succeeded: {}", summary.succeeded);
            println!("  Failed: {}", summary.failed);
            println!("  High Risk: {}", summary.high_risk);
            println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
            println!("  Success Rate: {:.2}%", summary.success_rate());
            println!();
        }

        if !summary.errors.is_empty() {
            println!("⚠️  Errors encountered:");
            for error in &summary.errors {
                println!("  - {}: {}", error.doc_id, error.message);
            }
            println!();
        }

        // Print the chain built during this run
        if self.show_chain {
            let chain = pipeline.orchestrator().chain();
            let blocks = chain.snapshot().await;
            let verification = chain.verify().await;
            println!("🔗 Audit Chain:");
            println!("{}", serde_json::to_string_pretty(&blocks)?);
            println!("{}", serde_json::to_string_pretty(&verification)?);
            println!();
        }

        let exit_code = if summary.is_successful() {
            println!("✅ Processing completed successfully!");
            0
        } else {
            println!("⚠️  Processing completed with failures");
            1 // Partial success
        };

        Ok(exit_code)
    }
}
