// MedVault - Medical Document Compliance Core
// Copyright (c) 2025 MedVault Contributors
// Licensed under the MIT License

//! # MedVault - Medical Document Compliance Core
//!
//! MedVault is a compliance engine for medical documents: it classifies
//! clinical text, scans for HIPAA Safe Harbor identifiers, redacts
//! protected information per disclosure mode, and records every access in
//! a tamper-evident audit trail.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Classifying** documents into clinical categories (discharge summary,
//!   lab report, prescription, ...)
//! - **Scanning** text for the 18 HIPAA Safe Harbor identifier categories
//! - **Redacting** detected entities under research, patient, insurance, or
//!   legal disclosure modes
//! - **Auditing** every processed document into a hash-linked chain and a
//!   durable append-only log
//!
//! ## Architecture
//!
//! MedVault follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (orchestrator, batch processing, alerts)
//! - [`audit`] - Hash chain and durable audit log
//! - [`compliance`] - HIPAA identifier scanning
//! - [`classifier`] - Clinical document classification
//! - [`detection`] - Entity detection backends (rules, statistical)
//! - [`redaction`] - Disclosure modes and the redaction engine
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use medvault::config::MedVaultConfig;
//! use medvault::core::batch::{DocumentInput, DocumentPipeline};
//! use medvault::domain::DocumentId;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Load configuration
//!     let config = MedVaultConfig::from_file("medvault.toml")?;
//!
//!     // Assemble the pipeline
//!     let pipeline = DocumentPipeline::from_config(&config).await?;
//!
//!     // Process a batch of documents
//!     let doc = DocumentInput::new(
//!         DocumentId::new("doc-001")?,
//!         "Patient John Doe, SSN 123-45-6789",
//!     );
//!     let summary = pipeline
//!         .process_batch(vec![doc], "audit_check", "admin", None)
//!         .await;
//!
//!     println!("Processed {} documents", summary.succeeded);
//!     Ok(())
//! }
//! ```
//!
//! ## Compliance Scanning
//!
//! The scanner is a pure function over text; it never touches the audit
//! trail and can run anywhere:
//!
//! ```rust
//! use medvault::compliance::{HipaaScanner, RiskLevel};
//!
//! # fn main() -> medvault::domain::Result<()> {
//! let scanner = HipaaScanner::new()?;
//! let report = scanner.report("Contact: john@example.com");
//!
//! assert_eq!(report.risk, RiskLevel::High);
//! assert!(report.violation_keys().contains(&"email"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Audit Chain
//!
//! Every processed document appends a block to a hash-linked chain. The
//! chain is process-lifetime; the audit log next to it is durable:
//!
//! ```rust
//! use medvault::audit::AuditChain;
//! use serde_json::json;
//!
//! # #[tokio::main]
//! # async fn main() -> medvault::domain::Result<()> {
//! let chain = AuditChain::new()?;
//! chain.append_block(json!({"doc_id": "doc-1", "action": "read"})).await?;
//!
//! let verification = chain.verify().await;
//! assert!(verification.valid);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! MedVault uses the [`domain::MedVaultError`] type for all errors:
//!
//! ```rust,no_run
//! use medvault::domain::MedVaultError;
//!
//! fn example() -> Result<(), MedVaultError> {
//!     // Errors are automatically converted using the ? operator
//!     let config = medvault::config::MedVaultConfig::from_file("medvault.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! MedVault uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!(doc_id = "doc-001", "Starting compliance pass");
//! warn!(mode = "unknown", "Unrecognized disclosure mode");
//! ```

pub mod audit;
pub mod classifier;
pub mod cli;
pub mod compliance;
pub mod config;
pub mod core;
pub mod detection;
pub mod domain;
pub mod logging;
pub mod redaction;
