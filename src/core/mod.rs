//! Core business logic for MedVault.
//!
//! This module ties the compliance subsystems together: one call runs the
//! HIPAA scan, the audit trail writes, the alert dispatch, and the
//! classification for a document.
//!
//! # Modules
//!
//! - [`orchestrator`] - Per-document compliance processing
//! - [`batch`] - Concurrent multi-document processing with redaction
//! - [`alert`] - Webhook delivery of violation alerts
//!
//! # Processing Workflow
//!
//! For each document:
//!
//! 1. **Scan**: Check the content against the HIPAA identifier patterns
//! 2. **Audit**: Append a durable audit log entry
//! 3. **Chain**: Append a hash-linked block recording the check
//! 4. **Alert** (optional): Fire-and-forget webhook when violations exist
//! 5. **Classify**: Score the document against the category lexicons
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use medvault::audit::{AuditChain, AuditLog, JsonlAuditStore};
//! use medvault::core::orchestrator::{ComplianceOrchestrator, ProcessRequest};
//! use medvault::domain::DocumentId;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let chain = Arc::new(AuditChain::new()?);
//! let store = Arc::new(JsonlAuditStore::new("audit/medvault_audit.jsonl")?);
//! let log = Arc::new(AuditLog::open(store).await?);
//!
//! let orchestrator = ComplianceOrchestrator::new(chain, log, None)?;
//! let report = orchestrator
//!     .process(&ProcessRequest::new(
//!         DocumentId::new("doc-001")?,
//!         "Patient John Doe, SSN 123-45-6789",
//!         "audit_check",
//!         "admin",
//!     ))
//!     .await?;
//!
//! println!("Compliant: {}", report.hipaa_compliant);
//! println!("Risk: {}", report.risk);
//! # Ok(())
//! # }
//! ```

pub mod alert;
pub mod batch;
pub mod orchestrator;

pub use alert::{ViolationAlert, WebhookNotifier};
pub use batch::{BatchSummary, DocumentInput, DocumentOutcome, DocumentPipeline};
pub use orchestrator::{ComplianceOrchestrator, ProcessReport, ProcessRequest};
