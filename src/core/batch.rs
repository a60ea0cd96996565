//! Batch document processing
//!
//! Runs the full compliance pass over many documents concurrently. Each
//! document is processed in its own task; a semaphore bounds how many run
//! at once. Results come back in submission order regardless of which
//! task finishes first.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tokio::sync::Semaphore;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::audit::{AuditChain, AuditLog, JsonlAuditStore};
use crate::compliance::RiskLevel;
use crate::config::MedVaultConfig;
use crate::core::alert::WebhookNotifier;
use crate::core::orchestrator::{ComplianceOrchestrator, ProcessReport, ProcessRequest};
use crate::detection::{build_detector, EntityDetector};
use crate::domain::document::DocumentId;
use crate::domain::errors::MedVaultError;
use crate::domain::result::Result;
use crate::redaction::{DisclosureMode, RedactionEngine};

/// One document queued for processing
#[derive(Debug, Clone)]
pub struct DocumentInput {
    /// Document identifier
    pub doc_id: DocumentId,

    /// Raw document text
    pub content: String,
}

impl DocumentInput {
    /// Create a new document input
    pub fn new(doc_id: DocumentId, content: impl Into<String>) -> Self {
        Self {
            doc_id,
            content: content.into(),
        }
    }
}

/// Outcome for one successfully processed document
#[derive(Debug, Clone, Serialize)]
pub struct DocumentOutcome {
    /// Document identifier
    pub doc_id: String,

    /// Compliance report for the document
    pub report: ProcessReport,

    /// Document text after redaction
    ///
    /// Equal to the input text when no disclosure mode was given.
    pub redacted: String,
}

/// Processing error with document context
#[derive(Debug, Clone)]
pub struct BatchError {
    /// Document the error belongs to
    pub doc_id: String,

    /// Error message
    pub message: String,
}

impl BatchError {
    /// Create a new batch error
    pub fn new(doc_id: String, message: String) -> Self {
        Self { doc_id, message }
    }
}

/// Summary of a batch processing run
#[derive(Debug)]
pub struct BatchSummary {
    /// Identifier of this batch run
    pub batch_id: Uuid,

    /// Total number of documents submitted
    pub total_documents: usize,

    /// Number of documents processed successfully
    pub succeeded: usize,

    /// Number of documents that failed
    pub failed: usize,

    /// Number of successful documents scored as high risk
    pub high_risk: usize,

    /// Duration of the batch run
    pub duration: Duration,

    /// Outcomes in submission order
    pub outcomes: Vec<DocumentOutcome>,

    /// Errors encountered during the run
    pub errors: Vec<BatchError>,
}

impl BatchSummary {
    /// Create a new empty summary for a batch of the given size
    pub fn new(total_documents: usize) -> Self {
        Self {
            batch_id: Uuid::new_v4(),
            total_documents,
            succeeded: 0,
            failed: 0,
            high_risk: 0,
            duration: Duration::from_secs(0),
            outcomes: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record a successful outcome
    pub fn add_outcome(&mut self, outcome: DocumentOutcome) {
        self.succeeded += 1;
        if outcome.report.risk == RiskLevel::High {
            self.high_risk += 1;
        }
        self.outcomes.push(outcome);
    }

    /// Record a failed document
    pub fn add_error(&mut self, error: BatchError) {
        self.failed += 1;
        self.errors.push(error);
    }

    /// Check if the batch was successful (no failures)
    pub fn is_successful(&self) -> bool {
        self.failed == 0 && self.errors.is_empty()
    }

    /// Get success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_documents == 0 {
            return 100.0;
        }
        (self.succeeded as f64 / self.total_documents as f64) * 100.0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            batch_id = %self.batch_id,
            total_documents = self.total_documents,
            succeeded = self.succeeded,
            failed = self.failed,
            high_risk = self.high_risk,
            duration_secs = self.duration.as_secs(),
            success_rate = format!("{:.2}%", self.success_rate()),
            "Batch processing completed"
        );

        if !self.errors.is_empty() {
            tracing::warn!(
                error_count = self.errors.len(),
                "Batch completed with errors"
            );
            for error in &self.errors {
                tracing::warn!(
                    doc_id = %error.doc_id,
                    message = %error.message,
                    "Document processing error"
                );
            }
        }
    }
}

/// Full compliance pipeline over detection, redaction, and auditing
///
/// Cheap to clone: the component parts are shared behind [`Arc`]s, so
/// clones feed the same audit chain and log.
#[derive(Clone)]
pub struct DocumentPipeline {
    orchestrator: Arc<ComplianceOrchestrator>,
    detector: Arc<dyn EntityDetector>,
    engine: Arc<RedactionEngine>,
    parallelism: usize,
}

impl DocumentPipeline {
    /// Create a pipeline from already assembled parts
    pub fn new(
        orchestrator: Arc<ComplianceOrchestrator>,
        detector: Arc<dyn EntityDetector>,
        engine: Arc<RedactionEngine>,
        parallelism: usize,
    ) -> Self {
        Self {
            orchestrator,
            detector,
            engine,
            parallelism,
        }
    }

    /// Assemble the full pipeline from configuration
    ///
    /// Opens the audit log at the configured path, starts a fresh chain,
    /// and wires up the alert notifier when alerts are enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if the audit log cannot be opened, the detector
    /// cannot be built, or the notifier configuration is invalid.
    pub async fn from_config(config: &MedVaultConfig) -> Result<Self> {
        let chain = Arc::new(AuditChain::new()?);
        let store = Arc::new(JsonlAuditStore::new(&config.audit.log_path)?);
        let audit_log = Arc::new(AuditLog::open(store).await?);

        let notifier = if config.alerts.enabled {
            Some(Arc::new(WebhookNotifier::new(&config.alerts)?))
        } else {
            None
        };

        let orchestrator = Arc::new(ComplianceOrchestrator::new(chain, audit_log, notifier)?);
        let detector = build_detector(&config.detection)?;
        let engine = Arc::new(RedactionEngine::new()?);

        Ok(Self {
            orchestrator,
            detector,
            engine,
            parallelism: config.processing.parallelism,
        })
    }

    /// The orchestrator shared by this pipeline
    pub fn orchestrator(&self) -> &Arc<ComplianceOrchestrator> {
        &self.orchestrator
    }

    /// Process one document: compliance pass, then redaction
    ///
    /// Without a disclosure mode the document text passes through
    /// unredacted; the compliance pass still runs in full.
    ///
    /// # Errors
    ///
    /// Propagates the orchestrator's errors, and the detector's when a
    /// mode requires a detection pass.
    pub async fn process_one(
        &self,
        input: &DocumentInput,
        action: &str,
        user: &str,
        mode: Option<DisclosureMode>,
    ) -> Result<DocumentOutcome> {
        let request = ProcessRequest::new(input.doc_id.clone(), &input.content, action, user);
        let report = self.orchestrator.process(&request).await?;

        let redacted = match mode {
            Some(mode) => {
                let entities = self.detector.detect(&input.content)?;
                self.engine.redact(&input.content, &entities, mode)
            }
            None => {
                debug!(doc_id = %input.doc_id, "No disclosure mode, skipping redaction");
                input.content.clone()
            }
        };

        Ok(DocumentOutcome {
            doc_id: input.doc_id.as_str().to_string(),
            report,
            redacted,
        })
    }

    /// Process a batch of documents concurrently
    ///
    /// At most `processing.parallelism` documents run at once. Outcomes
    /// are collected in submission order. A failed document never aborts
    /// the batch; its error lands in the summary instead.
    pub async fn process_batch(
        &self,
        inputs: Vec<DocumentInput>,
        action: &str,
        user: &str,
        mode: Option<DisclosureMode>,
    ) -> BatchSummary {
        let start = Instant::now();
        let mut summary = BatchSummary::new(inputs.len());

        debug!(
            batch_id = %summary.batch_id,
            total_documents = inputs.len(),
            parallelism = self.parallelism,
            "Starting batch processing"
        );

        let semaphore = Arc::new(Semaphore::new(self.parallelism));
        let mut handles = Vec::with_capacity(inputs.len());

        for input in inputs {
            let pipeline = self.clone();
            let semaphore = Arc::clone(&semaphore);
            let action = action.to_string();
            let user = user.to_string();
            let doc_id = input.doc_id.as_str().to_string();

            let handle = tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await.map_err(|_| {
                    MedVaultError::Other("Batch semaphore closed".to_string())
                })?;
                pipeline.process_one(&input, &action, &user, mode).await
            });
            handles.push((doc_id, handle));
        }

        for (doc_id, handle) in handles {
            match handle.await {
                Ok(Ok(outcome)) => summary.add_outcome(outcome),
                Ok(Err(e)) => summary.add_error(BatchError::new(doc_id, e.to_string())),
                Err(e) => {
                    warn!(doc_id = %doc_id, error = %e, "Document task panicked");
                    summary.add_error(BatchError::new(doc_id, format!("Task panicked: {e}")));
                }
            }
        }

        let summary = summary.with_duration(start.elapsed());
        summary.log_summary();
        summary
    }
}
