//! Compliance orchestrator - single entry point for document processing
//!
//! Runs the full compliance pass for one document: HIPAA scan, durable
//! audit entry, chain block, optional violation alert, and category
//! classification. The scan and classification are pure; the two audit
//! writes are the only stateful steps and both must succeed before a
//! report is returned.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info, warn};

use crate::audit::store::AuditRecord;
use crate::audit::{AuditChain, AuditLog};
use crate::classifier::{ClassificationResult, DocumentClassifier};
use crate::compliance::{ComplianceReport, HipaaScanner, RiskLevel};
use crate::core::alert::{ViolationAlert, WebhookNotifier};
use crate::domain::document::DocumentId;
use crate::domain::errors::MedVaultError;
use crate::domain::result::Result;

/// One document submitted for compliance processing
#[derive(Debug, Clone)]
pub struct ProcessRequest {
    pub doc_id: DocumentId,
    pub content: String,
    pub action: String,
    pub user: String,
}

impl ProcessRequest {
    pub fn new(
        doc_id: DocumentId,
        content: impl Into<String>,
        action: impl Into<String>,
        user: impl Into<String>,
    ) -> Self {
        Self {
            doc_id,
            content: content.into(),
            action: action.into(),
            user: user.into(),
        }
    }
}

/// Aggregated outcome of one compliance pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessReport {
    pub hipaa_compliant: bool,
    pub violations: Vec<String>,
    pub audit_log: AuditRecord,
    pub blockchain_hash: String,
    pub risk: RiskLevel,
    pub classification: ClassificationResult,
}

/// Orchestrates scan, audit, chain, alert, and classification
pub struct ComplianceOrchestrator {
    scanner: HipaaScanner,
    classifier: DocumentClassifier,
    chain: Arc<AuditChain>,
    audit_log: Arc<AuditLog>,
    notifier: Option<Arc<WebhookNotifier>>,
}

impl ComplianceOrchestrator {
    /// Create an orchestrator over shared audit state
    ///
    /// Pass `None` for the notifier when alerts are disabled.
    pub fn new(
        chain: Arc<AuditChain>,
        audit_log: Arc<AuditLog>,
        notifier: Option<Arc<WebhookNotifier>>,
    ) -> Result<Self> {
        Ok(Self {
            scanner: HipaaScanner::new()?,
            classifier: DocumentClassifier::new()?,
            chain,
            audit_log,
            notifier,
        })
    }

    /// Process one document end to end
    ///
    /// Both audit writes must succeed for a report to be returned; in
    /// particular no block hash is reported when the durable audit write
    /// failed. Alert delivery is fire-and-forget and never fails the
    /// request.
    ///
    /// # Errors
    ///
    /// Returns [`MedVaultError::Input`] for empty content,
    /// [`MedVaultError::Storage`] when the audit log write fails, and
    /// [`MedVaultError::Integrity`] when the chain append fails.
    pub async fn process(&self, request: &ProcessRequest) -> Result<ProcessReport> {
        if request.content.trim().is_empty() {
            return Err(MedVaultError::Input(
                "Document content is empty".to_string(),
            ));
        }

        debug!(
            doc_id = %request.doc_id,
            action = %request.action,
            user = %request.user,
            "Processing document"
        );

        let compliance = self.scanner.report(&request.content);
        let violations: Vec<String> = compliance
            .violation_keys()
            .into_iter()
            .map(String::from)
            .collect();

        let entry = self
            .audit_log
            .append(request.doc_id.as_str(), &request.action, &request.user)
            .await?;

        let block = self
            .chain
            .append_block(json!({
                "doc_id": request.doc_id.as_str(),
                "action": request.action,
                "user": request.user,
                "violations": violations,
            }))
            .await?;

        if !compliance.is_compliant() {
            self.schedule_alert(&request.doc_id, &compliance);
        }

        let classification = self.classifier.classify(&request.content);

        info!(
            doc_id = %request.doc_id,
            violations = violations.len(),
            risk = %compliance.risk,
            label = %classification.label,
            block_index = block.index,
            "Document processed"
        );

        Ok(ProcessReport {
            hipaa_compliant: compliance.is_compliant(),
            violations,
            audit_log: entry.record(),
            blockchain_hash: block.hash,
            risk: compliance.risk,
            classification,
        })
    }

    /// Classify without touching the audit trail
    pub fn classify(&self, text: &str) -> ClassificationResult {
        self.classifier.classify(text)
    }

    /// Scan without touching the audit trail
    pub fn scan(&self, text: &str) -> ComplianceReport {
        self.scanner.report(text)
    }

    /// Shared handle to the audit chain
    pub fn chain(&self) -> &Arc<AuditChain> {
        &self.chain
    }

    fn schedule_alert(&self, doc_id: &DocumentId, report: &ComplianceReport) {
        let Some(notifier) = &self.notifier else {
            return;
        };

        let notifier = Arc::clone(notifier);
        let alert = ViolationAlert::new(doc_id, report);
        tokio::spawn(async move {
            if let Err(err) = notifier.send(&alert).await {
                warn!(
                    doc_id = %alert.doc_id,
                    error = %err,
                    "Violation alert delivery failed"
                );
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::JsonlAuditStore;
    use tempfile::tempdir;

    async fn orchestrator_in(
        dir: &std::path::Path,
    ) -> (ComplianceOrchestrator, Arc<AuditChain>) {
        let chain = Arc::new(AuditChain::new().unwrap());
        let store = Arc::new(JsonlAuditStore::new(dir.join("audit.jsonl")).unwrap());
        let log = Arc::new(AuditLog::open(store).await.unwrap());
        let orchestrator =
            ComplianceOrchestrator::new(Arc::clone(&chain), log, None).unwrap();
        (orchestrator, chain)
    }

    fn request(doc_id: &str, content: &str) -> ProcessRequest {
        ProcessRequest::new(
            DocumentId::new(doc_id).unwrap(),
            content,
            "audit_check",
            "admin",
        )
    }

    #[tokio::test]
    async fn test_process_flags_violations() {
        let dir = tempdir().unwrap();
        let (orchestrator, _chain) = orchestrator_in(dir.path()).await;

        let report = orchestrator
            .process(&request("doc-1", "Patient John Doe, SSN 123-45-6789"))
            .await
            .unwrap();

        assert!(!report.hipaa_compliant);
        assert!(report.violations.contains(&"ssn".to_string()));
        assert!(report.violations.contains(&"names".to_string()));
        assert_eq!(report.risk, RiskLevel::High);
        assert_eq!(report.audit_log.doc_id, "doc-1");
        assert_eq!(report.audit_log.action, "audit_check");
    }

    #[tokio::test]
    async fn test_process_clean_document() {
        let dir = tempdir().unwrap();
        let (orchestrator, _chain) = orchestrator_in(dir.path()).await;

        let report = orchestrator
            .process(&request("doc-2", "lorem ipsum dolor sit amet"))
            .await
            .unwrap();

        assert!(report.hipaa_compliant);
        assert!(report.violations.is_empty());
        assert_eq!(report.risk, RiskLevel::Low);
    }

    #[tokio::test]
    async fn test_process_rejects_empty_content() {
        let dir = tempdir().unwrap();
        let (orchestrator, _chain) = orchestrator_in(dir.path()).await;

        let result = orchestrator.process(&request("doc-3", "   \n  ")).await;
        assert!(matches!(result, Err(MedVaultError::Input(_))));
    }

    #[tokio::test]
    async fn test_process_appends_linked_block() {
        let dir = tempdir().unwrap();
        let (orchestrator, chain) = orchestrator_in(dir.path()).await;

        let before_tail = chain.tail_hash().await;
        let report = orchestrator
            .process(&request("doc-4", "SSN: 123-45-6789"))
            .await
            .unwrap();

        let blocks = chain.snapshot().await;
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].hash, report.blockchain_hash);
        assert_eq!(blocks[1].previous_hash, before_tail);
        assert!(chain.verify().await.valid);

        let data = &blocks[1].data;
        assert_eq!(data["doc_id"], "doc-4");
        assert_eq!(data["action"], "audit_check");
        assert!(data["violations"]
            .as_array()
            .unwrap()
            .iter()
            .any(|v| v == "ssn"));
    }

    #[tokio::test]
    async fn test_process_classifies_content() {
        let dir = tempdir().unwrap();
        let (orchestrator, _chain) = orchestrator_in(dir.path()).await;

        let report = orchestrator
            .process(&request(
                "doc-5",
                "Discharge summary\nDischarge medications: aspirin\nFollow up in two weeks",
            ))
            .await
            .unwrap();

        assert_eq!(report.classification.label, "discharge_summary");
    }

    #[tokio::test]
    async fn test_report_serializes_expected_shape() {
        let dir = tempdir().unwrap();
        let (orchestrator, _chain) = orchestrator_in(dir.path()).await;

        let report = orchestrator
            .process(&request("doc-6", "contact me at a@b.com"))
            .await
            .unwrap();

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["hipaa_compliant"], false);
        assert_eq!(json["risk"], "high");
        assert!(json["audit_log"]["fingerprint"].is_string());
        assert!(json["blockchain_hash"].is_string());
        assert!(json["classification"]["label"].is_string());
    }
}
