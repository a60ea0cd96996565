//! Violation alert delivery
//!
//! When a scan finds HIPAA violations, the orchestrator schedules an
//! alert to a configured webhook endpoint. Delivery is best-effort: it
//! runs in a spawned task, is not retried, and never fails the request
//! that triggered it.
//!
//! # Example
//!
//! ```no_run
//! use medvault::config::AlertConfig;
//! use medvault::core::alert::WebhookNotifier;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AlertConfig {
//!     enabled: true,
//!     webhook_url: "https://alerts.example.com/hipaa".to_string(),
//!     auth_token: None,
//!     timeout_seconds: 10,
//! };
//! let notifier = WebhookNotifier::new(&config)?;
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::compliance::{ComplianceReport, RiskLevel};
use crate::config::schema::AlertConfig;
use crate::config::SecretString;
use crate::domain::document::DocumentId;
use crate::domain::errors::MedVaultError;
use crate::domain::result::Result;

/// Payload delivered to the alert webhook
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViolationAlert {
    pub doc_id: String,
    pub violations: Vec<String>,
    pub risk: RiskLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ViolationAlert {
    /// Build an alert for a non-compliant scan outcome
    pub fn new(doc_id: &DocumentId, report: &ComplianceReport) -> Self {
        let violations: Vec<String> = report
            .violation_keys()
            .into_iter()
            .map(String::from)
            .collect();
        let message = format!(
            "HIPAA violations detected in doc {}: {}",
            doc_id.as_str(),
            violations.join(", ")
        );
        Self {
            doc_id: doc_id.as_str().to_string(),
            violations,
            risk: report.risk,
            message,
            timestamp: Utc::now(),
        }
    }
}

/// Webhook client for violation alerts
///
/// Posts the alert payload as JSON with an optional bearer token and a
/// bounded timeout.
pub struct WebhookNotifier {
    endpoint: String,
    auth_token: Option<SecretString>,
    http_client: reqwest::Client,
}

impl WebhookNotifier {
    /// Create a notifier from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if alerts are not enabled, the endpoint is
    /// missing, or the HTTP client cannot be constructed.
    pub fn new(config: &AlertConfig) -> Result<Self> {
        if !config.enabled {
            return Err(MedVaultError::Configuration(
                "Violation alerts are not enabled".to_string(),
            ));
        }
        if config.webhook_url.is_empty() {
            return Err(MedVaultError::Configuration(
                "alerts.webhook_url is required when alerts are enabled".to_string(),
            ));
        }

        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                MedVaultError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        info!(endpoint = %config.webhook_url, "Violation alert webhook initialized");

        Ok(Self {
            endpoint: config.webhook_url.clone(),
            auth_token: config.auth_token.clone(),
            http_client,
        })
    }

    /// Deliver one alert
    ///
    /// # Errors
    ///
    /// Returns [`MedVaultError::Notification`] if the request fails or
    /// the endpoint answers with a non-success status.
    pub async fn send(&self, alert: &ViolationAlert) -> Result<()> {
        debug!(
            endpoint = %self.endpoint,
            doc_id = %alert.doc_id,
            violation_count = alert.violations.len(),
            "Sending violation alert"
        );

        let mut request = self.http_client.post(&self.endpoint).json(alert);
        if let Some(token) = &self.auth_token {
            request = request.header(
                "Authorization",
                format!("Bearer {}", token.expose_secret()),
            );
        }

        let response = request.send().await.map_err(|e| {
            MedVaultError::Notification(format!("Failed to deliver alert: {}", e))
        })?;

        let status = response.status();
        if status.is_success() {
            info!(
                status = %status,
                doc_id = %alert.doc_id,
                "Violation alert delivered"
            );
            Ok(())
        } else {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(
                status = %status,
                error = %error_body,
                "Violation alert rejected by webhook"
            );
            Err(MedVaultError::Notification(format!(
                "Alert webhook returned status {}: {}",
                status, error_body
            )))
        }
    }
}
