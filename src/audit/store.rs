//! Durable audit log
//!
//! Unlike the in-memory chain, entries written here survive restarts.
//! The default backend appends one JSON object per line to a local
//! file; [`AuditLog`] sits on top of any [`AuditStorage`] and hands out
//! monotonically increasing ids, recovering the sequence from storage
//! on open.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::warn;

use super::sha256_hex;
use crate::domain::errors::MedVaultError;
use crate::domain::result::Result;

/// One persisted audit event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: u64,
    pub doc_id: String,
    pub action: String,
    pub user: String,
    pub timestamp: DateTime<Utc>,
    pub fingerprint: String,
}

impl AuditLogEntry {
    /// Caller-facing view of this entry without the storage id
    pub fn record(&self) -> AuditRecord {
        AuditRecord {
            doc_id: self.doc_id.clone(),
            action: self.action.clone(),
            user: self.user.clone(),
            timestamp: self.timestamp,
            fingerprint: self.fingerprint.clone(),
        }
    }
}

/// Audit event as reported to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub doc_id: String,
    pub action: String,
    pub user: String,
    pub timestamp: DateTime<Utc>,
    pub fingerprint: String,
}

/// Storage backend for audit entries
#[async_trait]
pub trait AuditStorage: Send + Sync {
    /// Persist one entry; must not reorder or drop earlier entries
    async fn persist(&self, entry: &AuditLogEntry) -> Result<()>;

    /// Highest id already persisted, or 0 when the store is empty
    async fn last_id(&self) -> Result<u64>;
}

/// JSON-lines file store, one entry per line
pub struct JsonlAuditStore {
    path: PathBuf,
}

impl JsonlAuditStore {
    /// Create a store backed by the file at `path`, creating parent
    /// directories as needed. The file itself is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|err| {
                    MedVaultError::Storage(format!(
                        "Failed to create audit log directory {}: {err}",
                        parent.display()
                    ))
                })?;
            }
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl AuditStorage for JsonlAuditStore {
    async fn persist(&self, entry: &AuditLogEntry) -> Result<()> {
        let line = serde_json::to_string(entry).map_err(|err| {
            MedVaultError::Storage(format!("Failed to serialize audit entry: {err}"))
        })?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|err| {
                MedVaultError::Storage(format!(
                    "Failed to open audit log {}: {err}",
                    self.path.display()
                ))
            })?;

        writeln!(file, "{line}").map_err(|err| {
            MedVaultError::Storage(format!("Failed to write audit entry: {err}"))
        })?;

        Ok(())
    }

    async fn last_id(&self) -> Result<u64> {
        if !self.path.exists() {
            return Ok(0);
        }

        let content = std::fs::read_to_string(&self.path).map_err(|err| {
            MedVaultError::Storage(format!(
                "Failed to read audit log {}: {err}",
                self.path.display()
            ))
        })?;

        let mut last = 0u64;
        let mut skipped = 0usize;
        for line in content.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<AuditLogEntry>(line) {
                Ok(entry) => last = last.max(entry.id),
                Err(_) => skipped += 1,
            }
        }
        if skipped > 0 {
            warn!(
                skipped,
                path = %self.path.display(),
                "Skipped unreadable audit log lines during id recovery"
            );
        }
        Ok(last)
    }
}

/// Append-only audit log with monotonically increasing ids
pub struct AuditLog {
    storage: Arc<dyn AuditStorage>,
    next_id: Mutex<u64>,
}

impl AuditLog {
    /// Open the log, resuming the id sequence from what storage holds
    pub async fn open(storage: Arc<dyn AuditStorage>) -> Result<Self> {
        let last = storage.last_id().await?;
        Ok(Self {
            storage,
            next_id: Mutex::new(last + 1),
        })
    }

    /// Append one audit event and return the persisted entry
    ///
    /// The id is advanced only after the backend reports success, so a
    /// failed write never burns an id.
    pub async fn append(&self, doc_id: &str, action: &str, user: &str) -> Result<AuditLogEntry> {
        let timestamp = Utc::now();
        let fingerprint = sha256_hex(&format!(
            "{doc_id}{action}{}",
            timestamp.to_rfc3339()
        ));

        let mut next_id = self.next_id.lock().await;
        let entry = AuditLogEntry {
            id: *next_id,
            doc_id: doc_id.to_string(),
            action: action.to_string(),
            user: user.to_string(),
            timestamp,
            fingerprint,
        };
        self.storage.persist(&entry).await?;
        *next_id += 1;
        Ok(entry)
    }
}
