//! Audit and integrity module
//!
//! Two stores populated per request, with different durability: the
//! [`AuditChain`] is a process-lifetime, append-only hash-linked ledger
//! proving that compliance checks happened in order and were not altered
//! afterwards; the [`AuditLog`] is a durable record store surviving
//! restarts. The chain is volatile by design and resets with the process.

pub mod chain;
pub mod store;

pub use chain::{verify_blocks, AuditChain, Block, ChainVerification};
pub use store::{AuditLog, AuditLogEntry, AuditRecord, AuditStorage, JsonlAuditStore};

use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 digest of the input
pub(crate) fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let result = hasher.finalize();
    format!("{result:x}")
}
