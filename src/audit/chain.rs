//! Append-only hash-linked audit chain
//!
//! Every processed document appends one [`Block`] whose hash covers its
//! own payload plus the previous block's hash, so later mutation of any
//! block is detectable by [`AuditChain::verify`]. The chain lives in
//! memory for the lifetime of the process and always begins with a
//! genesis block.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;

use super::sha256_hex;
use crate::domain::errors::MedVaultError;
use crate::domain::result::Result;

/// Previous-hash sentinel carried by the genesis block
pub const GENESIS_PREVIOUS_HASH: &str = "0";

/// Payload carried by the genesis block
pub const GENESIS_PAYLOAD: &str = "Genesis Block";

/// One entry in the audit chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: String,
    pub data: Value,
    pub previous_hash: String,
    pub hash: String,
}

impl Block {
    /// Build a block at `index` linking back to `previous_hash`
    pub fn new(index: u64, data: Value, previous_hash: String) -> Result<Self> {
        let mut block = Self {
            index,
            timestamp: Utc::now().to_rfc3339(),
            data,
            previous_hash,
            hash: String::new(),
        };
        block.hash = block.compute_hash()?;
        Ok(block)
    }

    fn genesis() -> Result<Self> {
        Self::new(
            0,
            Value::String(GENESIS_PAYLOAD.to_string()),
            GENESIS_PREVIOUS_HASH.to_string(),
        )
    }

    /// Recompute this block's hash from its own fields
    ///
    /// The payload is canonicalized through `serde_json`, which keeps
    /// object keys sorted, so equal payloads always hash identically.
    pub fn compute_hash(&self) -> Result<String> {
        let payload = serde_json::to_string(&self.data)
            .map_err(|err| MedVaultError::Integrity(format!("Unserializable block data: {err}")))?;
        Ok(sha256_hex(&format!(
            "{}{}{}{}",
            self.index, self.timestamp, payload, self.previous_hash
        )))
    }
}

/// Outcome of walking the chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainVerification {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_invalid_index: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChainVerification {
    fn ok() -> Self {
        Self {
            valid: true,
            first_invalid_index: None,
            error: None,
        }
    }

    fn invalid_hash(index: u64) -> Self {
        Self {
            valid: false,
            first_invalid_index: Some(index),
            error: Some(format!("Invalid hash at block {index}")),
        }
    }

    fn broken_link(index: u64) -> Self {
        Self {
            valid: false,
            first_invalid_index: Some(index),
            error: Some(format!("Broken chain link at block {index}")),
        }
    }
}

/// Verify an ordered sequence of blocks
///
/// Checks every non-genesis block in order: first that its stored hash
/// matches a recomputation from its fields, then that its back-link
/// equals the previous block's hash. Stops at the first violation and
/// reports the offending index.
pub fn verify_blocks(blocks: &[Block]) -> ChainVerification {
    for i in 1..blocks.len() {
        let block = &blocks[i];
        let recomputed = match block.compute_hash() {
            Ok(hash) => hash,
            Err(_) => return ChainVerification::invalid_hash(block.index),
        };
        if recomputed != block.hash {
            return ChainVerification::invalid_hash(block.index);
        }
        if block.previous_hash != blocks[i - 1].hash {
            return ChainVerification::broken_link(block.index);
        }
    }
    ChainVerification::ok()
}

/// In-memory hash chain with single-writer append
pub struct AuditChain {
    blocks: Mutex<Vec<Block>>,
}

impl AuditChain {
    /// Create a chain holding only the genesis block
    pub fn new() -> Result<Self> {
        Ok(Self {
            blocks: Mutex::new(vec![Block::genesis()?]),
        })
    }

    /// Append a block carrying `data` and return a copy of it
    ///
    /// Appends are serialized through the chain lock, so concurrent
    /// callers observe strictly increasing indices and an unbroken
    /// back-link sequence.
    pub async fn append_block(&self, data: Value) -> Result<Block> {
        let mut blocks = self.blocks.lock().await;
        let tail_hash = blocks
            .last()
            .map(|block| block.hash.clone())
            .ok_or_else(|| MedVaultError::Integrity("Chain has no genesis block".to_string()))?;
        let block = Block::new(blocks.len() as u64, data, tail_hash)?;
        blocks.push(block.clone());
        Ok(block)
    }

    /// Walk the whole chain and report the first inconsistency
    pub async fn verify(&self) -> ChainVerification {
        let blocks = self.blocks.lock().await;
        verify_blocks(&blocks)
    }

    /// Snapshot of all blocks in order
    pub async fn snapshot(&self) -> Vec<Block> {
        self.blocks.lock().await.clone()
    }

    /// Number of blocks including genesis
    pub async fn len(&self) -> usize {
        self.blocks.lock().await.len()
    }

    /// Hash of the most recent block
    pub async fn tail_hash(&self) -> String {
        let blocks = self.blocks.lock().await;
        blocks
            .last()
            .map(|block| block.hash.clone())
            .unwrap_or_default()
    }
}
