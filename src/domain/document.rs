//! Document identifier type with validation
//!
//! Newtype wrapper for document identifiers. Every audit entry, chain block
//! and alert is keyed by one of these, so an empty identifier is rejected at
//! construction.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Document identifier newtype wrapper
///
/// Represents the caller-supplied identifier of a document moving through
/// the compliance pipeline. Free-form, but never empty.
///
/// # Examples
///
/// ```
/// use medvault::domain::document::DocumentId;
/// use std::str::FromStr;
///
/// let doc_id = DocumentId::from_str("discharge-2025-0142").unwrap();
/// assert_eq!(doc_id.as_str(), "discharge-2025-0142");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(String);

impl DocumentId {
    /// Creates a new DocumentId from a string
    ///
    /// # Arguments
    ///
    /// * `id` - The document identifier string
    ///
    /// # Returns
    ///
    /// Returns `Ok(DocumentId)` if the ID is valid, `Err` otherwise
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Document ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the document ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DocumentId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
