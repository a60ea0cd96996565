//! Domain models and types for MedVault.
//!
//! This module contains the core domain models, types, and business rules
//! shared by every subsystem: type safety, error handling, and API design
//! live here so the upper layers agree on one vocabulary.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`DocumentId`])
//! - **Entity model** ([`Entity`], [`EntityLabel`])
//! - **Error types** ([`MedVaultError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! MedVault uses the newtype pattern for identifiers so a document ID cannot
//! be confused with any other free-form string:
//!
//! ```rust
//! use medvault::domain::DocumentId;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let doc_id = DocumentId::new("discharge-2025-0142")?;
//! assert_eq!(doc_id.as_str(), "discharge-2025-0142");
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, MedVaultError>`]:
//!
//! ```rust
//! use medvault::domain::{MedVaultError, Result};
//!
//! fn example() -> Result<()> {
//!     // Errors are automatically converted using the ? operator
//!     let config = medvault::config::MedVaultConfig::from_file("medvault.toml")?;
//!     Ok(())
//! }
//! ```

pub mod document;
pub mod entity;
pub mod errors;
pub mod result;

// Re-export commonly used types for convenience
pub use document::DocumentId;
pub use entity::{Entity, EntityLabel};
pub use errors::MedVaultError;
pub use result::Result;
