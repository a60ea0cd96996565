//! Redaction module
//!
//! Mode-dependent selection and removal of sensitive spans across free
//! text, structured JSON records and imaging field maps.
//!
//! # Examples
//!
//! ```
//! use medvault::domain::{Entity, EntityLabel};
//! use medvault::redaction::{DisclosureMode, RedactionEngine};
//!
//! # fn main() -> medvault::domain::Result<()> {
//! let engine = RedactionEngine::new()?;
//! let entities = vec![Entity::new("John Doe", EntityLabel::Person, 8, 16)];
//! let redacted = engine.redact(
//!     "Patient John Doe presented today.",
//!     &entities,
//!     DisclosureMode::Research,
//! );
//! assert_eq!(redacted, "Patient [REDACTED] presented today.");
//! # Ok(())
//! # }
//! ```

pub mod engine;
pub mod policy;

pub use engine::RedactionEngine;
pub use policy::{DisclosureMode, BASE_DEMOGRAPHIC_SET};
