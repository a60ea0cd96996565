//! Entity detection module
//!
//! Provides the trait-based detection interface and its two backends: a
//! deterministic rule/pattern matcher and a trainable statistical token
//! model. The label set and the per-mode to-redact groupings are
//! configuration data and do not depend on which backend is active.

pub mod rules;
pub mod statistical;

pub use rules::{RuleBasedDetector, RuleSet};
pub use statistical::StatisticalDetector;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::config::schema::DetectionConfig;
use crate::domain::entity::Entity;
use crate::domain::result::Result;

/// Trait for entity detection backends
pub trait EntityDetector: Send + Sync {
    /// Detect entity spans in free text
    ///
    /// Returned spans are sorted by start offset and never overlap; each
    /// span's `text` is the exact source slice.
    fn detect(&self, text: &str) -> Result<Vec<Entity>>;

    /// Backend identifier for logs and reports
    fn backend(&self) -> DetectorBackend;
}

/// Available detector backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectorBackend {
    /// Deterministic rule/pattern matcher
    Rules,
    /// Trainable statistical token model
    Statistical,
}

impl fmt::Display for DetectorBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rules => write!(f, "rules"),
            Self::Statistical => write!(f, "statistical"),
        }
    }
}

impl Default for DetectorBackend {
    fn default() -> Self {
        Self::Rules
    }
}

/// Build the configured detector backend
///
/// The rules backend starts from the built-in rule table and merges an
/// optional external rule library on top. The statistical backend starts
/// from the built-in seed corpus.
pub fn build_detector(config: &DetectionConfig) -> Result<Arc<dyn EntityDetector>> {
    match config.backend {
        DetectorBackend::Rules => {
            let mut rules = RuleSet::builtin()?;
            if let Some(path) = &config.rule_library {
                rules.merge(RuleSet::from_file(path)?);
            }
            Ok(Arc::new(RuleBasedDetector::with_rules(rules)))
        }
        DetectorBackend::Statistical => Ok(Arc::new(StatisticalDetector::with_seed_corpus(
            config.confidence_threshold,
        ))),
    }
}
