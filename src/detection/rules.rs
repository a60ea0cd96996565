//! Rule-based entity detector
//!
//! Deterministic pattern matcher over an ordered rule table. Rule order is
//! precedence order: when two rules produce overlapping spans, the span
//! from the earlier rule wins. Specific rules (gazetteer entries,
//! numbered identifiers) therefore come before the generic capitalized
//! name rule.

use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use super::{DetectorBackend, EntityDetector};
use crate::domain::entity::{Entity, EntityLabel};
use crate::domain::errors::MedVaultError;
use crate::domain::result::Result;

/// Built-in rule table in precedence order
///
/// Each tuple is (label, pattern). Patterns use non-capturing groups so
/// the whole match is the entity span.
const BUILTIN_RULES: &[(EntityLabel, &str)] = &[
    (
        EntityLabel::Condition,
        r"(?i)\b(?:hypertension|diabetes|asthma|fever)\b",
    ),
    (
        EntityLabel::Treatment,
        r"(?i)\b(?:chemotherapy|dialysis|physiotherapy|radiotherapy)\b",
    ),
    (EntityLabel::Policy, r"(?i)\bpolicy\s+no\.?\s*\d+\b"),
    (EntityLabel::Claim, r"(?i)\bclaim\s+\d+\b"),
    (EntityLabel::Account, r"(?i)\baccount\s+\d+\b"),
    (EntityLabel::Case, r"(?i)\bcase\s+\d+\b"),
    (EntityLabel::Law, r"(?i)\bsection\s+\d+\b"),
    (EntityLabel::Court, r"(?i)\bhigh\s+court\b"),
    (EntityLabel::Date, r"\b\d{4}-\d{2}-\d{2}\b"),
    (EntityLabel::Date, r"\b\d{1,2}/\d{1,2}/\d{2,4}\b"),
    (
        EntityLabel::Date,
        r"(?i)\b(?:january|february|march|april|may|june|july|august|september|october|november|december)\s+\d{1,2},?\s+\d{4}\b",
    ),
    (EntityLabel::Time, r"\b\d{1,2}:\d{2}(?::\d{2})?(?:\s?(?i:am|pm))?\b"),
    (
        EntityLabel::Location,
        r"\b(?:New York|California|Bangalore|Boston|Chicago|Mumbai|London)\b",
    ),
    (
        EntityLabel::Nationality,
        r"(?i)\b(?:american|british|canadian|indian|australian)\b",
    ),
    (
        EntityLabel::Org,
        r"\b(?:[A-Z][A-Za-z]+\s+)+(?:Hospital|Clinic|Center|Insurance|Laboratories|Corp|Inc)\b",
    ),
    (
        EntityLabel::Person,
        r"\b(?:Dr|Mr|Mrs|Ms|Prof)\.?\s+[A-Z][a-z]+(?:\s+[A-Z][a-z]+)?\b",
    ),
    (EntityLabel::Person, r"\b[A-Z][a-z]+ [A-Z][a-z]+\b"),
];

/// Rule definition from TOML
#[derive(Debug, Clone, Deserialize)]
struct RuleDefinition {
    /// Entity label the rule produces
    label: String,
    /// Regex patterns for this rule
    patterns: Vec<String>,
}

/// Rule library container
#[derive(Debug, Deserialize)]
struct RuleLibrary {
    rules: BTreeMap<String, RuleDefinition>,
}

/// Compiled detection rule
#[derive(Debug)]
pub struct RulePattern {
    /// Label produced by this rule
    pub label: EntityLabel,
    /// Compiled pattern
    pub regex: Regex,
}

/// Ordered, compiled rule table
#[derive(Debug, Default)]
pub struct RuleSet {
    rules: Vec<RulePattern>,
}

impl RuleSet {
    /// Compile the built-in rule table
    pub fn builtin() -> Result<Self> {
        let mut rules = Vec::with_capacity(BUILTIN_RULES.len());
        for (label, pattern) in BUILTIN_RULES {
            let regex = Regex::new(pattern).map_err(|e| {
                MedVaultError::Configuration(format!("Invalid built-in rule for {label}: {e}"))
            })?;
            rules.push(RulePattern {
                label: *label,
                regex,
            });
        }
        Ok(Self { rules })
    }

    /// Load a rule library from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            MedVaultError::Configuration(format!(
                "Failed to read rule library {}: {e}",
                path.as_ref().display()
            ))
        })?;
        Self::from_toml(&content)
    }

    /// Parse a rule library from TOML content
    ///
    /// Library rules are ordered by rule name; merge order determines
    /// precedence relative to other sets.
    pub fn from_toml(content: &str) -> Result<Self> {
        let library: RuleLibrary = toml::from_str(content)
            .map_err(|e| MedVaultError::Configuration(format!("Invalid rule library: {e}")))?;

        let mut rules = Vec::new();
        for (name, def) in library.rules {
            let label = EntityLabel::parse(&def.label.to_uppercase()).ok_or_else(|| {
                MedVaultError::Configuration(format!(
                    "Unknown entity label '{}' in rule '{name}'",
                    def.label
                ))
            })?;
            for pattern in &def.patterns {
                let regex = Regex::new(pattern).map_err(|e| {
                    MedVaultError::Configuration(format!("Invalid regex in rule '{name}': {e}"))
                })?;
                rules.push(RulePattern { label, regex });
            }
        }
        Ok(Self { rules })
    }

    /// Append another rule set after this one
    pub fn merge(&mut self, other: RuleSet) {
        self.rules.extend(other.rules);
    }

    /// Number of compiled rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set holds no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Deterministic rule/pattern detector
pub struct RuleBasedDetector {
    rules: RuleSet,
}

impl RuleBasedDetector {
    /// Create a detector with the built-in rule table
    pub fn new() -> Result<Self> {
        Ok(Self {
            rules: RuleSet::builtin()?,
        })
    }

    /// Create a detector with a custom rule set
    pub fn with_rules(rules: RuleSet) -> Self {
        Self { rules }
    }
}

impl EntityDetector for RuleBasedDetector {
    fn detect(&self, text: &str) -> Result<Vec<Entity>> {
        let mut spans: Vec<Entity> = Vec::new();
        for rule in &self.rules.rules {
            for m in rule.regex.find_iter(text) {
                if m.as_str().is_empty() {
                    continue;
                }
                let candidate = Entity::new(m.as_str(), rule.label, m.start(), m.end());
                if !spans.iter().any(|accepted| accepted.overlaps(&candidate)) {
                    spans.push(candidate);
                }
            }
        }
        spans.sort_by_key(|e| (e.start, e.end));
        Ok(spans)
    }

    fn backend(&self) -> DetectorBackend {
        DetectorBackend::Rules
    }
}
