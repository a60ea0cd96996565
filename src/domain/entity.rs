//! Entity data model
//!
//! Detected text spans with a semantic label. Entities are produced per
//! request by a detector backend, consumed by the redaction engine, and
//! never persisted.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic label of a detected entity span
///
/// The label set is closed: demographic labels shared by every disclosure
/// mode, plus the clinical, insurance and legal labels that individual
/// modes add on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityLabel {
    // Demographic labels, redacted by every disclosure mode
    /// Person names
    Person,
    /// Organizations (hospitals, insurers, employers)
    Org,
    /// Geographic locations (cities, regions, facilities)
    Location,
    /// Calendar dates in any written form
    Date,
    /// Clock times
    Time,
    /// Nationalities and ethnic or religious groups
    Nationality,

    // Clinical labels
    /// Medical conditions and diagnoses
    Condition,
    /// Treatments and procedures
    Treatment,

    // Insurance labels
    /// Policy numbers
    Policy,
    /// Claim numbers
    Claim,
    /// Account numbers
    Account,

    // Legal labels
    /// Court case numbers
    Case,
    /// Statute or section references
    Law,
    /// Court names
    Court,
}

impl EntityLabel {
    /// Get the canonical uppercase label string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "PERSON",
            Self::Org => "ORG",
            Self::Location => "LOCATION",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Nationality => "NATIONALITY",
            Self::Condition => "CONDITION",
            Self::Treatment => "TREATMENT",
            Self::Policy => "POLICY",
            Self::Claim => "CLAIM",
            Self::Account => "ACCOUNT",
            Self::Case => "CASE",
            Self::Law => "LAW",
            Self::Court => "COURT",
        }
    }

    /// Check if this label belongs to the base demographic group
    pub fn is_demographic(&self) -> bool {
        matches!(
            self,
            Self::Person | Self::Org | Self::Location | Self::Date | Self::Time | Self::Nationality
        )
    }

    /// Parse a canonical uppercase label string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PERSON" => Some(Self::Person),
            "ORG" => Some(Self::Org),
            "LOCATION" => Some(Self::Location),
            "DATE" => Some(Self::Date),
            "TIME" => Some(Self::Time),
            "NATIONALITY" => Some(Self::Nationality),
            "CONDITION" => Some(Self::Condition),
            "TREATMENT" => Some(Self::Treatment),
            "POLICY" => Some(Self::Policy),
            "CLAIM" => Some(Self::Claim),
            "ACCOUNT" => Some(Self::Account),
            "CASE" => Some(Self::Case),
            "LAW" => Some(Self::Law),
            "COURT" => Some(Self::Court),
            _ => None,
        }
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Detected entity span
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Exact text of the span as it appears in the document
    pub text: String,
    /// Semantic label
    pub label: EntityLabel,
    /// Byte offset of the span start in the source text
    pub start: usize,
    /// Byte offset one past the span end
    pub end: usize,
}

impl Entity {
    /// Create a new entity span
    pub fn new(text: impl Into<String>, label: EntityLabel, start: usize, end: usize) -> Self {
        Self {
            text: text.into(),
            label,
            start,
            end,
        }
    }

    /// Length of the span in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span is empty
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether this span overlaps another
    pub fn overlaps(&self, other: &Entity) -> bool {
        self.start < other.end && other.start < self.end
    }
}
