//! Redaction engine
//!
//! Applies a disclosure mode's policy to free text, structured JSON and
//! imaging field maps. Free-text redaction is a global substring
//! replacement of each matching entity's exact text: identical substrings
//! elsewhere in the document are also replaced. That is a known
//! precision/recall tradeoff of text-level (rather than span-indexed)
//! replacement and callers relying on surrounding text surviving should
//! know about it.

use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;

use super::policy::{DisclosureMode, FIELD_MARKER, LOCATION_MARKER, SHIFTED_DATE_MARKER};
use crate::detection::EntityDetector;
use crate::domain::entity::{Entity, EntityLabel};
use crate::domain::errors::MedVaultError;
use crate::domain::result::Result;

/// Labels kept by the insurance claim summary
const CLAIM_SUMMARY_LABELS: [EntityLabel; 3] =
    [EntityLabel::Date, EntityLabel::Treatment, EntityLabel::Claim];

/// Mode-dependent redaction engine
///
/// The research-mode date and place patterns are compiled once at
/// construction; all methods borrow immutably.
#[derive(Debug)]
pub struct RedactionEngine {
    iso_date: Regex,
    places: Regex,
}

impl RedactionEngine {
    /// Create an engine with the fixed research-mode patterns
    pub fn new() -> Result<Self> {
        let iso_date = Regex::new(r"\d{4}-\d{2}-\d{2}")
            .map_err(|e| MedVaultError::Configuration(format!("Invalid date pattern: {e}")))?;
        let places = Regex::new(r"\b(?:New York|California|Bangalore)\b")
            .map_err(|e| MedVaultError::Configuration(format!("Invalid place pattern: {e}")))?;
        Ok(Self { iso_date, places })
    }

    /// Redact free text under a disclosure mode
    ///
    /// For the insurance mode the document shape is not preserved: the
    /// result is a claim summary listing only date, treatment and claim
    /// entities. All other modes replace every occurrence of each matching
    /// entity's text with the mode's marker; research mode additionally
    /// rewrites ISO dates and gazetteer place names.
    pub fn redact(&self, text: &str, entities: &[Entity], mode: DisclosureMode) -> String {
        if mode == DisclosureMode::Insurance {
            return claim_summary(entities);
        }

        let set = mode.redaction_set();
        let marker = mode.marker();
        let mut redacted = text.to_string();
        for entity in entities {
            // An empty span would make the replacement loop on itself.
            if entity.text.is_empty() {
                continue;
            }
            if set.contains(&entity.label) {
                redacted = redacted.replace(&entity.text, marker);
            }
        }

        if mode == DisclosureMode::Research {
            redacted = self
                .iso_date
                .replace_all(&redacted, SHIFTED_DATE_MARKER)
                .into_owned();
            redacted = self
                .places
                .replace_all(&redacted, LOCATION_MARKER)
                .into_owned();
        }

        redacted
    }

    /// Recursively redact every string leaf of a JSON document
    ///
    /// Each string value is detected and redacted independently, the same
    /// contract as [`redact`](Self::redact) applied per leaf. Object keys,
    /// numbers, booleans and nulls pass through unchanged.
    pub fn redact_json(
        &self,
        value: &Value,
        detector: &dyn EntityDetector,
        mode: DisclosureMode,
    ) -> Result<Value> {
        match value {
            Value::String(s) => {
                let entities = detector.detect(s)?;
                Ok(Value::String(self.redact(s, &entities, mode)))
            }
            Value::Object(map) => {
                let mut redacted = serde_json::Map::with_capacity(map.len());
                for (key, val) in map {
                    redacted.insert(key.clone(), self.redact_json(val, detector, mode)?);
                }
                Ok(Value::Object(redacted))
            }
            Value::Array(arr) => {
                let mut redacted = Vec::with_capacity(arr.len());
                for val in arr {
                    redacted.push(self.redact_json(val, detector, mode)?);
                }
                Ok(Value::Array(redacted))
            }
            other => Ok(other.clone()),
        }
    }

    /// Overwrite a structured record's sensitive fields in place
    ///
    /// Each of the mode's imaging tags that exists in the record has its
    /// value overwritten with the literal field marker; absent tags are
    /// left absent. Returns the tags actually redacted, in the mode's tag
    /// order. Destructive: callers needing the original values must copy
    /// them before this call.
    pub fn redact_fields(
        &self,
        fields: &mut BTreeMap<String, String>,
        mode: DisclosureMode,
    ) -> Vec<String> {
        let mut redacted = Vec::new();
        for tag in mode.imaging_tags() {
            if let Some(value) = fields.get_mut(*tag) {
                *value = FIELD_MARKER.to_string();
                redacted.push((*tag).to_string());
            }
        }
        redacted
    }
}

/// Format the insurance claim summary, one entity per line
fn claim_summary(entities: &[Entity]) -> String {
    entities
        .iter()
        .filter(|e| CLAIM_SUMMARY_LABELS.contains(&e.label))
        .map(|e| format!("{}: {}", e.label, e.text))
        .collect::<Vec<_>>()
        .join("\n")
}
