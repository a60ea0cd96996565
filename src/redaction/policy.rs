//! Disclosure modes and their redaction policies
//!
//! Each mode maps totally to a set of entity labels to remove, a set of
//! imaging field tags to overwrite, and a replacement marker. The tables
//! are configuration data: no code path branches on mode strings outside
//! this module.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::entity::EntityLabel;
use crate::domain::errors::MedVaultError;

/// Replacement marker for redacted spans
pub const REDACTED_MARKER: &str = "[REDACTED]";
/// Replacement marker used by the legal mode
pub const LEGAL_MARKER: &str = "[LEGAL_REDACTED]";
/// Replacement for ISO dates under the research mode
pub const SHIFTED_DATE_MARKER: &str = "[SHIFTED_DATE]";
/// Replacement for gazetteer place names under the research mode
pub const LOCATION_MARKER: &str = "[LOCATION]";
/// Value written over redacted structured fields
pub const FIELD_MARKER: &str = "REDACTED";

/// Demographic labels removed by every disclosure mode
pub const BASE_DEMOGRAPHIC_SET: [EntityLabel; 6] = [
    EntityLabel::Person,
    EntityLabel::Org,
    EntityLabel::Location,
    EntityLabel::Date,
    EntityLabel::Time,
    EntityLabel::Nationality,
];

const PATIENT_SET: [EntityLabel; 7] = [
    EntityLabel::Person,
    EntityLabel::Org,
    EntityLabel::Location,
    EntityLabel::Date,
    EntityLabel::Time,
    EntityLabel::Nationality,
    EntityLabel::Condition,
];

const INSURANCE_SET: [EntityLabel; 9] = [
    EntityLabel::Person,
    EntityLabel::Org,
    EntityLabel::Location,
    EntityLabel::Date,
    EntityLabel::Time,
    EntityLabel::Nationality,
    EntityLabel::Policy,
    EntityLabel::Claim,
    EntityLabel::Account,
];

const LEGAL_SET: [EntityLabel; 9] = [
    EntityLabel::Person,
    EntityLabel::Org,
    EntityLabel::Location,
    EntityLabel::Date,
    EntityLabel::Time,
    EntityLabel::Nationality,
    EntityLabel::Law,
    EntityLabel::Case,
    EntityLabel::Court,
];

/// Disclosure mode controlling what leaves the system
///
/// A closed enumeration: requests carrying an unrecognized mode string must
/// go through [`DisclosureMode::resolve_lenient`], which surfaces the
/// fallback instead of silently accepting the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisclosureMode {
    /// Anonymize demographics but keep clinical content
    Research,
    /// Full PHI redaction, demographics plus conditions
    Patient,
    /// Demographics plus insurance identifiers; free text collapses to a
    /// claim summary
    Insurance,
    /// Demographics plus legal identifiers, with a distinct marker
    Legal,
}

impl DisclosureMode {
    /// All modes in definition order
    pub const ALL: [DisclosureMode; 4] = [
        Self::Research,
        Self::Patient,
        Self::Insurance,
        Self::Legal,
    ];

    /// Lowercase mode name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Research => "research",
            Self::Patient => "patient",
            Self::Insurance => "insurance",
            Self::Legal => "legal",
        }
    }

    /// Entity labels removed under this mode
    ///
    /// Every set is a superset of [`BASE_DEMOGRAPHIC_SET`].
    pub fn redaction_set(&self) -> &'static [EntityLabel] {
        match self {
            Self::Research => &BASE_DEMOGRAPHIC_SET,
            Self::Patient => &PATIENT_SET,
            Self::Insurance => &INSURANCE_SET,
            Self::Legal => &LEGAL_SET,
        }
    }

    /// Imaging field tags overwritten under this mode
    pub fn imaging_tags(&self) -> &'static [&'static str] {
        match self {
            Self::Research => &["PatientName", "PatientID"],
            Self::Patient => &["PatientName", "PatientID", "PatientBirthDate", "PatientSex"],
            Self::Insurance => &["PatientName", "PatientID", "PatientBirthDate"],
            Self::Legal => &["PatientName", "PatientID", "PatientBirthDate", "PatientSex"],
        }
    }

    /// Replacement marker for redacted text spans
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Legal => LEGAL_MARKER,
            _ => REDACTED_MARKER,
        }
    }

    /// Resolve a mode string leniently
    ///
    /// Returns `None` for unrecognized values and logs the fallback. A
    /// `None` mode means no redaction is applied at all, for free text and
    /// structured fields alike. That degrade is predictable but unsafe for
    /// the caller, which is exactly why it is logged at warn level rather
    /// than silently mapped to some default policy.
    pub fn resolve_lenient(raw: &str) -> Option<Self> {
        match raw.parse::<Self>() {
            Ok(mode) => Some(mode),
            Err(_) => {
                tracing::warn!(
                    mode = raw,
                    "Unrecognized disclosure mode, no redaction will be applied"
                );
                None
            }
        }
    }
}

impl fmt::Display for DisclosureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DisclosureMode {
    type Err = MedVaultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "research" => Ok(Self::Research),
            "patient" => Ok(Self::Patient),
            "insurance" => Ok(Self::Insurance),
            "legal" => Ok(Self::Legal),
            other => Err(MedVaultError::UnsupportedMode(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_set_covers_base_demographics() {
        for mode in DisclosureMode::ALL {
            for label in BASE_DEMOGRAPHIC_SET {
                assert!(
                    mode.redaction_set().contains(&label),
                    "{mode} is missing {label}"
                );
            }
        }
    }

    #[test]
    fn test_mode_specific_labels() {
        assert!(DisclosureMode::Patient
            .redaction_set()
            .contains(&EntityLabel::Condition));
        assert!(!DisclosureMode::Research
            .redaction_set()
            .contains(&EntityLabel::Condition));
        assert!(DisclosureMode::Insurance
            .redaction_set()
            .contains(&EntityLabel::Claim));
        assert!(DisclosureMode::Legal
            .redaction_set()
            .contains(&EntityLabel::Court));
    }

    #[test]
    fn test_imaging_tag_table() {
        assert_eq!(
            DisclosureMode::Research.imaging_tags(),
            &["PatientName", "PatientID"]
        );
        assert_eq!(DisclosureMode::Patient.imaging_tags().len(), 4);
        assert_eq!(DisclosureMode::Insurance.imaging_tags().len(), 3);
        assert_eq!(DisclosureMode::Legal.imaging_tags().len(), 4);
    }

    #[test]
    fn test_markers() {
        assert_eq!(DisclosureMode::Research.marker(), "[REDACTED]");
        assert_eq!(DisclosureMode::Legal.marker(), "[LEGAL_REDACTED]");
    }

    #[test]
    fn test_parse_round_trip() {
        for mode in DisclosureMode::ALL {
            assert_eq!(mode.as_str().parse::<DisclosureMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let err = "marketing".parse::<DisclosureMode>().unwrap_err();
        assert!(matches!(err, MedVaultError::UnsupportedMode(_)));
    }

    #[test]
    fn test_lenient_resolution() {
        assert_eq!(
            DisclosureMode::resolve_lenient("legal"),
            Some(DisclosureMode::Legal)
        );
        assert_eq!(DisclosureMode::resolve_lenient("marketing"), None);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&DisclosureMode::Insurance).unwrap();
        assert_eq!(json, "\"insurance\"");
        let back: DisclosureMode = serde_json::from_str("\"legal\"").unwrap();
        assert_eq!(back, DisclosureMode::Legal);
    }
}
