//! Clinical document categories and their cue patterns
//!
//! The category table and heading list are fixed configuration data. Cues
//! are matched case-insensitively across lines; the heading list is
//! anchored to line starts and contributes a shared structure bonus.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Clinical document category
///
/// Enumeration order doubles as the tie-break order during classification:
/// when two categories end up with the same probability, the first-defined
/// one wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocCategory {
    /// Hospital discharge summaries
    DischargeSummary,
    /// Laboratory reports, including HL7 ORU fragments
    LabReport,
    /// Radiology reports (CT, MRI, x-ray, ultrasound)
    RadiologyReport,
    /// Operative and procedure notes
    OperativeNote,
    /// Prescriptions
    Prescription,
    /// Progress notes in SOAP form
    ProgressNote,
    /// Referral letters
    ReferralLetter,
    /// Insurance claims
    InsuranceClaim,
    /// Consent forms
    ConsentForm,
    /// Billing invoices
    BillingInvoice,
}

impl DocCategory {
    /// All categories in definition order
    pub const ALL: [DocCategory; 10] = [
        Self::DischargeSummary,
        Self::LabReport,
        Self::RadiologyReport,
        Self::OperativeNote,
        Self::Prescription,
        Self::ProgressNote,
        Self::ReferralLetter,
        Self::InsuranceClaim,
        Self::ConsentForm,
        Self::BillingInvoice,
    ];

    /// Snake_case key used as the classification label
    pub fn key(&self) -> &'static str {
        match self {
            Self::DischargeSummary => "discharge_summary",
            Self::LabReport => "lab_report",
            Self::RadiologyReport => "radiology_report",
            Self::OperativeNote => "operative_note",
            Self::Prescription => "prescription",
            Self::ProgressNote => "progress_note",
            Self::ReferralLetter => "referral_letter",
            Self::InsuranceClaim => "insurance_claim",
            Self::ConsentForm => "consent_form",
            Self::BillingInvoice => "billing_invoice",
        }
    }

    /// Cue patterns for this category
    ///
    /// Matched with the case-insensitive and multi-line flags. None of the
    /// patterns contain capturing groups, so match counting is direct.
    pub fn patterns(&self) -> &'static [&'static str] {
        match self {
            Self::DischargeSummary => &[
                r"\badmission date\b",
                r"\bdischarge date\b",
                r"\bhospital course\b",
                r"\bchief complaint\b",
                r"\bdisposition\b",
                r"\bdischarge medications?\b",
                r"\bprimary diagnosis\b",
                r"\battending physician\b",
            ],
            Self::LabReport => &[
                r"\bspecimen\b",
                r"\bcollected\b",
                r"\breceived\b",
                r"\banalyte\b",
                r"\bresult\b",
                r"\breference range\b",
                r"\bunits?\b",
                r"\btest code\b",
                r"\bOBX\|",
                r"\bOBR\|",
            ],
            Self::RadiologyReport => &[
                r"\bimpression\b",
                r"\bfindings\b",
                r"\btechnique\b",
                r"\bcomparison\b",
                r"\bmodality\b",
                r"\bCT\b",
                r"\bMRI\b",
                r"\bx[- ]?ray\b",
                r"\bultrasound\b",
            ],
            Self::OperativeNote => &[
                r"\bpre[- ]?operative diagnosis\b",
                r"\bpost[- ]?operative diagnosis\b",
                r"\bprocedure\b",
                r"\bsurgeon\b",
                r"\bassistant\b",
                r"\banesthesia\b",
                r"\bestimated blood loss\b",
                r"\bspecimens?\b",
            ],
            Self::Prescription => &[
                r"\bRx\b",
                r"\bSig\b",
                r"\bDisp(?:ense)?\b",
                r"\bRefills?\b",
                r"\bNPI\b",
                r"\bDEA\b",
                r"\bq\d+h\b",
                r"\bmg\b",
                r"\btablet\b",
                r"\bcapsule\b",
            ],
            Self::ProgressNote => &[
                r"\bSubjective:\b",
                r"\bObjective:\b",
                r"\bAssessment:\b",
                r"\bPlan:\b",
                r"\bHPI\b",
                r"\bROS\b",
                r"\bPE\b",
                r"\bfollow[- ]?up\b",
            ],
            Self::ReferralLetter => &[
                r"\bDear Dr\b",
                r"\breferr?al\b",
                r"\bconsult(?:ation)?\b",
                r"\battn\b",
                r"\bI am referring\b",
                r"\bfor evaluation of\b",
            ],
            Self::InsuranceClaim => &[
                r"\bclaim number\b",
                r"\bCMS[- ]?1500\b",
                r"\bHCFA\b",
                r"\bEOB\b",
                r"\bICD[- ]?10\b",
                r"\bCPT\b",
                r"\bpayer\b",
                r"\bdeductible\b",
                r"\bcoinsurance\b",
                r"\bpolicy number\b",
                r"\bmember id\b",
            ],
            Self::ConsentForm => &[
                r"\bconsent\b",
                r"\bI hereby\b",
                r"\bvoluntarily\b",
                r"\brisk[s]?\b",
                r"\bbenefit[s]?\b",
                r"\bwitness\b",
                r"\bpatient signature\b",
                r"\bguardian\b",
                r"\bauthorize\b",
                r"\bdisclosure\b",
            ],
            Self::BillingInvoice => &[
                r"\binvoice\b",
                r"\bamount due\b",
                r"\bbalance\b",
                r"\bdate of service\b",
                r"\bcharges?\b",
                r"\bpayments?\b",
                r"\badjustments?\b",
            ],
        }
    }
}

impl fmt::Display for DocCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Clinical section headings used for the shared structure bonus
///
/// Anchored to line starts; each pattern that matches anywhere in the text
/// contributes once, and the total bonus is added to every category score.
pub const HEADINGS: [&str; 10] = [
    r"^\s*impression\s*:",
    r"^\s*findings\s*:",
    r"^\s*technique\s*:",
    r"^\s*assessment\s*:",
    r"^\s*plan\s*:",
    r"^\s*chief complaint\s*:",
    r"^\s*hospital course\s*:",
    r"^\s*disposition\s*:",
    r"^\s*procedure\s*:",
    r"^\s*diagnosis\s*:",
];
