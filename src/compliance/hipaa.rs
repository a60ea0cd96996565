//! HIPAA Safe Harbor identifier scan
//!
//! Eighteen identifier categories, each with one fixed cue pattern. The
//! patterns are deliberately case-sensitive: identifier markers such as
//! `MRN`, `CERT` or `FINGERPRINT` are uppercase conventions in source
//! documents, and capitalized name pairs are the name cue.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::errors::MedVaultError;
use crate::domain::result::Result;

/// HIPAA Safe Harbor identifier category (18 identifiers)
///
/// Enumeration order is the scan's reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierCategory {
    /// Names (capitalized first/last pairs)
    Names,
    /// Social Security Numbers
    Ssn,
    /// Telephone numbers
    Phone,
    /// Email addresses
    Email,
    /// Street addresses
    Address,
    /// Calendar dates in numeric slash form
    Dates,
    /// Medical record numbers
    MedicalRecordNumber,
    /// Health plan beneficiary numbers
    HealthPlanNumber,
    /// Account numbers
    AccountNumbers,
    /// Certificate numbers
    CertificateNumbers,
    /// License numbers
    LicenseNumbers,
    /// Vehicle identifiers
    VehicleIds,
    /// Device identifiers
    DeviceIds,
    /// Web URLs
    WebUrls,
    /// IP addresses
    IpAddresses,
    /// Biometric identifiers
    BiometricIdentifiers,
    /// Full-face photograph markers
    FullFacePhotos,
    /// Any other unique identifying number
    AnyOtherUniqueId,
}

impl IdentifierCategory {
    /// All categories in reporting order
    pub const ALL: [IdentifierCategory; 18] = [
        Self::Names,
        Self::Ssn,
        Self::Phone,
        Self::Email,
        Self::Address,
        Self::Dates,
        Self::MedicalRecordNumber,
        Self::HealthPlanNumber,
        Self::AccountNumbers,
        Self::CertificateNumbers,
        Self::LicenseNumbers,
        Self::VehicleIds,
        Self::DeviceIds,
        Self::WebUrls,
        Self::IpAddresses,
        Self::BiometricIdentifiers,
        Self::FullFacePhotos,
        Self::AnyOtherUniqueId,
    ];

    /// Snake_case key used in reports and alert payloads
    pub fn key(&self) -> &'static str {
        match self {
            Self::Names => "names",
            Self::Ssn => "ssn",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Address => "address",
            Self::Dates => "dates",
            Self::MedicalRecordNumber => "medical_record_number",
            Self::HealthPlanNumber => "health_plan_number",
            Self::AccountNumbers => "account_numbers",
            Self::CertificateNumbers => "certificate_numbers",
            Self::LicenseNumbers => "license_numbers",
            Self::VehicleIds => "vehicle_ids",
            Self::DeviceIds => "device_ids",
            Self::WebUrls => "web_urls",
            Self::IpAddresses => "ip_addresses",
            Self::BiometricIdentifiers => "biometric_identifiers",
            Self::FullFacePhotos => "full_face_photos",
            Self::AnyOtherUniqueId => "any_other_unique_id",
        }
    }

    /// Cue pattern for this category
    fn pattern(&self) -> &'static str {
        match self {
            Self::Names => r"\b([A-Z][a-z]+ [A-Z][a-z]+)\b",
            Self::Ssn => r"\b\d{3}-\d{2}-\d{4}\b",
            Self::Phone => r"\b\d{3}-\d{3}-\d{4}\b",
            Self::Email => r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b",
            Self::Address => r"\d{1,5} [A-Za-z0-9\s]+ (Street|St|Avenue|Ave|Rd|Road|Blvd|Lane|Ln)\b",
            Self::Dates => r"\b\d{1,2}/\d{1,2}/\d{2,4}\b",
            Self::MedicalRecordNumber => r"\bMRN\d+\b",
            Self::HealthPlanNumber => r"\bHP\d+\b",
            Self::AccountNumbers => r"\bAC\d+\b",
            Self::CertificateNumbers => r"\bCERT\d+\b",
            Self::LicenseNumbers => r"\bLIC\d+\b",
            Self::VehicleIds => r"\bVIN[A-Z0-9]+\b",
            Self::DeviceIds => r"\bDEV[A-Z0-9]+\b",
            Self::WebUrls => r"https?://[^\s]+",
            Self::IpAddresses => r"\b\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}\b",
            Self::BiometricIdentifiers => r"\bFINGERPRINT\b|\bIRIS\b",
            Self::FullFacePhotos => r"\bPHOTO\b",
            Self::AnyOtherUniqueId => r"\bUID\d+\b",
        }
    }
}

impl fmt::Display for IdentifierCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Compliance risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// No identifier categories matched
    Low,
    /// At least one identifier category matched
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Result of a HIPAA identifier scan
///
/// Invariant: `risk` is [`RiskLevel::High`] iff `violations` is non-empty.
/// Construct through [`ComplianceReport::from_violations`] to keep the two
/// fields consistent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceReport {
    /// Matched identifier categories in reporting order, deduplicated
    pub violations: Vec<IdentifierCategory>,
    /// Risk level derived from the violations
    pub risk: RiskLevel,
}

impl ComplianceReport {
    /// Build a report from matched categories, deriving the risk level
    pub fn from_violations(violations: Vec<IdentifierCategory>) -> Self {
        let risk = if violations.is_empty() {
            RiskLevel::Low
        } else {
            RiskLevel::High
        };
        Self { violations, risk }
    }

    /// Whether the scan found no identifiers
    pub fn is_compliant(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violation keys joined for log lines and alert messages
    pub fn violation_keys(&self) -> Vec<&'static str> {
        self.violations.iter().map(|v| v.key()).collect()
    }
}

/// Stateless regex scanner over the 18 identifier categories
///
/// Compiled once at construction; `scan` borrows immutably and is safe to
/// share across concurrent tasks.
#[derive(Debug)]
pub struct HipaaScanner {
    patterns: Vec<(IdentifierCategory, Regex)>,
}

impl HipaaScanner {
    /// Compile the fixed identifier pattern table
    pub fn new() -> Result<Self> {
        let mut patterns = Vec::with_capacity(IdentifierCategory::ALL.len());
        for category in IdentifierCategory::ALL {
            let regex = Regex::new(category.pattern()).map_err(|e| {
                MedVaultError::Configuration(format!(
                    "Invalid HIPAA pattern for '{}': {e}",
                    category.key()
                ))
            })?;
            patterns.push((category, regex));
        }
        Ok(Self { patterns })
    }

    /// Scan text and return the matched categories in reporting order
    ///
    /// Each category appears at most once, regardless of how many times its
    /// pattern matches.
    pub fn scan(&self, text: &str) -> Vec<IdentifierCategory> {
        self.patterns
            .iter()
            .filter(|(_, regex)| regex.is_match(text))
            .map(|(category, _)| *category)
            .collect()
    }

    /// Scan text and wrap the findings in a [`ComplianceReport`]
    pub fn report(&self, text: &str) -> ComplianceReport {
        ComplianceReport::from_violations(self.scan(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanner() -> HipaaScanner {
        HipaaScanner::new().unwrap()
    }

    #[test]
    fn test_ssn_detected() {
        let found = scanner().scan("SSN: 123-45-6789");
        assert!(found.contains(&IdentifierCategory::Ssn));
    }

    #[test]
    fn test_email_detected() {
        let found = scanner().scan("contact me at a@b.com");
        assert!(found.contains(&IdentifierCategory::Email));
    }

    #[test]
    fn test_clean_text_is_low_risk() {
        let report = scanner().report("the quick brown fox jumps over the lazy dog");
        assert!(report.violations.is_empty());
        assert_eq!(report.risk, RiskLevel::Low);
        assert!(report.is_compliant());
    }

    #[test]
    fn test_iso_date_not_matched_by_dates_pattern() {
        // The dates cue covers slash-form dates only; ISO dates are a
        // detector concern, not a scan concern.
        let found = scanner().scan("Date: 2025-08-31");
        assert!(!found.contains(&IdentifierCategory::Dates));
    }

    #[test]
    fn test_slash_date_matched() {
        let found = scanner().scan("seen on 12/31/2024 for follow-up");
        assert!(found.contains(&IdentifierCategory::Dates));
    }

    #[test]
    fn test_name_pair_matched() {
        let found = scanner().scan("Patient: John Doe\nDate: 2025-08-31\nDiagnosis: Fever");
        assert!(found.contains(&IdentifierCategory::Names));
        assert!(!found.contains(&IdentifierCategory::Dates));
    }

    #[test]
    fn test_marker_identifiers() {
        let text = "MRN12345 HP998 AC31 CERT7 LIC44 VINAB12 DEVX9 UID777";
        let found = scanner().scan(text);
        for category in [
            IdentifierCategory::MedicalRecordNumber,
            IdentifierCategory::HealthPlanNumber,
            IdentifierCategory::AccountNumbers,
            IdentifierCategory::CertificateNumbers,
            IdentifierCategory::LicenseNumbers,
            IdentifierCategory::VehicleIds,
            IdentifierCategory::DeviceIds,
            IdentifierCategory::AnyOtherUniqueId,
        ] {
            assert!(found.contains(&category), "missing {category}");
        }
    }

    #[test]
    fn test_lowercase_markers_not_matched() {
        // Scan is case-sensitive: lowercase markers are not cues.
        let found = scanner().scan("mrn12345 fingerprint photo");
        assert!(found.is_empty());
    }

    #[test]
    fn test_url_and_ip() {
        let found = scanner().scan("see https://portal.example.org from 10.0.0.12");
        assert!(found.contains(&IdentifierCategory::WebUrls));
        assert!(found.contains(&IdentifierCategory::IpAddresses));
    }

    #[test]
    fn test_reporting_order_is_stable() {
        let found = scanner().scan("John Doe 123-45-6789 a@b.com");
        assert_eq!(
            found,
            vec![
                IdentifierCategory::Names,
                IdentifierCategory::Ssn,
                IdentifierCategory::Email,
            ]
        );
    }

    #[test]
    fn test_report_risk_invariant() {
        let report = ComplianceReport::from_violations(vec![IdentifierCategory::Phone]);
        assert_eq!(report.risk, RiskLevel::High);
        assert_eq!(report.violation_keys(), vec!["phone"]);
    }

    #[test]
    fn test_category_key_serialization() {
        let json = serde_json::to_string(&IdentifierCategory::MedicalRecordNumber).unwrap();
        assert_eq!(json, "\"medical_record_number\"");
    }
}
