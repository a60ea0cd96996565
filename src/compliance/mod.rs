//! Compliance module
//!
//! Provides the HIPAA Safe Harbor identifier scan and the compliance report
//! model built from its findings.
//!
//! # HIPAA Safe Harbor
//!
//! Scans free text for the 18 identifier categories of the HIPAA Safe Harbor
//! method (45 CFR §164.514(b)(2)). The scan is a lexical heuristic: a match
//! means the category's cue pattern occurs somewhere in the text, not that
//! the text is proven to contain that identifier. False positives are
//! tolerated; the fixed pattern set never misses its own cues.
//!
//! # Examples
//!
//! ```
//! use medvault::compliance::{HipaaScanner, IdentifierCategory, RiskLevel};
//!
//! # fn main() -> medvault::domain::Result<()> {
//! let scanner = HipaaScanner::new()?;
//! let report = scanner.report("SSN: 123-45-6789");
//! assert!(report.violations.contains(&IdentifierCategory::Ssn));
//! assert_eq!(report.risk, RiskLevel::High);
//! # Ok(())
//! # }
//! ```

pub mod hipaa;

pub use hipaa::{ComplianceReport, HipaaScanner, IdentifierCategory, RiskLevel};
