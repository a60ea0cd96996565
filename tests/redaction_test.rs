//! Integration tests for entity detection plus redaction
//!
//! These run the real detector backends against the redaction engine, the
//! same path documents take through the processing pipeline.

use std::collections::BTreeMap;
use std::io::Write;

use medvault::config::DetectionConfig;
use medvault::detection::{
    build_detector, EntityDetector, RuleBasedDetector, StatisticalDetector,
};
use medvault::redaction::{DisclosureMode, RedactionEngine};
use serde_json::json;
use tempfile::NamedTempFile;

fn engine() -> RedactionEngine {
    RedactionEngine::new().expect("engine patterns should compile")
}

fn rules_detector() -> RuleBasedDetector {
    RuleBasedDetector::new().expect("built-in rules should compile")
}

fn redact(text: &str, mode: DisclosureMode) -> String {
    let detector = rules_detector();
    let entities = detector.detect(text).expect("detection should succeed");
    engine().redact(text, &entities, mode)
}

#[test]
fn test_research_mode_end_to_end() {
    let text =
        "Patient John Doe was admitted to Mercy Hospital in Boston on 2024-01-05 with hypertension.";
    let redacted = redact(text, DisclosureMode::Research);

    assert!(!redacted.contains("John"));
    assert!(!redacted.contains("Mercy"));
    assert!(!redacted.contains("Boston"));
    assert!(!redacted.contains("2024-01-05"));
    assert!(redacted.contains("[REDACTED]"));
    // Research keeps the clinical content
    assert!(redacted.contains("hypertension"));
}

#[test]
fn test_patient_mode_strips_conditions() {
    let text = "Treated for hypertension after referral by Dr. Mehta.";
    let research = redact(text, DisclosureMode::Research);
    let patient = redact(text, DisclosureMode::Patient);

    assert!(research.contains("hypertension"));
    assert!(!patient.contains("hypertension"));
    assert!(!patient.contains("Mehta"));
}

#[test]
fn test_legal_mode_end_to_end() {
    let text = "Statement of Amit Sharma, case 42 under section 117, heard at the High Court.";
    let redacted = redact(text, DisclosureMode::Legal);

    assert!(!redacted.contains("Amit"));
    assert!(!redacted.contains("case 42"));
    assert!(!redacted.contains("section 117"));
    assert!(!redacted.contains("High Court"));
    assert!(redacted.contains("[LEGAL_REDACTED]"));
    assert!(!redacted.contains("[REDACTED]"));
}

#[test]
fn test_insurance_mode_returns_claim_summary() {
    let text = "John Doe filed claim 778 for chemotherapy on 2024-01-05 under policy no 12345.";
    let summary = redact(text, DisclosureMode::Insurance);

    // The document shape is not preserved under the insurance mode
    assert_eq!(
        summary,
        "CLAIM: claim 778\nTREATMENT: chemotherapy\nDATE: 2024-01-05"
    );
}

#[test]
fn test_redaction_is_idempotent() {
    let text = "John Doe met Jane Roe in Bangalore on 2025-01-01.";
    let engine = engine();
    let detector = rules_detector();

    let once = engine.redact(
        text,
        &detector.detect(text).unwrap(),
        DisclosureMode::Research,
    );
    let twice = engine.redact(
        &once,
        &detector.detect(&once).unwrap(),
        DisclosureMode::Research,
    );
    assert_eq!(once, twice);
}

#[test]
fn test_redact_json_clinical_record() {
    let record = json!({
        "patient": {
            "name": "John Doe",
            "city": "Boston",
            "age": 47
        },
        "encounters": [
            "Admitted 2024-01-05 with hypertension",
            "Discharged 2024-01-09"
        ],
        "flags": {"urgent": false}
    });

    let detector = rules_detector();
    let redacted = engine()
        .redact_json(&record, &detector, DisclosureMode::Research)
        .expect("json redaction should succeed");

    assert_eq!(redacted["patient"]["name"], "[REDACTED]");
    assert_eq!(redacted["patient"]["city"], "[REDACTED]");
    assert_eq!(redacted["patient"]["age"], 47);
    assert_eq!(redacted["encounters"][0], "Admitted [REDACTED] with hypertension");
    assert_eq!(redacted["encounters"][1], "Discharged [REDACTED]");
    assert_eq!(redacted["flags"]["urgent"], false);
}

#[test]
fn test_redact_fields_imaging_record() {
    let mut fields = BTreeMap::from([
        ("PatientName".to_string(), "DOE^JANE".to_string()),
        ("PatientID".to_string(), "MRN4471".to_string()),
        ("PatientBirthDate".to_string(), "19780214".to_string()),
        ("PatientSex".to_string(), "F".to_string()),
        ("Modality".to_string(), "MR".to_string()),
        ("StudyDescription".to_string(), "Brain w/o contrast".to_string()),
    ]);

    let redacted = engine().redact_fields(&mut fields, DisclosureMode::Patient);

    assert_eq!(
        redacted,
        vec!["PatientName", "PatientID", "PatientBirthDate", "PatientSex"]
    );
    assert_eq!(fields["PatientName"], "REDACTED");
    assert_eq!(fields["PatientBirthDate"], "REDACTED");
    // Non-identifying tags survive
    assert_eq!(fields["Modality"], "MR");
    assert_eq!(fields["StudyDescription"], "Brain w/o contrast");
}

#[test]
fn test_statistical_backend_redaction() {
    let detector = StatisticalDetector::with_seed_corpus(0.6);
    let text = "Examined John Smith on arrival";
    let entities = detector.detect(text).unwrap();
    let redacted = engine().redact(text, &entities, DisclosureMode::Research);

    assert_eq!(redacted, "Examined [REDACTED] on arrival");
}

#[test]
fn test_configured_rule_library_extends_detection() {
    let library = r#"
[rules.wards]
label = "LOCATION"
patterns = ["(?i)\\bward\\s+\\d+\\b"]
"#;
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(library.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = DetectionConfig {
        rule_library: Some(temp_file.path().to_string_lossy().into_owned()),
        ..DetectionConfig::default()
    };
    let detector = build_detector(&config).expect("detector should build");

    let text = "Moved to ward 7 overnight.";
    let entities = detector.detect(text).unwrap();
    let redacted = engine().redact(text, &entities, DisclosureMode::Research);

    assert_eq!(redacted, "Moved to [REDACTED] overnight.");
}
