//! Integration tests for the document classifier
//!
//! One realistic fixture per clinical category, plus the unknown fallback
//! paths and the serialized result shape downstream consumers rely on.

use medvault::classifier::DocumentClassifier;
use test_case::test_case;

const DISCHARGE_SUMMARY: &str = "Admission Date: 03/01/2025\n\
    Discharge Date: 03/05/2025\n\
    Chief Complaint: chest pain\n\
    Hospital Course: uneventful, pain resolved with treatment\n\
    Disposition: home\n\
    Discharge Medications: aspirin 81 mg daily\n\
    Attending Physician: S. Lee";

const LAB_REPORT: &str = "Specimen: serum\n\
    Collected: 03/01/2025 08:15\n\
    Received: 03/01/2025 09:00\n\
    Analyte: potassium\n\
    Result: 5.4\n\
    Reference range: 3.5-5.0\n\
    Units: mmol/L\n\
    Test code: K";

const RADIOLOGY_REPORT: &str = "Technique: axial CT images of the chest were obtained.\n\
    Comparison: radiograph of 01/10/2025.\n\
    Findings: the lungs are clear, no effusion.\n\
    Impression: no acute cardiopulmonary disease.";

const OPERATIVE_NOTE: &str = "Pre-operative Diagnosis: acute appendicitis\n\
    Post-operative Diagnosis: same\n\
    Procedure: laparoscopic appendectomy\n\
    Surgeon: R. Patel\n\
    Anesthesia: general endotracheal\n\
    Estimated Blood Loss: 20 mL\n\
    Specimens: appendix";

const PRESCRIPTION: &str = "Rx: Amoxicillin 500 mg capsule\n\
    Sig: take one capsule q8h with food\n\
    Disp: 21\n\
    Refills: 2\n\
    NPI 1234567890";

const PROGRESS_NOTE: &str = "Subjective: feels much better today.\n\
    Objective: afebrile, lungs clear.\n\
    Assessment: improving bronchitis.\n\
    Plan: continue antibiotics, follow-up in one week.";

const REFERRAL_LETTER: &str = "Dear Dr Alvarez,\n\
    I am referring this patient for evaluation of persistent migraines\n\
    and would appreciate your consultation at the earliest opening.\n\
    Attn: Neurology clinic.";

const INSURANCE_CLAIM: &str = "Claim number: CLM-2291\n\
    ICD-10: J45.909\n\
    CPT: 99213\n\
    Payer: Acme Health\n\
    Deductible: $500\n\
    Coinsurance: 20%\n\
    Policy number: POL-7741\n\
    Member ID: M-5521";

const CONSENT_FORM: &str = "Consent for Treatment\n\
    I hereby voluntarily authorize the disclosure of my medical records.\n\
    The risks and benefits of the treatment were explained to me.\n\
    Patient signature: ________  Witness: ________";

const BILLING_INVOICE: &str = "Invoice #4417\n\
    Date of service: 02/14/2025\n\
    Charges: $250.00\n\
    Payments: $100.00\n\
    Adjustments: $0.00\n\
    Balance: $150.00\n\
    Amount due: $150.00";

fn classifier() -> DocumentClassifier {
    DocumentClassifier::new().expect("classifier patterns should compile")
}

#[test_case(DISCHARGE_SUMMARY => "discharge_summary" ; "discharge summary")]
#[test_case(LAB_REPORT => "lab_report" ; "lab report")]
#[test_case(RADIOLOGY_REPORT => "radiology_report" ; "radiology report")]
#[test_case(OPERATIVE_NOTE => "operative_note" ; "operative note")]
#[test_case(PRESCRIPTION => "prescription" ; "prescription")]
#[test_case(PROGRESS_NOTE => "progress_note" ; "progress note")]
#[test_case(REFERRAL_LETTER => "referral_letter" ; "referral letter")]
#[test_case(INSURANCE_CLAIM => "insurance_claim" ; "insurance claim")]
#[test_case(CONSENT_FORM => "consent_form" ; "consent form")]
#[test_case(BILLING_INVOICE => "billing_invoice" ; "billing invoice")]
fn classifies_fixture(text: &str) -> String {
    let result = classifier().classify(text);
    assert!(result.confidence > 0.0, "no confidence for {text:?}");
    result.label
}

#[test_case("" ; "empty")]
#[test_case("   \n\t  " ; "whitespace only")]
#[test_case("Patient: John Doe\nDate: 2025-08-31\nDiagnosis: Fever" ; "too few cues")]
#[test_case("meeting notes from tuesday about parking" ; "non-clinical prose")]
fn falls_back_to_unknown(text: &str) {
    let result = classifier().classify(text);
    assert!(result.is_unknown());
    assert_eq!(result.confidence, 0.0);
}

#[test]
fn test_result_reports_all_category_scores() {
    let result = classifier().classify(LAB_REPORT);
    assert_eq!(result.scores.len(), 10);
    assert!(result.scores["lab_report"] > result.scores["billing_invoice"]);
}

#[test]
fn test_evidence_names_the_matched_cues() {
    let result = classifier().classify(LAB_REPORT);
    assert!(!result.evidence.is_empty());
    assert!(result.evidence.len() <= 6);
    assert!(result
        .evidence
        .iter()
        .any(|e| e.starts_with("lab_report: matched")));
}

#[test]
fn test_result_serialization_shape() {
    let result = classifier().classify(RADIOLOGY_REPORT);
    let json = serde_json::to_value(&result).expect("result serializes");

    assert_eq!(json["label"], "radiology_report");
    assert!(json["confidence"].as_f64().is_some());
    assert!(json["scores"].is_object());
    assert!(json["evidence"].is_array());
}

#[test]
fn test_classification_is_deterministic() {
    let first = classifier().classify(DISCHARGE_SUMMARY);
    let second = classifier().classify(DISCHARGE_SUMMARY);
    assert_eq!(first, second);
}
