//! Document classifier
//!
//! Pattern-scoring engine that labels free text into clinical document
//! types. Each category's cue patterns contribute presence plus frequency
//! points, a shared heading bonus rewards clinically structured text, and
//! the scores are normalized into a confidence. Classification never fails:
//! the worst case is the `"unknown"` label with confidence zero.
//!
//! # Examples
//!
//! ```
//! use medvault::classifier::DocumentClassifier;
//!
//! # fn main() -> medvault::domain::Result<()> {
//! let classifier = DocumentClassifier::new()?;
//! let result = classifier.classify(
//!     "Specimen: blood\nResult: 5.4\nReference range: 3.5-5.0\nUnits: mmol/L",
//! );
//! assert_eq!(result.label, "lab_report");
//! # Ok(())
//! # }
//! ```

pub mod categories;

pub use categories::DocCategory;

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::errors::MedVaultError;
use crate::domain::result::Result;

/// Presence points awarded to a category per cue pattern with at least one match
const PRESENCE_POINTS: f64 = 2.0;
/// Additional points per individual match of a cue pattern
const FREQUENCY_POINTS: f64 = 0.5;
/// Shared bonus added to every category per matched heading pattern
const HEADING_BONUS: f64 = 0.25;
/// Raw winning score below which the label is forced to unknown
const SCORE_THRESHOLD: f64 = 1.5;
/// Maximum number of evidence strings kept in a result
const MAX_EVIDENCE: usize = 6;
/// Maximum length of an evidence literal before truncation
const EVIDENCE_LITERAL_LEN: usize = 32;

/// Classification outcome
///
/// `label` is either a [`DocCategory`] key or `"unknown"`. The invariant:
/// `label == "unknown"` iff the winning raw score stayed below the
/// threshold, in which case `confidence` is forced to zero while `scores`
/// still reports what was computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Winning category key, or `"unknown"`
    pub label: String,
    /// Normalized probability of the winning category, rounded to 4 places
    pub confidence: f64,
    /// Raw score per category, rounded to 3 places; empty for empty input
    pub scores: BTreeMap<String, f64>,
    /// Human-readable cue hits, at most six, in category/pattern order
    pub evidence: Vec<String>,
}

impl ClassificationResult {
    /// The result returned for empty or whitespace-only text
    fn unknown_empty() -> Self {
        Self {
            label: "unknown".to_string(),
            confidence: 0.0,
            scores: BTreeMap::new(),
            evidence: Vec::new(),
        }
    }

    /// Whether the classifier declined to pick a category
    pub fn is_unknown(&self) -> bool {
        self.label == "unknown"
    }
}

/// Compiled cue pattern with its precomputed evidence literal
#[derive(Debug)]
struct CategoryCue {
    regex: Regex,
    display: String,
}

/// Pattern-scoring document classifier
///
/// All cue and heading patterns are compiled once at construction.
/// `classify` borrows immutably and is safe to share across tasks.
#[derive(Debug)]
pub struct DocumentClassifier {
    categories: Vec<(DocCategory, Vec<CategoryCue>)>,
    headings: Vec<Regex>,
}

impl DocumentClassifier {
    /// Compile the fixed category and heading pattern tables
    pub fn new() -> Result<Self> {
        // Strips regex metacharacters from a cue so evidence shows the
        // readable fragment, not the pattern source.
        let cleaner = Regex::new(r"\\b|\?:|\(|\)|\[|\]|\||\+|\*|\^|\$|\\")
            .map_err(|e| MedVaultError::Configuration(format!("Invalid literal cleaner: {e}")))?;

        let mut categories = Vec::with_capacity(DocCategory::ALL.len());
        for category in DocCategory::ALL {
            let mut cues = Vec::with_capacity(category.patterns().len());
            for pattern in category.patterns() {
                let regex = Regex::new(&format!("(?im){pattern}")).map_err(|e| {
                    MedVaultError::Configuration(format!(
                        "Invalid cue pattern for '{}': {e}",
                        category.key()
                    ))
                })?;
                let display = evidence_literal(&cleaner, pattern);
                cues.push(CategoryCue { regex, display });
            }
            categories.push((category, cues));
        }

        let mut headings = Vec::with_capacity(categories::HEADINGS.len());
        for pattern in categories::HEADINGS {
            let regex = Regex::new(&format!("(?im){pattern}")).map_err(|e| {
                MedVaultError::Configuration(format!("Invalid heading pattern: {e}"))
            })?;
            headings.push(regex);
        }

        Ok(Self {
            categories,
            headings,
        })
    }

    /// Classify free text into a clinical document category
    pub fn classify(&self, text: &str) -> ClassificationResult {
        if text.trim().is_empty() {
            return ClassificationResult::unknown_empty();
        }

        // Base scoring: presence plus frequency per matched cue.
        let mut scores: Vec<(DocCategory, f64)> = Vec::with_capacity(self.categories.len());
        for (category, cues) in &self.categories {
            let mut score = 0.0;
            for cue in cues {
                let matches = cue.regex.find_iter(text).count();
                if matches > 0 {
                    score += PRESENCE_POINTS + FREQUENCY_POINTS * matches as f64;
                }
            }
            scores.push((*category, score));
        }

        // Shared heading bonus: structure cues help every clinical format,
        // so the bonus cannot change the argmax on its own.
        let heading_hits = self.headings.iter().filter(|r| r.is_match(text)).count();
        let bonus = HEADING_BONUS * heading_hits as f64;
        for (_, score) in &mut scores {
            *score += bonus;
        }

        let mut evidence = Vec::new();
        for (category, cues) in &self.categories {
            for cue in cues {
                if cue.regex.is_match(text) {
                    evidence.push(format!("{}: matched \"{}\"", category.key(), cue.display));
                }
            }
        }
        evidence.truncate(MAX_EVIDENCE);

        // Normalize to probabilities; a zero sum is treated as one so the
        // all-zero case falls through to the unknown override below.
        let total: f64 = scores.iter().map(|(_, s)| *s).sum();
        let total = if total == 0.0 { 1.0 } else { total };

        let (mut best, mut best_raw) = (scores[0].0, scores[0].1);
        let mut best_prob = best_raw / total;
        for (category, raw) in scores.iter().skip(1) {
            let prob = raw / total;
            if prob > best_prob {
                best = *category;
                best_raw = *raw;
                best_prob = prob;
            }
        }

        let (label, confidence) = if best_raw < SCORE_THRESHOLD {
            ("unknown".to_string(), 0.0)
        } else {
            (best.key().to_string(), round_to(best_prob, 4))
        };

        let scores = scores
            .into_iter()
            .map(|(category, score)| (category.key().to_string(), round_to(score, 3)))
            .collect();

        ClassificationResult {
            label,
            confidence,
            scores,
            evidence,
        }
    }
}

/// Build the human-readable evidence fragment for a cue pattern
fn evidence_literal(cleaner: &Regex, pattern: &str) -> String {
    let cleaned = cleaner.replace_all(pattern, "");
    if cleaned.chars().count() > EVIDENCE_LITERAL_LEN {
        let truncated: String = cleaned.chars().take(EVIDENCE_LITERAL_LEN).collect();
        format!("{truncated}...")
    } else {
        cleaned.into_owned()
    }
}

/// Round to a fixed number of decimal places
fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
