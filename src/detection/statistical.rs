//! Statistical entity detector
//!
//! A small trainable token model: training counts how often each token
//! type appears inside spans of each label versus outside any span, and
//! detection tags tokens whose label posterior clears a confidence
//! threshold, merging adjacent same-label tokens back into spans. An
//! honorific cue list boosts capitalized tokens following titles like
//! "Dr." toward the person label.
//!
//! The built-in seed corpus gives the detector useful behavior out of the
//! box; callers can keep training it with their own annotated text.

use std::collections::HashMap;

use super::{DetectorBackend, EntityDetector};
use crate::domain::entity::{Entity, EntityLabel};
use crate::domain::result::Result;

/// Posterior assigned to a capitalized token following an honorific cue
const CUE_CONFIDENCE: f64 = 0.9;

/// Annotated seed sentences: (text, [(span, label), ...])
const SEED_CORPUS: &[(&str, &[(&str, &str)])] = &[
    (
        "John Smith was admitted on January 5, 2024 with uncontrolled hypertension",
        &[
            ("John Smith", "PERSON"),
            ("January 5, 2024", "DATE"),
            ("hypertension", "CONDITION"),
        ],
    ),
    (
        "Mary Jones presented with diabetes and was seen by Dr Brown at 09:30",
        &[
            ("Mary Jones", "PERSON"),
            ("diabetes", "CONDITION"),
            ("Brown", "PERSON"),
            ("09:30", "TIME"),
        ],
    ),
    (
        "Transferred from Boston to New York on 2024-03-12 for dialysis",
        &[
            ("Boston", "LOCATION"),
            ("New York", "LOCATION"),
            ("2024-03-12", "DATE"),
            ("dialysis", "TREATMENT"),
        ],
    ),
    (
        "Claim 778 under policy no 12345 was reviewed by Acme Insurance",
        &[
            ("Claim 778", "CLAIM"),
            ("policy no 12345", "POLICY"),
            ("Acme Insurance", "ORG"),
        ],
    ),
    (
        "Robert Wilson reported asthma attacks every February since 2019",
        &[("Robert Wilson", "PERSON"), ("asthma", "CONDITION")],
    ),
    (
        "The patient is a British citizen treated at Bangalore General Hospital",
        &[
            ("British", "NATIONALITY"),
            ("Bangalore", "LOCATION"),
            ("General Hospital", "ORG"),
        ],
    ),
    (
        "Follow-up on March 20, 2024 after chemotherapy at the clinic",
        &[("March 20, 2024", "DATE"), ("chemotherapy", "TREATMENT")],
    ),
    (
        "Case 42 was heard at the High Court under section 117",
        &[
            ("Case 42", "CASE"),
            ("High Court", "COURT"),
            ("section 117", "LAW"),
        ],
    ),
    (
        "Susan and David visited the ward and the account was settled",
        &[("Susan", "PERSON"), ("David", "PERSON")],
    ),
    (
        "No fever was recorded and the result was within range",
        &[("fever", "CONDITION")],
    ),
];

/// A word token with its byte span in the source text
#[derive(Debug, Clone, Copy)]
struct Token<'a> {
    raw: &'a str,
    start: usize,
    end: usize,
}

/// Trainable statistical token detector
pub struct StatisticalDetector {
    /// Normalized token -> per-label occurrence counts inside spans
    lexicon: HashMap<String, HashMap<EntityLabel, u32>>,
    /// Normalized token -> occurrences outside any span
    outside: HashMap<String, u32>,
    /// Normalized cue token -> label boosted on the following token
    cues: HashMap<String, EntityLabel>,
    /// Minimum posterior for a token to be tagged
    threshold: f64,
}

impl StatisticalDetector {
    /// Create an untrained detector
    pub fn new(threshold: f64) -> Self {
        let mut cues = HashMap::new();
        for honorific in ["dr", "mr", "mrs", "ms", "prof"] {
            cues.insert(honorific.to_string(), EntityLabel::Person);
        }
        Self {
            lexicon: HashMap::new(),
            outside: HashMap::new(),
            cues,
            threshold: threshold.clamp(0.0, 1.0),
        }
    }

    /// Create a detector trained on the built-in seed corpus
    pub fn with_seed_corpus(threshold: f64) -> Self {
        let mut detector = Self::new(threshold);
        for (text, annotations) in SEED_CORPUS {
            let spans: Vec<(String, EntityLabel)> = annotations
                .iter()
                .filter_map(|(span, label)| {
                    EntityLabel::parse(label).map(|l| ((*span).to_string(), l))
                })
                .collect();
            detector.train(text, &spans);
        }
        detector
    }

    /// Train on one annotated text
    ///
    /// `annotations` lists the entity spans present in `text` with their
    /// labels. Tokens of annotated spans count toward their label; every
    /// other token of `text` counts as outside evidence, which lowers the
    /// posterior of ambiguous tokens.
    pub fn train(&mut self, text: &str, annotations: &[(String, EntityLabel)]) {
        let mut span_tokens: HashMap<String, EntityLabel> = HashMap::new();
        for (span, label) in annotations {
            for token in tokenize(span) {
                span_tokens.insert(normalize(token.raw), *label);
            }
        }

        for token in tokenize(text) {
            let norm = normalize(token.raw);
            if norm.is_empty() {
                continue;
            }
            match span_tokens.get(&norm) {
                Some(label) => {
                    *self
                        .lexicon
                        .entry(norm)
                        .or_default()
                        .entry(*label)
                        .or_insert(0) += 1;
                }
                None => {
                    *self.outside.entry(norm).or_insert(0) += 1;
                }
            }
        }
    }

    /// Number of distinct token types the model has label evidence for
    pub fn vocabulary_size(&self) -> usize {
        self.lexicon.len()
    }

    /// Best label and posterior for a normalized token
    fn posterior(&self, norm: &str) -> Option<(EntityLabel, f64)> {
        let counts = self.lexicon.get(norm)?;
        let (label, best) = counts.iter().max_by_key(|(_, c)| **c)?;
        let inside: u32 = counts.values().sum();
        let total = inside + self.outside.get(norm).copied().unwrap_or(0);
        if total == 0 {
            return None;
        }
        Some((*label, f64::from(*best) / f64::from(total)))
    }
}

impl EntityDetector for StatisticalDetector {
    fn detect(&self, text: &str) -> Result<Vec<Entity>> {
        let tokens: Vec<Token> = tokenize(text).collect();
        let mut tags: Vec<Option<EntityLabel>> = vec![None; tokens.len()];

        for (i, token) in tokens.iter().enumerate() {
            let norm = normalize(token.raw);
            if norm.is_empty() {
                continue;
            }
            let mut best = self.posterior(&norm);

            // Honorific cue: a capitalized token right after a title is a
            // person name even when the lexicon has never seen it.
            if i > 0 && is_capitalized(token.raw) {
                if let Some(cue_label) = self.cues.get(&normalize(tokens[i - 1].raw)) {
                    let boosted = match best {
                        Some((label, p)) if label == *cue_label => (label, p.max(CUE_CONFIDENCE)),
                        Some(other) if other.1 >= CUE_CONFIDENCE => other,
                        _ => (*cue_label, CUE_CONFIDENCE),
                    };
                    best = Some(boosted);
                }
            }

            if let Some((label, p)) = best {
                if p >= self.threshold {
                    tags[i] = Some(label);
                }
            }
        }

        // Merge adjacent same-label tokens into one span over the exact
        // source slice.
        let mut entities = Vec::new();
        let mut i = 0;
        while i < tokens.len() {
            if let Some(label) = tags[i] {
                let start = tokens[i].start;
                let mut end = tokens[i].end;
                let mut j = i + 1;
                while j < tokens.len() && tags[j] == Some(label) {
                    end = tokens[j].end;
                    j += 1;
                }
                entities.push(Entity::new(&text[start..end], label, start, end));
                i = j;
            } else {
                i += 1;
            }
        }

        Ok(entities)
    }

    fn backend(&self) -> DetectorBackend {
        DetectorBackend::Statistical
    }
}

/// Split text into word tokens with byte spans
///
/// A token is a maximal run of alphanumeric characters plus the in-word
/// separators of dates and times, so `2024-01-05`, `1/7/2024` and `09:30`
/// stay single tokens.
fn tokenize(text: &str) -> impl Iterator<Item = Token<'_>> {
    let bytes_len = text.len();
    let mut indices = text.char_indices().peekable();
    std::iter::from_fn(move || {
        // Skip separators.
        while let Some((_, c)) = indices.peek() {
            if is_token_char(*c) {
                break;
            }
            indices.next();
        }
        let (start, _) = *indices.peek()?;
        let mut end = bytes_len;
        while let Some((i, c)) = indices.peek() {
            if is_token_char(*c) {
                indices.next();
            } else {
                end = *i;
                break;
            }
        }
        Some(Token {
            raw: &text[start..end],
            start,
            end,
        })
    })
}

fn is_token_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '/' | ':')
}

fn normalize(raw: &str) -> String {
    raw.trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}

fn is_capitalized(raw: &str) -> bool {
    raw.chars().next().is_some_and(|c| c.is_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> StatisticalDetector {
        StatisticalDetector::with_seed_corpus(0.6)
    }

    #[test]
    fn test_seed_corpus_builds_vocabulary() {
        assert!(seeded().vocabulary_size() > 10);
    }

    #[test]
    fn test_known_condition_detected() {
        let entities = seeded().detect("History of hypertension noted").unwrap();
        assert!(entities
            .iter()
            .any(|e| e.text == "hypertension" && e.label == EntityLabel::Condition));
    }

    #[test]
    fn test_known_name_tokens_merge() {
        let entities = seeded().detect("Examined John Smith on arrival").unwrap();
        assert!(entities
            .iter()
            .any(|e| e.text == "John Smith" && e.label == EntityLabel::Person));
    }

    #[test]
    fn test_honorific_cue_tags_unseen_name() {
        let entities = seeded().detect("Discussed with Dr Verma before discharge").unwrap();
        assert!(entities
            .iter()
            .any(|e| e.text == "Verma" && e.label == EntityLabel::Person));
    }

    #[test]
    fn test_unseen_lowercase_tokens_ignored() {
        let entities = seeded().detect("completely unremarkable narrative text").unwrap();
        assert!(entities.is_empty());
    }

    #[test]
    fn test_training_adds_evidence() {
        let mut detector = StatisticalDetector::new(0.6);
        assert!(detector.detect("migraine reported").unwrap().is_empty());
        detector.train(
            "Chronic migraine for two years",
            &[("migraine".to_string(), EntityLabel::Condition)],
        );
        let entities = detector.detect("migraine reported").unwrap();
        assert!(entities
            .iter()
            .any(|e| e.text == "migraine" && e.label == EntityLabel::Condition));
    }

    #[test]
    fn test_outside_evidence_lowers_posterior() {
        let mut detector = StatisticalDetector::new(0.6);
        detector.train(
            "may was the month",
            &[("may".to_string(), EntityLabel::Date)],
        );
        // Three outside sightings against one labeled sighting drop the
        // posterior to 0.25, under the threshold.
        detector.train("it may rain", &[]);
        detector.train("may we proceed", &[]);
        detector.train("you may go", &[]);
        assert!(detector.detect("may").unwrap().is_empty());
    }

    #[test]
    fn test_entity_text_is_exact_slice() {
        let text = "Seen on January 5, 2024 in clinic";
        let entities = seeded().detect(text).unwrap();
        for entity in &entities {
            assert_eq!(&text[entity.start..entity.end], entity.text);
        }
    }

    #[test]
    fn test_tokenizer_keeps_dates_whole() {
        let tokens: Vec<&str> = tokenize("seen 2024-01-05 at 09:30, then 1/7/2024.")
            .map(|t| t.raw)
            .collect();
        assert!(tokens.contains(&"2024-01-05"));
        assert!(tokens.contains(&"09:30"));
        assert!(tokens.contains(&"1/7/2024"));
    }

    #[test]
    fn test_backend_identifier() {
        assert_eq!(seeded().backend(), DetectorBackend::Statistical);
    }
}
