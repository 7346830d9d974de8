//! Symptom extraction from free text or an explicit token list.
//!
//! Free text is scanned with one whole-word, case-insensitive pattern per
//! vocabulary entry. Underscored tokens also match their spaced form, so
//! "body pain" and "body_pain" both yield `body_pain`.

use std::sync::LazyLock;

use regex::Regex;

use crate::vocabulary::{self, Symptom, SYMPTOMS};

/// A compiled pattern for one vocabulary symptom.
struct SymptomPattern {
    symptom: Symptom,
    regex: Regex,
}

static SYMPTOM_PATTERNS: LazyLock<Vec<SymptomPattern>> = LazyLock::new(|| {
    SYMPTOMS
        .iter()
        .map(|&symptom| SymptomPattern {
            symptom,
            regex: symptom_regex(symptom),
        })
        .collect()
});

fn symptom_regex(symptom: &str) -> Regex {
    let spaced = regex::escape(&symptom.replace('_', " "));
    let underscored = regex::escape(symptom);
    Regex::new(&format!(r"(?i)\b(?:{spaced}|{underscored})\b"))
        .expect("Invalid symptom regex pattern")
}

/// Vocabulary symptoms mentioned in `text` as whole words.
///
/// Returned in vocabulary order, each at most once. An empty result is
/// a normal outcome, not an error.
pub fn extract_from_text(text: &str) -> Vec<Symptom> {
    SYMPTOM_PATTERNS
        .iter()
        .filter(|p| p.regex.is_match(text))
        .map(|p| p.symptom)
        .collect()
}

/// Keep only tokens that are in the vocabulary. Unknown tokens are dropped
/// silently; repeats collapse onto their first occurrence.
pub fn filter_explicit<S: AsRef<str>>(tokens: &[S]) -> Vec<Symptom> {
    let mut selected: Vec<Symptom> = Vec::with_capacity(tokens.len());
    for token in tokens {
        if let Some(symptom) = vocabulary::lookup(token.as_ref()) {
            if !selected.contains(&symptom) {
                selected.push(symptom);
            }
        }
    }
    selected
}

/// Pick the symptom source for a chat turn.
///
/// A non-empty explicit list wins; an absent or empty list falls through
/// to free-text extraction.
pub fn select_symptoms(message: &str, explicit: Option<&[String]>) -> Vec<Symptom> {
    match explicit {
        Some(tokens) if !tokens.is_empty() => filter_explicit(tokens),
        _ => extract_from_text(message),
    }
}
