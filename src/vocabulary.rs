//! Compiled-in symptom vocabulary and precaution table.
//!
//! The vocabulary order is the feature order the encoder artifact was
//! built against, so it must not be reshuffled.

/// A recognized symptom token, always borrowed from [`SYMPTOMS`].
pub type Symptom = &'static str;

pub const SYMPTOMS: &[Symptom] = &[
    "fever",
    "cough",
    "fatigue",
    "headache",
    "body_pain",
    "rash",
    "sneezing",
    "nausea",
    "vomiting",
    "joint_pain",
    "sore_throat",
    "diarrhea",
];

/// Shown with every diagnosis payload.
pub const DISCLAIMER: &str =
    "These are AI-based suggestions. Please consult a doctor for serious symptoms.";

/// Look up a token in the vocabulary, returning the canonical static entry.
pub fn lookup(token: &str) -> Option<Symptom> {
    SYMPTOMS.iter().copied().find(|s| *s == token)
}

/// Precaution advice for a disease, in display order.
/// Diseases without an entry get an empty slice.
pub fn precautions_for(disease: &str) -> &'static [&'static str] {
    match disease {
        "Common Cold" => &[
            "Rest",
            "Stay hydrated",
            "Gargle with warm salt water",
            "Over-the-counter decongestants if needed",
        ],
        "Flu" => &[
            "See doctor for severe symptoms",
            "Rest & hydrate",
            "Paracetamol for fever (doctor advice)",
        ],
        "Dengue" => &[
            "Seek medical help urgently for high fever",
            "Avoid NSAIDs like ibuprofen",
            "Stay hydrated",
        ],
        "Malaria" => &[
            "Get blood test urgently",
            "Treat with antimalarial if positive",
            "Use mosquito protection",
        ],
        "Allergy" => &[
            "Avoid allergen if known",
            "Antihistamines (doctor advice)",
            "Nasal spray if prescribed",
        ],
        "Gastroenteritis" => &[
            "Oral rehydration",
            "Avoid heavy food until vomiting stops",
            "Seek care if dehydrated",
        ],
        "Strep Throat" => &[
            "See doctor for antibiotics if bacterial",
            "Gargle and rest",
            "Pain relief as recommended",
        ],
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocabulary_has_no_duplicates() {
        let mut sorted = SYMPTOMS.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), SYMPTOMS.len());
    }

    #[test]
    fn lookup_is_exact() {
        assert_eq!(lookup("fever"), Some("fever"));
        assert_eq!(lookup("Fever"), None);
        assert_eq!(lookup("body pain"), None);
    }

    #[test]
    fn known_disease_has_precautions() {
        let flu = precautions_for("Flu");
        assert_eq!(flu.len(), 3);
        assert_eq!(flu[0], "See doctor for severe symptoms");
    }

    #[test]
    fn unknown_disease_has_empty_precautions() {
        assert!(precautions_for("Chickenpox").is_empty());
    }
}
