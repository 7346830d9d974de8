//! Canned replies for messages without any recognizable symptom.
//!
//! Intents are checked in a fixed order and the first match wins.

use std::sync::LazyLock;

use regex::Regex;

/// Which canned reply a message resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Greeting,
    Thanks,
    Question,
    Fallback,
}

impl Intent {
    pub fn reply(self) -> &'static str {
        match self {
            Intent::Greeting => "Hello! How can I help you today? You can tell me your symptoms.",
            Intent::Thanks => "You're welcome! Do you have any other questions?",
            Intent::Question => {
                "Please ask your question in simple words. If it’s medical, I can give suggestions based on symptoms."
            }
            Intent::Fallback => FALLBACK_REPLY,
        }
    }
}

/// Reply when no intent keyword is present.
pub const FALLBACK_REPLY: &str =
    "Can you please describe your symptoms more clearly? (e.g., fever, cough, how long you’ve had them?)";

struct IntentPattern {
    intent: Intent,
    regex: Regex,
}

/// Checked top to bottom. Keywords match anywhere in the lowercased
/// message, so "hiya" and "thankyou" count too.
static INTENT_PATTERNS: LazyLock<Vec<IntentPattern>> = LazyLock::new(|| {
    vec![
        pattern(Intent::Greeting, &["hello", "hi", "hey"]),
        pattern(Intent::Thanks, &["thank", "thanks"]),
        pattern(Intent::Question, &["what is"]),
    ]
});

fn pattern(intent: Intent, keywords: &[&str]) -> IntentPattern {
    let alternation = keywords
        .iter()
        .map(|k| regex::escape(k))
        .collect::<Vec<_>>()
        .join("|");
    IntentPattern {
        intent,
        regex: Regex::new(&alternation).expect("Invalid intent keyword pattern"),
    }
}

/// Classify a message into one of the canned intents.
pub fn classify(message: &str) -> Intent {
    let lower = message.to_lowercase();
    INTENT_PATTERNS
        .iter()
        .find(|p| p.regex.is_match(&lower))
        .map(|p| p.intent)
        .unwrap_or(Intent::Fallback)
}

/// Canned reply text for a message.
pub fn generic_reply(message: &str) -> &'static str {
    classify(message).reply()
}
