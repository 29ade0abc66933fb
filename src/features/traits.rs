// External NLP capabilities consumed by the feature extractor.
//
// Both traits are synchronous and Send + Sync: the extractor is shared
// read-only across requests and every call is bounded local CPU work.

use serde::Serialize;

use crate::error::ProcessingError;

/// Language code recorded when detection can't classify the text.
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// A named entity found in the original text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entity {
    /// The span as it appears in the input
    pub text: String,
    /// Entity type tag from the recognizer's label set (PER, ORG, LOC, MISC)
    pub label: String,
}

impl Entity {
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }
}

/// Identifies the language of a piece of text.
pub trait LanguageDetector: Send + Sync {
    /// Return a language code, or `None` when the text is too short or too
    /// ambiguous to classify. `None` is never an error.
    fn detect(&self, text: &str) -> Option<String>;
}

/// Finds named entities in text.
pub trait EntityRecognizer: Send + Sync {
    /// Return `(span, label)` pairs in the order the model emits them.
    fn recognize(&self, text: &str) -> Result<Vec<Entity>, ProcessingError>;
}
