// Feature extraction pipeline: raw text in, FeatureBundle out.
//
// Order matters. Cleaning runs first and language detection sees the
// cleaned text. URLs and entities come from the original text, because
// cleaning strips the punctuation both depend on. Linguistic statistics are
// computed over the cleaned text.

use std::collections::HashSet;

use serde::Serialize;
use stop_words::{get, LANGUAGE};
use tracing::{debug, warn};

use super::entities::OnnxEntityRecognizer;
use super::language::WhatlangDetector;
use super::linguistic::{extract_linguistic_features, LinguisticFeatures};
use super::text::{clean_text, extract_urls};
use super::traits::{Entity, EntityRecognizer, LanguageDetector, UNKNOWN_LANGUAGE};
use crate::config::Config;
use crate::error::{ProcessingError, ResourceError};

/// Structured representation of one submitted text. Built per request and
/// dropped when the request completes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureBundle {
    /// Lowercased, punctuation-stripped, stop-word-filtered text
    pub cleaned_text: String,
    /// URLs found in the original text, in order, duplicates kept
    pub urls: Vec<String>,
    /// Named entities found in the original text
    pub entities: Vec<Entity>,
    pub linguistic_features: LinguisticFeatures,
    /// Language code of the cleaned text, or "unknown"
    pub detected_language: String,
}

impl FeatureBundle {
    /// True if a language was detected and it isn't the expected one.
    pub fn is_foreign(&self, expected_language: &str) -> bool {
        self.detected_language != UNKNOWN_LANGUAGE && self.detected_language != expected_language
    }
}

/// Turns raw text into a FeatureBundle.
///
/// Holds the stop-word set and the NLP capabilities. All of it is read-only
/// after construction.
pub struct TextFeatureExtractor {
    stop_words: HashSet<String>,
    language: String,
    detector: Box<dyn LanguageDetector>,
    recognizer: Box<dyn EntityRecognizer>,
}

impl TextFeatureExtractor {
    /// Build an extractor using the English stop-word list.
    pub fn new(
        detector: Box<dyn LanguageDetector>,
        recognizer: Box<dyn EntityRecognizer>,
        language: impl Into<String>,
    ) -> Self {
        let stop_words: Vec<String> = get(LANGUAGE::English);
        Self::with_stop_words(detector, recognizer, language, stop_words)
    }

    pub fn with_stop_words<I, S>(
        detector: Box<dyn LanguageDetector>,
        recognizer: Box<dyn EntityRecognizer>,
        language: impl Into<String>,
        stop_words: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            stop_words: stop_words.into_iter().map(Into::into).collect(),
            language: language.into(),
            detector,
            recognizer,
        }
    }

    /// Load the production capabilities: whatlang for language detection and
    /// the local ONNX NER model from `config.ner_model_dir`.
    pub fn from_config(config: &Config) -> Result<Self, ResourceError> {
        let recognizer = OnnxEntityRecognizer::load(&config.ner_model_dir)?;
        Ok(Self::new(
            Box::new(WhatlangDetector),
            Box::new(recognizer),
            config.language.clone(),
        ))
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn stop_words(&self) -> &HashSet<String> {
        &self.stop_words
    }

    /// Extract the full feature bundle from raw text.
    ///
    /// Language detection never fails the request; a recognizer failure does.
    pub fn extract(&self, raw_text: &str) -> Result<FeatureBundle, ProcessingError> {
        let cleaned_text = clean_text(raw_text, &self.stop_words);

        let detected_language = self
            .detector
            .detect(&cleaned_text)
            .unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string());

        let urls = extract_urls(raw_text);
        let entities = self.recognizer.recognize(raw_text)?;
        let linguistic_features = extract_linguistic_features(&cleaned_text);

        let bundle = FeatureBundle {
            cleaned_text,
            urls,
            entities,
            linguistic_features,
            detected_language,
        };

        if bundle.is_foreign(&self.language) {
            warn!(
                detected = %bundle.detected_language,
                expected = %self.language,
                "Unexpected language detected; continuing with full analysis"
            );
        }

        debug!(
            words = bundle.linguistic_features.word_count,
            urls = bundle.urls.len(),
            entities = bundle.entities.len(),
            language = %bundle.detected_language,
            "Extracted text features"
        );

        Ok(bundle)
    }
}
