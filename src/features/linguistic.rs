// Linguistic statistics over cleaned text.
//
// These run after `clean_text`, which has already removed punctuation, so
// the exclamation and question counts are always zero in the default
// pipeline. They're still computed from the text they're given.

use serde::Serialize;

/// Surface statistics used by the risk adjustments and risk factors.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct LinguisticFeatures {
    /// Whitespace-delimited token count
    pub word_count: usize,
    /// Mean token length in characters; 0.0 when there are no tokens
    pub avg_word_length: f64,
    pub exclamation_count: usize,
    pub question_count: usize,
}

pub fn extract_linguistic_features(text: &str) -> LinguisticFeatures {
    let (word_count, total_chars) = text
        .split_whitespace()
        .fold((0usize, 0usize), |(n, chars), word| (n + 1, chars + word.chars().count()));

    let avg_word_length = if word_count == 0 {
        0.0
    } else {
        total_chars as f64 / word_count as f64
    };

    LinguisticFeatures {
        word_count,
        avg_word_length,
        exclamation_count: text.matches('!').count(),
        question_count: text.matches('?').count(),
    }
}
