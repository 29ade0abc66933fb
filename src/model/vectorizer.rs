// TF-IDF vectorizer loaded from a JSON artifact.
//
// Reproduces scikit-learn's TfidfVectorizer.transform for word analyzers:
// tokens are runs of two or more word characters, n-grams are joined with a
// single space, term frequency is the raw count (or 1 + ln(count) when
// sublinear_tf is set), multiplied by the fitted idf, then normalized.
//
// Artifact layout:
//   {
//     "vocabulary": {"vaccine": 0, "cure": 1, ...},
//     "idf": [1.69, 2.10, ...],
//     "ngram_range": [1, 1],
//     "sublinear_tf": false,
//     "norm": "l2",
//     "lowercase": true
//   }

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::ResourceError;
use crate::features::text::is_word_char;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TfIdfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
    #[serde(default = "default_ngram_range")]
    ngram_range: (usize, usize),
    #[serde(default)]
    sublinear_tf: bool,
    #[serde(default = "default_norm")]
    norm: Option<Norm>,
    #[serde(default = "default_lowercase")]
    lowercase: bool,
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

fn default_lowercase() -> bool {
    true
}

impl TfIdfVectorizer {
    /// Load and validate a vectorizer artifact.
    pub fn load(path: &Path) -> Result<Self, ResourceError> {
        if !path.exists() {
            return Err(ResourceError::Missing {
                what: "vectorizer",
                path: path.to_path_buf(),
            });
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|e| ResourceError::corrupt("vectorizer", path, e))?;
        let vectorizer =
            Self::from_json(&raw).map_err(|e| ResourceError::corrupt("vectorizer", path, e))?;

        debug!(
            features = vectorizer.dimension(),
            "Loaded TF-IDF vectorizer from {}",
            path.display()
        );
        Ok(vectorizer)
    }

    /// Parse an artifact and check that it is internally consistent.
    pub fn from_json(raw: &str) -> Result<Self, String> {
        let vectorizer: Self = serde_json::from_str(raw).map_err(|e| e.to_string())?;
        vectorizer.validate()?;
        Ok(vectorizer)
    }

    fn validate(&self) -> Result<(), String> {
        if self.idf.is_empty() {
            return Err("idf vector is empty".to_string());
        }
        if let Some((term, &index)) = self.vocabulary.iter().find(|(_, &i)| i >= self.idf.len()) {
            return Err(format!(
                "term {term:?} maps to column {index}, but there are only {} idf weights",
                self.idf.len()
            ));
        }
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(format!("invalid ngram_range ({min_n}, {max_n})"));
        }
        Ok(())
    }

    /// Width of the produced feature vector.
    pub fn dimension(&self) -> usize {
        self.idf.len()
    }

    /// Map text to a dense TF-IDF vector. Unknown terms are ignored; text
    /// with no known terms yields an all-zero vector.
    pub fn transform(&self, text: &str) -> Vec<f32> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        let mut counts: HashMap<usize, u32> = HashMap::new();
        for term in ngrams(&tokenize(&text), self.ngram_range) {
            if let Some(&index) = self.vocabulary.get(&term) {
                *counts.entry(index).or_insert(0) += 1;
            }
        }

        let mut vector = vec![0.0_f32; self.dimension()];
        for (index, count) in counts {
            let tf = if self.sublinear_tf {
                1.0 + (count as f32).ln()
            } else {
                count as f32
            };
            vector[index] = tf * self.idf[index];
        }

        match self.norm {
            Some(Norm::L2) => {
                let magnitude = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
                scale(&mut vector, magnitude);
            }
            Some(Norm::L1) => {
                let magnitude = vector.iter().map(|v| v.abs()).sum::<f32>();
                scale(&mut vector, magnitude);
            }
            None => {}
        }

        vector
    }
}

fn scale(vector: &mut [f32], magnitude: f32) {
    if magnitude > 0.0 {
        for v in vector.iter_mut() {
            *v /= magnitude;
        }
    }
}

/// Runs of two or more word characters.
fn tokenize(text: &str) -> Vec<&str> {
    text.split(|c: char| !is_word_char(c))
        .filter(|t| t.chars().count() >= 2)
        .collect()
}

/// Word n-grams for every n in `range`, shortest first.
fn ngrams(tokens: &[&str], (min_n, max_n): (usize, usize)) -> Vec<String> {
    let mut out = Vec::new();
    for n in min_n..=max_n {
        if n > tokens.len() {
            break;
        }
        out.extend(tokens.windows(n).map(|w| w.join(" ")));
    }
    out
}
