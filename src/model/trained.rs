// The production RiskModel: TF-IDF vectorizer feeding an ONNX classifier.

use std::path::Path;

use tracing::{debug, info};

use super::classifier::OnnxClassifier;
use super::traits::RiskModel;
use super::vectorizer::TfIdfVectorizer;
use crate::error::{ProcessingError, ResourceError};

pub const VECTORIZER_FILE: &str = "vectorizer.json";
pub const CLASSIFIER_FILE: &str = "classifier.onnx";

pub struct TrainedRiskModel {
    vectorizer: TfIdfVectorizer,
    classifier: OnnxClassifier,
}

impl TrainedRiskModel {
    /// Load `vectorizer.json` and `classifier.onnx` from `model_dir`.
    /// Fails if either is missing or unreadable; there is no fallback model.
    pub fn load(model_dir: &Path) -> Result<Self, ResourceError> {
        let vectorizer = TfIdfVectorizer::load(&model_dir.join(VECTORIZER_FILE))?;
        let classifier = OnnxClassifier::load(&model_dir.join(CLASSIFIER_FILE))?;

        info!(
            features = vectorizer.dimension(),
            "Loaded risk model from {}",
            model_dir.display()
        );

        Ok(Self {
            vectorizer,
            classifier,
        })
    }
}

impl RiskModel for TrainedRiskModel {
    fn predict_proba(&self, cleaned_text: &str) -> Result<f64, ProcessingError> {
        let features = self.vectorizer.transform(cleaned_text);
        let probability = self.classifier.predict_proba(&features)?;
        debug!(probability, "Classifier scored text");
        Ok(probability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_dir_reports_vectorizer_first() {
        let dir = std::env::temp_dir().join("litmus-test-no-risk-model");
        match TrainedRiskModel::load(&dir) {
            Err(ResourceError::Missing { what, path }) => {
                assert_eq!(what, "vectorizer");
                assert!(path.ends_with(VECTORIZER_FILE));
            }
            Err(e) => panic!("expected Missing, got {e}"),
            Ok(_) => panic!("expected Missing, got a loaded model"),
        }
    }
}
