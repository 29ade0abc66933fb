// ONNX classifier exported from scikit-learn (skl2onnx, zipmap disabled).
//
// Input:  "float_input", f32 [1, n_features]
// Output: "probabilities", f32 [1, 2]; column 1 is the positive class.

use std::path::Path;
use std::sync::Mutex;

use ort::session::Session;
use ort::value::Tensor;
use tracing::debug;

use crate::error::{ProcessingError, ResourceError};

/// Index of the "misinformation" class in the probability output.
const POSITIVE_CLASS: usize = 1;

pub struct OnnxClassifier {
    // ort::Session::run takes &mut self
    session: Mutex<Session>,
}

impl OnnxClassifier {
    pub fn load(path: &Path) -> Result<Self, ResourceError> {
        if !path.exists() {
            return Err(ResourceError::Missing {
                what: "classifier",
                path: path.to_path_buf(),
            });
        }

        let session = Session::builder()
            .map_err(|e| ResourceError::corrupt("classifier", path, e))?
            .commit_from_file(path)
            .map_err(|e| ResourceError::corrupt("classifier", path, e))?;

        debug!("Loaded ONNX classifier from {}", path.display());

        Ok(Self {
            session: Mutex::new(session),
        })
    }

    /// Probability of the positive class for one feature vector.
    pub fn predict_proba(&self, features: &[f32]) -> Result<f64, ProcessingError> {
        let shape = [1_i64, features.len() as i64];
        let input = Tensor::from_array((shape, features.to_vec()))
            .map_err(|e| ProcessingError::Inference(e.to_string()))?;

        let probabilities = {
            let mut session = self
                .session
                .lock()
                .map_err(|e| ProcessingError::Inference(format!("session lock poisoned: {e}")))?;

            let outputs = session
                .run(ort::inputs! { "float_input" => input })
                .map_err(|e| ProcessingError::Inference(e.to_string()))?;

            let (_shape, data) = outputs["probabilities"]
                .try_extract_tensor::<f32>()
                .map_err(|e| ProcessingError::MalformedOutput(e.to_string()))?;

            data.to_vec()
        };

        positive_class_probability(&probabilities)
    }
}

/// Pull the positive-class column out of a `[1, n_classes]` probability row.
pub(crate) fn positive_class_probability(row: &[f32]) -> Result<f64, ProcessingError> {
    let p = row.get(POSITIVE_CLASS).copied().ok_or_else(|| {
        ProcessingError::MalformedOutput(format!(
            "expected at least {} class probabilities, got {}",
            POSITIVE_CLASS + 1,
            row.len()
        ))
    })?;

    if !p.is_finite() {
        return Err(ProcessingError::MalformedOutput(format!(
            "positive-class probability is {p}"
        )));
    }

    Ok((p as f64).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_class_is_second_column() {
        let p = positive_class_probability(&[0.25, 0.75]).unwrap();
        assert!((p - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_single_column_is_malformed() {
        assert!(matches!(
            positive_class_probability(&[1.0]),
            Err(ProcessingError::MalformedOutput(_))
        ));
    }

    #[test]
    fn test_nan_is_malformed() {
        assert!(positive_class_probability(&[0.5, f32::NAN]).is_err());
    }

    #[test]
    fn test_rounding_noise_is_clamped() {
        let p = positive_class_probability(&[-0.000001, 1.000001]).unwrap();
        assert_eq!(p, 1.0);
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("litmus-test-missing-classifier.onnx");
        assert!(matches!(
            OnnxClassifier::load(&path),
            Err(ResourceError::Missing { what: "classifier", .. })
        ));
    }
}
