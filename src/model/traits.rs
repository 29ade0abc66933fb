// Risk model trait: the opaque scoring capability.

use crate::error::ProcessingError;

/// Maps cleaned text to the probability that it is misinformation.
///
/// Implementations hold immutable, already-trained state and must be safe
/// to call from several threads at once.
pub trait RiskModel: Send + Sync {
    /// Positive-class probability, 0.0 to 1.0.
    fn predict_proba(&self, cleaned_text: &str) -> Result<f64, ProcessingError>;
}
