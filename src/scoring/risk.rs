// Risk predictor.
//
// The classifier's positive-class probability is the base score. Two
// multiplicative rules then nudge it upward: texts that are very short or
// very long, and texts with heavy exclamation use. The result is capped at
// 1.0. With the default cleaning order punctuation is gone before the
// exclamation count is taken, so only the length rule fires in practice.

use tracing::debug;

use crate::error::{ProcessingError, ResourceError};
use crate::features::extractor::FeatureBundle;
use crate::features::linguistic::LinguisticFeatures;
use crate::model::trained::TrainedRiskModel;
use crate::model::traits::RiskModel;

/// Upper bound on any risk score.
pub const MAX_RISK: f64 = 1.0;

/// Configurable parameters for the rule-based adjustments.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskAdjustments {
    /// Texts with fewer words than this are penalized (default 10)
    pub min_words: usize,
    /// Texts with more words than this are penalized (default 500)
    pub max_words: usize,
    /// Multiplier for out-of-range length (default 1.2)
    pub length_multiplier: f64,
    /// Exclamation counts above this are penalized (default 3)
    pub exclamation_threshold: usize,
    /// Multiplier for excessive exclamation marks (default 1.1)
    pub exclamation_multiplier: f64,
}

impl Default for RiskAdjustments {
    fn default() -> Self {
        Self {
            min_words: 10,
            max_words: 500,
            length_multiplier: 1.2,
            exclamation_threshold: 3,
            exclamation_multiplier: 1.1,
        }
    }
}

/// Apply the length and punctuation rules to a base probability, in that
/// order, and cap the result at 1.0.
pub fn adjust_score(base_score: f64, features: &LinguisticFeatures, rules: &RiskAdjustments) -> f64 {
    let mut score = base_score;

    if features.word_count < rules.min_words || features.word_count > rules.max_words {
        score *= rules.length_multiplier;
    }

    if features.exclamation_count > rules.exclamation_threshold {
        score *= rules.exclamation_multiplier;
    }

    score.min(MAX_RISK)
}

/// Scores a FeatureBundle with the trained model and the adjustment rules.
pub struct RiskPredictor {
    model: Box<dyn RiskModel>,
    adjustments: RiskAdjustments,
}

impl RiskPredictor {
    pub fn new(model: Box<dyn RiskModel>, adjustments: RiskAdjustments) -> Self {
        Self { model, adjustments }
    }

    /// Load the trained model from `model_dir`. Failure here means the
    /// process cannot serve requests.
    pub fn load(model_dir: &std::path::Path) -> Result<Self, ResourceError> {
        let model = TrainedRiskModel::load(model_dir)?;
        Ok(Self::new(Box::new(model), RiskAdjustments::default()))
    }

    pub fn adjustments(&self) -> &RiskAdjustments {
        &self.adjustments
    }

    /// Final risk score in [0.0, 1.0].
    pub fn predict(&self, bundle: &FeatureBundle) -> Result<f64, ProcessingError> {
        let base_score = self.model.predict_proba(&bundle.cleaned_text)?;

        if !(0.0..=1.0).contains(&base_score) {
            return Err(ProcessingError::MalformedOutput(format!(
                "model probability {base_score} is outside [0, 1]"
            )));
        }

        let risk = adjust_score(base_score, &bundle.linguistic_features, &self.adjustments);
        debug!(base_score, risk, "Predicted risk");
        Ok(risk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(word_count: usize, exclamation_count: usize) -> LinguisticFeatures {
        LinguisticFeatures {
            word_count,
            avg_word_length: 5.0,
            exclamation_count,
            question_count: 0,
        }
    }

    #[test]
    fn test_normal_length_unchanged() {
        let score = adjust_score(0.5, &features(50, 0), &RiskAdjustments::default());
        assert!((score - 0.5).abs() < 1e-10, "Expected 0.5, got {score}");
    }

    #[test]
    fn test_short_text_penalized() {
        let score = adjust_score(0.5, &features(3, 0), &RiskAdjustments::default());
        // 0.5 * 1.2 = 0.6
        assert!((score - 0.6).abs() < 1e-10, "Expected 0.6, got {score}");
    }

    #[test]
    fn test_long_text_penalized() {
        let score = adjust_score(0.5, &features(501, 0), &RiskAdjustments::default());
        assert!((score - 0.6).abs() < 1e-10, "Expected 0.6, got {score}");
    }

    #[test]
    fn test_length_boundaries_not_penalized() {
        let rules = RiskAdjustments::default();
        assert!((adjust_score(0.5, &features(10, 0), &rules) - 0.5).abs() < 1e-10);
        assert!((adjust_score(0.5, &features(500, 0), &rules) - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_both_rules_compound() {
        let score = adjust_score(0.5, &features(3, 4), &RiskAdjustments::default());
        // 0.5 * 1.2 * 1.1 = 0.66
        assert!((score - 0.66).abs() < 1e-10, "Expected 0.66, got {score}");
    }

    #[test]
    fn test_exclamation_threshold_is_exclusive() {
        let score = adjust_score(0.5, &features(50, 3), &RiskAdjustments::default());
        assert!((score - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_capped_at_one() {
        let score = adjust_score(0.95, &features(2, 10), &RiskAdjustments::default());
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_zero_stays_zero() {
        let score = adjust_score(0.0, &features(0, 10), &RiskAdjustments::default());
        assert_eq!(score, 0.0);
    }
}
