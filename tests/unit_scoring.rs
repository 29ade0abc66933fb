// Risk tier and risk predictor tests with a stub classifier.

use litmus::error::ProcessingError;
use litmus::features::extractor::FeatureBundle;
use litmus::features::linguistic::LinguisticFeatures;
use litmus::model::traits::RiskModel;
use litmus::scoring::risk::{adjust_score, RiskAdjustments, RiskPredictor};
use litmus::scoring::tier::RiskTier;

struct FixedProbability(f64);

impl RiskModel for FixedProbability {
    fn predict_proba(&self, _cleaned_text: &str) -> Result<f64, ProcessingError> {
        Ok(self.0)
    }
}

fn bundle(word_count: usize, exclamation_count: usize) -> FeatureBundle {
    FeatureBundle {
        cleaned_text: vec!["word"; word_count].join(" "),
        urls: Vec::new(),
        entities: Vec::new(),
        linguistic_features: LinguisticFeatures {
            word_count,
            avg_word_length: 4.0,
            exclamation_count,
            question_count: 0,
        },
        detected_language: "eng".to_string(),
    }
}

fn predictor(probability: f64) -> RiskPredictor {
    RiskPredictor::new(Box::new(FixedProbability(probability)), RiskAdjustments::default())
}

// ============================================================
// Tiers
// ============================================================

#[test]
fn tier_thresholds_are_exclusive() {
    assert_eq!(RiskTier::from_score(0.7), RiskTier::Moderate);
    assert_eq!(RiskTier::from_score(0.700001), RiskTier::High);
    assert_eq!(RiskTier::from_score(0.4), RiskTier::Low);
    assert_eq!(RiskTier::from_score(0.400001), RiskTier::Moderate);
    assert_eq!(RiskTier::from_score(0.0), RiskTier::Low);
    assert_eq!(RiskTier::from_score(1.0), RiskTier::High);
}

#[test]
fn tier_summaries() {
    assert_eq!(RiskTier::High.summary(), "High risk of misinformation detected");
    assert_eq!(RiskTier::Moderate.summary(), "Moderate risk of misinformation detected");
    assert_eq!(RiskTier::Low.summary(), "Low risk of misinformation detected");
    assert_eq!(RiskTier::Moderate.to_string(), "Moderate");
}

// ============================================================
// Predictor
// ============================================================

#[test]
fn normal_length_text_keeps_model_probability() {
    let risk = predictor(0.35).predict(&bundle(40, 0)).unwrap();
    assert!((risk - 0.35).abs() < 1e-10, "Expected 0.35, got {risk}");
}

#[test]
fn short_text_is_scaled_up() {
    let risk = predictor(0.5).predict(&bundle(3, 0)).unwrap();
    assert!((risk - 0.6).abs() < 1e-10, "Expected 0.6, got {risk}");
}

#[test]
fn risk_never_exceeds_one() {
    let risk = predictor(0.99).predict(&bundle(1, 20)).unwrap();
    assert_eq!(risk, 1.0);
}

#[test]
fn adjustments_never_lower_the_score() {
    let rules = RiskAdjustments::default();
    for base in [0.0, 0.1, 0.33, 0.5, 0.8, 1.0] {
        for (words, bangs) in [(0, 0), (5, 0), (50, 5), (600, 10)] {
            let features = bundle(words, bangs).linguistic_features;
            let adjusted = adjust_score(base, &features, &rules);
            assert!(adjusted >= base.min(1.0) - 1e-12);
            assert!((0.0..=1.0).contains(&adjusted));
        }
    }
}

#[test]
fn custom_adjustments_are_honored() {
    let rules = RiskAdjustments {
        min_words: 2,
        length_multiplier: 2.0,
        ..RiskAdjustments::default()
    };
    let predictor = RiskPredictor::new(Box::new(FixedProbability(0.3)), rules);
    let risk = predictor.predict(&bundle(1, 0)).unwrap();
    assert!((risk - 0.6).abs() < 1e-10, "Expected 0.6, got {risk}");
    assert_eq!(predictor.adjustments().min_words, 2);
}

#[test]
fn out_of_range_probability_is_rejected() {
    for bad in [-0.1, 1.5, f64::NAN] {
        let err = predictor(bad).predict(&bundle(20, 0)).unwrap_err();
        assert!(matches!(err, ProcessingError::MalformedOutput(_)));
    }
}
