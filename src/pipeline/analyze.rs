// Analysis orchestrator.

use serde::Serialize;
use tracing::{debug, info};

use super::explain::{build_explanation, risk_factors};
use crate::config::Config;
use crate::credibility::scorer::CredibilityScorer;
use crate::error::{AnalysisError, ResourceError};
use crate::features::extractor::{FeatureBundle, TextFeatureExtractor};
use crate::scoring::risk::RiskPredictor;
use crate::scoring::tier::RiskTier;

/// The outcome of analyzing one text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    /// Probability-like risk that the text is misinformation, 0.0 to 1.0
    pub risk_score: f64,
    /// Credibility of the cited source; None when no source URL was given
    pub credibility_score: Option<f64>,
    /// Human-readable lines: tier, risk factors, credibility
    pub explanation: Vec<String>,
}

impl AnalysisResult {
    pub fn tier(&self) -> RiskTier {
        RiskTier::from_score(self.risk_score)
    }
}

/// Runs the full analysis for a text and optional source URL.
///
/// Holds only immutable state (stop words, models, allow-list), so one
/// Analyzer can serve any number of concurrent callers.
pub struct Analyzer {
    extractor: TextFeatureExtractor,
    predictor: RiskPredictor,
    credibility: CredibilityScorer,
}

impl Analyzer {
    pub fn new(
        extractor: TextFeatureExtractor,
        predictor: RiskPredictor,
        credibility: CredibilityScorer,
    ) -> Self {
        Self {
            extractor,
            predictor,
            credibility,
        }
    }

    /// Load every model and resource named in the config. Any failure is
    /// fatal: without them no request can be scored.
    pub fn from_config(config: &Config) -> Result<Self, ResourceError> {
        let extractor = TextFeatureExtractor::from_config(config)?;
        let predictor = RiskPredictor::load(&config.model_dir)?;
        let credibility = CredibilityScorer::from_config(config);

        info!(
            reliable_domains = credibility.reliable_domains().len(),
            language = %extractor.language(),
            "Analyzer ready"
        );

        Ok(Self::new(extractor, predictor, credibility))
    }

    /// Analyze `text`, optionally weighing a cited source URL.
    ///
    /// An empty or whitespace-only `source_url` counts as no source.
    pub fn analyze(&self, text: &str, source_url: Option<&str>) -> Result<AnalysisResult, AnalysisError> {
        self.analyze_detailed(text, source_url).map(|(result, _)| result)
    }

    /// Like `analyze`, but also hands back the FeatureBundle the score was
    /// computed from.
    pub fn analyze_detailed(
        &self,
        text: &str,
        source_url: Option<&str>,
    ) -> Result<(AnalysisResult, FeatureBundle), AnalysisError> {
        let bundle = self
            .extractor
            .extract(text)
            .map_err(AnalysisError::Extraction)?;

        let risk_score = self
            .predictor
            .predict(&bundle)
            .map_err(AnalysisError::Prediction)?;

        let credibility_score = source_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(|url| self.credibility.score_url(url));

        let factors = risk_factors(&bundle);
        let explanation = build_explanation(risk_score, &factors, credibility_score);

        debug!(
            risk_score,
            credibility_score = ?credibility_score,
            factors = factors.len(),
            "Analysis complete"
        );

        let result = AnalysisResult {
            risk_score,
            credibility_score,
            explanation,
        };
        Ok((result, bundle))
    }
}
