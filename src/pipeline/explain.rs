// Explanation lines: tier headline, risk factors, credibility.

use serde::Serialize;

use crate::features::extractor::FeatureBundle;
use crate::scoring::tier::RiskTier;

/// Exclamation counts above this are reported as a risk factor.
const EXCLAMATION_FACTOR_THRESHOLD: usize = 3;
/// Texts with fewer words than this are reported as a risk factor.
const SHORT_MESSAGE_WORDS: usize = 10;

/// A discrete condition that contributes to the explanation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskFactor {
    ExcessiveExclamation,
    NoSourceCitations,
    VeryShortMessage,
}

impl RiskFactor {
    pub fn description(&self) -> &'static str {
        match self {
            RiskFactor::ExcessiveExclamation => "Excessive use of exclamation marks",
            RiskFactor::NoSourceCitations => "No source citations",
            RiskFactor::VeryShortMessage => "Very short message",
        }
    }
}

impl std::fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

/// Every risk factor present in the bundle, in fixed order.
pub fn risk_factors(bundle: &FeatureBundle) -> Vec<RiskFactor> {
    let mut factors = Vec::new();

    if bundle.linguistic_features.exclamation_count > EXCLAMATION_FACTOR_THRESHOLD {
        factors.push(RiskFactor::ExcessiveExclamation);
    }
    if bundle.urls.is_empty() {
        factors.push(RiskFactor::NoSourceCitations);
    }
    if bundle.linguistic_features.word_count < SHORT_MESSAGE_WORDS {
        factors.push(RiskFactor::VeryShortMessage);
    }

    factors
}

/// Build the ordered explanation lines: tier headline first, then one
/// "- factor" line per risk factor, then the credibility line if a source
/// URL was scored.
pub fn build_explanation(
    risk_score: f64,
    factors: &[RiskFactor],
    credibility_score: Option<f64>,
) -> Vec<String> {
    let mut lines = Vec::with_capacity(factors.len() + 2);

    lines.push(RiskTier::from_score(risk_score).summary().to_string());
    lines.extend(factors.iter().map(|f| format!("- {f}")));

    if let Some(credibility) = credibility_score {
        lines.push(format!("Source credibility score: {credibility:.1}"));
    }

    lines
}
