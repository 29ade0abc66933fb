use serde::Serialize;

/// Risk tiers. Thresholds are strict lower bounds: 0.7 itself is Moderate
/// and 0.4 itself is Low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskTier {
    Low,
    Moderate,
    High,
}

impl RiskTier {
    /// Determine the tier from a risk score (0.0-1.0).
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s > 0.7 => RiskTier::High,
            s if s > 0.4 => RiskTier::Moderate,
            _ => RiskTier::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "Low",
            RiskTier::Moderate => "Moderate",
            RiskTier::High => "High",
        }
    }

    /// The headline sentence for an explanation.
    pub fn summary(&self) -> &'static str {
        match self {
            RiskTier::Low => "Low risk of misinformation detected",
            RiskTier::Moderate => "Moderate risk of misinformation detected",
            RiskTier::High => "High risk of misinformation detected",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
