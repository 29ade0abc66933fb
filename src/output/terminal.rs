// Colored terminal output for analysis results.
//
// main.rs delegates all display formatting here: colors, percentages,
// the explanation bullets and the optional feature dump.

use colored::Colorize;

use crate::features::extractor::FeatureBundle;
use crate::pipeline::analyze::AnalysisResult;
use crate::scoring::tier::RiskTier;

/// Display one analysis result, optionally followed by the features it was
/// computed from.
pub fn display_result(result: &AnalysisResult, features: Option<&FeatureBundle>) {
    let tier = result.tier();

    println!("\n{}", "=== Misinformation Risk ===".bold());
    println!();
    println!(
        "  Risk Score: {}  ({})",
        colorize_tier(tier, &format!("{}%", percent(result.risk_score))),
        colorize_tier(tier, tier.as_str()),
    );

    if let Some(credibility) = result.credibility_score {
        println!("  Source Credibility: {}%", percent(credibility));
    }

    println!("\n  {}", "Analysis Details:".bold());
    for line in detail_lines(result) {
        println!("  {line}");
    }

    if let Some(bundle) = features {
        display_features(bundle);
    }
    println!();
}

/// Display the intermediate features of an analysis.
pub fn display_features(bundle: &FeatureBundle) {
    let ling = &bundle.linguistic_features;

    println!("\n  {}", "Features:".bold());
    println!("    Language: {}", bundle.detected_language);
    println!(
        "    Words: {}  Avg length: {:.2}  Exclamations: {}  Questions: {}",
        ling.word_count, ling.avg_word_length, ling.exclamation_count, ling.question_count
    );

    if bundle.urls.is_empty() {
        println!("    URLs: {}", "none".dimmed());
    } else {
        println!("    URLs:");
        for url in &bundle.urls {
            println!("      {}", super::truncate_chars(url, 100));
        }
    }

    if bundle.entities.is_empty() {
        println!("    Entities: {}", "none".dimmed());
    } else {
        let names: Vec<String> = bundle
            .entities
            .iter()
            .map(|e| format!("{} ({})", e.text, e.label))
            .collect();
        println!("    Entities: {}", names.join(", "));
    }

    println!(
        "    Cleaned: {}",
        super::truncate_chars(&bundle.cleaned_text, 120).dimmed()
    );
}

/// One bullet per explanation line.
pub fn detail_lines(result: &AnalysisResult) -> Vec<String> {
    result.explanation.iter().map(|line| format!("• {line}")).collect()
}

/// Whole-number percentage, truncated toward zero.
pub fn percent(score: f64) -> u32 {
    (score * 100.0) as u32
}

fn colorize_tier(tier: RiskTier, text: &str) -> colored::ColoredString {
    match tier {
        RiskTier::High => text.red().bold(),
        RiskTier::Moderate => text.yellow(),
        RiskTier::Low => text.green(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_explanation_line_is_bulleted() {
        let result = AnalysisResult {
            risk_score: 0.6,
            credibility_score: Some(1.0),
            explanation: vec![
                "Moderate risk of misinformation detected".to_string(),
                "- Very short message".to_string(),
                "Source credibility score: 1.0".to_string(),
            ],
        };
        assert_eq!(
            detail_lines(&result),
            vec![
                "• Moderate risk of misinformation detected",
                "• - Very short message",
                "• Source credibility score: 1.0",
            ]
        );
    }

    #[test]
    fn test_percent_truncates() {
        assert_eq!(percent(0.6), 60);
        assert_eq!(percent(0.999), 99);
        assert_eq!(percent(1.0), 100);
        assert_eq!(percent(0.0), 0);
    }
}
