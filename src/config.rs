use std::collections::HashSet;
use std::env;
use std::path::PathBuf;

use anyhow::Result;

/// Domains treated as maximally credible when no allow-list is configured.
pub const DEFAULT_RELIABLE_DOMAINS: [&str; 4] = ["who.int", "un.org", "reliefweb.int", "icrc.org"];

/// ISO 639-3 code of the language the classifier was trained on.
pub const DEFAULT_LANGUAGE: &str = "eng";

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Nothing
/// here changes after `load()` returns.
#[derive(Debug, Clone)]
pub struct Config {
    /// Hosts that short-circuit the credibility scorer to 1.0
    pub reliable_domains: HashSet<String>,
    /// Directory containing `vectorizer.json` and `classifier.onnx`
    pub model_dir: PathBuf,
    /// Directory containing the NER model, tokenizer and label config
    pub ner_model_dir: PathBuf,
    /// Language the risk model expects; anything else triggers a warning
    pub language: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every setting has a default, so this only fails on values that are
    /// present but unusable (an allow-list with no entries).
    pub fn load() -> Result<Self> {
        let reliable_domains = match env::var("LITMUS_RELIABLE_DOMAINS") {
            Ok(raw) => {
                let domains = parse_domain_list(&raw);
                if domains.is_empty() {
                    anyhow::bail!(
                        "LITMUS_RELIABLE_DOMAINS is set but contains no domains.\n\
                         Use a comma-separated list, e.g. who.int,un.org"
                    );
                }
                domains
            }
            Err(_) => default_reliable_domains(),
        };

        let model_dir = env::var("LITMUS_MODEL_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| crate::model::download::default_model_dir());

        let ner_model_dir = env::var("LITMUS_NER_MODEL_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| crate::model::download::ner_model_dir(&model_dir));

        let language = env::var("LITMUS_LANGUAGE")
            .map(|l| l.trim().to_lowercase())
            .ok()
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

        Ok(Self {
            reliable_domains,
            model_dir,
            ner_model_dir,
            language,
        })
    }

    /// Check that every artifact the pipeline loads at startup is on disk.
    /// Call this before building an `Analyzer` so the user gets one clear
    /// message instead of a load failure deep in ONNX Runtime.
    pub fn require_models(&self) -> Result<()> {
        if !crate::model::download::risk_model_files_present(&self.model_dir) {
            anyhow::bail!(
                "Risk model artifacts not found in {}\n\
                 Expected vectorizer.json and classifier.onnx exported from the training pipeline.\n\
                 Set LITMUS_MODEL_DIR to the directory that holds them.",
                self.model_dir.display()
            );
        }
        if !crate::model::download::ner_files_present(&self.ner_model_dir) {
            anyhow::bail!(
                "NER model files not found in {}\n\
                 Run `litmus download-model` to download them.",
                self.ner_model_dir.display()
            );
        }
        Ok(())
    }
}

fn default_reliable_domains() -> HashSet<String> {
    DEFAULT_RELIABLE_DOMAINS.iter().map(|d| d.to_string()).collect()
}

/// Split a comma-separated domain list, dropping blanks.
/// Entries are compared verbatim against URL hosts, so only whitespace is trimmed.
pub fn parse_domain_list(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_domain_list_trims_and_skips_blanks() {
        let domains = parse_domain_list(" who.int, ,un.org,,");
        assert_eq!(domains.len(), 2);
        assert!(domains.contains("who.int"));
        assert!(domains.contains("un.org"));
    }

    #[test]
    fn test_parse_domain_list_empty() {
        assert!(parse_domain_list(" , ").is_empty());
    }

    #[test]
    fn test_default_domains() {
        let domains = default_reliable_domains();
        assert_eq!(domains.len(), 4);
        assert!(domains.contains("reliefweb.int"));
    }
}
