// URL credibility scorer.
//
// Allow-listed hosts score 1.0 outright. Any other well-formed URL starts
// from a neutral 0.5 and gains 0.1 if the raw input starts with "https".
// Malformed input (no scheme or no host) scores 0.0 and never errors.

use std::collections::HashSet;

use tracing::{debug, warn};
use url::Url;

use crate::config::Config;

/// Score for a URL whose host is on the allow-list.
pub const RELIABLE_SCORE: f64 = 1.0;
/// Starting point for any valid, non-allow-listed URL.
pub const NEUTRAL_BASELINE: f64 = 0.5;
/// Added when the raw URL text begins with "https".
pub const HTTPS_BONUS: f64 = 0.1;
/// Score for anything that doesn't parse into scheme + host.
pub const INVALID_SCORE: f64 = 0.0;

/// Scores cited source URLs against a fixed allow-list of reliable domains.
///
/// The allow-list is captured at construction and never changes, so a single
/// scorer can be shared freely across threads.
#[derive(Debug, Clone)]
pub struct CredibilityScorer {
    reliable_domains: HashSet<String>,
}

impl CredibilityScorer {
    pub fn new<I, S>(reliable_domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            reliable_domains: reliable_domains.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.reliable_domains.iter().cloned())
    }

    pub fn reliable_domains(&self) -> &HashSet<String> {
        &self.reliable_domains
    }

    /// Score the credibility of a source URL, from 0.0 to 1.0.
    pub fn score_url(&self, url: &str) -> f64 {
        let authority = match authority(url) {
            Ok(authority) => authority,
            Err(reason) => {
                warn!(url = %url, reason = %reason, "Invalid source URL, scoring as 0.0");
                return INVALID_SCORE;
            }
        };

        if self.reliable_domains.contains(&authority) {
            debug!(host = %authority, "Source host is allow-listed");
            return RELIABLE_SCORE;
        }

        let mut score = NEUTRAL_BASELINE;

        // Prefix test on the raw text, not the parsed scheme.
        if url.starts_with("https") {
            score += HTTPS_BONUS;
        }

        // Domain age and reputation lookups would slot in here.

        debug!(host = %authority, score, "Scored source URL");
        score
    }
}

/// True if the URL parses into a non-empty scheme and a non-empty host.
pub fn is_valid_url(url: &str) -> bool {
    authority(url).is_ok()
}

/// Extract the `host[:port]` authority the allow-list is matched against.
///
/// The port is only kept when it differs from the scheme's default.
fn authority(url: &str) -> Result<String, String> {
    let raw = url.trim();
    let parsed = Url::parse(raw).map_err(|e| e.to_string())?;

    if parsed.scheme().is_empty() {
        return Err("missing scheme".to_string());
    }

    // The url crate accepts "https:host" for special schemes; an authority
    // only counts when it is introduced by "//".
    let after_scheme = raw.get(parsed.scheme().len()..).unwrap_or("");
    if !after_scheme.starts_with("://") {
        return Err("missing authority".to_string());
    }

    let host = match parsed.host_str() {
        Some(h) if !h.is_empty() => h,
        _ => return Err("missing host".to_string()),
    };

    Ok(match parsed.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> CredibilityScorer {
        CredibilityScorer::new(["who.int", "un.org", "reliefweb.int", "icrc.org"])
    }

    #[test]
    fn test_authority_plain_host() {
        assert_eq!(authority("https://who.int/report").unwrap(), "who.int");
    }

    #[test]
    fn test_authority_keeps_non_default_port() {
        assert_eq!(authority("http://example.com:8080/x").unwrap(), "example.com:8080");
    }

    #[test]
    fn test_authority_drops_default_port() {
        assert_eq!(authority("https://who.int:443/").unwrap(), "who.int");
    }

    #[test]
    fn test_authority_rejects_relative() {
        assert!(authority("who.int/report").is_err());
    }

    #[test]
    fn test_authority_requires_double_slash() {
        assert!(authority("https:who.int").is_err());
        assert!(authority("mailto:someone@who.int").is_err());
    }

    #[test]
    fn test_allow_listed_short_circuits() {
        assert_eq!(scorer().score_url("http://un.org/en"), 1.0);
    }

    #[test]
    fn test_https_bonus() {
        let score = scorer().score_url("https://example.com");
        assert!((score - 0.6).abs() < 1e-10, "Expected 0.6, got {score}");
    }

    #[test]
    fn test_plain_http_is_neutral() {
        let score = scorer().score_url("http://example.com");
        assert!((score - 0.5).abs() < 1e-10, "Expected 0.5, got {score}");
    }

    #[test]
    fn test_garbage_scores_zero() {
        assert_eq!(scorer().score_url("not a url"), 0.0);
        assert_eq!(scorer().score_url(""), 0.0);
    }
}
