// Text normalization and URL extraction.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex_lite::Regex;

/// `http://` or `https://` followed by URL-safe characters or percent-encoded
/// octets. Note `$-_` is a range and covers digits, uppercase, `/:;=?` and more.
const URL_PATTERN: &str =
    r"https?://(?:[a-zA-Z]|[0-9]|[$-_@.&+]|[!*\(\),]|(?:%[0-9a-fA-F][0-9a-fA-F]))+";

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(URL_PATTERN).expect("URL pattern is a valid regex"));

/// Lowercase, strip everything that isn't a word character or whitespace,
/// then drop stop words. Tokens in the result are separated by single spaces.
pub fn clean_text(text: &str, stop_words: &HashSet<String>) -> String {
    let stripped: String = text
        .to_lowercase()
        .chars()
        .filter(|c| is_word_char(*c) || c.is_whitespace())
        .collect();

    stripped
        .split_whitespace()
        .filter(|word| !stop_words.contains(*word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// All URL substrings in `text`, in order of first occurrence.
/// Repeated URLs are kept.
pub fn extract_urls(text: &str) -> Vec<String> {
    URL_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Letters, digits (in any script) and underscore.
pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop_words() -> HashSet<String> {
        ["the", "is", "a", "and"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_clean_text_lowercases_and_strips() {
        let cleaned = clean_text("BREAKING!!! Vaccines, Cause?", &HashSet::new());
        assert_eq!(cleaned, "breaking vaccines cause");
    }

    #[test]
    fn test_clean_text_removes_stop_words() {
        let cleaned = clean_text("The cure is a lie and the truth", &stop_words());
        assert_eq!(cleaned, "cure lie truth");
    }

    #[test]
    fn test_clean_text_keeps_underscore_and_digits() {
        let cleaned = clean_text("covid_19 2020", &HashSet::new());
        assert_eq!(cleaned, "covid_19 2020");
    }

    #[test]
    fn test_clean_text_collapses_whitespace() {
        let cleaned = clean_text("  one \n\t two  ", &HashSet::new());
        assert_eq!(cleaned, "one two");
    }

    #[test]
    fn test_clean_text_keeps_non_ascii_letters() {
        let cleaned = clean_text("Médecins Sans Frontières!", &HashSet::new());
        assert_eq!(cleaned, "médecins sans frontières");
    }

    #[test]
    fn test_clean_text_punctuation_only() {
        assert_eq!(clean_text("!!! ??? ...", &HashSet::new()), "");
    }

    #[test]
    fn test_extract_urls_in_order() {
        let urls = extract_urls("see https://who.int/a then http://un.org/b");
        assert_eq!(urls, vec!["https://who.int/a", "http://un.org/b"]);
    }

    #[test]
    fn test_extract_urls_requires_scheme() {
        assert!(extract_urls("visit www.who.int or who.int today").is_empty());
    }

    #[test]
    fn test_extract_urls_stops_at_whitespace() {
        let urls = extract_urls("https://who.int/news?id=7&lang=en is the source");
        assert_eq!(urls, vec!["https://who.int/news?id=7&lang=en"]);
    }
}
