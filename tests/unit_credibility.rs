// Credibility scorer tests through the public API.

use litmus::config::DEFAULT_RELIABLE_DOMAINS;
use litmus::credibility::scorer::{is_valid_url, CredibilityScorer};

fn scorer() -> CredibilityScorer {
    CredibilityScorer::new(DEFAULT_RELIABLE_DOMAINS)
}

#[test]
fn allow_listed_hosts_score_one_regardless_of_scheme() {
    let s = scorer();
    assert_eq!(s.score_url("https://who.int/emergencies"), 1.0);
    assert_eq!(s.score_url("http://un.org/"), 1.0);
    assert_eq!(s.score_url("https://reliefweb.int/report/sudan?page=2"), 1.0);
    assert_eq!(s.score_url("ftp://icrc.org/files"), 1.0);
}

#[test]
fn unknown_https_host_gets_bonus() {
    let score = scorer().score_url("https://example.com/article");
    assert!((score - 0.6).abs() < 1e-10, "Expected 0.6, got {score}");
}

#[test]
fn unknown_http_host_stays_at_baseline() {
    let score = scorer().score_url("http://example.com/article");
    assert!((score - 0.5).abs() < 1e-10, "Expected 0.5, got {score}");
}

#[test]
fn subdomain_of_allow_listed_host_is_not_reliable() {
    let score = scorer().score_url("https://www.who.int/news");
    assert!((score - 0.6).abs() < 1e-10, "Expected 0.6, got {score}");
}

#[test]
fn non_default_port_is_part_of_the_host_match() {
    let score = scorer().score_url("https://who.int:8443/");
    assert!((score - 0.6).abs() < 1e-10, "Expected 0.6, got {score}");
}

#[test]
fn malformed_urls_score_zero() {
    let s = scorer();
    for url in ["not a url", "", "who.int/report", "https://", "https:who.int"] {
        assert_eq!(s.score_url(url), 0.0, "Expected 0.0 for {url:?}");
        assert!(!is_valid_url(url), "{url:?} should be invalid");
    }
}

#[test]
fn valid_scores_are_in_the_known_set() {
    let s = scorer();
    for url in [
        "https://who.int",
        "https://a.example",
        "http://b.example",
        "mailto://c.example",
    ] {
        let score = s.score_url(url);
        assert!(
            [0.5, 0.6, 1.0].iter().any(|v| (score - v).abs() < 1e-10),
            "Unexpected score {score} for {url}"
        );
    }
}

#[test]
fn custom_allow_list_replaces_defaults() {
    let s = CredibilityScorer::new(["example.org"]);
    assert_eq!(s.score_url("http://example.org/page"), 1.0);
    assert!((s.score_url("https://who.int/") - 0.6).abs() < 1e-10);
}
