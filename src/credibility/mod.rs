// Source credibility: heuristic trust in a cited URL.
//
// Scores come from a static allow-list plus structural checks on the URL.
// Nothing is fetched: reputation lookups against external services are not
// part of this module.

pub mod scorer;
