// Litmus: misinformation risk assessment for short text claims
//
// This is the library root. Each module corresponds to one stage of the
// analysis pipeline or to the ambient plumbing around it.

pub mod config;
pub mod credibility;
pub mod error;
pub mod features;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod scoring;
pub mod status;
