// Risk scoring: classifier probability plus rule-based adjustments.

pub mod risk;
pub mod tier;
