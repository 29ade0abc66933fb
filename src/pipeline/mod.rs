// Analysis pipeline: composes extraction, prediction and credibility into
// one AnalysisResult per request.
//
// Data flows one way: text → FeatureBundle → risk score → explanation. The
// optional source URL is scored separately and only ever shows up in the
// explanation, never in the risk score.

pub mod analyze;
pub mod explain;
