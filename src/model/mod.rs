// Trained risk model: the frozen vectorizer + classifier pair.
//
// The RiskModel trait is the only thing the predictor sees. The default
// implementation pairs a TF-IDF vectorizer artifact with an ONNX classifier,
// both exported from the training pipeline and loaded once at startup.

pub mod classifier;
pub mod download;
pub mod traits;
pub mod trained;
pub mod vectorizer;
