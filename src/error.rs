// Error taxonomy for the analysis pipeline.
//
// Construction-time failures (missing or unreadable artifacts) are
// ResourceError. Per-request failures inside an NLP or model capability are
// ProcessingError. The orchestrator wraps those in AnalysisError so callers
// know which stage abandoned the request. Malformed source URLs never reach
// this module: the credibility scorer absorbs them as a 0.0 score.

use std::path::PathBuf;

use thiserror::Error;

/// A model artifact or NLP resource could not be loaded at startup.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("{what} not found: {}", path.display())]
    Missing { what: &'static str, path: PathBuf },

    #[error("failed to load {what} from {}: {message}", path.display())]
    Corrupt {
        what: &'static str,
        path: PathBuf,
        message: String,
    },
}

impl ResourceError {
    pub(crate) fn corrupt(what: &'static str, path: &std::path::Path, err: impl std::fmt::Display) -> Self {
        ResourceError::Corrupt {
            what,
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}

/// A capability failed while handling a single request.
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("tokenization failed: {0}")]
    Tokenization(String),

    #[error("inference failed: {0}")]
    Inference(String),

    #[error("model output malformed: {0}")]
    MalformedOutput(String),
}

/// A request-level failure surfaced by `Analyzer::analyze`.
///
/// No partial result accompanies it: the request is abandoned.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("feature extraction failed")]
    Extraction(#[source] ProcessingError),

    #[error("risk prediction failed")]
    Prediction(#[source] ProcessingError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_names_resource_and_path() {
        let err = ResourceError::Missing {
            what: "classifier",
            path: PathBuf::from("/models/classifier.onnx"),
        };
        assert_eq!(err.to_string(), "classifier not found: /models/classifier.onnx");
    }

    #[test]
    fn test_analysis_error_keeps_source() {
        use std::error::Error as _;
        let err = AnalysisError::Prediction(ProcessingError::Inference("boom".into()));
        assert!(err.to_string().starts_with("risk prediction failed"));
        assert!(err.source().is_some());
    }
}
