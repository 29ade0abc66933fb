// Language identification via whatlang's trigram detector.
//
// Codes are ISO 639-3 ("eng", "fra", ...). Empty input, input with no
// letters, or a guess below whatlang's reliability threshold yields None
// and the extractor records "unknown".

use tracing::debug;
use whatlang::Info;

use super::traits::LanguageDetector;

#[derive(Debug, Default, Clone, Copy)]
pub struct WhatlangDetector;

impl LanguageDetector for WhatlangDetector {
    fn detect(&self, text: &str) -> Option<String> {
        let info = whatlang::detect(text)?;
        debug!(
            lang = info.lang().code(),
            confidence = info.confidence(),
            reliable = info.is_reliable(),
            "Detected language"
        );
        reliable_code(&info)
    }
}

/// The language code, but only when whatlang trusts its own guess.
fn reliable_code(info: &Info) -> Option<String> {
    info.is_reliable().then(|| info.lang().code().to_string())
}
