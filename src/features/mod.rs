// Text feature extraction: from raw text to a FeatureBundle.
//
// Normalization, URL extraction and linguistic statistics are pure functions
// in `text` and `linguistic`. Language identification and named-entity
// recognition sit behind the traits in `traits` so the extractor can be
// built with local models in production and fixed stand-ins in tests.

pub mod entities;
pub mod extractor;
pub mod language;
pub mod linguistic;
pub mod text;
pub mod traits;
