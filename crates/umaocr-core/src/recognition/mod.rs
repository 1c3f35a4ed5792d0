pub mod tesseract;

use crate::error::UmaError;
use crate::model::Fragment;

/// Trait for text recognition backends.
///
/// Fragments come back in whatever order the backend produces them; the
/// layout stage makes no assumption about it.
pub trait RecognitionEngine: Send + Sync {
    /// Recognize text spans in an encoded image (PNG, JPEG, ...).
    fn recognize(&self, image: &[u8]) -> Result<Vec<Fragment>, UmaError>;

    /// Name of this recognition backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Read pre-recognized fragments from JSON (`[{"box": ..., "text": ..., "confidence": ...}]`).
pub fn parse_fragments_json(json: &[u8]) -> Result<Vec<Fragment>, UmaError> {
    Ok(serde_json::from_slice(json)?)
}
