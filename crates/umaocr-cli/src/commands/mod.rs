pub mod config;
pub mod lines;
pub mod scan;

use std::path::Path;
use umaocr_core::config::{load_config, PipelineConfig};
use umaocr_core::error::UmaError;
use umaocr_core::model::Fragment;
use umaocr_core::recognition::{parse_fragments_json, RecognitionEngine};
use umaocr_core::source::{FileImageSource, ImageSource};

/// Load the config file if given, otherwise the built-in defaults.
pub fn effective_config(path: Option<&Path>) -> Result<PipelineConfig, UmaError> {
    match path {
        Some(p) => load_config(p),
        None => Ok(PipelineConfig::default()),
    }
}

/// Fragment JSON files skip recognition entirely.
pub fn is_fragment_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

/// Recognize one input without touching any session.
pub fn fragments_for(path: &Path, engine: &dyn RecognitionEngine) -> Result<Vec<Fragment>, UmaError> {
    if is_fragment_file(path) {
        let bytes = std::fs::read(path)?;
        return parse_fragments_json(&bytes);
    }

    match FileImageSource::new(path).acquire()? {
        Some(image) => engine.recognize(&image),
        None => Err(UmaError::NoInput),
    }
}
