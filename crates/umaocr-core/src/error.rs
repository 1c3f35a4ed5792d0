use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum UmaError {
    #[error("no image available to process")]
    NoInput,

    #[error("tesseract not found. Install it (apt install tesseract-ocr, brew install tesseract) or set TESSERACT_PATH")]
    TesseractNotFound,

    #[error("tesseract failed with exit code {code}: {stderr}")]
    RecognitionFailed { code: i32, stderr: String },

    #[error("text recognition did not finish within {secs}s")]
    RecognitionTimeout { secs: u64 },

    #[error("text recognition failed: {0}")]
    Recognition(String),

    #[error("failed to load config from {path}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("invalid config: {0}")]
    ConfigInvalid(String),

    #[error("another recognition pass is still running")]
    PassInFlight,

    #[error("unknown column '{0}'. Expected one of: no, name, points")]
    UnknownColumn(String),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
