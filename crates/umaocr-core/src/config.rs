use crate::error::UmaError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.25;
pub const DEFAULT_LINE_TOLERANCE: f32 = 10.0;
pub const DEFAULT_MARKER: &str = "pts";
pub const DEFAULT_THOUSANDS_SEPARATOR: char = ',';
pub const DEFAULT_DISPLAY_MAX_HEIGHT: u32 = 600;

/// Tunables for one extraction pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Fragments with a lower confidence are dropped before clustering.
    pub confidence_threshold: f32,
    /// Max vertical distance (px) between a fragment center and a line key.
    pub line_tolerance: f32,
    /// Substring that marks a line as a score row.
    pub marker: String,
    pub thousands_separator: char,
    /// Annotated images taller than this are scaled down.
    pub display_max_height: u32,
    pub engine: EngineConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            line_tolerance: DEFAULT_LINE_TOLERANCE,
            marker: DEFAULT_MARKER.to_string(),
            thousands_separator: DEFAULT_THOUSANDS_SEPARATOR,
            display_max_height: DEFAULT_DISPLAY_MAX_HEIGHT,
            engine: EngineConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Path to the tesseract binary. Falls back to `TESSERACT_PATH`, then `PATH`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executable: Option<PathBuf>,
    pub language: String,
    pub page_segmentation_mode: u8,
    pub timeout_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            executable: None,
            language: "eng".to_string(),
            // Sparse text: result screens are scattered labels, not paragraphs.
            page_segmentation_mode: 11,
            timeout_secs: 60,
        }
    }
}

/// Load a config from a JSON file.
pub fn load_config(path: &Path) -> Result<PipelineConfig, UmaError> {
    let content = std::fs::read_to_string(path).map_err(|e| UmaError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_config(&content, path)
}

/// Parse a config from a JSON string.
pub fn parse_config(json: &str, source: &Path) -> Result<PipelineConfig, UmaError> {
    let config: PipelineConfig = serde_json::from_str(json).map_err(|e| UmaError::ConfigLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_config(&config)?;
    Ok(config)
}

/// Validate that a config is usable.
pub fn validate_config(config: &PipelineConfig) -> Result<(), UmaError> {
    if !(0.0..=1.0).contains(&config.confidence_threshold) {
        return Err(UmaError::ConfigInvalid(format!(
            "confidence_threshold must be within 0..=1, got {}",
            config.confidence_threshold
        )));
    }

    if !config.line_tolerance.is_finite() || config.line_tolerance < 0.0 {
        return Err(UmaError::ConfigInvalid(format!(
            "line_tolerance must be a non-negative number, got {}",
            config.line_tolerance
        )));
    }

    if config.marker.trim().is_empty() {
        return Err(UmaError::ConfigInvalid("marker must not be empty".into()));
    }

    if config.thousands_separator.is_whitespace() {
        return Err(UmaError::ConfigInvalid(
            "thousands_separator must not be whitespace".into(),
        ));
    }

    if config.display_max_height == 0 {
        return Err(UmaError::ConfigInvalid(
            "display_max_height must be greater than 0".into(),
        ));
    }

    if config.engine.timeout_secs == 0 {
        return Err(UmaError::ConfigInvalid(
            "engine.timeout_secs must be greater than 0".into(),
        ));
    }

    if config.engine.page_segmentation_mode > 13 {
        return Err(UmaError::ConfigInvalid(format!(
            "engine.page_segmentation_mode must be 0..=13, got {}",
            config.engine.page_segmentation_mode
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let cfg = PipelineConfig::default();
        assert_eq!(cfg.confidence_threshold, 0.25);
        assert_eq!(cfg.line_tolerance, 10.0);
        assert_eq!(cfg.marker, "pts");
        assert_eq!(cfg.thousands_separator, ',');
        assert_eq!(cfg.display_max_height, 600);
        assert!(validate_config(&cfg).is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let cfg = parse_config(r#"{"marker": "PT"}"#, Path::new("inline")).unwrap();
        assert_eq!(cfg.marker, "PT");
        assert_eq!(cfg.line_tolerance, DEFAULT_LINE_TOLERANCE);
        assert_eq!(cfg.engine.language, "eng");
    }

    #[test]
    fn test_rejects_threshold_out_of_range() {
        let result = parse_config(r#"{"confidence_threshold": 1.5}"#, Path::new("inline"));
        assert!(matches!(result, Err(UmaError::ConfigInvalid(_))));
    }

    #[test]
    fn test_rejects_empty_marker() {
        let cfg = PipelineConfig {
            marker: "  ".into(),
            ..PipelineConfig::default()
        };
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let result = parse_config(r#"{"engine": {"timeout_secs": 0}}"#, Path::new("inline"));
        assert!(matches!(result, Err(UmaError::ConfigInvalid(_))));
    }

    #[test]
    fn test_malformed_json_reports_path() {
        let result = parse_config("{not json", Path::new("broken.json"));
        match result {
            Err(UmaError::ConfigLoad { path, .. }) => assert_eq!(path, Path::new("broken.json")),
            other => panic!("expected ConfigLoad, got {other:?}"),
        }
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"line_tolerance": 6.5}}"#).unwrap();
        let cfg = load_config(file.path()).unwrap();
        assert_eq!(cfg.line_tolerance, 6.5);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config(Path::new("/nonexistent/umaocr.json"));
        assert!(matches!(result, Err(UmaError::ConfigLoad { .. })));
    }
}
