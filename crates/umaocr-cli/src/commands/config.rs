use std::path::Path;
use umaocr_core::config::load_config;
use umaocr_core::error::UmaError;
use umaocr_core::recognition::tesseract::TesseractEngine;

use super::effective_config;

pub fn show(file: Option<&Path>) -> Result<(), UmaError> {
    let config = effective_config(file)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), UmaError> {
    let config = load_config(file)?;

    println!("Config '{}' is valid.", file.display());
    println!("  Confidence threshold: {}", config.confidence_threshold);
    println!("  Line tolerance:       {} px", config.line_tolerance);
    println!("  Marker:               \"{}\"", config.marker);

    let engine = TesseractEngine::new(&config.engine);
    if !engine.is_available() {
        println!("\nWarnings:");
        println!("  - tesseract could not be started; only fragment JSON inputs will work");
    }

    Ok(())
}

pub fn schema() -> Result<(), UmaError> {
    print!(
        r#"Config Schema
=============

A config file is a JSON object. Every field is optional; missing fields
take the default shown.

  confidence_threshold  (number, 0.25)  Fragments recognized with lower
                                        confidence are dropped.
  line_tolerance        (number, 10)    Max vertical distance in pixels
                                        between a fragment's center and a
                                        line to join that line.
  marker                (string, "pts") Lines containing this text are
                                        read as "name points unit".
  thousands_separator   (char, ",")     Removed from the points token.
  display_max_height    (integer, 600)  Height cap for --annotate-dir
                                        previews.
  engine                (object)        Tesseract settings:
    executable              (path)          Binary to run. Defaults to
                                            $TESSERACT_PATH, then "tesseract".
    language                (string, "eng") Tesseract language code.
    page_segmentation_mode  (integer, 11)   Tesseract --psm (0-13).
    timeout_secs            (integer, 60)   Kill recognition after this.

Example:
{{
  "confidence_threshold": 0.4,
  "line_tolerance": 8,
  "engine": {{ "language": "eng+jpn", "timeout_secs": 30 }}
}}
"#
    );
    Ok(())
}
