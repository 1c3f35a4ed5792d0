use std::path::PathBuf;
use umaocr_core::error::UmaError;
use umaocr_core::extract_rows;
use umaocr_core::parsing::{parse_record, LineOutcome, SkipReason};
use umaocr_core::recognition::tesseract::TesseractEngine;

use super::{effective_config, fragments_for};

pub fn run(input: PathBuf, config_file: Option<PathBuf>) -> Result<(), UmaError> {
    let config = effective_config(config_file.as_deref())?;
    let engine = TesseractEngine::new(&config.engine);
    let fragments = fragments_for(&input, &engine)?;
    let out = extract_rows(fragments, &config);

    println!(
        "{}: {} fragment(s), {} kept, {} line(s)\n",
        input.display(),
        out.stats.fragments_received,
        out.stats.fragments_kept,
        out.stats.lines
    );

    for line in &out.lines {
        let text = line.text();
        let verdict = match parse_record(&text, &config.marker, config.thousands_separator) {
            LineOutcome::Row(row) => format!("-> {} | {}", row.name, row.value),
            LineOutcome::Skipped(SkipReason::NoMarker) => String::new(),
            LineOutcome::Skipped(SkipReason::TooFewTokens) => "(marker, but too few tokens)".into(),
        };
        let flag = if verdict.starts_with("->") { '+' } else { ' ' };
        println!("  {} y={:<8.1} {}  {}", flag, line.key, text, verdict);
    }

    Ok(())
}
