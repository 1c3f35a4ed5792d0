pub mod record;

pub use record::{parse_record, LineOutcome, ParsedRow, SkipReason};

use crate::config::PipelineConfig;
use crate::model::Line;
use serde::Serialize;

/// A line that produced no row, kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedLine {
    pub text: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedLines {
    pub rows: Vec<ParsedRow>,
    pub skipped: Vec<SkippedLine>,
}

/// Parse ordered lines into rows, top-to-bottom.
pub fn parse_lines(lines: &[Line], config: &PipelineConfig) -> ParsedLines {
    let mut parsed = ParsedLines::default();

    for line in lines {
        let text = line.text();
        match parse_record(&text, &config.marker, config.thousands_separator) {
            LineOutcome::Row(row) => {
                if !row.has_numeric_value() {
                    tracing::debug!(line = %text, value = %row.value, "non-numeric points kept as-is");
                }
                parsed.rows.push(row);
            }
            LineOutcome::Skipped(reason) => {
                tracing::debug!(line = %text, ?reason, "line skipped");
                parsed.skipped.push(SkippedLine { text, reason });
            }
        }
    }

    parsed
}
