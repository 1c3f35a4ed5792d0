pub mod annotate;
pub mod config;
pub mod error;
pub mod layout;
pub mod model;
pub mod parsing;
pub mod recognition;
pub mod session;
pub mod source;
pub mod table;

use config::PipelineConfig;
use model::{Fragment, Line};
use parsing::{ParsedRow, SkippedLine};
use serde::Serialize;

/// Counters for one recognition pass. Nothing here is an error; these are
/// the fragments and lines the pipeline absorbed on the way.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PassStats {
    pub fragments_received: usize,
    pub fragments_kept: usize,
    pub lines: usize,
    pub rows: usize,
    /// Rows whose points token is not plain digits (kept verbatim).
    pub non_numeric_values: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped_lines: Vec<SkippedLine>,
}

/// Everything one pass produced, before rows are numbered.
#[derive(Debug, Clone)]
pub struct PassOutput {
    pub lines: Vec<Line>,
    pub rows: Vec<ParsedRow>,
    pub stats: PassStats,
}

/// Main API entry point: turn one image's fragments into score rows.
///
/// Filters low-confidence fragments, groups the rest into lines, orders
/// them, and parses every line that carries the score marker. Pure; the
/// caller decides where the rows go.
pub fn extract_rows(fragments: Vec<Fragment>, config: &PipelineConfig) -> PassOutput {
    let fragments_received = fragments.len();
    let lines = layout::reconstruct_lines(fragments, config);
    let parsed = parsing::parse_lines(&lines, config);

    let stats = PassStats {
        fragments_received,
        fragments_kept: lines.iter().map(|l| l.fragments.len()).sum(),
        lines: lines.len(),
        rows: parsed.rows.len(),
        non_numeric_values: parsed.rows.iter().filter(|r| !r.has_numeric_value()).count(),
        skipped_lines: parsed.skipped,
    };

    PassOutput {
        lines,
        rows: parsed.rows,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::test_support::{frag, frag_conf};

    #[test]
    fn test_extract_rows_stats() {
        let out = extract_rows(
            vec![
                frag("Alice", 10.0, 100.0),
                frag("1,234", 150.0, 100.0),
                frag("pts", 300.0, 100.0),
                frag("Carol", 10.0, 160.0),
                frag("9O0", 150.0, 160.0),
                frag("pts", 300.0, 160.0),
                frag("Menu", 10.0, 20.0),
                frag_conf("#", 500.0, 100.0, 0.1),
            ],
            &PipelineConfig::default(),
        );

        assert_eq!(out.stats.fragments_received, 8);
        assert_eq!(out.stats.fragments_kept, 7);
        assert_eq!(out.stats.lines, 3);
        assert_eq!(out.stats.rows, 2);
        assert_eq!(out.stats.non_numeric_values, 1);
        assert_eq!(out.stats.skipped_lines.len(), 1);
        assert_eq!(out.rows[0].value, "1234");
        assert_eq!(out.rows[1].value, "9O0");
    }
}
