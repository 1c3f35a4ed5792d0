use serde::Serialize;

/// A `(name, points)` pair read off one score row, before numbering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedRow {
    pub name: String,
    pub value: String,
}

impl ParsedRow {
    /// True if the points token is plain digits. Other tokens are still kept.
    pub fn has_numeric_value(&self) -> bool {
        !self.value.is_empty() && self.value.chars().all(|c| c.is_ascii_digit())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Line does not contain the score marker; incidental UI text.
    NoMarker,
    /// Line has the marker but not `name points unit`.
    TooFewTokens,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Row(ParsedRow),
    Skipped(SkipReason),
}

/// Parse a joined line such as `"Alice 1,234 pts"`.
///
/// Lines without `marker` are skipped. Candidate lines are split from the
/// right on single spaces into `name`, `points` and a trailing unit token;
/// all three must be non-empty. `separator` is stripped from `points` and the
/// result is stored as-is, numeric or not.
pub fn parse_record(line: &str, marker: &str, separator: char) -> LineOutcome {
    if !line.contains(marker) {
        return LineOutcome::Skipped(SkipReason::NoMarker);
    }

    let mut parts = line.trim().rsplitn(3, ' ');
    let (unit, points, name) = match (parts.next(), parts.next(), parts.next()) {
        (Some(unit), Some(points), Some(name)) => (unit, points, name),
        _ => return LineOutcome::Skipped(SkipReason::TooFewTokens),
    };

    let name = name.trim();
    if name.is_empty() || points.is_empty() || unit.is_empty() {
        return LineOutcome::Skipped(SkipReason::TooFewTokens);
    }

    LineOutcome::Row(ParsedRow {
        name: name.to_string(),
        value: points.replace(separator, ""),
    })
}
