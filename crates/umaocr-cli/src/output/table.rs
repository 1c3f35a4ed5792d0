use std::path::Path;
use umaocr_core::model::Column;
use umaocr_core::session::PassSummary;
use umaocr_core::table::{Table, TableState};

pub fn print(table: &Table) {
    print!("{}", render(table));
}

/// Aligned `#  Name  Points` table, one line per record.
pub fn render(table: &Table) -> String {
    if table.state() == TableState::Empty {
        return "(no rows)\n".to_string();
    }

    let no_width = table
        .records()
        .iter()
        .map(|r| r.seq.to_string().len())
        .max()
        .unwrap_or(1)
        .max(Column::No.label().len());
    let name_width = table
        .records()
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(Column::Name.label().len());

    let mut out = format!(
        "{:>nw$}  {:<mw$}  {}\n",
        Column::No.label(),
        Column::Name.label(),
        Column::Points.label(),
        nw = no_width,
        mw = name_width
    );
    out.push_str(&"-".repeat(no_width + name_width + 4 + 10));
    out.push('\n');

    for r in table.records() {
        out.push_str(&format!(
            "{:>nw$}  {:<mw$}  {:>10}\n",
            r.seq,
            r.name,
            r.value,
            nw = no_width,
            mw = name_width
        ));
    }
    out
}

pub fn print_stats(input: &Path, summary: &PassSummary) {
    let stats = &summary.stats;
    eprintln!(
        "pass {} ({}): {} fragment(s), {} kept, {} line(s), {} row(s)",
        summary.pass_number,
        input.display(),
        stats.fragments_received,
        stats.fragments_kept,
        stats.lines,
        stats.rows
    );
    if stats.non_numeric_values > 0 {
        eprintln!("  {} row(s) with non-numeric points", stats.non_numeric_values);
    }
    for skipped in &stats.skipped_lines {
        eprintln!("  skipped ({:?}): {}", skipped.reason, skipped.text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty_table() {
        assert_eq!(render(&Table::new()), "(no rows)\n");
    }

    #[test]
    fn test_render_aligns_columns() {
        let mut table = Table::new();
        table.append("Special Week", "15200");
        table.append("Bob", "980");

        let text = render(&table);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("#  Name"));
        assert!(lines[1].chars().all(|c| c == '-'));
        assert_eq!(lines[2], "1  Special Week       15200");
        assert_eq!(lines[3], "2  Bob                  980");
    }
}
