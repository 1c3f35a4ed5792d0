use crate::model::Line;

/// Sort lines top-to-bottom by key and each line's fragments left-to-right.
///
/// Both sorts are stable, so ties keep arrival order.
pub fn order_lines(mut lines: Vec<Line>) -> Vec<Line> {
    lines.sort_by(|a, b| a.key.total_cmp(&b.key));
    for line in &mut lines {
        line.fragments
            .sort_by(|a, b| a.bbox.left().total_cmp(&b.bbox.left()));
    }
    lines
}
