use crate::model::{Fragment, Line};

/// Group fragments into lines by vertical center, in one greedy pass.
///
/// Each fragment joins the first existing line (in creation order) whose key
/// lies within `tolerance` of the fragment's vertical center; otherwise it
/// founds a new line keyed by its own center. Keys are never re-averaged, so
/// the result depends on arrival order. Lines come back in creation order.
pub fn cluster_lines(fragments: Vec<Fragment>, tolerance: f32) -> Vec<Line> {
    let mut lines: Vec<Line> = Vec::new();

    for fragment in fragments {
        let y_center = fragment.bbox.y_center();

        match lines
            .iter_mut()
            .find(|line| (line.key - y_center).abs() <= tolerance)
        {
            Some(line) => line.fragments.push(fragment),
            None => {
                tracing::trace!(key = y_center, text = %fragment.text, "new line");
                lines.push(Line {
                    key: y_center,
                    fragments: vec![fragment],
                });
            }
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::test_support::frag;

    fn texts(line: &Line) -> Vec<&str> {
        line.fragments.iter().map(|f| f.text.as_str()).collect()
    }

    #[test]
    fn test_same_row_within_tolerance() {
        let lines = cluster_lines(
            vec![
                frag("Alice", 0.0, 100.0),
                frag("1,234", 100.0, 104.0),
                frag("pts", 200.0, 96.0),
            ],
            10.0,
        );
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].key, 100.0);
        assert_eq!(texts(&lines[0]), vec!["Alice", "1,234", "pts"]);
    }

    #[test]
    fn test_tolerance_boundary_is_inclusive() {
        let lines = cluster_lines(vec![frag("a", 0.0, 100.0), frag("b", 0.0, 110.0)], 10.0);
        assert_eq!(lines.len(), 1);

        let lines = cluster_lines(vec![frag("a", 0.0, 100.0), frag("b", 0.0, 110.5)], 10.0);
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_key_is_not_recentered() {
        // 108 joins 100; 116 is within 10 of 108 but not of the key 100.
        let lines = cluster_lines(
            vec![
                frag("a", 0.0, 100.0),
                frag("b", 0.0, 108.0),
                frag("c", 0.0, 116.0),
            ],
            10.0,
        );
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].key, 100.0);
        assert_eq!(texts(&lines[0]), vec!["a", "b"]);
        assert_eq!(lines[1].key, 116.0);
    }

    #[test]
    fn test_first_matching_line_wins() {
        // 110 is within tolerance of both keys; the older line takes it.
        let lines = cluster_lines(
            vec![
                frag("top", 0.0, 100.0),
                frag("bottom", 0.0, 118.0),
                frag("middle", 0.0, 110.0),
            ],
            10.0,
        );
        assert_eq!(lines.len(), 2);
        assert_eq!(texts(&lines[0]), vec!["top", "middle"]);
        assert_eq!(texts(&lines[1]), vec!["bottom"]);
    }

    #[test]
    fn test_arrival_order_changes_membership() {
        let forward = cluster_lines(
            vec![
                frag("a", 0.0, 100.0),
                frag("b", 0.0, 108.0),
                frag("c", 0.0, 116.0),
            ],
            10.0,
        );
        let reversed = cluster_lines(
            vec![
                frag("c", 0.0, 116.0),
                frag("b", 0.0, 108.0),
                frag("a", 0.0, 100.0),
            ],
            10.0,
        );
        assert_eq!(texts(&forward[0]), vec!["a", "b"]);
        assert_eq!(texts(&reversed[0]), vec!["c", "b"]);
    }

    #[test]
    fn test_deterministic_for_fixed_order() {
        let input = vec![
            frag("x", 0.0, 10.0),
            frag("y", 0.0, 55.0),
            frag("z", 0.0, 14.0),
            frag("w", 0.0, 61.0),
        ];
        let first = cluster_lines(input.clone(), 10.0);
        let second = cluster_lines(input, 10.0);
        assert_eq!(first, second);
    }

    #[test]
    fn test_every_fragment_assigned_once() {
        let input: Vec<Fragment> = (0..25)
            .map(|i| frag(&i.to_string(), i as f32, (i * 7) as f32))
            .collect();
        let lines = cluster_lines(input, 10.0);
        let total: usize = lines.iter().map(|l| l.fragments.len()).sum();
        assert_eq!(total, 25);
    }
}
