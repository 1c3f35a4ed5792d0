use crate::model::Fragment;

/// Keep fragments whose confidence is at least `threshold`.
///
/// Dropped fragments are not errors; they simply never reach clustering.
pub fn filter_fragments(fragments: Vec<Fragment>, threshold: f32) -> Vec<Fragment> {
    let total = fragments.len();
    let kept: Vec<Fragment> = fragments
        .into_iter()
        .filter(|f| f.confidence >= threshold)
        .collect();

    if kept.len() < total {
        tracing::debug!(
            dropped = total - kept.len(),
            threshold,
            "dropped low-confidence fragments"
        );
    }

    kept
}
