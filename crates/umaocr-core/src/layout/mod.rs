//! Rebuilds visual text rows from unordered recognizer output.
//!
//! A pass runs [`filter_fragments`], then [`cluster_lines`], then
//! [`order_lines`]. The result reads top-to-bottom, left-to-right.

pub mod cluster;
pub mod filter;
pub mod order;

pub use cluster::cluster_lines;
pub use filter::filter_fragments;
pub use order::order_lines;

use crate::config::PipelineConfig;
use crate::model::{Fragment, Line};

/// Filter, cluster and order fragments into display lines.
pub fn reconstruct_lines(fragments: Vec<Fragment>, config: &PipelineConfig) -> Vec<Line> {
    let kept = filter_fragments(fragments, config.confidence_threshold);
    order_lines(cluster_lines(kept, config.line_tolerance))
}
