//! Hierarchy extraction from the mutual-reachability minimum spanning tree.
//!
//! This module implements the back half of the pipeline: the MST edges,
//! sorted by weight, are replayed into a single-linkage dendrogram, the
//! dendrogram is condensed against `min_cluster_size`, clusters are scored
//! by stability and selected for maximum total stability, and every point is
//! mapped to its selected cluster or to noise.
//!
//! The whole stage is sequential and deterministic; it is dominated by the
//! distance and MST work upstream.

mod condense;
mod labeling;
mod single_linkage;
mod stability;
mod union_find;

use tracing::debug;

use crate::labels::NOISE;
use crate::mst::MstEdge;

use self::condense::condense_tree;
use self::labeling::assign_labels;
use self::single_linkage::label_dendrogram;
use self::stability::{compute_stability, select_clusters};

/// Extracts flat cluster labels from weight-sorted MST edges.
///
/// The edges must be sorted by non-decreasing weight and span `num_points`
/// points. Labels are dense integers starting at zero, with [`NOISE`] for
/// points outside every selected cluster.
pub(crate) fn extract_labels(
    num_points: usize,
    sorted_edges: &[MstEdge],
    min_cluster_size: usize,
) -> Vec<i64> {
    if num_points < 2 {
        return vec![NOISE; num_points];
    }

    let dendrogram = label_dendrogram(num_points, sorted_edges);
    let tree = condense_tree(&dendrogram, num_points, min_cluster_size);
    debug!(
        rows = tree.rows.len(),
        clusters = tree.cluster_count,
        "dendrogram condensed"
    );

    let mut stability = compute_stability(&tree);
    let selected = select_clusters(&tree, &mut stability);
    debug!(selected = selected.len(), "clusters selected");

    assign_labels(&tree, &selected)
}
