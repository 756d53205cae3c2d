//! Single-linkage dendrogram construction from weight-sorted MST edges.
//!
//! The mutual-reachability MST encodes the same hierarchy as the full graph:
//! replaying its edges in non-decreasing weight order and merging components
//! reproduces the single-linkage dendrogram. Row `k` describes the merge that
//! creates internal node `N + k`; its `left`/`right` refer to earlier nodes
//! (points below `N`, merges at `N` and above).

use crate::mst::MstEdge;

use super::union_find::LinkageUnionFind;

/// One merge of the dendrogram.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct DendrogramRow {
    /// Label of the first merged component.
    pub(crate) left: usize,
    /// Label of the second merged component.
    pub(crate) right: usize,
    /// Mutual-reachability weight at which the merge happens.
    pub(crate) delta: f64,
    /// Number of points beneath the merge.
    pub(crate) size: usize,
}

/// Replays sorted edges into dendrogram rows.
///
/// The caller provides edges sorted by non-decreasing weight; the output
/// deltas inherit that order.
pub(crate) fn label_dendrogram(num_points: usize, sorted_edges: &[MstEdge]) -> Vec<DendrogramRow> {
    let mut uf = LinkageUnionFind::new(num_points);
    let mut rows = Vec::with_capacity(sorted_edges.len());
    for edge in sorted_edges {
        let left = uf.fast_find(edge.source());
        let right = uf.fast_find(edge.target());
        rows.push(DendrogramRow {
            left,
            right,
            delta: edge.weight(),
            size: uf.size(left) + uf.size(right),
        });
        uf.union(left, right);
    }
    rows
}

/// Returns the number of points beneath `node`.
pub(super) fn subtree_size(rows: &[DendrogramRow], num_points: usize, node: usize) -> usize {
    if node < num_points {
        1
    } else {
        rows[node - num_points].size
    }
}
