//! Flat label assignment from the condensed tree and the selected clusters.
//!
//! Every condensed row whose child was not selected is collapsed into its
//! parent with a disjoint set; each point's representative is then either a
//! selected cluster (mapped to a dense label) or the root (noise). Calling
//! `union(parent, child)` in row order keeps cluster ids as representatives
//! (see [`super::union_find::DisjointSet`]).

use crate::labels::NOISE;

use super::condense::CondensedTree;
use super::union_find::DisjointSet;

/// Assigns each point its selected cluster's dense label, or [`NOISE`].
///
/// `selected` must be sorted ascending; the dense label of a cluster is its
/// position in that order.
pub(crate) fn assign_labels(tree: &CondensedTree, selected: &[usize]) -> Vec<i64> {
    let offset = tree.num_points;
    let mut label_of = vec![None; tree.cluster_count];
    for (label, &cluster) in selected.iter().enumerate() {
        label_of[cluster - offset] = Some(label as i64);
    }

    let mut set = DisjointSet::new(offset + tree.cluster_count);
    for row in &tree.rows {
        let child_selected =
            row.child >= offset && label_of[row.child - offset].is_some();
        if !child_selected {
            set.union(row.parent, row.child);
        }
    }

    (0..tree.num_points)
        .map(|point| {
            let representative = set.find(point);
            if representative < offset {
                return NOISE;
            }
            label_of[representative - offset].unwrap_or(NOISE)
        })
        .collect()
}
