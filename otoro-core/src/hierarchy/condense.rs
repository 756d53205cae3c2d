//! Condensation of the single-linkage dendrogram.
//!
//! Walks the dendrogram breadth-first and rewrites it against
//! `min_cluster_size`: a merge where both sides are large enough becomes a
//! genuine split into two new clusters; a merge where only one side is large
//! enough continues the parent cluster down the large side while the small
//! side's points fall out one by one; a merge where neither side qualifies
//! dissolves into fall-outs entirely. Distances are recorded as
//! λ = 1/δ, with δ = 0 mapping to λ = +∞.

use std::collections::VecDeque;

use super::single_linkage::{DendrogramRow, subtree_size};

/// One row of the condensed tree.
///
/// `child` is either a re-labeled cluster id (`>= num_points`) with
/// `size >= min_cluster_size`, or a point index with `size == 1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct CondensedRow {
    pub(crate) parent: usize,
    pub(crate) child: usize,
    pub(crate) lambda: f64,
    pub(crate) size: usize,
}

/// The condensed tree: rows plus the count of re-labeled clusters.
///
/// Cluster ids occupy the dense range `num_points..num_points +
/// cluster_count`, allocated in visit order; the root is always
/// `num_points`.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct CondensedTree {
    pub(crate) rows: Vec<CondensedRow>,
    pub(crate) num_points: usize,
    pub(crate) cluster_count: usize,
}

fn lambda_from_delta(delta: f64) -> f64 {
    if delta > 0.0 { delta.recip() } else { f64::INFINITY }
}

/// Collects `start` and every dendrogram node beneath it, breadth-first.
fn breadth_first(rows: &[DendrogramRow], num_points: usize, start: usize) -> Vec<usize> {
    let mut order = Vec::new();
    let mut queue = VecDeque::from([start]);
    while let Some(node) = queue.pop_front() {
        order.push(node);
        if node >= num_points {
            let row = &rows[node - num_points];
            queue.push_back(row.left);
            queue.push_back(row.right);
        }
    }
    order
}

/// Condenses a dendrogram over `num_points >= 2` points.
pub(crate) fn condense_tree(
    dendrogram: &[DendrogramRow],
    num_points: usize,
    min_cluster_size: usize,
) -> CondensedTree {
    let root = 2 * num_points - 2;
    let visit = breadth_first(dendrogram, num_points, root);

    let mut relabel = vec![0_usize; 2 * num_points - 1];
    relabel[root] = num_points;
    let mut next_label = num_points + 1;
    let mut ignore = vec![false; 2 * num_points - 1];
    let mut rows = Vec::new();

    for node in visit {
        if ignore[node] || node < num_points {
            continue;
        }
        let merge = &dendrogram[node - num_points];
        let lambda = lambda_from_delta(merge.delta);
        let left_count = subtree_size(dendrogram, num_points, merge.left);
        let right_count = subtree_size(dendrogram, num_points, merge.right);
        let parent = relabel[node];

        let left_big = left_count >= min_cluster_size;
        let right_big = right_count >= min_cluster_size;
        match (left_big, right_big) {
            (true, true) => {
                relabel[merge.left] = next_label;
                next_label += 1;
                rows.push(CondensedRow {
                    parent,
                    child: relabel[merge.left],
                    lambda,
                    size: left_count,
                });
                relabel[merge.right] = next_label;
                next_label += 1;
                rows.push(CondensedRow {
                    parent,
                    child: relabel[merge.right],
                    lambda,
                    size: right_count,
                });
            }
            (false, false) => {
                drop_out(dendrogram, num_points, merge.left, parent, lambda, &mut ignore, &mut rows);
                drop_out(dendrogram, num_points, merge.right, parent, lambda, &mut ignore, &mut rows);
            }
            (true, false) => {
                relabel[merge.left] = parent;
                drop_out(dendrogram, num_points, merge.right, parent, lambda, &mut ignore, &mut rows);
            }
            (false, true) => {
                relabel[merge.right] = parent;
                drop_out(dendrogram, num_points, merge.left, parent, lambda, &mut ignore, &mut rows);
            }
        }
    }

    CondensedTree {
        rows,
        num_points,
        cluster_count: next_label - num_points,
    }
}

/// Emits a fall-out row for every point beneath `node` and marks the whole
/// subtree as handled.
fn drop_out(
    dendrogram: &[DendrogramRow],
    num_points: usize,
    node: usize,
    parent: usize,
    lambda: f64,
    ignore: &mut [bool],
    rows: &mut Vec<CondensedRow>,
) {
    for sub in breadth_first(dendrogram, num_points, node) {
        ignore[sub] = true;
        if sub < num_points {
            rows.push(CondensedRow {
                parent,
                child: sub,
                lambda,
                size: 1,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::single_linkage::label_dendrogram;
    use crate::mst::MstEdge;

    fn two_pair_dendrogram() -> Vec<DendrogramRow> {
        label_dendrogram(
            4,
            &[
                MstEdge::new(0, 1, 1.0),
                MstEdge::new(2, 3, 1.0),
                MstEdge::new(1, 2, 10.0),
            ],
        )
    }

    #[test]
    fn splits_when_both_sides_reach_the_minimum() {
        let tree = condense_tree(&two_pair_dendrogram(), 4, 2);
        // Root 4 splits into clusters 5 and 6 at λ = 1/10; each pair's points
        // then fall out of their cluster at λ = 1.
        assert_eq!(tree.cluster_count, 3);
        let splits: Vec<_> = tree.rows.iter().filter(|row| row.size > 1).collect();
        assert_eq!(splits.len(), 2);
        assert!(splits.iter().all(|row| row.parent == 4 && row.lambda == 0.1));
        let fallouts: Vec<_> = tree.rows.iter().filter(|row| row.size == 1).collect();
        assert_eq!(fallouts.len(), 4);
        assert!(fallouts.iter().all(|row| row.lambda == 1.0));
    }

    #[test]
    fn dissolves_when_neither_side_reaches_the_minimum() {
        let tree = condense_tree(&two_pair_dendrogram(), 4, 3);
        assert_eq!(tree.cluster_count, 1);
        assert_eq!(tree.rows.len(), 4);
        assert!(tree.rows.iter().all(|row| row.parent == 4 && row.size == 1));
        // Every point falls out at the top split's λ.
        assert!(tree.rows.iter().all(|row| row.lambda == 0.1));
    }

    #[test]
    fn continues_the_parent_through_the_large_side() {
        // Points 0-3 tight, point 4 loose: the top merge sheds one point.
        let dendrogram = label_dendrogram(
            5,
            &[
                MstEdge::new(0, 1, 1.0),
                MstEdge::new(1, 2, 1.0),
                MstEdge::new(2, 3, 1.0),
                MstEdge::new(3, 4, 8.0),
            ],
        );
        let tree = condense_tree(&dendrogram, 5, 3);
        // No split: the root keeps its label all the way down.
        assert_eq!(tree.cluster_count, 1);
        let loose: Vec<_> = tree.rows.iter().filter(|row| row.lambda == 0.125).collect();
        assert_eq!(loose.len(), 1);
        assert_eq!(loose[0].child, 4);
        assert_eq!(tree.rows.len(), 5);
    }

    #[test]
    fn zero_delta_merges_map_to_infinite_lambda() {
        let dendrogram = label_dendrogram(
            4,
            &[
                MstEdge::new(0, 1, 0.0),
                MstEdge::new(2, 3, 0.0),
                MstEdge::new(1, 2, 0.0),
            ],
        );
        let tree = condense_tree(&dendrogram, 4, 2);
        assert!(tree.rows.iter().all(|row| row.lambda == f64::INFINITY));
    }
}
