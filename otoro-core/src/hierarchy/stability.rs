//! Cluster stability scoring and selection over the condensed tree.
//!
//! A cluster's stability is the excess of mass it accumulates between its
//! birth λ (the λ at which it split off its parent) and the λ at which each
//! of its members departs: Σ (λ − λ_birth) × size over its rows. Selection
//! walks the non-root clusters deepest-first, keeping a cluster when it is
//! at least as stable as its children combined and otherwise propagating the
//! children's aggregate upward. The root is never a candidate, so an
//! all-noise outcome stays representable.

use std::collections::VecDeque;

use super::condense::CondensedTree;

/// Computes per-cluster stability, indexed by `cluster_id - num_points`.
pub(crate) fn compute_stability(tree: &CondensedTree) -> Vec<f64> {
    let offset = tree.num_points;
    let mut births = vec![0.0_f64; tree.cluster_count];
    for row in &tree.rows {
        if row.child >= offset {
            let slot = row.child - offset;
            if births[slot] == 0.0 || row.lambda < births[slot] {
                births[slot] = row.lambda;
            }
        }
    }

    let mut stability = vec![0.0_f64; tree.cluster_count];
    for row in &tree.rows {
        let slot = row.parent - offset;
        let birth = births[slot];
        // A cluster born at infinite density has no persistence to
        // accumulate; ∞ − ∞ would otherwise poison the score with NaN.
        let persistence = if row.lambda.is_infinite() && birth.is_infinite() {
            0.0
        } else {
            row.lambda - birth
        };
        stability[slot] += persistence * row.size as f64;
    }
    stability
}

/// Child clusters of each cluster, indexed by `cluster_id - num_points`.
///
/// Only rows describing genuine cluster splits participate; single-point
/// fall-outs are not selection candidates.
fn cluster_children(tree: &CondensedTree) -> Vec<Vec<usize>> {
    let offset = tree.num_points;
    let mut children = vec![Vec::new(); tree.cluster_count];
    for row in &tree.rows {
        if row.size > 1 {
            children[row.parent - offset].push(row.child - offset);
        }
    }
    children
}

/// Selects the clusters maximising total stability.
///
/// Returns selected cluster ids in ascending order. `stability` is consumed
/// as scratch: entries are overwritten with aggregated subtree scores as the
/// scan moves rootward.
pub(crate) fn select_clusters(tree: &CondensedTree, stability: &mut [f64]) -> Vec<usize> {
    let children = cluster_children(tree);
    let mut is_cluster = vec![true; tree.cluster_count];
    if !is_cluster.is_empty() {
        is_cluster[0] = false;
    }

    // Ids were allocated in breadth-first visit order, so descending index
    // order visits every cluster before its ancestors.
    for slot in (1..tree.cluster_count).rev() {
        let subtree: f64 = children[slot].iter().map(|&child| stability[child]).sum();
        if subtree > stability[slot] {
            is_cluster[slot] = false;
            stability[slot] = subtree;
        } else {
            let mut queue: VecDeque<usize> = children[slot].iter().copied().collect();
            while let Some(descendant) = queue.pop_front() {
                is_cluster[descendant] = false;
                queue.extend(children[descendant].iter().copied());
            }
        }
    }

    (1..tree.cluster_count)
        .filter(|&slot| is_cluster[slot])
        .map(|slot| tree.num_points + slot)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::condense::CondensedRow;

    fn tree(num_points: usize, cluster_count: usize, rows: Vec<CondensedRow>) -> CondensedTree {
        CondensedTree {
            rows,
            num_points,
            cluster_count,
        }
    }

    fn row(parent: usize, child: usize, lambda: f64, size: usize) -> CondensedRow {
        CondensedRow {
            parent,
            child,
            lambda,
            size,
        }
    }

    #[test]
    fn stability_accumulates_mass_above_the_birth_lambda() {
        // Root 4 splits into 5 and 6 at λ = 0.1; points leave at λ = 1.
        let tree = tree(
            4,
            3,
            vec![
                row(4, 5, 0.1, 2),
                row(4, 6, 0.1, 2),
                row(5, 0, 1.0, 1),
                row(5, 1, 1.0, 1),
                row(6, 2, 1.0, 1),
                row(6, 3, 1.0, 1),
            ],
        );
        let stability = compute_stability(&tree);
        assert_eq!(stability[0], 0.1 * 2.0 + 0.1 * 2.0);
        assert!((stability[1] - 1.8).abs() < 1e-12);
        assert!((stability[2] - 1.8).abs() < 1e-12);
    }

    #[test]
    fn infinite_birth_contributes_zero_mass() {
        let tree = tree(
            2,
            2,
            vec![
                row(2, 3, f64::INFINITY, 2),
                row(3, 0, f64::INFINITY, 1),
                row(3, 1, f64::INFINITY, 1),
            ],
        );
        let stability = compute_stability(&tree);
        assert!(stability.iter().all(|score| score.is_finite() || *score == f64::INFINITY));
        assert_eq!(stability[1], 0.0);
    }

    #[test]
    fn leaves_win_when_their_combined_stability_dominates() {
        let tree = tree(
            4,
            3,
            vec![
                row(4, 5, 0.1, 2),
                row(4, 6, 0.1, 2),
                row(5, 0, 1.0, 1),
                row(5, 1, 1.0, 1),
                row(6, 2, 1.0, 1),
                row(6, 3, 1.0, 1),
            ],
        );
        let mut stability = compute_stability(&tree);
        let selected = select_clusters(&tree, &mut stability);
        assert_eq!(selected, vec![5, 6]);
    }

    #[test]
    fn a_stable_parent_swallows_its_children() {
        // Parent 5 persists across a wide λ range; its children split late
        // and die almost immediately after.
        let tree = tree(
            8,
            4,
            vec![
                row(8, 9, 0.01, 8),
                row(9, 10, 10.0, 4),
                row(9, 11, 10.0, 4),
                row(10, 0, 10.1, 1),
                row(10, 1, 10.1, 1),
                row(10, 2, 10.1, 1),
                row(10, 3, 10.1, 1),
                row(11, 4, 10.1, 1),
                row(11, 5, 10.1, 1),
                row(11, 6, 10.1, 1),
                row(11, 7, 10.1, 1),
            ],
        );
        let mut stability = compute_stability(&tree);
        let selected = select_clusters(&tree, &mut stability);
        assert_eq!(selected, vec![9]);
    }

    #[test]
    fn the_root_is_never_selected() {
        let tree = tree(
            4,
            1,
            vec![
                row(4, 0, 0.5, 1),
                row(4, 1, 0.5, 1),
                row(4, 2, 0.5, 1),
                row(4, 3, 0.5, 1),
            ],
        );
        let mut stability = compute_stability(&tree);
        assert!(select_clusters(&tree, &mut stability).is_empty());
    }
}
