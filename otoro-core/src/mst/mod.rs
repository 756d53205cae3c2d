//! Minimum spanning tree construction over mutual-reachability weights.
//!
//! Two Prim variants feed the hierarchy stage. The dense variant walks a
//! fully materialised mutual-reachability matrix; the on-demand variant
//! recomputes distances from the features as it goes, trading work for the
//! O(N²) matrix. Both emit exactly N−1 edges whose `source` values chain into
//! a path, and both pick the first minimum on ties so repeated runs are
//! byte-identical.

use crate::distance::{DistanceError, Metric};
use crate::matrix::FeatureMatrix;
use crate::reachability::SquareMatrix;

/// A single MST edge weighted by mutual reachability.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct MstEdge {
    source: usize,
    target: usize,
    weight: f64,
}

impl MstEdge {
    pub(crate) const fn new(source: usize, target: usize, weight: f64) -> Self {
        Self {
            source,
            target,
            weight,
        }
    }

    /// Returns the endpoint already inside the tree when the edge was taken.
    pub(crate) const fn source(&self) -> usize {
        self.source
    }

    /// Returns the endpoint the edge brought into the tree.
    pub(crate) const fn target(&self) -> usize {
        self.target
    }

    /// Returns the mutual-reachability weight.
    pub(crate) const fn weight(&self) -> f64 {
        self.weight
    }
}

/// Sorts edges by non-decreasing weight, preserving emission order on ties.
pub(crate) fn sort_edges_by_weight(edges: &mut [MstEdge]) {
    edges.sort_by(|a, b| a.weight.total_cmp(&b.weight));
}

/// Prim's algorithm over a dense mutual-reachability matrix.
///
/// Tracks the not-yet-attached nodes in `labels` with a parallel vector of
/// best known attachment distances; each round drops the newly attached node
/// from both, lowers the remaining distances through the new node's row, and
/// attaches the closest remaining node.
pub(crate) fn prim_from_matrix(reachability: &SquareMatrix) -> Vec<MstEdge> {
    let order = reachability.order();
    let mut edges = Vec::with_capacity(order.saturating_sub(1));
    if order < 2 {
        return edges;
    }

    let mut current = 0_usize;
    let mut labels: Vec<usize> = (0..order).collect();
    let mut dists: Vec<f64> = vec![f64::INFINITY; order];

    for _ in 1..order {
        let mut kept_labels = Vec::with_capacity(labels.len() - 1);
        let mut kept_dists = Vec::with_capacity(labels.len() - 1);
        let mut best: Option<usize> = None;

        for (&label, &dist) in labels.iter().zip(dists.iter()) {
            if label == current {
                continue;
            }
            let through_current = reachability.get(current, label);
            let lowered = if through_current < dist {
                through_current
            } else {
                dist
            };
            let slot = kept_dists.len();
            kept_labels.push(label);
            kept_dists.push(lowered);
            match best {
                Some(b) if kept_dists[b] <= lowered => {}
                _ => best = Some(slot),
            }
        }

        let Some(chosen) = best else {
            break;
        };
        edges.push(MstEdge::new(current, kept_labels[chosen], kept_dists[chosen]));
        current = kept_labels[chosen];
        labels = kept_labels;
        dists = kept_dists;
    }

    edges
}

/// Prim's algorithm computing mutual reachability on demand.
///
/// Takes the raw features, precomputed (unscaled) core distances, and the
/// edge-weight scaler α. Candidate weights are
/// `max(core[current], core[j], metric(current, j) / α)`; an attachment
/// distance only moves down.
pub(crate) fn prim_on_demand(
    matrix: &FeatureMatrix,
    metric: &Metric,
    core: &[f64],
    alpha: f64,
) -> Result<Vec<MstEdge>, DistanceError> {
    let order = matrix.rows();
    let mut edges = Vec::with_capacity(order.saturating_sub(1));
    if order < 2 {
        return Ok(edges);
    }

    let mut current = 0_usize;
    let mut in_tree = vec![false; order];
    let mut dists: Vec<f64> = vec![f64::INFINITY; order];

    for _ in 1..order {
        in_tree[current] = true;
        let anchor = matrix.row(current);
        let current_core = core[current];
        let mut best: Option<usize> = None;

        for j in 0..order {
            if in_tree[j] {
                continue;
            }
            let scaled = metric.distance(anchor, matrix.row(j))? / alpha;
            let reach = scaled.max(current_core).max(core[j]);
            if reach < dists[j] {
                dists[j] = reach;
            }
            match best {
                Some(b) if dists[b] <= dists[j] => {}
                _ => best = Some(j),
            }
        }

        let Some(next) = best else {
            break;
        };
        edges.push(MstEdge::new(current, next, dists[next]));
        current = next;
    }

    Ok(edges)
}

#[cfg(test)]
mod property;
