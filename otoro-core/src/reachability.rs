//! Core distances and the mutual-reachability transform.
//!
//! The pipeline's density model: each point's core distance is the distance
//! to its `min_pts`-th neighbour, and the mutual reachability between two
//! points is `max(core_i, core_j, d(i, j) / alpha)`. Pairwise distances and
//! core distances are computed row-parallel; both loops are independent per
//! row, so scheduling cannot change the output.

use rayon::prelude::*;

use crate::distance::{DistanceError, Metric};
use crate::matrix::FeatureMatrix;

/// Dense, symmetric matrix of pairwise values with a zero diagonal.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct SquareMatrix {
    data: Vec<f64>,
    order: usize,
}

impl SquareMatrix {
    fn zeroed(order: usize) -> Self {
        Self {
            data: vec![0.0; order * order],
            order,
        }
    }

    pub(crate) const fn order(&self) -> usize {
        self.order
    }

    pub(crate) fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.order + col]
    }

    #[cfg(test)]
    pub(crate) fn from_rows(rows: &[&[f64]]) -> Self {
        let order = rows.len();
        let mut data = Vec::with_capacity(order * order);
        for row in rows {
            data.extend_from_slice(row);
        }
        Self { data, order }
    }
}

/// Computes the full pairwise distance matrix under `metric`.
pub(crate) fn pairwise_distances(
    matrix: &FeatureMatrix,
    metric: &Metric,
) -> Result<SquareMatrix, DistanceError> {
    let order = matrix.rows();
    let mut distances = SquareMatrix::zeroed(order);
    if order == 0 {
        return Ok(distances);
    }
    distances
        .data
        .par_chunks_mut(order)
        .enumerate()
        .try_for_each(|(i, row)| {
            let anchor = matrix.row(i);
            for (j, slot) in row.iter_mut().enumerate() {
                if j != i {
                    *slot = metric.distance(anchor, matrix.row(j))?;
                }
            }
            Ok(())
        })?;
    Ok(distances)
}

/// Computes each point's core distance from the dense distance matrix.
///
/// The core distance of point `i` is the distance to its `min_pts`-th
/// nearest neighbour, the point itself counted first: entry
/// `min(N - 1, min_pts - 1)` of its non-decreasingly sorted row, the zero
/// self-distance included.
pub(crate) fn core_distances(distances: &SquareMatrix, min_pts: usize) -> Vec<f64> {
    let order = distances.order();
    let k = min_pts.saturating_sub(1).min(order.saturating_sub(1));
    (0..order)
        .into_par_iter()
        .map(|i| {
            let mut row: Vec<f64> = (0..order).map(|j| distances.get(i, j)).collect();
            let (_, kth, _) = row.select_nth_unstable_by(k, f64::total_cmp);
            *kth
        })
        .collect()
}

/// Computes core distances directly from the features, without the matrix.
///
/// Work is handed to Rayon in blocks of `leaf_size` rows; the result is
/// identical to [`core_distances`] over [`pairwise_distances`].
pub(crate) fn core_distances_on_demand(
    matrix: &FeatureMatrix,
    metric: &Metric,
    min_pts: usize,
    leaf_size: usize,
) -> Result<Vec<f64>, DistanceError> {
    let order = matrix.rows();
    let k = min_pts.saturating_sub(1).min(order.saturating_sub(1));
    (0..order)
        .into_par_iter()
        .with_min_len(leaf_size)
        .map(|i| {
            let anchor = matrix.row(i);
            let mut row = Vec::with_capacity(order);
            for j in 0..order {
                row.push(if j == i {
                    0.0
                } else {
                    metric.distance(anchor, matrix.row(j))?
                });
            }
            let (_, kth, _) = row.select_nth_unstable_by(k, f64::total_cmp);
            Ok(*kth)
        })
        .collect()
}

/// Transforms a distance matrix into mutual reachability, in place.
///
/// Core distances must come from the *unscaled* matrix; the α division
/// happens here, afterwards. The diagonal ends up holding `core[i]`, which
/// no consumer reads.
pub(crate) fn into_mutual_reachability(
    mut distances: SquareMatrix,
    core: &[f64],
    alpha: f64,
) -> SquareMatrix {
    let order = distances.order;
    if order == 0 {
        return distances;
    }
    if alpha != 1.0 {
        for value in &mut distances.data {
            *value /= alpha;
        }
    }
    distances
        .data
        .par_chunks_mut(order)
        .enumerate()
        .for_each(|(i, row)| {
            let core_i = core[i];
            for (j, slot) in row.iter_mut().enumerate() {
                let bound = core_i.max(core[j]);
                if *slot < bound {
                    *slot = bound;
                }
            }
        });
    distances
}
