//! Shared helpers for the unit and property suites.

use crate::distance::Metric;
use crate::matrix::FeatureMatrix;
use crate::mst::{MstEdge, prim_from_matrix, sort_edges_by_weight};
use crate::reachability::{core_distances, into_mutual_reachability, pairwise_distances};

/// Builds a matrix from fixed-size 2-d points.
pub(crate) fn points_matrix(points: &[[f64; 2]]) -> FeatureMatrix {
    FeatureMatrix::from_rows(points.iter().map(|p| p.to_vec()).collect())
        .expect("literal points are rectangular and finite")
}

/// Runs the front half of the pipeline: Euclidean mutual-reachability MST
/// edges, sorted by weight.
pub(crate) fn sorted_reachability_edges(
    matrix: &FeatureMatrix,
    min_pts: usize,
    alpha: f64,
) -> Vec<MstEdge> {
    let distances =
        pairwise_distances(matrix, &Metric::Euclidean).expect("euclidean cannot fail");
    let core = core_distances(&distances, min_pts);
    let reachability = into_mutual_reachability(distances, &core, alpha);
    let mut edges = prim_from_matrix(&reachability);
    sort_edges_by_weight(&mut edges);
    edges
}

/// Three tight, well-separated blobs of three points each.
pub(crate) fn three_blobs() -> FeatureMatrix {
    points_matrix(&[
        [0.0, 0.0],
        [0.0, 1.0],
        [1.0, 0.0],
        [10.0, 10.0],
        [10.0, 11.0],
        [11.0, 10.0],
        [-10.0, -10.0],
        [-10.0, -11.0],
        [-11.0, -10.0],
    ])
}
