//! Property tests pitting the Prim variants against a naive oracle.

use proptest::prelude::*;

use crate::distance::Metric;
use crate::matrix::FeatureMatrix;
use crate::reachability::{
    SquareMatrix, core_distances, into_mutual_reachability, pairwise_distances,
};

use super::{prim_from_matrix, prim_on_demand};

/// Kruskal with a plain array-backed union-find, as the known-good answer.
fn oracle_mst_weight(reachability: &SquareMatrix) -> f64 {
    let order = reachability.order();
    let mut all_edges = Vec::with_capacity(order * (order - 1) / 2);
    for i in 0..order {
        for j in (i + 1)..order {
            all_edges.push((reachability.get(i, j), i, j));
        }
    }
    all_edges.sort_by(|a, b| a.0.total_cmp(&b.0));

    fn find(parent: &mut [usize], node: usize) -> usize {
        let mut current = node;
        while parent[current] != current {
            parent[current] = parent[parent[current]];
            current = parent[current];
        }
        current
    }

    let mut parent: Vec<usize> = (0..order).collect();
    let mut total = 0.0;
    let mut taken = 0;
    for (weight, i, j) in all_edges {
        let root_i = find(&mut parent, i);
        let root_j = find(&mut parent, j);
        if root_i != root_j {
            parent[root_j] = root_i;
            total += weight;
            taken += 1;
            if taken == order - 1 {
                break;
            }
        }
    }
    total
}

fn matrix_strategy() -> impl Strategy<Value = FeatureMatrix> {
    proptest::collection::vec(
        proptest::collection::vec(-50.0_f64..50.0, 2),
        2..32,
    )
    .prop_map(|rows| FeatureMatrix::from_rows(rows).expect("generated rows are rectangular"))
}

fn reachability_for(matrix: &FeatureMatrix, min_pts: usize, alpha: f64) -> (SquareMatrix, Vec<f64>) {
    let distances = pairwise_distances(matrix, &Metric::Euclidean).expect("metric cannot fail");
    let core = core_distances(&distances, min_pts);
    let reachability = into_mutual_reachability(distances, &core, alpha);
    (reachability, core)
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, ..ProptestConfig::default() })]

    #[test]
    fn prim_total_weight_matches_the_kruskal_oracle(
        matrix in matrix_strategy(),
        min_pts in 1_usize..5,
    ) {
        let (reachability, _) = reachability_for(&matrix, min_pts, 1.0);
        let edges = prim_from_matrix(&reachability);
        prop_assert_eq!(edges.len(), matrix.rows() - 1);

        let prim_weight: f64 = edges.iter().map(super::MstEdge::weight).sum();
        let oracle_weight = oracle_mst_weight(&reachability);
        let scale = oracle_weight.abs().max(1.0);
        prop_assert!(
            (prim_weight - oracle_weight).abs() <= 1e-9 * scale,
            "prim={prim_weight}, oracle={oracle_weight}"
        );
    }

    #[test]
    fn prim_variants_agree_edge_for_edge(
        matrix in matrix_strategy(),
        min_pts in 1_usize..5,
        alpha in 0.25_f64..4.0,
    ) {
        let (reachability, core) = reachability_for(&matrix, min_pts, alpha);
        let dense = prim_from_matrix(&reachability);
        let on_demand = prim_on_demand(&matrix, &Metric::Euclidean, &core, alpha)
            .expect("metric cannot fail");
        prop_assert_eq!(dense, on_demand);
    }

    #[test]
    fn prim_is_deterministic(matrix in matrix_strategy()) {
        let (reachability, _) = reachability_for(&matrix, 3, 1.0);
        let first = prim_from_matrix(&reachability);
        let second = prim_from_matrix(&reachability);
        prop_assert_eq!(first, second);
    }
}
