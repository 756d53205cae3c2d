//! End-to-end fit pipeline.
//!
//! Orchestrates the stages shared by every backend: mutual-reachability
//! construction, Prim's MST, the weight sort, and hierarchy extraction. The
//! intermediate matrices live only inside this function; once it returns,
//! nothing but the labels survives.

use tracing::{debug, instrument};

use crate::error::{OtoroError, Result};
use crate::hierarchy;
use crate::labels::{ClusterLabels, NOISE};
use crate::matrix::FeatureMatrix;
use crate::memory::estimate_peak_bytes;
use crate::mst::{prim_from_matrix, prim_on_demand, sort_edges_by_weight};
use crate::otoro::Params;
use crate::reachability::{
    core_distances, core_distances_on_demand, into_mutual_reachability, pairwise_distances,
};

use crate::builder::Algorithm;

/// Runs the full pipeline over `matrix`.
///
/// # Errors
/// Returns a `Resource`-coded error when the pre-flight estimate exceeds the
/// address space and an `InvalidParameter`-coded error when the metric fails
/// on the data (cosine over a zero row).
#[instrument(
    name = "core.pipeline",
    err,
    skip(matrix, params),
    fields(
        points = matrix.rows(),
        min_pts = %params.min_pts,
        min_cluster_size = %params.min_cluster_size,
        alpha = params.alpha,
        algorithm = ?params.algorithm,
    ),
)]
pub(crate) fn run(matrix: &FeatureMatrix, params: &Params) -> Result<ClusterLabels> {
    let points = matrix.rows();
    if points < 2 {
        return Ok(ClusterLabels::from_labels(vec![NOISE; points]));
    }

    let required = estimate_peak_bytes(points, params.algorithm);
    match required {
        Some(bytes) if bytes <= isize::MAX as u64 => {}
        _ => {
            return Err(OtoroError::DatasetTooLarge {
                points,
                required_bytes: required.unwrap_or(u64::MAX),
            });
        }
    }

    let mut edges = match params.algorithm {
        Algorithm::Generic => {
            let distances = pairwise_distances(matrix, &params.metric)?;
            let core = core_distances(&distances, params.min_pts.get());
            let reachability = into_mutual_reachability(distances, &core, params.alpha);
            debug!("mutual reachability materialised");
            prim_from_matrix(&reachability)
        }
        Algorithm::PrimsIndexed => {
            let core = core_distances_on_demand(
                matrix,
                &params.metric,
                params.min_pts.get(),
                params.leaf_size.get(),
            )?;
            debug!("core distances computed on demand");
            prim_on_demand(matrix, &params.metric, &core, params.alpha)?
        }
    };
    debug!(edges = edges.len(), "spanning tree built");

    sort_edges_by_weight(&mut edges);
    let labels = hierarchy::extract_labels(points, &edges, params.min_cluster_size.get());
    Ok(ClusterLabels::from_labels(labels))
}
