//! Otoro core library: HDBSCAN clustering over dense feature matrices.
//!
//! The pipeline builds a mutual-reachability graph from pairwise distances
//! and per-point core distances, spans it with Prim's algorithm, replays the
//! sorted spanning edges into a single-linkage dendrogram, condenses the
//! dendrogram against a minimum cluster size, and selects the clusters that
//! maximise total stability. Points outside every selected cluster receive
//! the reserved [`NOISE`] label.

mod builder;
mod distance;
mod error;
mod hierarchy;
mod labels;
mod matrix;
mod memory;
mod mst;
mod otoro;
mod pipeline;
mod reachability;

pub use crate::{
    builder::{Algorithm, OtoroBuilder},
    distance::{
        DistanceError, Metric, Result as DistanceResult, VectorKind, chebyshev_distance,
        cosine_distance, euclidean_distance, manhattan_distance, minkowski_distance,
    },
    error::{OtoroError, OtoroErrorCode, Result},
    labels::{ClusterLabels, NOISE},
    matrix::{FeatureMatrix, MatrixError},
    memory::{estimate_peak_bytes, format_bytes},
    otoro::Otoro,
};

#[cfg(test)]
pub(crate) mod test_utils;
