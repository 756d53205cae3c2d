//! Builder for configuring [`Otoro`] models.
//!
//! Every hyperparameter is validated in [`OtoroBuilder::build`], before any
//! work begins; a constructed model can only fail at fit time for resource
//! reasons or data-dependent metric failures.

use std::num::NonZeroUsize;

use crate::distance::Metric;
use crate::error::{OtoroError, Result};
use crate::matrix::FeatureMatrix;
use crate::otoro::{Otoro, Params};

/// Selects how the mutual-reachability MST is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Algorithm {
    /// Materialise the full N×N mutual-reachability matrix and run Prim's
    /// algorithm over it.
    Generic,
    /// Run Prim's algorithm computing mutual reachability on demand from the
    /// features; memory stays linear in N.
    PrimsIndexed,
}

const DEFAULT_MIN_PTS: usize = 5;
const DEFAULT_MIN_CLUSTER_SIZE: usize = 5;
const DEFAULT_ALPHA: f64 = 1.0;
const DEFAULT_LEAF_SIZE: usize = 40;

/// Configures and constructs [`Otoro`] instances.
///
/// # Examples
/// ```
/// use otoro_core::{Algorithm, FeatureMatrix, Metric, OtoroBuilder};
///
/// let matrix = FeatureMatrix::from_rows(vec![vec![0.0], vec![1.0], vec![9.0]])?;
/// let model = OtoroBuilder::new()
///     .with_min_pts(2)
///     .with_min_cluster_size(2)
///     .with_metric(Metric::Manhattan)
///     .with_algorithm(Algorithm::Generic)
///     .build(matrix)?;
/// assert_eq!(model.min_pts().get(), 2);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct OtoroBuilder {
    min_pts: usize,
    min_cluster_size: usize,
    alpha: f64,
    algorithm: Algorithm,
    leaf_size: usize,
    metric: Metric,
}

impl Default for OtoroBuilder {
    fn default() -> Self {
        Self {
            min_pts: DEFAULT_MIN_PTS,
            min_cluster_size: DEFAULT_MIN_CLUSTER_SIZE,
            alpha: DEFAULT_ALPHA,
            algorithm: Algorithm::Generic,
            leaf_size: DEFAULT_LEAF_SIZE,
            metric: Metric::Euclidean,
        }
    }
}

impl OtoroBuilder {
    /// Creates a builder populated with the default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the neighbourhood size used for core distances.
    #[must_use]
    pub const fn with_min_pts(mut self, min_pts: usize) -> Self {
        self.min_pts = min_pts;
        self
    }

    /// Overrides the smallest population a cluster may keep.
    #[must_use]
    pub const fn with_min_cluster_size(mut self, min_cluster_size: usize) -> Self {
        self.min_cluster_size = min_cluster_size;
        self
    }

    /// Overrides the edge-weight scaler; larger α merges less conservatively.
    #[must_use]
    pub const fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Overrides the MST backend.
    #[must_use]
    pub const fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Overrides the block-size hint used by the on-demand backend.
    #[must_use]
    pub const fn with_leaf_size(mut self, leaf_size: usize) -> Self {
        self.leaf_size = leaf_size;
        self
    }

    /// Overrides the pairwise metric.
    #[must_use]
    pub const fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    /// Validates the configuration and constructs a model over `matrix`.
    ///
    /// # Errors
    /// Returns an [`OtoroError`] with code
    /// [`crate::OtoroErrorCode::InvalidParameter`] when any option is out of
    /// range or the backend cannot serve the metric.
    pub fn build(self, matrix: FeatureMatrix) -> Result<Otoro> {
        let min_pts = NonZeroUsize::new(self.min_pts)
            .ok_or(OtoroError::InvalidMinPoints { got: self.min_pts })?;
        let min_cluster_size = match NonZeroUsize::new(self.min_cluster_size) {
            Some(size) if size.get() >= 2 => size,
            _ => {
                return Err(OtoroError::InvalidMinClusterSize {
                    got: self.min_cluster_size,
                });
            }
        };
        if !self.alpha.is_finite() || self.alpha <= 0.0 {
            return Err(OtoroError::InvalidAlpha { got: self.alpha });
        }
        let leaf_size = NonZeroUsize::new(self.leaf_size)
            .ok_or(OtoroError::InvalidLeafSize { got: self.leaf_size })?;
        if let Metric::Minkowski { p } = self.metric {
            if !p.is_finite() || p < 1.0 {
                return Err(OtoroError::InvalidMinkowskiExponent { got: p });
            }
        }
        if self.algorithm == Algorithm::PrimsIndexed && !self.metric.supports_indexing() {
            return Err(OtoroError::MetricUnsupportedByIndex {
                algorithm: self.algorithm,
                metric: self.metric,
            });
        }

        Ok(Otoro::new(
            Params {
                min_pts,
                min_cluster_size,
                alpha: self.alpha,
                algorithm: self.algorithm,
                leaf_size,
                metric: self.metric,
            },
            matrix,
        ))
    }
}
