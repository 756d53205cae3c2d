//! Clustering model facade.
//!
//! [`Otoro`] owns the feature matrix and the validated hyperparameters, and
//! caches the labeling produced by the first successful [`Otoro::fit`]. The
//! fitted state sits behind one coarse mutex: a concurrent second `fit`
//! blocks until the first completes and then observes its result, and the
//! accessors publish the labels and the fitted flag as a single value.

use std::num::NonZeroUsize;
use std::sync::Mutex;

use tracing::{info, instrument};

use crate::builder::Algorithm;
use crate::distance::Metric;
use crate::error::{OtoroError, Result};
use crate::labels::ClusterLabels;
use crate::matrix::FeatureMatrix;
use crate::pipeline;

/// Validated hyperparameters for a model.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Params {
    pub(crate) min_pts: NonZeroUsize,
    pub(crate) min_cluster_size: NonZeroUsize,
    pub(crate) alpha: f64,
    pub(crate) algorithm: Algorithm,
    pub(crate) leaf_size: NonZeroUsize,
    pub(crate) metric: Metric,
}

/// An HDBSCAN clustering model over one feature matrix.
///
/// # Examples
/// ```
/// use otoro_core::{FeatureMatrix, NOISE, OtoroBuilder};
///
/// let matrix = FeatureMatrix::from_rows(vec![
///     vec![0.0, 0.0],
///     vec![0.0, 0.1],
///     vec![0.1, 0.0],
///     vec![9.0, 9.0],
///     vec![9.0, 9.1],
///     vec![9.1, 9.0],
/// ])?;
/// let model = OtoroBuilder::new()
///     .with_min_pts(2)
///     .with_min_cluster_size(3)
///     .build(matrix)?;
/// model.fit()?;
/// let labels = model.labels()?;
/// assert_eq!(labels.len(), 6);
/// assert_eq!(model.num_clusters()?, 2);
/// assert_eq!(model.num_noise()?, 0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Otoro {
    params: Params,
    matrix: FeatureMatrix,
    fitted: Mutex<Option<ClusterLabels>>,
}

impl Otoro {
    pub(crate) fn new(params: Params, matrix: FeatureMatrix) -> Self {
        Self {
            params,
            matrix,
            fitted: Mutex::new(None),
        }
    }

    /// Runs the clustering pipeline, caching the result on success.
    ///
    /// A fitted model is never re-fitted: subsequent calls (from any thread)
    /// return immediately with the cached labeling intact.
    ///
    /// # Errors
    /// Returns a `Resource`-coded error when the dataset cannot fit the
    /// address space or an earlier fit panicked, and an
    /// `InvalidParameter`-coded error when the metric rejects the data.
    #[instrument(name = "otoro.fit", err, skip(self), fields(points = self.matrix.rows()))]
    pub fn fit(&self) -> Result<&Self> {
        let mut slot = self.fitted.lock().map_err(|_| OtoroError::LockPoisoned)?;
        if slot.is_none() {
            let outcome = pipeline::run(&self.matrix, &self.params)?;
            info!(
                clusters = outcome.cluster_count(),
                noise = outcome.noise_count(),
                "fit completed"
            );
            *slot = Some(outcome);
        }
        Ok(self)
    }

    fn with_fitted<T>(&self, read: impl FnOnce(&ClusterLabels) -> T) -> Result<T> {
        let slot = self.fitted.lock().map_err(|_| OtoroError::LockPoisoned)?;
        slot.as_ref().map(read).ok_or(OtoroError::NotFitted)
    }

    /// Returns a copy of the per-point labels.
    ///
    /// # Errors
    /// Returns [`OtoroError::NotFitted`] before a successful [`Self::fit`].
    pub fn labels(&self) -> Result<Vec<i64>> {
        self.with_fitted(|fitted| fitted.labels().to_vec())
    }

    /// Returns the number of distinct non-noise labels.
    ///
    /// # Errors
    /// Returns [`OtoroError::NotFitted`] before a successful [`Self::fit`].
    pub fn num_clusters(&self) -> Result<usize> {
        self.with_fitted(ClusterLabels::cluster_count)
    }

    /// Returns how many points were labeled noise.
    ///
    /// # Errors
    /// Returns [`OtoroError::NotFitted`] before a successful [`Self::fit`].
    pub fn num_noise(&self) -> Result<usize> {
        self.with_fitted(ClusterLabels::noise_count)
    }

    /// Returns the algorithm family name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        "HDBSCAN"
    }

    /// Returns the number of input points.
    #[must_use]
    pub const fn num_points(&self) -> usize {
        self.matrix.rows()
    }

    /// Returns the configured neighbourhood size.
    #[must_use]
    pub const fn min_pts(&self) -> NonZeroUsize {
        self.params.min_pts
    }

    /// Returns the configured minimum cluster size.
    #[must_use]
    pub const fn min_cluster_size(&self) -> NonZeroUsize {
        self.params.min_cluster_size
    }

    /// Returns the configured edge-weight scaler.
    #[must_use]
    pub const fn alpha(&self) -> f64 {
        self.params.alpha
    }

    /// Returns the configured MST backend.
    #[must_use]
    pub const fn algorithm(&self) -> Algorithm {
        self.params.algorithm
    }

    /// Returns the configured spatial-block hint.
    #[must_use]
    pub const fn leaf_size(&self) -> NonZeroUsize {
        self.params.leaf_size
    }

    /// Returns the configured metric.
    #[must_use]
    pub const fn metric(&self) -> Metric {
        self.params.metric
    }
}
