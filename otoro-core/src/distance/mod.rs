//! Distance primitives for the built-in numeric metrics.
//!
//! The pipeline consumes metrics through the [`Metric`] capability; the
//! per-metric kernels are exposed directly for callers that want to reuse
//! them outside the clustering pipeline. All kernels accumulate in `f64`.
//! Finiteness of the inputs is established once, when a
//! [`crate::FeatureMatrix`] is constructed, so the kernels only validate
//! dimensionality (and, for cosine, magnitude).

mod chebyshev;
mod cosine;
mod euclidean;
mod helpers;
mod manhattan;
mod minkowski;
mod types;

use core::fmt;

pub use self::chebyshev::chebyshev_distance;
pub use self::cosine::cosine_distance;
pub use self::euclidean::euclidean_distance;
pub use self::manhattan::manhattan_distance;
pub use self::minkowski::minkowski_distance;
pub use self::types::{DistanceError, Result, VectorKind};

/// Pairwise metric capability consumed by the clustering pipeline.
///
/// # Examples
/// ```
/// use otoro_core::Metric;
///
/// let metric = Metric::Minkowski { p: 3.0 };
/// let d = metric.distance(&[0.0, 0.0], &[1.0, 1.0])?;
/// assert!((d - 2.0_f64.powf(1.0 / 3.0)).abs() < 1e-12);
/// # Ok::<(), otoro_core::DistanceError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[non_exhaustive]
pub enum Metric {
    /// Straight-line (L2) distance.
    Euclidean,
    /// City-block (L1) distance.
    Manhattan,
    /// Maximum coordinate difference (L∞).
    Chebyshev,
    /// Generalised Lp distance with exponent `p >= 1`.
    Minkowski {
        /// The exponent of the norm.
        p: f64,
    },
    /// One minus the cosine similarity; undefined for zero-magnitude rows.
    Cosine,
}

impl Metric {
    /// Computes the distance between two rows under this metric.
    ///
    /// # Errors
    /// Returns [`DistanceError::DimensionMismatch`] when the slices differ in
    /// length and [`DistanceError::ZeroMagnitude`] when cosine distance meets
    /// a zero vector.
    pub fn distance(&self, left: &[f64], right: &[f64]) -> Result<f64> {
        match *self {
            Self::Euclidean => euclidean_distance(left, right),
            Self::Manhattan => manhattan_distance(left, right),
            Self::Chebyshev => chebyshev_distance(left, right),
            Self::Minkowski { p } => minkowski_distance(left, right, p),
            Self::Cosine => cosine_distance(left, right),
        }
    }

    /// Returns whether an index-backed MST build can serve this metric.
    ///
    /// Spatial acceleration structures only answer nearest-neighbour queries
    /// under true Lp metrics; cosine distance stays on the dense path.
    #[must_use]
    pub const fn supports_indexing(&self) -> bool {
        !matches!(self, Self::Cosine)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Euclidean => f.write_str("euclidean"),
            Self::Manhattan => f.write_str("manhattan"),
            Self::Chebyshev => f.write_str("chebyshev"),
            Self::Minkowski { p } => write!(f, "minkowski(p={p})"),
            Self::Cosine => f.write_str("cosine"),
        }
    }
}
