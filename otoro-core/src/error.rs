//! Error types for the otoro core library.
//!
//! Defines the error enums exposed by the public API and a convenient result
//! alias. Every variant maps onto a stable, machine-readable code so logging
//! and metrics surfaces never depend on display strings.

use std::fmt;

use thiserror::Error;

use crate::builder::Algorithm;
use crate::distance::{DistanceError, Metric};

/// Stable codes describing [`OtoroError`] variants.
///
/// The codes are intentionally coarser than the variants: every rejected
/// hyperparameter surfaces as [`OtoroErrorCode::InvalidParameter`], every
/// pre-fit accessor as [`OtoroErrorCode::NotFitted`], and every resource
/// exhaustion as [`OtoroErrorCode::Resource`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum OtoroErrorCode {
    /// A hyperparameter or parameter combination was rejected.
    InvalidParameter,
    /// An accessor was called before `fit` completed.
    NotFitted,
    /// The fit could not be attempted or completed within resource bounds.
    Resource,
}

impl OtoroErrorCode {
    /// Return the stable machine-readable representation of this error code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidParameter => "OTORO_INVALID_PARAMETER",
            Self::NotFitted => "OTORO_NOT_FITTED",
            Self::Resource => "OTORO_RESOURCE",
        }
    }
}

impl fmt::Display for OtoroErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type produced when configuring or running [`crate::Otoro`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum OtoroError {
    /// `min_pts` must be at least one.
    #[error("min_pts must be at least 1 (got {got})")]
    InvalidMinPoints {
        /// Rejected value.
        got: usize,
    },
    /// `min_cluster_size` must be at least two.
    #[error("min_cluster_size must be at least 2 (got {got})")]
    InvalidMinClusterSize {
        /// Rejected value.
        got: usize,
    },
    /// `alpha` must be a finite, strictly positive scale factor.
    #[error("alpha must be finite and greater than zero (got {got})")]
    InvalidAlpha {
        /// Rejected value.
        got: f64,
    },
    /// `leaf_size` must be at least one.
    #[error("leaf_size must be at least 1 (got {got})")]
    InvalidLeafSize {
        /// Rejected value.
        got: usize,
    },
    /// The Minkowski exponent must be finite and at least one.
    #[error("minkowski exponent must be finite and at least 1 (got {got})")]
    InvalidMinkowskiExponent {
        /// Rejected value.
        got: f64,
    },
    /// The requested algorithm cannot serve the configured metric.
    #[error("{algorithm:?} does not support the {metric:?} metric")]
    MetricUnsupportedByIndex {
        /// Requested backend.
        algorithm: Algorithm,
        /// Metric without index support.
        metric: Metric,
    },
    /// A metric computation failed while running the pipeline.
    #[error("distance computation failed: {source}")]
    Distance {
        /// Underlying metric failure.
        #[source]
        source: DistanceError,
    },
    /// An accessor was called before `fit` completed.
    #[error("model has not been fitted; call fit() first")]
    NotFitted,
    /// The pre-flight estimate exceeds what this process can address.
    #[error("dataset of {points} points needs ~{required_bytes} bytes, beyond the addressable limit")]
    DatasetTooLarge {
        /// Number of input points.
        points: usize,
        /// Estimated peak requirement in bytes.
        required_bytes: u64,
    },
    /// A previous fit panicked and poisoned the model state.
    #[error("model state lock is poisoned by an earlier panic")]
    LockPoisoned,
}

impl OtoroError {
    /// Retrieve the stable [`OtoroErrorCode`] for this error.
    #[must_use]
    pub const fn code(&self) -> OtoroErrorCode {
        match self {
            Self::InvalidMinPoints { .. }
            | Self::InvalidMinClusterSize { .. }
            | Self::InvalidAlpha { .. }
            | Self::InvalidLeafSize { .. }
            | Self::InvalidMinkowskiExponent { .. }
            | Self::MetricUnsupportedByIndex { .. }
            | Self::Distance { .. } => OtoroErrorCode::InvalidParameter,
            Self::NotFitted => OtoroErrorCode::NotFitted,
            Self::DatasetTooLarge { .. } | Self::LockPoisoned => OtoroErrorCode::Resource,
        }
    }
}

impl From<DistanceError> for OtoroError {
    fn from(source: DistanceError) -> Self {
        Self::Distance { source }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, OtoroError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameter_rejections_share_the_invalid_parameter_code() {
        let errors = [
            OtoroError::InvalidMinPoints { got: 0 },
            OtoroError::InvalidMinClusterSize { got: 1 },
            OtoroError::InvalidAlpha { got: 0.0 },
            OtoroError::InvalidLeafSize { got: 0 },
            OtoroError::InvalidMinkowskiExponent { got: 0.5 },
        ];
        for error in errors {
            assert_eq!(error.code(), OtoroErrorCode::InvalidParameter);
        }
    }

    #[test]
    fn codes_have_stable_identifiers() {
        assert_eq!(OtoroErrorCode::NotFitted.as_str(), "OTORO_NOT_FITTED");
        assert_eq!(OtoroErrorCode::Resource.as_str(), "OTORO_RESOURCE");
        assert_eq!(
            OtoroErrorCode::InvalidParameter.as_str(),
            "OTORO_INVALID_PARAMETER"
        );
    }

    #[test]
    fn resource_variants_map_to_resource() {
        let err = OtoroError::DatasetTooLarge {
            points: usize::MAX,
            required_bytes: u64::MAX,
        };
        assert_eq!(err.code(), OtoroErrorCode::Resource);
        assert_eq!(OtoroError::LockPoisoned.code(), OtoroErrorCode::Resource);
    }
}
