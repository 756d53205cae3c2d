//! Domain primitives shared by the distance kernels.

use core::fmt;

use thiserror::Error;

/// Identifies whether an error was produced while inspecting the left or
/// right argument.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VectorKind {
    /// Value originating from the first argument.
    Left,
    /// Value originating from the second argument.
    Right,
}

impl fmt::Display for VectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

/// Errors emitted while computing distances.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum DistanceError {
    /// Input rows had different lengths.
    #[error("dimension mismatch: left={left}, right={right}")]
    DimensionMismatch {
        /// Length of the first argument.
        left: usize,
        /// Length of the second argument.
        right: usize,
    },
    /// Cosine distance is undefined for zero-magnitude rows.
    #[error("{which} row has zero magnitude")]
    ZeroMagnitude {
        /// The offending argument.
        which: VectorKind,
    },
}

/// Convenient alias for distance computations.
pub type Result<T> = core::result::Result<T, DistanceError>;
