//! Validation helpers shared across the distance kernels.

use super::types::{DistanceError, Result};

pub(super) fn validate_dimensions(left: &[f64], right: &[f64]) -> Result<()> {
    if left.len() == right.len() {
        Ok(())
    } else {
        Err(DistanceError::DimensionMismatch {
            left: left.len(),
            right: right.len(),
        })
    }
}
