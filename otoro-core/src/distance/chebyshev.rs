use crate::distance::helpers::validate_dimensions;
use crate::distance::types::Result;

/// Computes the Chebyshev (L∞) distance between two rows.
///
/// # Errors
/// Returns [`crate::DistanceError::DimensionMismatch`] when the lengths
/// differ.
pub fn chebyshev_distance(left: &[f64], right: &[f64]) -> Result<f64> {
    validate_dimensions(left, right)?;

    let mut max = 0.0_f64;
    for (&l, &r) in left.iter().zip(right.iter()) {
        let diff = (l - r).abs();
        if diff > max {
            max = diff;
        }
    }

    Ok(max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_the_largest_coordinate_difference() {
        let d = chebyshev_distance(&[0.0, 5.0, 1.0], &[2.0, 1.5, 1.0]).expect("same length");
        assert_eq!(d, 3.5);
    }
}
