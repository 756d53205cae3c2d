use crate::distance::helpers::validate_dimensions;
use crate::distance::types::Result;

/// Computes the Manhattan (city-block) distance between two rows.
///
/// # Errors
/// Returns [`crate::DistanceError::DimensionMismatch`] when the lengths
/// differ.
pub fn manhattan_distance(left: &[f64], right: &[f64]) -> Result<f64> {
    validate_dimensions(left, right)?;

    let mut sum = 0.0_f64;
    for (&l, &r) in left.iter().zip(right.iter()) {
        sum += (l - r).abs();
    }

    Ok(sum)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_absolute_coordinate_differences() {
        let d = manhattan_distance(&[1.0, -1.0], &[-2.0, 3.0]).expect("same length");
        assert_eq!(d, 7.0);
    }
}
