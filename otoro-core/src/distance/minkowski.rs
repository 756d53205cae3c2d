use crate::distance::helpers::validate_dimensions;
use crate::distance::types::Result;

/// Computes the Minkowski (Lp) distance between two rows.
///
/// The exponent is validated when a [`crate::Metric::Minkowski`] is accepted
/// by the builder; this kernel assumes `p >= 1`.
///
/// # Errors
/// Returns [`crate::DistanceError::DimensionMismatch`] when the lengths
/// differ.
pub fn minkowski_distance(left: &[f64], right: &[f64], p: f64) -> Result<f64> {
    validate_dimensions(left, right)?;

    let mut sum = 0.0_f64;
    for (&l, &r) in left.iter().zip(right.iter()) {
        sum += (l - r).abs().powf(p);
    }

    Ok(sum.powf(p.recip()))
}
