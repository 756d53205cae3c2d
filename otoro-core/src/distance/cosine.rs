use crate::distance::helpers::validate_dimensions;
use crate::distance::types::{DistanceError, Result, VectorKind};

/// Computes the cosine distance (one minus cosine similarity) between two
/// rows.
///
/// The result is clamped to `[0, 2]` to absorb accumulation error near
/// parallel and antiparallel inputs.
///
/// # Errors
/// Returns [`DistanceError::DimensionMismatch`] when the lengths differ and
/// [`DistanceError::ZeroMagnitude`] when either row has zero magnitude.
pub fn cosine_distance(left: &[f64], right: &[f64]) -> Result<f64> {
    validate_dimensions(left, right)?;

    let mut dot = 0.0_f64;
    let mut left_sq = 0.0_f64;
    let mut right_sq = 0.0_f64;
    for (&l, &r) in left.iter().zip(right.iter()) {
        dot += l * r;
        left_sq += l * l;
        right_sq += r * r;
    }

    if left_sq == 0.0 {
        return Err(DistanceError::ZeroMagnitude {
            which: VectorKind::Left,
        });
    }
    if right_sq == 0.0 {
        return Err(DistanceError::ZeroMagnitude {
            which: VectorKind::Right,
        });
    }

    let similarity = dot / (left_sq.sqrt() * right_sq.sqrt());
    Ok((1.0 - similarity).clamp(0.0, 2.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parallel_rows_have_zero_distance() {
        let d = cosine_distance(&[1.0, 2.0], &[2.0, 4.0]).expect("same length");
        assert!(d.abs() < 1e-12);
    }

    #[test]
    fn orthogonal_rows_have_unit_distance() {
        let d = cosine_distance(&[1.0, 0.0], &[0.0, 3.0]).expect("same length");
        assert!((d - 1.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_zero_magnitude_rows() {
        let err = cosine_distance(&[0.0, 0.0], &[1.0, 0.0]).expect_err("left is zero");
        assert_eq!(
            err,
            DistanceError::ZeroMagnitude {
                which: VectorKind::Left
            }
        );
    }
}
