//! Feature matrix container consumed by the clustering pipeline.
//!
//! Rows are validated once, at construction: every row must share the same
//! dimension and every value must be finite. The pipeline can then treat row
//! access as infallible.

use thiserror::Error;

/// Errors produced while constructing a [`FeatureMatrix`].
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum MatrixError {
    /// A row's length disagreed with the first row's.
    #[error("row {row} has {got} columns but the matrix has {expected}")]
    RaggedRow {
        /// Index of the offending row.
        row: usize,
        /// Expected column count.
        expected: usize,
        /// Observed column count.
        got: usize,
    },
    /// Rows must have positive dimension.
    #[error("feature rows must have positive dimension")]
    ZeroDimension,
    /// A feature value was NaN or infinite.
    #[error("row {row}, column {col} holds a non-finite value ({value})")]
    NonFinite {
        /// Row of the offending value.
        row: usize,
        /// Column of the offending value.
        col: usize,
        /// The rejected value.
        value: f64,
    },
}

/// Dense, row-major matrix of feature values.
///
/// # Examples
/// ```
/// use otoro_core::FeatureMatrix;
///
/// let matrix = FeatureMatrix::from_rows(vec![vec![0.0, 1.0], vec![2.0, 3.0]])?;
/// assert_eq!(matrix.rows(), 2);
/// assert_eq!(matrix.cols(), 2);
/// assert_eq!(matrix.row(1), [2.0, 3.0]);
/// # Ok::<(), otoro_core::MatrixError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureMatrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl FeatureMatrix {
    /// Builds a matrix from row vectors, validating shape and finiteness.
    ///
    /// An empty input is accepted and yields a 0×0 matrix; `fit` then
    /// produces the trivial labeling instead of failing.
    ///
    /// # Errors
    /// Returns [`MatrixError::ZeroDimension`] when a non-empty input has
    /// zero-length rows, [`MatrixError::RaggedRow`] when row lengths
    /// disagree, and [`MatrixError::NonFinite`] for NaN or infinite values.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, MatrixError> {
        let Some(first) = rows.first() else {
            return Ok(Self {
                data: Vec::new(),
                rows: 0,
                cols: 0,
            });
        };
        let cols = first.len();
        if cols == 0 {
            return Err(MatrixError::ZeroDimension);
        }

        let mut data = Vec::with_capacity(rows.len() * cols);
        for (row_idx, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(MatrixError::RaggedRow {
                    row: row_idx,
                    expected: cols,
                    got: row.len(),
                });
            }
            for (col_idx, &value) in row.iter().enumerate() {
                if !value.is_finite() {
                    return Err(MatrixError::NonFinite {
                        row: row_idx,
                        col: col_idx,
                        value,
                    });
                }
                data.push(value);
            }
        }

        Ok(Self {
            data,
            rows: rows.len(),
            cols,
        })
    }

    /// Returns the number of rows (points).
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns (features per point).
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Returns whether the matrix holds no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Returns row `index` as a slice.
    ///
    /// # Panics
    /// Panics when `index >= rows()`; the pipeline only uses indices drawn
    /// from `0..rows()`.
    #[must_use]
    pub fn row(&self, index: usize) -> &[f64] {
        let start = index * self.cols;
        &self.data[start..start + self.cols]
    }
}
