//! Conversion between column-major dense buffers and sparse storage
//!
//! A value is kept when `|v| > tolerance` or when it is NaN. A tolerance of
//! `0.0` keeps every non-zero exactly, so `to_dense(&to_sparse(d, r, c, 0.0)?) == d`.

use spmat_core::{CscRef, Result, SpmatError};

use crate::{CscMatrix, SparseVector};

fn is_stored(value: f64, tolerance: f64) -> bool {
    value.is_nan() || value.abs() > tolerance
}

/// Compress a `rows x cols` column-major buffer
///
/// Fails with `LengthMismatch` when `dense` does not hold `rows * cols`
/// values, including shapes whose element count overflows `usize`.
pub fn to_sparse(dense: &[f64], rows: usize, cols: usize, tolerance: f64) -> Result<CscMatrix> {
    let expected = rows.checked_mul(cols).ok_or(SpmatError::LengthMismatch {
        expected: usize::MAX,
        found: dense.len(),
    })?;
    if dense.len() != expected {
        return Err(SpmatError::LengthMismatch {
            expected,
            found: dense.len(),
        });
    }

    let mut values = Vec::new();
    let mut inner_indices = Vec::new();
    let mut outer_starts = Vec::with_capacity(cols + 1);
    outer_starts.push(0);

    for column in dense.chunks_exact(rows.max(1)).take(cols) {
        for (row, &value) in column.iter().enumerate() {
            if is_stored(value, tolerance) {
                inner_indices.push(row);
                values.push(value);
            }
        }
        outer_starts.push(values.len());
    }
    // Zero-row matrices have no chunks
    outer_starts.resize(cols + 1, values.len());

    Ok(CscMatrix::from_parts_unchecked(
        rows,
        cols,
        values,
        inner_indices,
        outer_starts,
    ))
}

/// Expand a matrix into a zero-filled column-major buffer
pub fn to_dense(matrix: &CscMatrix) -> Vec<f64> {
    csc_to_dense(matrix.as_csc_ref())
}

/// Expand a CSC view into a zero-filled column-major buffer
pub(crate) fn csc_to_dense(a: CscRef<'_>) -> Vec<f64> {
    let mut dense = vec![0.0; a.rows * a.cols];
    for col in 0..a.cols {
        let (rows, values) = a.column(col);
        for (&row, &value) in rows.iter().zip(values) {
            dense[col * a.rows + row] = value;
        }
    }
    dense
}

/// Compress a dense vector
pub fn vector_to_sparse(dense: &[f64], tolerance: f64) -> SparseVector {
    let (indices, values) = dense
        .iter()
        .enumerate()
        .filter(|(_, &value)| is_stored(value, tolerance))
        .map(|(index, &value)| (index, value))
        .unzip();
    SparseVector::from_parts_unchecked(dense.len(), indices, values)
}

/// Expand a sparse vector into a dense buffer
pub fn vector_to_dense(vector: &SparseVector) -> Vec<f64> {
    vector.to_dense()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use spmat_core::{format::DEFAULT_SPARSITY_TOLERANCE, validate_csc};

    #[test]
    fn test_to_sparse_layout() {
        // 3x2, column-major: col0 = [0, 22, 7], col1 = [3, 0, 5]
        let dense = [0.0, 22.0, 7.0, 3.0, 0.0, 5.0];
        let m = to_sparse(&dense, 3, 2, DEFAULT_SPARSITY_TOLERANCE).unwrap();

        assert_eq!(m.outer_starts(), &[0, 2, 4]);
        assert_eq!(m.inner_indices(), &[1, 2, 0, 2]);
        assert_eq!(m.values(), &[22.0, 7.0, 3.0, 5.0]);
        assert_eq!(to_dense(&m), dense.to_vec());
    }

    #[test]
    fn test_tolerance_drops_small_values() {
        let dense = [1e-13, 1.0, -1e-12, 2e-12];
        let m = to_sparse(&dense, 2, 2, DEFAULT_SPARSITY_TOLERANCE).unwrap();
        assert_eq!(m.nnz(), 2);
        assert_eq!(m.values(), &[1.0, 2e-12]);

        let exact = to_sparse(&dense, 2, 2, 0.0).unwrap();
        assert_eq!(exact.nnz(), 4);
    }

    #[test]
    fn test_to_sparse_length_mismatch() {
        assert_eq!(
            to_sparse(&[1.0, 2.0, 3.0], 2, 2, 0.0),
            Err(SpmatError::LengthMismatch {
                expected: 4,
                found: 3
            })
        );
    }

    #[test]
    fn test_to_sparse_overflowing_shape() {
        assert_eq!(
            to_sparse(&[1.0], usize::MAX, 2, 0.0),
            Err(SpmatError::LengthMismatch {
                expected: usize::MAX,
                found: 1
            })
        );
    }

    #[test]
    fn test_nan_is_kept() {
        let dense = [f64::NAN, 0.0, 1.0, 0.0];
        let m = to_sparse(&dense, 2, 2, DEFAULT_SPARSITY_TOLERANCE).unwrap();
        assert_eq!(m.nnz(), 2);
        assert_eq!(m.inner_indices(), &[0, 0]);
        assert!(to_dense(&m)[0].is_nan());

        let v = vector_to_sparse(&[0.0, f64::NAN], DEFAULT_SPARSITY_TOLERANCE);
        assert_eq!(v.indices(), &[1]);
    }

    #[test]
    fn test_degenerate_shapes() {
        let m = to_sparse(&[], 0, 3, 0.0).unwrap();
        assert_eq!(m.outer_starts(), &[0, 0, 0, 0]);
        validate_csc(m.as_csc_ref()).unwrap();

        let m = to_sparse(&[], 4, 0, 0.0).unwrap();
        assert_eq!(m.outer_starts(), &[0]);
        assert!(to_dense(&m).is_empty());
    }

    #[test]
    fn test_exact_round_trip() {
        let mut rng = StdRng::seed_from_u64(42);
        for &(rows, cols) in &[(1, 1), (5, 3), (7, 11), (16, 2)] {
            let dense: Vec<f64> = (0..rows * cols)
                .map(|_| {
                    if rng.gen_bool(0.3) {
                        rng.gen_range(-10.0..10.0)
                    } else {
                        0.0
                    }
                })
                .collect();
            let m = to_sparse(&dense, rows, cols, 0.0).unwrap();
            validate_csc(m.as_csc_ref()).unwrap();
            assert_eq!(to_dense(&m), dense);
        }
    }

    #[test]
    fn test_vector_conversion() {
        let dense = [0.0, 3.0, 0.0, 1e-14, -1.0];
        let v = vector_to_sparse(&dense, DEFAULT_SPARSITY_TOLERANCE);
        assert_eq!(v.len(), 5);
        assert_eq!(v.indices(), &[1, 4]);
        assert_eq!(vector_to_dense(&v), vec![0.0, 3.0, 0.0, 0.0, -1.0]);
        assert_eq!(vector_to_dense(&vector_to_sparse(&dense, 0.0)), dense.to_vec());
    }
}
