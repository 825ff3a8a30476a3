//! CSC invariant validation
//!
//! A well-formed `rows x cols` CSC triple satisfies:
//! - `outer_starts.len() == cols + 1`, `outer_starts[0] == 0`
//! - `outer_starts` is non-decreasing and `outer_starts[cols] == nnz`
//! - `values.len() == inner_indices.len() == nnz`
//! - inside each column run, inner indices are strictly increasing and `< rows`

use crate::format::CscRef;
use crate::SpmatError;

/// Validate all CSC invariants of `csc`
pub fn validate_csc(csc: CscRef<'_>) -> Result<(), SpmatError> {
    if csc.outer_starts.len() != csc.cols + 1 {
        return Err(SpmatError::LengthMismatch {
            expected: csc.cols + 1,
            found: csc.outer_starts.len(),
        });
    }
    if csc.outer_starts[0] != 0 {
        return Err(SpmatError::InvalidStructure("outer_starts must begin at 0"));
    }

    let nnz = csc.outer_starts[csc.cols];
    if csc.inner_indices.len() != nnz {
        return Err(SpmatError::LengthMismatch {
            expected: nnz,
            found: csc.inner_indices.len(),
        });
    }
    if csc.values.len() != nnz {
        return Err(SpmatError::LengthMismatch {
            expected: nnz,
            found: csc.values.len(),
        });
    }

    for window in csc.outer_starts.windows(2) {
        if window[1] < window[0] {
            return Err(SpmatError::InvalidStructure(
                "outer_starts must be non-decreasing",
            ));
        }
    }

    for col in 0..csc.cols {
        let (rows, _) = csc.column(col);
        validate_sparse_indices(rows, csc.rows)?;
    }

    Ok(())
}

/// Validate that `indices` is strictly increasing with every entry `< length`
pub fn validate_sparse_indices(indices: &[usize], length: usize) -> Result<(), SpmatError> {
    if let Some(&last) = indices.last() {
        if last >= length {
            return Err(SpmatError::OutOfRange {
                index: last,
                bound: length,
            });
        }
    }
    if indices.windows(2).any(|w| w[0] >= w[1]) {
        return Err(SpmatError::InvalidStructure(
            "inner indices must be strictly increasing",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view<'a>(
        rows: usize,
        cols: usize,
        outer: &'a [usize],
        inner: &'a [usize],
        values: &'a [f64],
    ) -> CscRef<'a> {
        CscRef {
            rows,
            cols,
            outer_starts: outer,
            inner_indices: inner,
            values,
        }
    }

    #[test]
    fn test_valid_csc() {
        let csc = view(3, 2, &[0, 2, 4], &[1, 2, 0, 2], &[22.0, 7.0, 3.0, 5.0]);
        assert_eq!(validate_csc(csc), Ok(()));

        // Empty matrix
        assert_eq!(validate_csc(view(0, 0, &[0], &[], &[])), Ok(()));
        assert_eq!(validate_csc(view(4, 3, &[0, 0, 0, 0], &[], &[])), Ok(()));
    }

    #[test]
    fn test_invalid_outer_starts() {
        assert_eq!(
            validate_csc(view(3, 2, &[0, 2], &[0, 1], &[1.0, 2.0])),
            Err(SpmatError::LengthMismatch {
                expected: 3,
                found: 2
            })
        );
        assert!(matches!(
            validate_csc(view(3, 1, &[1, 2], &[0, 1], &[1.0, 2.0])),
            Err(SpmatError::InvalidStructure(_))
        ));
        assert!(matches!(
            validate_csc(view(3, 2, &[0, 2, 1], &[0], &[1.0])),
            Err(SpmatError::InvalidStructure(_))
        ));
    }

    #[test]
    fn test_invalid_lengths() {
        assert_eq!(
            validate_csc(view(3, 1, &[0, 2], &[0], &[1.0, 2.0])),
            Err(SpmatError::LengthMismatch {
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            validate_csc(view(3, 1, &[0, 2], &[0, 1], &[1.0])),
            Err(SpmatError::LengthMismatch {
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_invalid_inner_indices() {
        // Unsorted within a column
        assert!(matches!(
            validate_csc(view(3, 1, &[0, 2], &[2, 1], &[1.0, 2.0])),
            Err(SpmatError::InvalidStructure(_))
        ));
        // Duplicate within a column
        assert!(matches!(
            validate_csc(view(3, 1, &[0, 2], &[1, 1], &[1.0, 2.0])),
            Err(SpmatError::InvalidStructure(_))
        ));
        // Row out of range
        assert_eq!(
            validate_csc(view(3, 1, &[0, 1], &[3], &[1.0])),
            Err(SpmatError::OutOfRange { index: 3, bound: 3 })
        );
        // Decreasing across a column boundary is fine
        assert_eq!(
            validate_csc(view(3, 2, &[0, 1, 2], &[2, 0], &[1.0, 2.0])),
            Ok(())
        );
    }
}
