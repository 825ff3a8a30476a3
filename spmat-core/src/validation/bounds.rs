//! Index and shape checks
//!
//! Every fallible accessor in the workspace funnels its bounds checks
//! through these helpers so the reported error is consistent.

use crate::SpmatError;

/// Check `index < bound`
pub const fn check_index(index: usize, bound: usize) -> Result<(), SpmatError> {
    if index >= bound {
        return Err(SpmatError::OutOfRange { index, bound });
    }
    Ok(())
}

/// Check that `(row, col)` lies inside a `rows x cols` matrix
///
/// The row is checked first.
pub const fn check_position(
    row: usize,
    col: usize,
    rows: usize,
    cols: usize,
) -> Result<(), SpmatError> {
    if row >= rows {
        return Err(SpmatError::OutOfRange {
            index: row,
            bound: rows,
        });
    }
    check_index(col, cols)
}

/// Check that two shapes are identical
pub fn check_same_shape(left: (usize, usize), right: (usize, usize)) -> Result<(), SpmatError> {
    if left != right {
        return Err(SpmatError::ShapeMismatch { left, right });
    }
    Ok(())
}
