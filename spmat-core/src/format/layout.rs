//! Compressed Sparse Column layout definitions
//!
//! A CSC matrix is exactly the triple `(values, inner_indices, outer_starts)`
//! plus its shape. The borrowed views defined here are what crosses the
//! backend boundary; [`CscParts`] is the owned form used for serialization.

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

/// Borrowed view over the three CSC arrays of a `rows x cols` matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CscRef<'a> {
    /// Number of rows
    pub rows: usize,
    /// Number of columns
    pub cols: usize,
    /// Column start offsets, length `cols + 1`
    pub outer_starts: &'a [usize],
    /// Row index of every stored value
    pub inner_indices: &'a [usize],
    /// Stored values
    pub values: &'a [f64],
}

impl<'a> CscRef<'a> {
    /// Number of stored entries
    pub fn nnz(&self) -> usize {
        self.outer_starts.last().copied().unwrap_or(0)
    }

    /// Get the `(inner_indices, values)` run of column `col`
    ///
    /// The caller guarantees `col < cols`.
    pub fn column(&self, col: usize) -> (&'a [usize], &'a [f64]) {
        let start = self.outer_starts[col];
        let end = self.outer_starts[col + 1];
        (&self.inner_indices[start..end], &self.values[start..end])
    }
}

/// Mutable output buffers a backend kernel writes a CSC result into
///
/// `inner_indices` and `values` are sized by the caller to an upper bound
/// of the result's nnz; kernels report how many entries they wrote.
#[derive(Debug)]
pub struct CscOut<'a> {
    /// Column start offsets, length `cols + 1` of the result
    pub outer_starts: &'a mut [usize],
    /// Row indices of the result
    pub inner_indices: &'a mut [usize],
    /// Values of the result
    pub values: &'a mut [f64],
}

/// Owned CSC triple plus shape
///
/// This is the serialized representation of a sparse matrix.
#[cfg(feature = "alloc")]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CscParts {
    /// Number of rows
    pub rows: usize,
    /// Number of columns
    pub cols: usize,
    /// Stored values
    pub values: Vec<f64>,
    /// Row index of every stored value
    pub inner_indices: Vec<usize>,
    /// Column start offsets, length `cols + 1`
    pub outer_starts: Vec<usize>,
}

#[cfg(feature = "alloc")]
impl CscParts {
    /// Borrow the parts as a backend view
    pub fn as_csc_ref(&self) -> CscRef<'_> {
        CscRef {
            rows: self.rows,
            cols: self.cols,
            outer_starts: &self.outer_starts,
            inner_indices: &self.inner_indices,
            values: &self.values,
        }
    }
}

/// Direction of a matrix concatenation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConcatType {
    /// `[A | B]`, row counts must agree
    Horizontal,
    /// `[A; B]`, column counts must agree
    Vertical,
}

impl core::fmt::Display for ConcatType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConcatType::Horizontal => write!(f, "horizontal"),
            ConcatType::Vertical => write!(f, "vertical"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csc_ref_column() {
        let outer = [0, 2, 2, 3];
        let inner = [1, 2, 0];
        let values = [22.0, 7.0, 3.0];
        let view = CscRef {
            rows: 3,
            cols: 3,
            outer_starts: &outer,
            inner_indices: &inner,
            values: &values,
        };

        assert_eq!(view.nnz(), 3);
        assert_eq!(view.column(0), (&inner[0..2], &values[0..2]));
        assert_eq!(view.column(1), (&[][..], &[][..]));
        assert_eq!(view.column(2), (&[0][..], &[3.0][..]));
    }
}
