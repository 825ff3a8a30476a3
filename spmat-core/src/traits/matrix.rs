//! Core matrix abstraction traits
//!
//! These traits describe what every sparse matrix implementation exposes,
//! independent of how its entries are stored.

#[cfg(feature = "alloc")]
use crate::error::Result;

/// Core sparse matrix trait for format-agnostic access
pub trait SparseMatrix {
    /// Get an element at the specified position
    ///
    /// Returns `None` if the element is not stored or if the position is
    /// out of bounds.
    fn get_element(&self, row: usize, col: usize) -> Option<f64>;

    /// Get matrix dimensions as (rows, cols)
    fn dimensions(&self) -> (usize, usize);

    /// Get number of stored entries
    fn nnz(&self) -> usize;

    /// Fraction of positions that hold a stored entry
    fn density(&self) -> f64 {
        let (rows, cols) = self.dimensions();
        if rows == 0 || cols == 0 {
            return 0.0;
        }
        self.nnz() as f64 / (rows as f64 * cols as f64)
    }
}

/// Row and column extraction (requires alloc feature)
///
/// Extracted lines are copies; mutating them never affects the matrix.
#[cfg(feature = "alloc")]
pub trait MatrixOperations: SparseMatrix {
    /// Sparse vector type produced by extraction
    type Vector;

    /// Copy row `row_index` into a vector of length `cols`
    fn row(&self, row_index: usize) -> Result<Self::Vector>;

    /// Copy column `col_index` into a vector of length `rows`
    fn col(&self, col_index: usize) -> Result<Self::Vector>;
}
