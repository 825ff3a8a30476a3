//! Compressed sparse column matrix storage
//!
//! [`CscMatrix`] owns the three CSC arrays of a `rows x cols` matrix:
//!
//! - `values`: stored entries in column-major order
//! - `inner_indices`: row of each stored entry
//! - `outer_starts`: `cols + 1` offsets, column `c` occupies
//!   `outer_starts[c]..outer_starts[c + 1]`
//!
//! Every constructor leaves the arrays satisfying the CSC invariants
//! checked by [`spmat_core::validate_csc`].

mod concat;
pub mod ops;
mod stats;

use std::fmt;

use spmat_core::{
    format::constants::{MAX_COLS_TO_PRINT, MAX_ROWS_TO_PRINT},
    validation::{check_index, check_position},
    indices_equal, validate_csc, values_equal, CscParts, CscRef, MatrixOperations, Result,
    SparseMatrix, SpmatError,
};

use crate::{
    bridge,
    builder::{build_csc, Triplet},
    SparseConfig, SparseVector,
};

pub use ops::IterativeSolverResult;

/// Sparse `f64` matrix in compressed sparse column form
#[derive(Debug, Clone)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "CscParts", into = "CscParts")
)]
pub struct CscMatrix {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
    inner_indices: Vec<usize>,
    outer_starts: Vec<usize>,
}

impl CscMatrix {
    /// Build a matrix from unordered `(row, col, value)` triplets
    ///
    /// Fails with `OutOfRange` for a position outside the shape and with
    /// `DuplicateEntry` when a position appears twice.
    pub fn from_triplets(triplets: &[Triplet], rows: usize, cols: usize) -> Result<Self> {
        let parts = build_csc(triplets, rows, cols)?;
        Ok(Self::from_parts_unchecked(
            parts.rows,
            parts.cols,
            parts.values,
            parts.inner_indices,
            parts.outer_starts,
        ))
    }

    /// Adopt caller-supplied CSC arrays after validating them
    pub fn from_parts(
        rows: usize,
        cols: usize,
        values: Vec<f64>,
        inner_indices: Vec<usize>,
        outer_starts: Vec<usize>,
    ) -> Result<Self> {
        let matrix = Self::from_parts_unchecked(rows, cols, values, inner_indices, outer_starts);
        validate_csc(matrix.as_csc_ref())?;
        Ok(matrix)
    }

    pub(crate) fn from_parts_unchecked(
        rows: usize,
        cols: usize,
        values: Vec<f64>,
        inner_indices: Vec<usize>,
        outer_starts: Vec<usize>,
    ) -> Self {
        Self {
            rows,
            cols,
            values,
            inner_indices,
            outer_starts,
        }
    }

    /// Compress a column-major dense buffer using the configured sparsity tolerance
    pub fn from_dense(
        dense: &[f64],
        rows: usize,
        cols: usize,
        config: &SparseConfig,
    ) -> Result<Self> {
        bridge::to_sparse(dense, rows, cols, config.sparsity_tolerance)
    }

    /// Matrix with no stored entries
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::from_parts_unchecked(rows, cols, Vec::new(), Vec::new(), vec![0; cols + 1])
    }

    /// `size x size` identity
    pub fn identity(size: usize) -> Self {
        Self::diag(&vec![1.0; size])
    }

    /// Square matrix with `values` on the diagonal
    ///
    /// Every diagonal entry is stored, zeros included.
    pub fn diag(values: &[f64]) -> Self {
        let size = values.len();
        Self::from_parts_unchecked(
            size,
            size,
            values.to_vec(),
            (0..size).collect(),
            (0..=size).collect(),
        )
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Number of stored entries, always `outer_starts[cols]`
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Stored values in column-major order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Row index of every stored value
    pub fn inner_indices(&self) -> &[usize] {
        &self.inner_indices
    }

    /// Column start offsets, length `cols + 1`
    pub fn outer_starts(&self) -> &[usize] {
        &self.outer_starts
    }

    /// Borrow the arrays as a backend view
    pub fn as_csc_ref(&self) -> CscRef<'_> {
        CscRef {
            rows: self.rows,
            cols: self.cols,
            outer_starts: &self.outer_starts,
            inner_indices: &self.inner_indices,
            values: &self.values,
        }
    }

    /// Consume the matrix into its owned parts
    pub fn into_parts(self) -> CscParts {
        CscParts {
            rows: self.rows,
            cols: self.cols,
            values: self.values,
            inner_indices: self.inner_indices,
            outer_starts: self.outer_starts,
        }
    }

    /// Row indices and values stored in column `col`
    fn column_run(&self, col: usize) -> (&[usize], &[f64]) {
        let start = self.outer_starts[col];
        let end = self.outer_starts[col + 1];
        (&self.inner_indices[start..end], &self.values[start..end])
    }

    /// Scan column `col` for `row`, stopping once a larger row is seen
    fn find(&self, row: usize, col: usize) -> Option<f64> {
        let (rows, values) = self.column_run(col);
        for (&inner, &value) in rows.iter().zip(values) {
            if inner == row {
                return Some(value);
            }
            if inner > row {
                break;
            }
        }
        None
    }

    /// Read entry `(row, col)`, `0.0` when not stored
    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        check_position(row, col, self.rows, self.cols)?;
        Ok(self.find(row, col).unwrap_or(0.0))
    }

    /// Copy column `col` into a sparse vector of length `rows`
    pub fn col(&self, col: usize) -> Result<SparseVector> {
        check_index(col, self.cols)?;
        let (rows, values) = self.column_run(col);
        Ok(SparseVector::from_parts_unchecked(
            self.rows,
            rows.to_vec(),
            values.to_vec(),
        ))
    }

    /// Copy row `row` into a sparse vector of length `cols`
    ///
    /// Visits every column run, O(nnz).
    pub fn row(&self, row: usize) -> Result<SparseVector> {
        check_index(row, self.rows)?;
        let mut indices = Vec::new();
        let mut values = Vec::new();
        for col in 0..self.cols {
            if let Some(value) = self.find(row, col) {
                indices.push(col);
                values.push(value);
            }
        }
        Ok(SparseVector::from_parts_unchecked(self.cols, indices, values))
    }

    /// Iterate over stored `(row, col, value)` entries in column-major order
    pub fn triplets(&self) -> impl Iterator<Item = Triplet> + '_ {
        (0..self.cols).flat_map(move |col| {
            (self.outer_starts[col]..self.outer_starts[col + 1])
                .map(move |k| (self.inner_indices[k], col, self.values[k]))
        })
    }

    /// Expand into a column-major dense buffer
    pub fn to_dense(&self) -> Vec<f64> {
        bridge::to_dense(self)
    }

    /// Multiply every stored value in place
    ///
    /// The structure is unchanged, so `scale(0.0)` leaves explicit zeros.
    /// Use [`map_values`](Self::map_values) to drop them.
    pub fn scale(&mut self, factor: f64) {
        self.values.iter_mut().for_each(|v| *v *= factor);
    }

    /// New matrix with `f` applied to every stored value, dropping zero results
    pub fn map_values<F: Fn(f64) -> f64>(&self, f: F) -> CscMatrix {
        let mut values = Vec::with_capacity(self.nnz());
        let mut inner_indices = Vec::with_capacity(self.nnz());
        let mut outer_starts = Vec::with_capacity(self.cols + 1);
        outer_starts.push(0);

        for col in 0..self.cols {
            let (rows, run) = self.column_run(col);
            for (&row, &value) in rows.iter().zip(run) {
                let mapped = f(value);
                if mapped != 0.0 {
                    inner_indices.push(row);
                    values.push(mapped);
                }
            }
            outer_starts.push(values.len());
        }

        Self::from_parts_unchecked(self.rows, self.cols, values, inner_indices, outer_starts)
    }

    /// Structural equality with an explicit value tolerance
    ///
    /// Matrices holding the same values under different structures (for
    /// example an explicit zero) compare unequal.
    pub fn approx_eq(&self, other: &CscMatrix, tolerance: f64) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && indices_equal(&self.outer_starts, &other.outer_starts)
            && indices_equal(&self.inner_indices, &other.inner_indices)
            && values_equal(&self.values, &other.values, tolerance)
    }

    /// Structural equality within the config's equality tolerance
    pub fn approx_eq_with_config(&self, other: &CscMatrix, config: &SparseConfig) -> bool {
        self.approx_eq(other, config.equality_tolerance())
    }
}

impl TryFrom<CscParts> for CscMatrix {
    type Error = SpmatError;

    fn try_from(parts: CscParts) -> Result<Self> {
        Self::from_parts(
            parts.rows,
            parts.cols,
            parts.values,
            parts.inner_indices,
            parts.outer_starts,
        )
    }
}

impl From<CscMatrix> for CscParts {
    fn from(matrix: CscMatrix) -> Self {
        matrix.into_parts()
    }
}

/// Structural equality: same shape and arrays, values within `1e-11`
impl PartialEq for CscMatrix {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq_with_config(other, &SparseConfig::default())
    }
}

impl SparseMatrix for CscMatrix {
    fn get_element(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.find(row, col)
    }

    fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    fn nnz(&self) -> usize {
        self.values.len()
    }
}

impl MatrixOperations for CscMatrix {
    type Vector = SparseVector;

    fn row(&self, row_index: usize) -> Result<SparseVector> {
        CscMatrix::row(self, row_index)
    }

    fn col(&self, col_index: usize) -> Result<SparseVector> {
        CscMatrix::col(self, col_index)
    }
}

impl fmt::Display for CscMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CscMatrix {}x{} nnz={}", self.rows, self.cols, self.nnz())?;
        let shown_cols = self.cols.min(MAX_COLS_TO_PRINT);
        for row in 0..self.rows.min(MAX_ROWS_TO_PRINT) {
            for col in 0..shown_cols {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", self.find(row, col).unwrap_or(0.0))?;
            }
            if self.cols > MAX_COLS_TO_PRINT {
                write!(f, " ...")?;
            }
            writeln!(f)?;
        }
        if self.rows > MAX_ROWS_TO_PRINT {
            writeln!(f, "...")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn example() -> CscMatrix {
        let triplets = [(0, 1, 3.0), (1, 0, 22.0), (2, 0, 7.0), (2, 1, 5.0)];
        CscMatrix::from_triplets(&triplets, 3, 2).unwrap()
    }

    #[test]
    fn test_example_layout() {
        let m = example();
        assert_eq!(m.shape(), (3, 2));
        assert_eq!(m.nnz(), 4);
        assert_eq!(m.outer_starts(), &[0, 2, 4]);

        let col0 = m.col(0).unwrap();
        assert_eq!(col0.indices(), &[1, 2]);
        assert_eq!(col0.values(), &[22.0, 7.0]);
        let col1 = m.col(1).unwrap();
        assert_eq!(col1.indices(), &[0, 2]);
        assert_eq!(col1.values(), &[3.0, 5.0]);

        assert_eq!(m.get(2, 1), Ok(5.0));
        assert_eq!(m.get(0, 0), Ok(0.0));
    }

    #[test]
    fn test_get_out_of_range() {
        let m = example();
        assert_eq!(m.get(3, 0), Err(SpmatError::OutOfRange { index: 3, bound: 3 }));
        assert_eq!(m.get(0, 2), Err(SpmatError::OutOfRange { index: 2, bound: 2 }));
        assert_eq!(m.get_element(3, 0), None);
        assert_eq!(m.get_element(1, 1), None);
        assert_eq!(m.get_element(1, 0), Some(22.0));
    }

    #[test]
    fn test_row_extraction() {
        let m = example();
        let row2 = m.row(2).unwrap();
        assert_eq!(row2.len(), 2);
        assert_eq!(row2.indices(), &[0, 1]);
        assert_eq!(row2.values(), &[7.0, 5.0]);

        let row0 = MatrixOperations::row(&m, 0).unwrap();
        assert_eq!(row0.indices(), &[1]);
        assert!(m.row(3).is_err());
        assert!(m.col(2).is_err());
    }

    #[test]
    fn test_extracted_lines_are_copies() {
        let m = example();
        let mut col = m.col(0).unwrap();
        col.set(0, 9.0).unwrap();
        assert_eq!(m.get(0, 0), Ok(0.0));
    }

    #[test]
    fn test_get_consistency() {
        let triplets = [(4, 0, 1.0), (0, 3, 2.0), (2, 2, 3.0), (1, 2, 4.0), (3, 1, 5.0)];
        let m = CscMatrix::from_triplets(&triplets, 5, 4).unwrap();
        for &(r, c, v) in &triplets {
            assert_eq!(m.get(r, c), Ok(v));
        }
        let stored = m.triplets().count();
        assert_eq!(stored, triplets.len());
        for r in 0..5 {
            for c in 0..4 {
                if !triplets.iter().any(|&(tr, tc, _)| tr == r && tc == c) {
                    assert_eq!(m.get(r, c), Ok(0.0));
                }
            }
        }
    }

    #[test]
    fn test_triplets_column_major() {
        let collected: Vec<Triplet> = example().triplets().collect();
        assert_eq!(
            collected,
            vec![(1, 0, 22.0), (2, 0, 7.0), (0, 1, 3.0), (2, 1, 5.0)]
        );
    }

    #[test]
    fn test_from_parts_validation() {
        assert!(CscMatrix::from_parts(2, 2, vec![1.0], vec![1], vec![0, 1, 1]).is_ok());
        assert!(matches!(
            CscMatrix::from_parts(2, 2, vec![1.0, 2.0], vec![1, 0], vec![0, 2, 2]),
            Err(SpmatError::InvalidStructure(_))
        ));
        assert!(matches!(
            CscMatrix::from_parts(2, 2, vec![1.0], vec![1], vec![0, 1]),
            Err(SpmatError::LengthMismatch { .. })
        ));
        assert!(matches!(
            CscMatrix::from_parts(2, 1, vec![1.0], vec![2], vec![0, 1]),
            Err(SpmatError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_factories() {
        let z = CscMatrix::zeros(3, 4);
        assert_eq!(z.nnz(), 0);
        assert_eq!(z.outer_starts(), &[0, 0, 0, 0, 0]);

        let i = CscMatrix::identity(3);
        assert_eq!(i.to_dense(), vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);

        let d = CscMatrix::diag(&[2.0, 0.0]);
        assert_eq!(d.nnz(), 2);
        assert_eq!(d.get(0, 0), Ok(2.0));
        validate_csc(d.as_csc_ref()).unwrap();
        validate_csc(CscMatrix::identity(0).as_csc_ref()).unwrap();
    }

    #[test]
    fn test_scale_and_map_values() {
        let mut m = example();
        m.scale(2.0);
        assert_eq!(m.values(), &[44.0, 14.0, 6.0, 10.0]);

        m.scale(0.0);
        assert_eq!(m.nnz(), 4);

        let pruned = m.map_values(|v| v);
        assert_eq!(pruned.nnz(), 0);
        assert_eq!(pruned.outer_starts(), &[0, 0, 0]);

        let big = example().map_values(|v| if v > 5.0 { v } else { 0.0 });
        assert_eq!(big.outer_starts(), &[0, 2, 2]);
        validate_csc(big.as_csc_ref()).unwrap();
    }

    #[test]
    fn test_equality() {
        let m = example();
        assert_eq!(m, m);
        assert_eq!(m, m.clone());
        assert_eq!(m, m.map_values(|v| v + 1e-12));
        assert_ne!(m, m.map_values(|v| v + 1e-9));
        assert_ne!(m, CscMatrix::zeros(3, 2));

        // Same values, different structure
        let mut explicit = CscMatrix::identity(2);
        explicit.scale(0.0);
        assert_ne!(explicit, CscMatrix::zeros(2, 2));
        assert_eq!(explicit.to_dense(), CscMatrix::zeros(2, 2).to_dense());

        let loose = SparseConfig::default().with_equality_tolerance(1e-6);
        assert!(m.approx_eq_with_config(&m.map_values(|v| v + 1e-9), &loose));
    }

    #[test]
    fn test_equality_is_reflexive_with_nan() {
        let m = CscMatrix::from_triplets(&[(0, 0, f64::NAN), (1, 1, 2.0)], 2, 2).unwrap();
        assert_eq!(m, m);
        assert_eq!(m, m.clone());
        assert_ne!(m, CscMatrix::diag(&[f64::NAN, 3.0]));
    }

    #[test]
    fn test_dense_config() {
        let dense = [0.5, 0.0, 1e-8, 2.0];
        let m = CscMatrix::from_dense(&dense, 2, 2, &SparseConfig::default()).unwrap();
        assert_eq!(m.nnz(), 3);
        let coarse = SparseConfig::with_sparsity_tolerance(1e-6);
        let m = CscMatrix::from_dense(&dense, 2, 2, &coarse).unwrap();
        assert_eq!(m.nnz(), 2);
        assert_eq!(m.density(), 0.5);
    }

    #[test]
    fn test_display() {
        let text = example().to_string();
        assert_eq!(text, "CscMatrix 3x2 nnz=4\n0 3\n22 0\n7 5\n");

        let wide = CscMatrix::zeros(25, 30).to_string();
        assert!(wide.lines().nth(1).unwrap().ends_with(" ..."));
        assert!(wide.ends_with("...\n"));
        assert_eq!(wide.lines().count(), 1 + MAX_ROWS_TO_PRINT + 1);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let m = example();
        let json = serde_json::to_string(&m).unwrap();
        assert!(json.contains("\"outer_starts\":[0,2,4]"));
        let back: CscMatrix = serde_json::from_str(&json).unwrap();
        assert_eq!(m, back);

        let bad = r#"{"rows":2,"cols":1,"values":[1.0],"inner_indices":[5],"outer_starts":[0,1]}"#;
        assert!(serde_json::from_str::<CscMatrix>(bad).is_err());
    }
}
