//! Horizontal and vertical concatenation across the CSC boundary

use spmat_core::{ConcatType, Result, SpmatError};

use super::CscMatrix;

impl CscMatrix {
    /// Concatenate `other` to the right of (`Horizontal`) or below (`Vertical`) `self`
    pub fn concat(&self, other: &CscMatrix, concat_type: ConcatType) -> Result<CscMatrix> {
        match concat_type {
            ConcatType::Horizontal => self.concat_horizontal(other),
            ConcatType::Vertical => self.concat_vertical(other),
        }
    }

    /// `[self | other]`
    ///
    /// Columns of `other` follow those of `self`; their starts shift by `self.nnz()`.
    fn concat_horizontal(&self, other: &CscMatrix) -> Result<CscMatrix> {
        if self.rows != other.rows {
            return Err(SpmatError::ShapeMismatch {
                left: self.shape(),
                right: other.shape(),
            });
        }

        let nnz = self.nnz();
        let mut values = Vec::with_capacity(nnz + other.nnz());
        values.extend_from_slice(&self.values);
        values.extend_from_slice(&other.values);

        let mut inner_indices = Vec::with_capacity(nnz + other.nnz());
        inner_indices.extend_from_slice(&self.inner_indices);
        inner_indices.extend_from_slice(&other.inner_indices);

        let mut outer_starts = Vec::with_capacity(self.cols + other.cols + 1);
        outer_starts.extend_from_slice(&self.outer_starts);
        outer_starts.extend(other.outer_starts[1..].iter().map(|&start| start + nnz));

        Ok(CscMatrix::from_parts_unchecked(
            self.rows,
            self.cols + other.cols,
            values,
            inner_indices,
            outer_starts,
        ))
    }

    /// `[self; other]`
    ///
    /// Each result column is the run of `self` followed by the run of
    /// `other` with rows shifted by `self.rows`.
    fn concat_vertical(&self, other: &CscMatrix) -> Result<CscMatrix> {
        if self.cols != other.cols {
            return Err(SpmatError::ShapeMismatch {
                left: self.shape(),
                right: other.shape(),
            });
        }

        let total = self.nnz() + other.nnz();
        let mut values = Vec::with_capacity(total);
        let mut inner_indices = Vec::with_capacity(total);
        let outer_starts = self
            .outer_starts
            .iter()
            .zip(&other.outer_starts)
            .map(|(a, b)| a + b)
            .collect();

        for col in 0..self.cols {
            let (top_rows, top_values) = self.column_run(col);
            inner_indices.extend_from_slice(top_rows);
            values.extend_from_slice(top_values);

            let (bottom_rows, bottom_values) = other.column_run(col);
            inner_indices.extend(bottom_rows.iter().map(|&row| row + self.rows));
            values.extend_from_slice(bottom_values);
        }

        Ok(CscMatrix::from_parts_unchecked(
            self.rows + other.rows,
            self.cols,
            values,
            inner_indices,
            outer_starts,
        ))
    }
}
