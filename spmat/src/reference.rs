//! Default implementation of [`LinearAlgebraBackend`]
//!
//! [`ReferenceBackend`] implements the sparse kernels directly on CSC
//! arrays. Krylov solvers live in [`solvers`]; direct factorizations and
//! least squares go through faer in [`direct`]. Production code can plug
//! in a tuned backend through the same trait.

mod direct;
mod solvers;

use spmat_core::{
    CscOut, CscRef, DirectSolverType, IterativeSolverInfo, IterativeSolverType,
    LinearAlgebraBackend, Result, SolveStatus, SpmatError,
};

/// Backend running the CSC kernels of this crate and faer factorizations
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceBackend;

/// Sequential writer into a caller-sized [`CscOut`]
struct OutWriter<'a> {
    out: CscOut<'a>,
    len: usize,
}

impl<'a> OutWriter<'a> {
    fn new(out: CscOut<'a>) -> Self {
        Self { out, len: 0 }
    }

    fn push(&mut self, row: usize, value: f64) -> Result<()> {
        if self.len >= self.out.values.len() || self.len >= self.out.inner_indices.len() {
            return Err(SpmatError::InvalidStructure("output buffer too small"));
        }
        self.out.inner_indices[self.len] = row;
        self.out.values[self.len] = value;
        self.len += 1;
        Ok(())
    }

    /// Record the start of column `col + 1`
    fn end_column(&mut self, col: usize) {
        self.out.outer_starts[col + 1] = self.len;
    }

    fn finish(self) -> usize {
        self.len
    }
}

fn require_square(a: CscRef<'_>) -> Result<()> {
    if a.rows != a.cols {
        return Err(SpmatError::ShapeMismatch {
            left: (a.rows, a.cols),
            right: (a.cols, a.rows),
        });
    }
    Ok(())
}

impl ReferenceBackend {
    /// Column-wise sorted merge of two equally shaped matrices, dropping zero results
    fn merge<F: Fn(f64, f64) -> f64>(
        a: CscRef<'_>,
        b: CscRef<'_>,
        out: CscOut<'_>,
        op: F,
    ) -> Result<usize> {
        let mut writer = OutWriter::new(out);
        writer.out.outer_starts[0] = 0;
        for col in 0..a.cols {
            let (a_rows, a_values) = a.column(col);
            let (b_rows, b_values) = b.column(col);
            let (mut i, mut j) = (0, 0);
            while i < a_rows.len() || j < b_rows.len() {
                let left = a_rows.get(i).copied().unwrap_or(usize::MAX);
                let right = b_rows.get(j).copied().unwrap_or(usize::MAX);
                let (row, value) = if left < right {
                    i += 1;
                    (left, op(a_values[i - 1], 0.0))
                } else if right < left {
                    j += 1;
                    (right, op(0.0, b_values[j - 1]))
                } else {
                    i += 1;
                    j += 1;
                    (left, op(a_values[i - 1], b_values[j - 1]))
                };
                if value != 0.0 {
                    writer.push(row, value)?;
                }
            }
            writer.end_column(col);
        }
        Ok(writer.finish())
    }
}

/// `out = a^T y`, `out` has length `a.cols`
pub(crate) fn transpose_mult_vector(a: CscRef<'_>, y: &[f64], out: &mut [f64]) {
    for (col, slot) in out.iter_mut().enumerate().take(a.cols) {
        let (rows, values) = a.column(col);
        *slot = rows.iter().zip(values).map(|(&r, &v)| v * y[r]).sum();
    }
}

/// `out = a x`, `out` has length `a.rows`
pub(crate) fn mult_vector(a: CscRef<'_>, x: &[f64], out: &mut [f64]) {
    out.iter_mut().for_each(|v| *v = 0.0);
    for (col, &xj) in x.iter().enumerate().take(a.cols) {
        let (rows, values) = a.column(col);
        for (&row, &value) in rows.iter().zip(values) {
            out[row] += value * xj;
        }
    }
}

impl LinearAlgebraBackend for ReferenceBackend {
    fn transpose(&self, a: CscRef<'_>, mut out: CscOut<'_>) -> Result<()> {
        let nnz = a.nnz();
        if out.outer_starts.len() != a.rows + 1 || out.values.len() < nnz {
            return Err(SpmatError::InvalidStructure("output buffer too small"));
        }

        // Count entries per row, then scatter column by column so rows of
        // the transpose come out sorted
        out.outer_starts.iter_mut().for_each(|s| *s = 0);
        for &row in a.inner_indices {
            out.outer_starts[row + 1] += 1;
        }
        for row in 0..a.rows {
            out.outer_starts[row + 1] += out.outer_starts[row];
        }

        let mut cursor = out.outer_starts[..a.rows].to_vec();
        for col in 0..a.cols {
            let (rows, values) = a.column(col);
            for (&row, &value) in rows.iter().zip(values) {
                out.inner_indices[cursor[row]] = col;
                out.values[cursor[row]] = value;
                cursor[row] += 1;
            }
        }
        Ok(())
    }

    fn add(&self, a: CscRef<'_>, b: CscRef<'_>, out: CscOut<'_>) -> Result<usize> {
        Self::merge(a, b, out, |x, y| x + y)
    }

    fn minus(&self, a: CscRef<'_>, b: CscRef<'_>, out: CscOut<'_>) -> Result<usize> {
        Self::merge(a, b, out, |x, y| x - y)
    }

    /// Column-by-column Gustavson product with a dense accumulator
    fn mult(&self, a: CscRef<'_>, b: CscRef<'_>, out: CscOut<'_>) -> Result<usize> {
        let mut writer = OutWriter::new(out);
        writer.out.outer_starts[0] = 0;

        let mut accumulator = vec![0.0; a.rows];
        let mut occupied = vec![false; a.rows];
        let mut touched = Vec::new();

        for col in 0..b.cols {
            let (b_rows, b_values) = b.column(col);
            for (&k, &bkj) in b_rows.iter().zip(b_values) {
                let (a_rows, a_values) = a.column(k);
                for (&i, &aik) in a_rows.iter().zip(a_values) {
                    if !occupied[i] {
                        occupied[i] = true;
                        touched.push(i);
                    }
                    accumulator[i] += aik * bkj;
                }
            }

            touched.sort_unstable();
            for &row in &touched {
                let value = accumulator[row];
                if value != 0.0 {
                    writer.push(row, value)?;
                }
                accumulator[row] = 0.0;
                occupied[row] = false;
            }
            touched.clear();
            writer.end_column(col);
        }
        Ok(writer.finish())
    }

    fn mult_vector(&self, a: CscRef<'_>, x: &[f64], out: &mut [f64]) -> Result<()> {
        mult_vector(a, x, out);
        Ok(())
    }

    fn norm(&self, a: CscRef<'_>) -> f64 {
        self.squared_norm(a).sqrt()
    }

    fn solve_iterative(
        &self,
        a: CscRef<'_>,
        rhs: &[f64],
        x: &mut [f64],
        info: &IterativeSolverInfo,
    ) -> Result<SolveStatus> {
        let max_iterations = info.max_iterations_for(a.cols);
        let tolerance = info.tolerance_or_default();
        match info.solver {
            IterativeSolverType::ConjugateGradient => {
                require_square(a)?;
                Ok(solvers::conjugate_gradient(a, rhs, x, max_iterations, tolerance))
            }
            IterativeSolverType::BiCgStab => {
                require_square(a)?;
                Ok(solvers::bicgstab(a, rhs, x, max_iterations, tolerance))
            }
            IterativeSolverType::LeastSquaresConjugateGradient => Ok(
                solvers::least_squares_conjugate_gradient(a, rhs, x, max_iterations, tolerance),
            ),
            IterativeSolverType::Gmres => Err(SpmatError::UnsupportedKernel("gmres")),
            IterativeSolverType::Dgmres => Err(SpmatError::UnsupportedKernel("dgmres")),
            IterativeSolverType::Minres => Err(SpmatError::UnsupportedKernel("minres")),
        }
    }

    fn solve_direct(
        &self,
        a: CscRef<'_>,
        rhs: &[f64],
        x: &mut [f64],
        solver: DirectSolverType,
    ) -> Result<()> {
        direct::solve(a, rhs, x, solver)
    }

    /// Sparse QR least squares, `a` must have at least as many rows as columns
    fn least_squares(&self, a: CscRef<'_>, rhs: &[f64], x: &mut [f64]) -> Result<()> {
        direct::least_squares(a, rhs, x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CscMatrix;

    #[test]
    fn test_merge_rejects_small_buffer() {
        let a = CscMatrix::identity(3);
        let mut outer = [0usize; 4];
        let mut inner = [0usize; 2];
        let mut values = [0.0; 2];
        let out = CscOut {
            outer_starts: &mut outer,
            inner_indices: &mut inner,
            values: &mut values,
        };
        assert!(matches!(
            ReferenceBackend.add(a.as_csc_ref(), a.as_csc_ref(), out),
            Err(SpmatError::InvalidStructure(_))
        ));
    }

    #[test]
    fn test_require_square() {
        assert!(require_square(CscMatrix::zeros(2, 2).as_csc_ref()).is_ok());
        assert_eq!(
            require_square(CscMatrix::zeros(2, 3).as_csc_ref()),
            Err(SpmatError::ShapeMismatch {
                left: (2, 3),
                right: (3, 2)
            })
        );
    }

    #[test]
    fn test_transpose_mult_vector() {
        let triplets = [(0, 1, 3.0), (1, 0, 22.0), (2, 0, 7.0), (2, 1, 5.0)];
        let a = CscMatrix::from_triplets(&triplets, 3, 2).unwrap();
        let mut out = [0.0; 2];
        transpose_mult_vector(a.as_csc_ref(), &[1.0, 1.0, 2.0], &mut out);
        assert_eq!(out, [36.0, 13.0]);
    }

    #[test]
    fn test_mult_drops_cancellation() {
        // [1 1] * [1; -1] = 0
        let a = CscMatrix::from_triplets(&[(0, 0, 1.0), (0, 1, 1.0)], 1, 2).unwrap();
        let b = CscMatrix::from_triplets(&[(0, 0, 1.0), (1, 0, -1.0)], 2, 1).unwrap();
        let c = a.mult(&b, &ReferenceBackend).unwrap();
        assert_eq!(c.nnz(), 0);
        assert_eq!(c.outer_starts(), &[0, 0]);
    }
}
