//! Operators delegated to a [`LinearAlgebraBackend`]
//!
//! Each operator checks shapes, sizes the output buffers, hands the CSC
//! arrays to the backend and wraps what comes back. Sparse results are
//! re-validated before they are returned.

use spmat_core::{
    validation::check_same_shape, CscOut, DirectSolverType, IterativeSolverInfo,
    IterativeSolverType, LinearAlgebraBackend, Result, SpmatError,
};

use super::CscMatrix;

/// Outcome of an iterative solve
///
/// Non-convergence is reported through `success`, not as an error.
#[derive(Debug, Clone, PartialEq)]
pub struct IterativeSolverResult {
    /// Final iterate
    pub x: Vec<f64>,
    /// Iterations performed
    pub iterations: usize,
    /// Estimated relative residual at exit
    pub error: f64,
    /// Solver that produced the result
    pub solver: IterativeSolverType,
    /// Whether the requested tolerance was reached
    pub success: bool,
}

/// Owned output buffers for a sparse kernel
struct SparseOutput {
    outer_starts: Vec<usize>,
    inner_indices: Vec<usize>,
    values: Vec<f64>,
}

impl SparseOutput {
    fn new(cols: usize, capacity: usize) -> Self {
        Self {
            outer_starts: vec![0; cols + 1],
            inner_indices: vec![0; capacity],
            values: vec![0.0; capacity],
        }
    }

    fn as_out(&mut self) -> CscOut<'_> {
        CscOut {
            outer_starts: &mut self.outer_starts,
            inner_indices: &mut self.inner_indices,
            values: &mut self.values,
        }
    }

    /// Trim to the `nnz` entries the kernel wrote and validate the result
    fn finish(mut self, rows: usize, cols: usize, nnz: usize) -> Result<CscMatrix> {
        if nnz > self.values.len() {
            return Err(SpmatError::InvalidStructure(
                "backend wrote more entries than the output buffer holds",
            ));
        }
        self.inner_indices.truncate(nnz);
        self.values.truncate(nnz);
        CscMatrix::from_parts(rows, cols, self.values, self.inner_indices, self.outer_starts)
    }
}

impl CscMatrix {
    /// `self^T`
    pub fn transpose<B: LinearAlgebraBackend>(&self, backend: &B) -> Result<CscMatrix> {
        let mut out = SparseOutput::new(self.rows, self.nnz());
        backend.transpose(self.as_csc_ref(), out.as_out())?;
        out.finish(self.cols, self.rows, self.nnz())
    }

    /// `self + other`
    pub fn add<B: LinearAlgebraBackend>(
        &self,
        other: &CscMatrix,
        backend: &B,
    ) -> Result<CscMatrix> {
        check_same_shape(self.shape(), other.shape())?;
        let mut out = SparseOutput::new(self.cols, self.nnz() + other.nnz());
        let nnz = backend.add(self.as_csc_ref(), other.as_csc_ref(), out.as_out())?;
        out.finish(self.rows, self.cols, nnz)
    }

    /// `self - other`
    pub fn minus<B: LinearAlgebraBackend>(
        &self,
        other: &CscMatrix,
        backend: &B,
    ) -> Result<CscMatrix> {
        check_same_shape(self.shape(), other.shape())?;
        let mut out = SparseOutput::new(self.cols, self.nnz() + other.nnz());
        let nnz = backend.minus(self.as_csc_ref(), other.as_csc_ref(), out.as_out())?;
        out.finish(self.rows, self.cols, nnz)
    }

    /// Sparse product `self * other`
    pub fn mult<B: LinearAlgebraBackend>(
        &self,
        other: &CscMatrix,
        backend: &B,
    ) -> Result<CscMatrix> {
        if self.cols != other.rows {
            return Err(SpmatError::ShapeMismatch {
                left: self.shape(),
                right: other.shape(),
            });
        }
        let mut out = SparseOutput::new(other.cols, self.product_nnz_bound(other));
        let nnz = backend.mult(self.as_csc_ref(), other.as_csc_ref(), out.as_out())?;
        out.finish(self.rows, other.cols, nnz)
    }

    /// Upper bound on the nnz of `self * other`
    ///
    /// Column `j` of the product has at most the sum of the column counts
    /// of `self` selected by column `j` of `other`, capped at `rows`.
    fn product_nnz_bound(&self, other: &CscMatrix) -> usize {
        (0..other.cols)
            .map(|col| {
                let (inner, _) = other.column_run(col);
                inner
                    .iter()
                    .map(|&k| self.outer_starts[k + 1] - self.outer_starts[k])
                    .sum::<usize>()
                    .min(self.rows)
            })
            .sum()
    }

    /// Dense product `self * x`
    pub fn mult_vector<B: LinearAlgebraBackend>(
        &self,
        x: &[f64],
        backend: &B,
    ) -> Result<Vec<f64>> {
        if x.len() != self.cols {
            return Err(SpmatError::ShapeMismatch {
                left: self.shape(),
                right: (x.len(), 1),
            });
        }
        let mut out = vec![0.0; self.rows];
        backend.mult_vector(self.as_csc_ref(), x, &mut out)?;
        Ok(out)
    }

    /// Frobenius norm
    pub fn norm<B: LinearAlgebraBackend>(&self, backend: &B) -> f64 {
        backend.norm(self.as_csc_ref())
    }

    /// Squared Frobenius norm
    pub fn squared_norm<B: LinearAlgebraBackend>(&self, backend: &B) -> f64 {
        backend.squared_norm(self.as_csc_ref())
    }

    /// Solve `self x = rhs` iteratively starting from `x = 0`
    pub fn iterative_solve<B: LinearAlgebraBackend>(
        &self,
        rhs: &[f64],
        info: &IterativeSolverInfo,
        backend: &B,
    ) -> Result<IterativeSolverResult> {
        self.check_rhs(rhs)?;
        let mut x = vec![0.0; self.cols];
        let status = backend.solve_iterative(self.as_csc_ref(), rhs, &mut x, info)?;
        Ok(IterativeSolverResult {
            x,
            iterations: status.iterations,
            error: status.error,
            solver: info.solver,
            success: status.success,
        })
    }

    /// Solve `self x = rhs` with a direct factorization
    ///
    /// A singular system shows up as non-finite entries in the result.
    pub fn direct_solve<B: LinearAlgebraBackend>(
        &self,
        rhs: &[f64],
        solver: DirectSolverType,
        backend: &B,
    ) -> Result<Vec<f64>> {
        self.check_rhs(rhs)?;
        let mut x = vec![0.0; self.cols];
        backend.solve_direct(self.as_csc_ref(), rhs, &mut x, solver)?;
        Ok(x)
    }

    /// Least squares solution of `self x ≈ rhs`
    ///
    /// The reference backend needs `rows >= cols`.
    pub fn least_squares<B: LinearAlgebraBackend>(
        &self,
        rhs: &[f64],
        backend: &B,
    ) -> Result<Vec<f64>> {
        self.check_rhs(rhs)?;
        let mut x = vec![0.0; self.cols];
        backend.least_squares(self.as_csc_ref(), rhs, &mut x)?;
        Ok(x)
    }

    /// `|self x - rhs|`
    pub fn absolute_error<B: LinearAlgebraBackend>(
        &self,
        rhs: &[f64],
        x: &[f64],
        backend: &B,
    ) -> Result<f64> {
        self.check_rhs(rhs)?;
        let ax = self.mult_vector(x, backend)?;
        Ok(ax
            .iter()
            .zip(rhs)
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt())
    }

    /// `|self x - rhs| / |rhs|`
    pub fn relative_error<B: LinearAlgebraBackend>(
        &self,
        rhs: &[f64],
        x: &[f64],
        backend: &B,
    ) -> Result<f64> {
        let absolute = self.absolute_error(rhs, x, backend)?;
        let rhs_norm = rhs.iter().map(|v| v * v).sum::<f64>().sqrt();
        Ok(absolute / rhs_norm)
    }

    fn check_rhs(&self, rhs: &[f64]) -> Result<()> {
        if rhs.len() != self.rows {
            return Err(SpmatError::ShapeMismatch {
                left: self.shape(),
                right: (rhs.len(), 1),
            });
        }
        Ok(())
    }
}
