//! Numerical backend seam
//!
//! Heavy kernels are delegated to an implementation of
//! [`LinearAlgebraBackend`]. Every method takes borrowed CSC views and
//! writes into caller-sized output slices, so the trait needs no allocator.

use crate::error::Result;
use crate::format::{CscOut, CscRef, DirectSolverType, IterativeSolverInfo, SolveStatus};

/// Kernels a sparse storage engine hands off to a numerical library
///
/// Operands have already been shape-checked by the caller. Output buffers
/// for sparse results are sized to an upper bound of the result nnz; the
/// kernel returns the number of entries it actually wrote.
pub trait LinearAlgebraBackend {
    /// Write `a^T` into `out`, which holds exactly `a.nnz()` entries
    fn transpose(&self, a: CscRef<'_>, out: CscOut<'_>) -> Result<()>;

    /// Write `a + b` into `out` and return the nnz written
    fn add(&self, a: CscRef<'_>, b: CscRef<'_>, out: CscOut<'_>) -> Result<usize>;

    /// Write `a - b` into `out` and return the nnz written
    fn minus(&self, a: CscRef<'_>, b: CscRef<'_>, out: CscOut<'_>) -> Result<usize>;

    /// Write the sparse product `a * b` into `out` and return the nnz written
    fn mult(&self, a: CscRef<'_>, b: CscRef<'_>, out: CscOut<'_>) -> Result<usize>;

    /// Write the dense product `a * x` into `out`
    fn mult_vector(&self, a: CscRef<'_>, x: &[f64], out: &mut [f64]) -> Result<()>;

    /// Frobenius norm
    fn norm(&self, a: CscRef<'_>) -> f64;

    /// Squared Frobenius norm
    fn squared_norm(&self, a: CscRef<'_>) -> f64 {
        a.values.iter().map(|v| v * v).sum()
    }

    /// Solve `a x = rhs` iteratively, `x` holds the initial guess on entry
    fn solve_iterative(
        &self,
        a: CscRef<'_>,
        rhs: &[f64],
        x: &mut [f64],
        info: &IterativeSolverInfo,
    ) -> Result<SolveStatus>;

    /// Solve the square system `a x = rhs` with a direct factorization
    ///
    /// Numerical failure is only visible as non-finite values in `x`.
    fn solve_direct(
        &self,
        a: CscRef<'_>,
        rhs: &[f64],
        x: &mut [f64],
        solver: DirectSolverType,
    ) -> Result<()>;

    /// Minimize `|a x - rhs|` for a possibly rectangular `a`
    fn least_squares(&self, a: CscRef<'_>, rhs: &[f64], x: &mut [f64]) -> Result<()>;
}
