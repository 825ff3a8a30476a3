//! Direct factorizations backed by faer
//!
//! LU, QR and LLT run faer's sparse solvers on a copy of the CSC arrays.
//! LDLT runs faer's dense Bunch-Kaufman factorization. When faer rejects a
//! factorization (structurally singular input, a non positive definite
//! matrix for LLT) `x` is filled with NaN instead of returning an error.

use faer::linalg::solvers::{SpSolver, SpSolverLstsq};
use faer::sparse::SparseColMat;
use faer::{MatMut, Side};
use spmat_core::{CscRef, DirectSolverType, Result, SpmatError};

use super::require_square;
use crate::bridge::csc_to_dense;

/// Copy a CSC view into a faer sparse matrix
fn sparse_copy(a: CscRef<'_>) -> Result<SparseColMat<usize, f64>> {
    let triplets: Vec<(usize, usize, f64)> = (0..a.cols)
        .flat_map(|col| {
            let (rows, values) = a.column(col);
            rows.iter()
                .zip(values)
                .map(move |(&row, &value)| (row, col, value))
        })
        .collect();
    SparseColMat::try_new_from_triplets(a.rows, a.cols, &triplets)
        .map_err(|_| SpmatError::InvalidStructure("entry outside the matrix shape"))
}

fn check_lengths(a: CscRef<'_>, rhs: &[f64], x: &[f64]) -> Result<()> {
    if rhs.len() != a.rows {
        return Err(SpmatError::LengthMismatch {
            expected: a.rows,
            found: rhs.len(),
        });
    }
    if x.len() != a.cols {
        return Err(SpmatError::LengthMismatch {
            expected: a.cols,
            found: x.len(),
        });
    }
    Ok(())
}

fn fill_nan(x: &mut [f64]) {
    x.iter_mut().for_each(|v| *v = f64::NAN);
}

/// View a slice as a single column
fn as_column(values: &mut [f64]) -> MatMut<'_, f64> {
    let len = values.len();
    faer::mat::from_column_major_slice_mut::<f64>(values, len, 1)
}

/// Copy `rhs` into `x` and solve in place
fn solve_with<S: SpSolver<f64>>(solver: &S, rhs: &[f64], x: &mut [f64]) {
    x.copy_from_slice(rhs);
    solver.solve_in_place(as_column(x));
}

pub(super) fn solve(
    a: CscRef<'_>,
    rhs: &[f64],
    x: &mut [f64],
    solver: DirectSolverType,
) -> Result<()> {
    check_lengths(a, rhs, x)?;
    match solver {
        DirectSolverType::SparseLu => lu(a, rhs, x),
        DirectSolverType::SparseQr => least_squares(a, rhs, x),
        DirectSolverType::SimplicialLlt => llt(a, rhs, x),
        DirectSolverType::SimplicialLdlt => ldlt(a, rhs, x),
    }
}

fn lu(a: CscRef<'_>, rhs: &[f64], x: &mut [f64]) -> Result<()> {
    require_square(a)?;
    match sparse_copy(a)?.as_ref().sp_lu() {
        Ok(lu) => solve_with(&lu, rhs, x),
        Err(_) => fill_nan(x),
    }
    Ok(())
}

/// Cholesky on the lower triangle
fn llt(a: CscRef<'_>, rhs: &[f64], x: &mut [f64]) -> Result<()> {
    require_square(a)?;
    match sparse_copy(a)?.as_ref().sp_cholesky(Side::Lower) {
        Ok(llt) => solve_with(&llt, rhs, x),
        Err(_) => fill_nan(x),
    }
    Ok(())
}

/// Symmetric indefinite `L D L^T` on the lower triangle
fn ldlt(a: CscRef<'_>, rhs: &[f64], x: &mut [f64]) -> Result<()> {
    require_square(a)?;
    let dense = csc_to_dense(a);
    let ldlt =
        faer::mat::from_column_major_slice::<f64>(&dense, a.rows, a.cols).lblt(Side::Lower);
    solve_with(&ldlt, rhs, x);
    Ok(())
}

/// Minimize `|a x - rhs|` with a sparse QR, `a` must have `rows >= cols`
pub(super) fn least_squares(a: CscRef<'_>, rhs: &[f64], x: &mut [f64]) -> Result<()> {
    check_lengths(a, rhs, x)?;
    if a.rows < a.cols {
        return Err(SpmatError::ShapeMismatch {
            left: (a.rows, a.cols),
            right: (rhs.len(), 1),
        });
    }
    match sparse_copy(a)?.as_ref().sp_qr() {
        Ok(qr) => {
            let mut work = rhs.to_vec();
            qr.solve_lstsq_in_place(as_column(&mut work));
            x.copy_from_slice(&work[..a.cols]);
        }
        Err(_) => fill_nan(x),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CscMatrix;

    fn assert_close(a: &[f64], b: &[f64]) {
        for (x, y) in a.iter().zip(b) {
            assert!((x - y).abs() < 1e-12, "{x} != {y}");
        }
    }

    /// `[[4, 2], [2, 3]]`
    fn spd() -> CscMatrix {
        CscMatrix::from_triplets(&[(0, 0, 4.0), (1, 0, 2.0), (0, 1, 2.0), (1, 1, 3.0)], 2, 2)
            .unwrap()
    }

    #[test]
    fn test_lu_needs_row_swap() {
        let a = CscMatrix::from_triplets(&[(1, 0, 1.0), (0, 1, 1.0)], 2, 2).unwrap();
        let mut x = [0.0; 2];
        solve(a.as_csc_ref(), &[3.0, 4.0], &mut x, DirectSolverType::SparseLu).unwrap();
        assert_close(&x, &[4.0, 3.0]);
    }

    #[test]
    fn test_symmetric_solvers() {
        let a = spd();
        for solver in [
            DirectSolverType::SparseLu,
            DirectSolverType::SimplicialLlt,
            DirectSolverType::SimplicialLdlt,
        ] {
            let mut x = [0.0; 2];
            solve(a.as_csc_ref(), &[8.0, 7.0], &mut x, solver).unwrap();
            assert_close(&x, &[1.25, 1.5]);
        }
    }

    #[test]
    fn test_ldlt_three_by_three() {
        // [[4, 2, 0], [2, 5, 1], [0, 1, 3]] with x = (1, -1, 2)
        let a = CscMatrix::from_triplets(
            &[
                (0, 0, 4.0),
                (1, 0, 2.0),
                (0, 1, 2.0),
                (1, 1, 5.0),
                (2, 1, 1.0),
                (1, 2, 1.0),
                (2, 2, 3.0),
            ],
            3,
            3,
        )
        .unwrap();
        let mut x = [0.0; 3];
        solve(a.as_csc_ref(), &[2.0, -1.0, 5.0], &mut x, DirectSolverType::SimplicialLdlt)
            .unwrap();
        assert_close(&x, &[1.0, -1.0, 2.0]);
    }

    #[test]
    fn test_qr_overdetermined() {
        // Rows (1, 0), (0, 1), (1, 1) with consistent rhs for x = (2, 3)
        let triplets = [(0, 0, 1.0), (2, 0, 1.0), (1, 1, 1.0), (2, 1, 1.0)];
        let a = CscMatrix::from_triplets(&triplets, 3, 2).unwrap();
        let mut x = [0.0; 2];
        least_squares(a.as_csc_ref(), &[2.0, 3.0, 5.0], &mut x).unwrap();
        assert_close(&x, &[2.0, 3.0]);
    }

    #[test]
    fn test_shape_and_length_checks() {
        let wide = CscMatrix::zeros(2, 3);
        let mut x = [0.0; 3];
        assert!(matches!(
            least_squares(wide.as_csc_ref(), &[1.0, 1.0], &mut x),
            Err(SpmatError::ShapeMismatch { .. })
        ));
        assert!(matches!(
            solve(wide.as_csc_ref(), &[1.0, 1.0], &mut x, DirectSolverType::SparseLu),
            Err(SpmatError::ShapeMismatch { .. })
        ));

        let mut short = [0.0; 1];
        assert_eq!(
            solve(spd().as_csc_ref(), &[1.0, 1.0], &mut short, DirectSolverType::SparseLu),
            Err(SpmatError::LengthMismatch {
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_rejected_factorization_fills_nan() {
        // Negative definite, so Cholesky fails
        let a = CscMatrix::diag(&[-1.0, -2.0]);
        let mut x = [0.0; 2];
        solve(a.as_csc_ref(), &[1.0, 1.0], &mut x, DirectSolverType::SimplicialLlt).unwrap();
        assert!(x.iter().all(|v| v.is_nan()));
    }
}
