//! Unpreconditioned Krylov solvers
//!
//! All solvers start from the iterate in `x` and stop once the relative
//! residual drops to `tolerance` or `max_iterations` is reached. The
//! reported error is `|r| / |rhs|`; least squares CG measures the normal
//! equation residual `|a^T r| / |a^T rhs|` instead.

use spmat_core::{CscRef, SolveStatus};

use super::{mult_vector, transpose_mult_vector};
use crate::reduce::dot;

fn squared_norm(a: &[f64]) -> f64 {
    dot(a, a)
}

/// `r = rhs - a x`
fn residual(a: CscRef<'_>, rhs: &[f64], x: &[f64]) -> Vec<f64> {
    let mut r = vec![0.0; a.rows];
    mult_vector(a, x, &mut r);
    r.iter_mut().zip(rhs).for_each(|(ri, bi)| *ri = bi - *ri);
    r
}

fn status(residual_norm2: f64, rhs_norm2: f64, iterations: usize, tolerance: f64) -> SolveStatus {
    let error = (residual_norm2 / rhs_norm2).sqrt();
    SolveStatus {
        success: error <= tolerance,
        iterations,
        error,
    }
}

fn zero_rhs(x: &mut [f64]) -> SolveStatus {
    x.iter_mut().for_each(|v| *v = 0.0);
    SolveStatus {
        success: true,
        iterations: 0,
        error: 0.0,
    }
}

/// Conjugate gradient for symmetric positive definite `a`
pub(super) fn conjugate_gradient(
    a: CscRef<'_>,
    rhs: &[f64],
    x: &mut [f64],
    max_iterations: usize,
    tolerance: f64,
) -> SolveStatus {
    let rhs_norm2 = squared_norm(rhs);
    if rhs_norm2 == 0.0 {
        return zero_rhs(x);
    }
    let threshold = tolerance * tolerance * rhs_norm2;

    let mut r = residual(a, rhs, x);
    let mut residual_norm2 = squared_norm(&r);
    let mut p = r.clone();
    let mut ap = vec![0.0; a.rows];
    let mut abs_new = residual_norm2;
    let mut iterations = 0;

    while residual_norm2 >= threshold && iterations < max_iterations {
        mult_vector(a, &p, &mut ap);
        let alpha = abs_new / dot(&p, &ap);
        for i in 0..x.len() {
            x[i] += alpha * p[i];
            r[i] -= alpha * ap[i];
        }
        iterations += 1;

        residual_norm2 = squared_norm(&r);
        let abs_old = abs_new;
        abs_new = residual_norm2;
        let beta = abs_new / abs_old;
        for i in 0..p.len() {
            p[i] = r[i] + beta * p[i];
        }
    }

    status(residual_norm2, rhs_norm2, iterations, tolerance)
}

/// Bi-conjugate gradient stabilized for general square `a`
///
/// Restarts once from the current iterate when the shadow residual
/// becomes orthogonal to the residual.
pub(super) fn bicgstab(
    a: CscRef<'_>,
    rhs: &[f64],
    x: &mut [f64],
    max_iterations: usize,
    tolerance: f64,
) -> SolveStatus {
    let rhs_norm2 = squared_norm(rhs);
    if rhs_norm2 == 0.0 {
        return zero_rhs(x);
    }
    let threshold = tolerance * tolerance * rhs_norm2;
    let eps2 = f64::EPSILON * f64::EPSILON;
    let n = a.rows;

    let mut r = residual(a, rhs, x);
    let mut r0 = r.clone();
    let mut r0_norm2 = squared_norm(&r0);
    let (mut rho, mut alpha, mut w) = (1.0, 1.0, 1.0);
    let mut v = vec![0.0; n];
    let mut p = vec![0.0; n];
    let mut s = vec![0.0; n];
    let mut t = vec![0.0; n];
    let mut restarted = false;
    let mut iterations = 0;

    while squared_norm(&r) > threshold && iterations < max_iterations {
        let rho_old = rho;
        rho = dot(&r0, &r);
        if rho.abs() < eps2 * r0_norm2 {
            r = residual(a, rhs, x);
            r0.copy_from_slice(&r);
            r0_norm2 = squared_norm(&r0);
            rho = r0_norm2;
            if !restarted {
                restarted = true;
                iterations = 0;
            }
        }

        let beta = (rho / rho_old) * (alpha / w);
        for i in 0..n {
            p[i] = r[i] + beta * (p[i] - w * v[i]);
        }
        mult_vector(a, &p, &mut v);
        alpha = rho / dot(&r0, &v);
        for i in 0..n {
            s[i] = r[i] - alpha * v[i];
        }
        mult_vector(a, &s, &mut t);
        let t_norm2 = squared_norm(&t);
        w = if t_norm2 > 0.0 { dot(&t, &s) / t_norm2 } else { 0.0 };
        for i in 0..n {
            x[i] += alpha * p[i] + w * s[i];
            r[i] = s[i] - w * t[i];
        }
        iterations += 1;
    }

    status(squared_norm(&r), rhs_norm2, iterations, tolerance)
}

/// Conjugate gradient on the normal equations `a^T a x = a^T rhs`
pub(super) fn least_squares_conjugate_gradient(
    a: CscRef<'_>,
    rhs: &[f64],
    x: &mut [f64],
    max_iterations: usize,
    tolerance: f64,
) -> SolveStatus {
    let mut projected_rhs = vec![0.0; a.cols];
    transpose_mult_vector(a, rhs, &mut projected_rhs);
    let rhs_norm2 = squared_norm(&projected_rhs);
    if rhs_norm2 == 0.0 {
        return zero_rhs(x);
    }
    let threshold = tolerance * tolerance * rhs_norm2;

    let mut r = residual(a, rhs, x);
    let mut normal_r = vec![0.0; a.cols];
    transpose_mult_vector(a, &r, &mut normal_r);
    let mut residual_norm2 = squared_norm(&normal_r);
    let mut p = normal_r.clone();
    let mut ap = vec![0.0; a.rows];
    let mut abs_new = residual_norm2;
    let mut iterations = 0;

    while residual_norm2 >= threshold && iterations < max_iterations {
        mult_vector(a, &p, &mut ap);
        let alpha = abs_new / squared_norm(&ap);
        for i in 0..x.len() {
            x[i] += alpha * p[i];
        }
        for i in 0..r.len() {
            r[i] -= alpha * ap[i];
        }
        transpose_mult_vector(a, &r, &mut normal_r);
        iterations += 1;

        residual_norm2 = squared_norm(&normal_r);
        let abs_old = abs_new;
        abs_new = residual_norm2;
        let beta = abs_new / abs_old;
        for i in 0..p.len() {
            p[i] = normal_r[i] + beta * p[i];
        }
    }

    status(residual_norm2, rhs_norm2, iterations, tolerance)
}
