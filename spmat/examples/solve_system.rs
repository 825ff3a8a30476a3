//! Solve a random diagonally dominant system with the reference backend

use rand::{rngs::StdRng, SeedableRng};
use spmat::{
    random, CscMatrix, DirectSolverType, IterativeSolverInfo, IterativeSolverType,
    ReferenceBackend, Result,
};
use std::time::Instant;

fn main() -> Result<()> {
    let backend = ReferenceBackend;
    let mut rng = StdRng::seed_from_u64(2024);
    let n = 400;

    // B^T B + n I is symmetric positive definite
    let b = random::sparse_matrix(n, n, 0.01, -1.0..1.0, &mut rng);
    let shift = CscMatrix::diag(&vec![n as f64; n]);
    let a = b.transpose(&backend)?.mult(&b, &backend)?.add(&shift, &backend)?;
    println!("System: {}x{}, nnz {}", a.rows(), a.cols(), a.nnz());

    let expected = random::sparse_vector(n, 0.5, -5.0..5.0, &mut rng).to_dense();
    let rhs = a.mult_vector(&expected, &backend)?;

    for solver in [
        IterativeSolverType::ConjugateGradient,
        IterativeSolverType::BiCgStab,
        IterativeSolverType::LeastSquaresConjugateGradient,
    ] {
        let info = IterativeSolverInfo::new(solver).with_tolerance(1e-10);
        let start = Instant::now();
        let result = a.iterative_solve(&rhs, &info, &backend)?;
        println!(
            "{solver}: success={} iterations={} error={:.3e} in {:.3}ms",
            result.success,
            result.iterations,
            result.error,
            start.elapsed().as_secs_f64() * 1000.0
        );
    }

    let start = Instant::now();
    let x = a.direct_solve(&rhs, DirectSolverType::SparseLu, &backend)?;
    println!(
        "SparseLU: relative error {:.3e} in {:.3}ms",
        a.relative_error(&rhs, &x, &backend)?,
        start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(())
}
