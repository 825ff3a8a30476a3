//! Solver descriptors exchanged with numerical backends

use super::constants::solver;

/// Iterative sparse solvers a backend may provide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IterativeSolverType {
    /// Conjugate gradient, symmetric positive definite systems
    #[default]
    ConjugateGradient,
    /// Bi-conjugate gradient stabilized, general square systems
    BiCgStab,
    /// Conjugate gradient on the normal equations, rectangular systems
    LeastSquaresConjugateGradient,
    /// Restarted generalized minimal residual
    Gmres,
    /// Deflated GMRES
    Dgmres,
    /// Minimal residual, symmetric systems
    Minres,
}

impl core::fmt::Display for IterativeSolverType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            IterativeSolverType::ConjugateGradient => "ConjugateGradient",
            IterativeSolverType::BiCgStab => "BiCGSTAB",
            IterativeSolverType::LeastSquaresConjugateGradient => "LeastSquaresConjugateGradient",
            IterativeSolverType::Gmres => "GMRES",
            IterativeSolverType::Dgmres => "DGMRES",
            IterativeSolverType::Minres => "MINRES",
        };
        write!(f, "{name}")
    }
}

/// Direct sparse solvers a backend may provide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DirectSolverType {
    #[default]
    SparseLu,
    SparseQr,
    SimplicialLlt,
    SimplicialLdlt,
}

/// Parameters of an iterative solve
///
/// Unset limits fall back to backend defaults: `2 * cols` iterations and
/// machine epsilon as the relative residual target.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IterativeSolverInfo {
    /// Solver to run
    pub solver: IterativeSolverType,
    /// Iteration cap
    pub max_iterations: Option<usize>,
    /// Relative residual target
    pub tolerance: Option<f64>,
}

impl IterativeSolverInfo {
    /// Create info for a solver with default limits
    pub const fn new(solver: IterativeSolverType) -> Self {
        Self {
            solver,
            max_iterations: None,
            tolerance: None,
        }
    }

    /// Set the iteration cap
    pub const fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Set the relative residual target
    pub const fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    /// Iteration cap for a system with `unknowns` columns
    pub fn max_iterations_for(&self, unknowns: usize) -> usize {
        self.max_iterations
            .unwrap_or(solver::ITERATIONS_PER_UNKNOWN * unknowns)
    }

    /// Relative residual target
    pub fn tolerance_or_default(&self) -> f64 {
        self.tolerance.unwrap_or(solver::TOLERANCE)
    }
}

/// Raw outcome reported by an iterative kernel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveStatus {
    /// Whether the residual target was met
    pub success: bool,
    /// Iterations performed
    pub iterations: usize,
    /// Estimated relative residual at exit
    pub error: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iterative_info_defaults() {
        let info = IterativeSolverInfo::default();
        assert_eq!(info.solver, IterativeSolverType::ConjugateGradient);
        assert_eq!(info.max_iterations_for(3), 6);
        assert_eq!(info.tolerance_or_default(), f64::EPSILON);

        let info = IterativeSolverInfo::new(IterativeSolverType::BiCgStab)
            .with_max_iterations(1)
            .with_tolerance(1e-3);
        assert_eq!(info.max_iterations_for(3), 1);
        assert_eq!(info.tolerance_or_default(), 1e-3);
    }
}
