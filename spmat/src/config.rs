//! Tolerance and threading configuration

use spmat_core::format::{
    DEFAULT_PARALLEL_THRESHOLD, DEFAULT_SPARSITY_TOLERANCE, EQUALITY_TOLERANCE,
};

/// Tunables shared by conversion, comparison and reduction code
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SparseConfig {
    /// Dense values with magnitude at or below this are not stored
    pub sparsity_tolerance: f64,
    /// Absolute tolerance for value comparison
    pub equality_tolerance: f64,
    /// Minimum slice length before reductions run on the rayon pool
    pub parallel_threshold: usize,
}

impl SparseConfig {
    /// Create config with a sparsity tolerance
    pub fn with_sparsity_tolerance(sparsity_tolerance: f64) -> Self {
        Self {
            sparsity_tolerance,
            ..Self::default()
        }
    }

    /// Set the equality tolerance
    pub fn with_equality_tolerance(mut self, equality_tolerance: f64) -> Self {
        self.equality_tolerance = equality_tolerance;
        self
    }

    /// Set the parallel threshold
    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }

    /// Config that keeps every non-zero value exactly
    pub fn exact() -> Self {
        Self::with_sparsity_tolerance(0.0)
    }

    /// Get the sparsity tolerance
    pub fn sparsity_tolerance(&self) -> f64 {
        self.sparsity_tolerance
    }

    /// Get the equality tolerance
    pub fn equality_tolerance(&self) -> f64 {
        self.equality_tolerance
    }

    /// Whether a reduction over `len` values should fork
    pub fn is_parallel(&self, len: usize) -> bool {
        len >= self.parallel_threshold
    }
}

impl Default for SparseConfig {
    fn default() -> Self {
        Self {
            sparsity_tolerance: DEFAULT_SPARSITY_TOLERANCE,
            equality_tolerance: EQUALITY_TOLERANCE,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}
