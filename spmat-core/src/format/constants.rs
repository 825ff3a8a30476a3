//! Numeric and presentation constants

/// Values with magnitude at or below this are dropped when densifying to sparse
pub const DEFAULT_SPARSITY_TOLERANCE: f64 = 1e-12;

/// Absolute tolerance used by element-wise array equality
pub const EQUALITY_TOLERANCE: f64 = 1e-11;

/// Minimum slice length before reductions fork onto the thread pool
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Maximum number of rows shown by matrix `Display`
pub const MAX_ROWS_TO_PRINT: usize = 20;

/// Maximum number of columns shown by matrix `Display`
pub const MAX_COLS_TO_PRINT: usize = 20;

/// Maximum number of elements shown by vector `Display`
pub const MAX_ELEMENTS_TO_PRINT: usize = 20;

/// Iterative solver defaults, applied when the caller leaves them unset
pub mod solver {
    /// Iteration cap as a multiple of the system size
    pub const ITERATIONS_PER_UNKNOWN: usize = 2;

    /// Relative residual tolerance
    pub const TOLERANCE: f64 = f64::EPSILON;
}
