//! Format definitions for compressed sparse column data
//!
//! This module contains pure data structure definitions: the CSC views and
//! owned parts, solver descriptors and shared constants.

pub mod constants;
pub mod layout;
pub mod solver;

pub use constants::{DEFAULT_PARALLEL_THRESHOLD, DEFAULT_SPARSITY_TOLERANCE, EQUALITY_TOLERANCE};
#[cfg(feature = "alloc")]
pub use layout::CscParts;
pub use layout::{ConcatType, CscOut, CscRef};
pub use solver::{DirectSolverType, IterativeSolverInfo, IterativeSolverType, SolveStatus};
