//! Abstract interfaces for sparse storage
//!
//! This module defines the trait seams of the workspace: format-agnostic
//! matrix access and the numerical backend boundary.

pub mod backend;
pub mod matrix;

pub use backend::LinearAlgebraBackend;
pub use matrix::SparseMatrix;
#[cfg(feature = "alloc")]
pub use matrix::MatrixOperations;
