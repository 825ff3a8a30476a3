//! SPMAT - Compressed Sparse Column matrix and sparse vector storage
//!
//! This library provides sparse `f64` storage for numerical linear algebra:
//! construction from unordered triplets, point and line access, structural
//! mutation of sparse vectors, concatenation, and tolerant conversion to and
//! from column-major dense buffers. Heavy kernels are delegated to a
//! [`LinearAlgebraBackend`].
//!
//! ## Architecture
//!
//! - **spmat-core**: error type, traits, CSC views, solver descriptors and
//!   pure validation (no allocation required)
//! - **spmat**: the owned storage types, builder, reductions and a pure Rust
//!   [`ReferenceBackend`]
//!
//! ## Quick Start
//!
//! ```rust
//! use spmat::{CscMatrix, ConcatType, ReferenceBackend};
//!
//! fn example() -> spmat::Result<()> {
//!     let triplets = [(0, 1, 3.0), (1, 0, 22.0), (2, 0, 7.0), (2, 1, 5.0)];
//!     let matrix = CscMatrix::from_triplets(&triplets, 3, 2)?;
//!     assert_eq!(matrix.get(2, 1)?, 5.0);
//!
//!     let mut column = matrix.col(0)?;
//!     column.set(0, 1.0)?;
//!
//!     let wide = matrix.concat(&matrix, ConcatType::Horizontal)?;
//!     let product = wide.transpose(&ReferenceBackend)?.mult(&matrix, &ReferenceBackend)?;
//!     assert_eq!(product.shape(), (4, 2));
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub use spmat_core::{
    // Core traits
    LinearAlgebraBackend, MatrixOperations, SparseMatrix,
    // Format definitions
    ConcatType, CscOut, CscParts, CscRef, DirectSolverType, IterativeSolverInfo,
    IterativeSolverType, SolveStatus,
    // Error handling
    ErrorCategory, Result, SpmatError,
    // Validation utilities
    indices_equal, validate_csc, validate_sparse_indices, values_equal,
};

pub mod bridge;
pub mod builder;
pub mod config;
pub mod matrix;
pub mod random;
pub mod reduce;
pub mod reference;
pub mod vector;

pub use builder::{build_csc, CompressedColumnBuilder, Triplet};
pub use config::SparseConfig;
pub use matrix::{CscMatrix, IterativeSolverResult};
pub use reduce::Reductions;
pub use reference::ReferenceBackend;
pub use vector::SparseVector;
