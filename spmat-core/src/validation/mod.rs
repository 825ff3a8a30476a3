//! Validation utilities for compressed sparse data
//!
//! This module contains pure functions with no allocation: CSC invariant
//! checks, index bounds checks and tolerant array comparison.

pub mod bounds;
pub mod structure;
pub mod tolerance;

pub use bounds::{check_index, check_position, check_same_shape};
pub use structure::{validate_csc, validate_sparse_indices};
pub use tolerance::{indices_equal, values_equal};
