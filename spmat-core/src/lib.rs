#![no_std]

//! SPMAT Core - Compressed Sparse Column definitions
//!
//! This crate provides the error type, traits, format types and pure
//! validation functions shared by sparse storage implementations

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod error;
pub mod format;
pub mod traits;
pub mod validation;

pub use error::*;
pub use format::*;
pub use traits::*;
pub use validation::{
    indices_equal, validate_csc, validate_sparse_indices, values_equal,
};
