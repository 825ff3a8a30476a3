//! Error types for sparse storage operations

/// Errors that can occur while building, accessing or combining sparse structures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpmatError {
    /// Operand dimensions are incompatible for the requested operation
    ShapeMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },
    /// Index outside `[0, bound)`
    OutOfRange { index: usize, bound: usize },
    /// A sparse vector would need more than `length` distinct entries
    CapacityExceeded { length: usize },
    /// Two triplets address the same position
    DuplicateEntry { row: usize, col: usize },
    /// Two sparse vector entries share an index
    DuplicateIndex { index: usize },
    /// A buffer does not have the length its shape requires
    LengthMismatch { expected: usize, found: usize },
    /// Compressed arrays violate a CSC invariant
    InvalidStructure(&'static str),
    /// The numerical backend does not provide the requested kernel
    UnsupportedKernel(&'static str),
}

/// Coarse grouping of [`SpmatError`] variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Dimension or index problems caused by the caller
    Shape,
    /// Sparse vector capacity exhausted
    Capacity,
    /// Malformed compressed data
    Structure,
    /// Backend limitation
    Backend,
}

impl SpmatError {
    /// Get the category this error belongs to
    pub const fn category(&self) -> ErrorCategory {
        match self {
            SpmatError::ShapeMismatch { .. }
            | SpmatError::OutOfRange { .. }
            | SpmatError::LengthMismatch { .. } => ErrorCategory::Shape,
            SpmatError::CapacityExceeded { .. } => ErrorCategory::Capacity,
            SpmatError::DuplicateEntry { .. }
            | SpmatError::DuplicateIndex { .. }
            | SpmatError::InvalidStructure(_) => ErrorCategory::Structure,
            SpmatError::UnsupportedKernel(_) => ErrorCategory::Backend,
        }
    }
}

impl core::fmt::Display for SpmatError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SpmatError::ShapeMismatch { left, right } => write!(
                f,
                "Shape mismatch: {}x{} is incompatible with {}x{}",
                left.0, left.1, right.0, right.1
            ),
            SpmatError::OutOfRange { index, bound } => {
                write!(f, "Index {index} out of range [0, {bound})")
            }
            SpmatError::CapacityExceeded { length } => {
                write!(f, "Sparse vector of length {length} cannot hold another entry")
            }
            SpmatError::DuplicateEntry { row, col } => {
                write!(f, "Duplicate entry at ({row}, {col})")
            }
            SpmatError::DuplicateIndex { index } => {
                write!(f, "Duplicate vector index {index}")
            }
            SpmatError::LengthMismatch { expected, found } => {
                write!(f, "Length mismatch: expected {expected}, found {found}")
            }
            SpmatError::InvalidStructure(msg) => write!(f, "Invalid CSC structure: {msg}"),
            SpmatError::UnsupportedKernel(kernel) => {
                write!(f, "Backend does not support kernel: {kernel}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SpmatError {}

/// Result type for sparse storage operations
pub type Result<T> = core::result::Result<T, SpmatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category() {
        let shape = SpmatError::ShapeMismatch {
            left: (2, 3),
            right: (3, 3),
        };
        assert_eq!(shape.category(), ErrorCategory::Shape);
        assert_eq!(
            SpmatError::CapacityExceeded { length: 4 }.category(),
            ErrorCategory::Capacity
        );
        assert_eq!(
            SpmatError::DuplicateEntry { row: 0, col: 0 }.category(),
            ErrorCategory::Structure
        );
        assert_eq!(
            SpmatError::DuplicateIndex { index: 3 }.category(),
            ErrorCategory::Structure
        );
        assert_eq!(
            SpmatError::UnsupportedKernel("gmres").category(),
            ErrorCategory::Backend
        );
    }
}
