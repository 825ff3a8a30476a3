//! Sparse vector of fixed logical length
//!
//! A [`SparseVector`] stores the non-zero entries of a length-`n` vector
//! as two parallel arrays: strictly increasing `indices` and their
//! `values`. Absent indices read as `0.0`.

use std::fmt;

use spmat_core::{
    format::constants::MAX_ELEMENTS_TO_PRINT, validation::check_index, indices_equal,
    validate_sparse_indices, values_equal, Result, SpmatError,
};

use crate::{bridge, reduce::Reductions, SparseConfig};

/// Sparse vector with sorted `(index, value)` storage
///
/// Reductions (`sum`, `min`, ...) operate on stored values only and run
/// under [`SparseConfig::default`]; [`reduce_with`](Self::reduce_with)
/// takes an explicit config.
#[derive(Debug, Clone, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "VectorParts", into = "VectorParts")
)]
pub struct SparseVector {
    length: usize,
    indices: Vec<usize>,
    values: Vec<f64>,
}

/// Serialized form of a [`SparseVector`]
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct VectorParts {
    length: usize,
    indices: Vec<usize>,
    values: Vec<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<VectorParts> for SparseVector {
    type Error = SpmatError;

    fn try_from(parts: VectorParts) -> Result<Self> {
        SparseVector::from_parts(parts.length, parts.indices, parts.values)
    }
}

#[cfg(feature = "serde")]
impl From<SparseVector> for VectorParts {
    fn from(vector: SparseVector) -> Self {
        VectorParts {
            length: vector.length,
            indices: vector.indices,
            values: vector.values,
        }
    }
}

impl SparseVector {
    /// Create an all-zero vector of the given length
    pub fn new(length: usize) -> Self {
        Self {
            length,
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Create a vector from unordered `(index, value)` pairs
    ///
    /// Pairs are sorted by index. Fails with `OutOfRange` for an index
    /// `>= length` and `DuplicateIndex` for a repeated index. Values are
    /// stored as given, including zeros.
    pub fn from_entries<I>(entries: I, length: usize) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, f64)>,
    {
        let mut entries: Vec<(usize, f64)> = entries.into_iter().collect();
        for &(index, _) in &entries {
            check_index(index, length)?;
        }
        entries.sort_unstable_by_key(|&(index, _)| index);
        if let Some(pair) = entries.windows(2).find(|pair| pair[0].0 == pair[1].0) {
            return Err(SpmatError::DuplicateIndex { index: pair[0].0 });
        }

        let (indices, values) = entries.into_iter().unzip();
        Ok(Self {
            length,
            indices,
            values,
        })
    }

    /// Create a vector from already sorted arrays, validating them
    pub fn from_parts(length: usize, indices: Vec<usize>, values: Vec<f64>) -> Result<Self> {
        if indices.len() != values.len() {
            return Err(SpmatError::LengthMismatch {
                expected: indices.len(),
                found: values.len(),
            });
        }
        validate_sparse_indices(&indices, length)?;
        Ok(Self {
            length,
            indices,
            values,
        })
    }

    /// Create from arrays the caller has already validated
    pub(crate) fn from_parts_unchecked(
        length: usize,
        indices: Vec<usize>,
        values: Vec<f64>,
    ) -> Self {
        debug_assert_eq!(indices.len(), values.len());
        Self {
            length,
            indices,
            values,
        }
    }

    /// Create a vector from dense data, dropping values within the configured tolerance
    pub fn from_dense(dense: &[f64], config: &SparseConfig) -> Self {
        bridge::vector_to_sparse(dense, config.sparsity_tolerance)
    }

    /// Logical length
    pub fn len(&self) -> usize {
        self.length
    }

    /// Whether the logical length is zero
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Number of stored entries
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// Stored indices, strictly increasing
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Stored values, aligned with [`indices`](Self::indices)
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterate over stored `(index, value)` pairs in index order
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// Consume the vector into `(length, indices, values)`
    pub fn into_parts(self) -> (usize, Vec<usize>, Vec<f64>) {
        (self.length, self.indices, self.values)
    }

    /// Read the value at `index`, `0.0` when not stored
    pub fn get(&self, index: usize) -> Result<f64> {
        check_index(index, self.length)?;
        Ok(match self.indices.binary_search(&index) {
            Ok(position) => self.values[position],
            Err(_) => 0.0,
        })
    }

    /// Write `value` at `index`
    ///
    /// Overwrites a stored entry in place or inserts a new one keeping
    /// indices sorted. Every written value is stored, zeros included.
    pub fn set(&mut self, index: usize, value: f64) -> Result<()> {
        check_index(index, self.length)?;

        let nnz = self.indices.len();
        if nnz == 0 {
            self.indices.push(index);
            self.values.push(value);
            return Ok(());
        }

        let position = self.indices.partition_point(|&i| i < index);
        if position < nnz && self.indices[position] == index {
            self.values[position] = value;
            return Ok(());
        }

        if nnz >= self.length {
            return Err(SpmatError::CapacityExceeded {
                length: self.length,
            });
        }

        if position == nnz {
            self.indices.push(index);
            self.values.push(value);
        } else {
            self.indices.insert(position, index);
            self.values.insert(position, value);
        }
        Ok(())
    }

    /// Apply `f` to every stored value in place
    ///
    /// The index structure is left untouched, so results equal to zero stay
    /// stored.
    pub fn replace<F: FnMut(f64) -> f64>(&mut self, mut f: F) {
        self.values.iter_mut().for_each(|v| *v = f(*v));
    }

    /// Number of stored values satisfying `predicate`
    pub fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(f64) -> bool + Sync + Send,
    {
        self.reduce_with(&SparseConfig::default()).count(predicate)
    }

    /// Reductions over stored values under `config`
    pub fn reduce_with<'a>(&'a self, config: &'a SparseConfig) -> Reductions<'a> {
        Reductions::new(&self.values, config)
    }

    /// Expand into a dense buffer of length `len()`
    pub fn to_dense(&self) -> Vec<f64> {
        let mut dense = vec![0.0; self.length];
        for (index, value) in self.iter() {
            dense[index] = value;
        }
        dense
    }

    /// Element-wise sum
    pub fn add(&self, other: &SparseVector) -> Result<SparseVector> {
        self.merge(other, |a, b| a + b)
    }

    /// Element-wise difference
    pub fn minus(&self, other: &SparseVector) -> Result<SparseVector> {
        self.merge(other, |a, b| a - b)
    }

    /// Inner product
    pub fn dot(&self, other: &SparseVector) -> Result<f64> {
        self.check_same_length(other)?;

        let (mut i, mut j) = (0, 0);
        let mut acc = 0.0;
        while i < self.nnz() && j < other.nnz() {
            match self.indices[i].cmp(&other.indices[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    acc += self.values[i] * other.values[j];
                    i += 1;
                    j += 1;
                }
            }
        }
        Ok(acc)
    }

    /// Multiply every stored value, keeping the structure
    pub fn scale(&self, factor: f64) -> SparseVector {
        let mut scaled = self.clone();
        scaled.scale_in_place(factor);
        scaled
    }

    /// Multiply every stored value in place, keeping the structure
    pub fn scale_in_place(&mut self, factor: f64) {
        self.values.iter_mut().for_each(|v| *v *= factor);
    }

    /// Sum of stored values
    pub fn sum(&self) -> f64 {
        self.reduce_with(&SparseConfig::default()).sum()
    }

    /// Smallest stored value
    pub fn min(&self) -> Option<f64> {
        self.reduce_with(&SparseConfig::default()).min()
    }

    /// Largest stored value
    pub fn max(&self) -> Option<f64> {
        self.reduce_with(&SparseConfig::default()).max()
    }

    /// Product of stored values
    pub fn prod(&self) -> Option<f64> {
        self.reduce_with(&SparseConfig::default()).prod()
    }

    /// Mean of stored values
    pub fn mean(&self) -> Option<f64> {
        self.reduce_with(&SparseConfig::default()).mean()
    }

    /// Euclidean norm
    pub fn norm(&self) -> f64 {
        self.reduce_with(&SparseConfig::default()).norm()
    }

    /// Squared Euclidean norm
    pub fn squared_norm(&self) -> f64 {
        self.reduce_with(&SparseConfig::default()).squared_norm()
    }

    /// Sum of absolute values
    pub fn lp1_norm(&self) -> f64 {
        self.reduce_with(&SparseConfig::default()).lp1_norm()
    }

    /// Largest absolute value
    pub fn lp_inf_norm(&self) -> f64 {
        self.reduce_with(&SparseConfig::default()).lp_inf_norm()
    }

    /// Structural equality with an explicit value tolerance
    pub fn approx_eq(&self, other: &SparseVector, tolerance: f64) -> bool {
        self.length == other.length
            && indices_equal(&self.indices, &other.indices)
            && values_equal(&self.values, &other.values, tolerance)
    }

    /// Structural equality within the config's equality tolerance
    pub fn approx_eq_with_config(&self, other: &SparseVector, config: &SparseConfig) -> bool {
        self.approx_eq(other, config.equality_tolerance())
    }

    fn check_same_length(&self, other: &SparseVector) -> Result<()> {
        if self.length != other.length {
            return Err(SpmatError::ShapeMismatch {
                left: (self.length, 1),
                right: (other.length, 1),
            });
        }
        Ok(())
    }

    /// Sorted union of both index sets, combining values with `op`
    ///
    /// Results equal to zero are not stored.
    fn merge<F: Fn(f64, f64) -> f64>(&self, other: &SparseVector, op: F) -> Result<SparseVector> {
        self.check_same_length(other)?;

        let capacity = self.nnz() + other.nnz();
        let mut indices = Vec::with_capacity(capacity);
        let mut values = Vec::with_capacity(capacity);
        let mut push = |index: usize, value: f64| {
            if value != 0.0 {
                indices.push(index);
                values.push(value);
            }
        };

        let (mut i, mut j) = (0, 0);
        while i < self.nnz() || j < other.nnz() {
            let left = self.indices.get(i).copied().unwrap_or(usize::MAX);
            let right = other.indices.get(j).copied().unwrap_or(usize::MAX);
            if left < right {
                push(left, op(self.values[i], 0.0));
                i += 1;
            } else if right < left {
                push(right, op(0.0, other.values[j]));
                j += 1;
            } else {
                push(left, op(self.values[i], other.values[j]));
                i += 1;
                j += 1;
            }
        }

        Ok(SparseVector::from_parts_unchecked(self.length, indices, values))
    }
}

/// Structural equality: same length, same indices, values within `1e-11`
impl PartialEq for SparseVector {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq_with_config(other, &SparseConfig::default())
    }
}

impl fmt::Display for SparseVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SparseVector[{}] nnz={}", self.length, self.nnz())?;
        for (index, value) in self.iter().take(MAX_ELEMENTS_TO_PRINT) {
            writeln!(f, "({index}, {value})")?;
        }
        if self.nnz() > MAX_ELEMENTS_TO_PRINT {
            writeln!(f, "...")?;
        }
        Ok(())
    }
}
