//! Reductions over stored values
//!
//! Every reduction runs sequentially below the configured parallel
//! threshold and as a rayon fork-join at or above it. Reductions that have
//! no value for an empty input return `None`.

use rayon::prelude::*;

use crate::SparseConfig;

/// Sum of all values
pub fn sum(values: &[f64], config: &SparseConfig) -> f64 {
    if config.is_parallel(values.len()) {
        values.par_iter().sum()
    } else {
        values.iter().sum()
    }
}

/// Smallest value
pub fn min(values: &[f64], config: &SparseConfig) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let result = if config.is_parallel(values.len()) {
        values
            .par_iter()
            .copied()
            .reduce(|| f64::INFINITY, f64::min)
    } else {
        values.iter().copied().fold(f64::INFINITY, f64::min)
    };
    Some(result)
}

/// Largest value
pub fn max(values: &[f64], config: &SparseConfig) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let result = if config.is_parallel(values.len()) {
        values
            .par_iter()
            .copied()
            .reduce(|| f64::NEG_INFINITY, f64::max)
    } else {
        values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    };
    Some(result)
}

/// Product of all values
pub fn prod(values: &[f64], config: &SparseConfig) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let result = if config.is_parallel(values.len()) {
        values.par_iter().product()
    } else {
        values.iter().product()
    };
    Some(result)
}

/// Arithmetic mean
pub fn mean(values: &[f64], config: &SparseConfig) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(sum(values, config) / values.len() as f64)
}

/// Sum of squares
pub fn squared_norm(values: &[f64], config: &SparseConfig) -> f64 {
    if config.is_parallel(values.len()) {
        values.par_iter().map(|v| v * v).sum()
    } else {
        values.iter().map(|v| v * v).sum()
    }
}

/// Euclidean norm
pub fn norm(values: &[f64], config: &SparseConfig) -> f64 {
    squared_norm(values, config).sqrt()
}

/// Sum of absolute values
pub fn lp1_norm(values: &[f64], config: &SparseConfig) -> f64 {
    if config.is_parallel(values.len()) {
        values.par_iter().map(|v| v.abs()).sum()
    } else {
        values.iter().map(|v| v.abs()).sum()
    }
}

/// Largest absolute value, `0.0` for an empty input
pub fn lp_inf_norm(values: &[f64], config: &SparseConfig) -> f64 {
    if config.is_parallel(values.len()) {
        values.par_iter().map(|v| v.abs()).reduce(|| 0.0, f64::max)
    } else {
        values.iter().map(|v| v.abs()).fold(0.0, f64::max)
    }
}

/// Number of values satisfying `predicate`
pub fn count<F>(values: &[f64], config: &SparseConfig, predicate: F) -> usize
where
    F: Fn(f64) -> bool + Sync + Send,
{
    if config.is_parallel(values.len()) {
        values.par_iter().filter(|&&v| predicate(v)).count()
    } else {
        values.iter().filter(|&&v| predicate(v)).count()
    }
}

/// Dense inner product of two equally long slices
pub(crate) fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Stored values of a vector or matrix paired with the config its reductions run under
#[derive(Debug, Clone, Copy)]
pub struct Reductions<'a> {
    values: &'a [f64],
    config: &'a SparseConfig,
}

impl<'a> Reductions<'a> {
    pub(crate) fn new(values: &'a [f64], config: &'a SparseConfig) -> Self {
        Self { values, config }
    }

    /// Sum of stored values
    pub fn sum(&self) -> f64 {
        sum(self.values, self.config)
    }

    /// Smallest stored value
    pub fn min(&self) -> Option<f64> {
        min(self.values, self.config)
    }

    /// Largest stored value
    pub fn max(&self) -> Option<f64> {
        max(self.values, self.config)
    }

    /// Product of stored values
    pub fn prod(&self) -> Option<f64> {
        prod(self.values, self.config)
    }

    /// Mean of stored values
    pub fn mean(&self) -> Option<f64> {
        mean(self.values, self.config)
    }

    /// Sum of squares
    pub fn squared_norm(&self) -> f64 {
        squared_norm(self.values, self.config)
    }

    /// Euclidean norm
    pub fn norm(&self) -> f64 {
        norm(self.values, self.config)
    }

    /// Sum of absolute values
    pub fn lp1_norm(&self) -> f64 {
        lp1_norm(self.values, self.config)
    }

    /// Largest absolute value
    pub fn lp_inf_norm(&self) -> f64 {
        lp_inf_norm(self.values, self.config)
    }

    /// Number of stored values satisfying `predicate`
    pub fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(f64) -> bool + Sync + Send,
    {
        count(self.values, self.config, predicate)
    }
}
