//! Whole-matrix and per-line aggregates over stored values
//!
//! Aggregates only see stored entries. A column or row without stored
//! entries aggregates to `0.0`.

use super::CscMatrix;
use crate::{reduce::Reductions, SparseConfig};

impl CscMatrix {
    /// Reductions over stored values under `config`
    pub fn reduce_with<'a>(&'a self, config: &'a SparseConfig) -> Reductions<'a> {
        Reductions::new(&self.values, config)
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

    /// Number of stored values satisfying `predicate`
    pub fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(f64) -> bool + Sync + Send,
    {
        self.reduce_with(&SparseConfig::default()).count(predicate)
    }

    /// Sum of stored values in each column
    pub fn colwise_sum(&self) -> Vec<f64> {
        self.colwise(|run| run.iter().sum())
    }

    /// Smallest stored value in each column
    pub fn colwise_min(&self) -> Vec<f64> {
        self.colwise(|run| run.iter().copied().fold(f64::INFINITY, f64::min))
    }

    /// Largest stored value in each column
    pub fn colwise_max(&self) -> Vec<f64> {
        self.colwise(|run| run.iter().copied().fold(f64::NEG_INFINITY, f64::max))
    }

    /// Product of stored values in each column
    pub fn colwise_prod(&self) -> Vec<f64> {
        self.colwise(|run| run.iter().product())
    }

    /// Mean of stored values in each column
    pub fn colwise_mean(&self) -> Vec<f64> {
        self.colwise(|run| run.iter().sum::<f64>() / run.len() as f64)
    }

    /// Sum of stored values in each row
    pub fn rowwise_sum(&self) -> Vec<f64> {
        self.rowwise(0.0, |acc, v| acc + v)
    }

    /// Smallest stored value in each row
    pub fn rowwise_min(&self) -> Vec<f64> {
        self.rowwise(f64::INFINITY, f64::min)
    }

    /// Largest stored value in each row
    pub fn rowwise_max(&self) -> Vec<f64> {
        self.rowwise(f64::NEG_INFINITY, f64::max)
    }

    /// Product of stored values in each row
    pub fn rowwise_prod(&self) -> Vec<f64> {
        self.rowwise(1.0, |acc, v| acc * v)
    }

    /// Mean of stored values in each row
    pub fn rowwise_mean(&self) -> Vec<f64> {
        let counts = self.row_counts();
        self.rowwise_sum()
            .into_iter()
            .zip(counts)
            .map(|(sum, count)| if count == 0 { 0.0 } else { sum / count as f64 })
            .collect()
    }

    /// Apply `f` to every non-empty column run
    fn colwise<F: Fn(&[f64]) -> f64>(&self, f: F) -> Vec<f64> {
        (0..self.cols)
            .map(|col| {
                let (_, run) = self.column_run(col);
                if run.is_empty() {
                    0.0
                } else {
                    f(run)
                }
            })
            .collect()
    }

    /// Fold stored values into per-row accumulators in one pass
    fn rowwise<F: Fn(f64, f64) -> f64>(&self, init: f64, fold: F) -> Vec<f64> {
        let mut acc = vec![init; self.rows];
        for (&row, &value) in self.inner_indices.iter().zip(&self.values) {
            acc[row] = fold(acc[row], value);
        }
        let counts = self.row_counts();
        for (value, count) in acc.iter_mut().zip(counts) {
            if count == 0 {
                *value = 0.0;
            }
        }
        acc
    }

    fn row_counts(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.rows];
        for &row in &self.inner_indices {
            counts[row] += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::tests::example;

    #[test]
    fn test_whole_matrix() {
        let m = example();
        assert_eq!(m.sum(), 37.0);
        assert_eq!(m.min(), Some(3.0));
        assert_eq!(m.max(), Some(22.0));
        assert_eq!(m.prod(), Some(2310.0));
        assert_eq!(m.mean(), Some(9.25));
        assert_eq!(m.count(|v| v > 4.0), 3);

        let forked = SparseConfig::default().with_parallel_threshold(1);
        assert_eq!(m.reduce_with(&forked).sum(), 37.0);
        assert_eq!(m.reduce_with(&forked).squared_norm(), 567.0);

        let empty = CscMatrix::zeros(2, 2);
        assert_eq!(empty.sum(), 0.0);
        assert_eq!(empty.min(), None);
        assert_eq!(empty.mean(), None);
    }

    #[test]
    fn test_colwise() {
        let m = example();
        assert_eq!(m.colwise_sum(), vec![29.0, 8.0]);
        assert_eq!(m.colwise_min(), vec![7.0, 3.0]);
        assert_eq!(m.colwise_max(), vec![22.0, 5.0]);
        assert_eq!(m.colwise_prod(), vec![154.0, 15.0]);
        assert_eq!(m.colwise_mean(), vec![14.5, 4.0]);
    }

    #[test]
    fn test_rowwise() {
        let m = example();
        assert_eq!(m.rowwise_sum(), vec![3.0, 22.0, 12.0]);
        assert_eq!(m.rowwise_min(), vec![3.0, 22.0, 5.0]);
        assert_eq!(m.rowwise_max(), vec![3.0, 22.0, 7.0]);
        assert_eq!(m.rowwise_prod(), vec![3.0, 22.0, 35.0]);
        assert_eq!(m.rowwise_mean(), vec![3.0, 22.0, 6.0]);
    }

    #[test]
    fn test_empty_lines_aggregate_to_zero() {
        let m = CscMatrix::from_triplets(&[(0, 0, -2.0)], 2, 2).unwrap();
        assert_eq!(m.colwise_min(), vec![-2.0, 0.0]);
        assert_eq!(m.colwise_prod(), vec![-2.0, 0.0]);
        assert_eq!(m.rowwise_max(), vec![-2.0, 0.0]);
        assert_eq!(m.rowwise_mean(), vec![-2.0, 0.0]);
    }

    #[test]
    fn test_rowwise_matches_row_extraction() {
        let m = example();
        let expected: Vec<f64> = (0..m.rows())
            .map(|r| m.row(r).unwrap().min().unwrap_or(0.0))
            .collect();
        assert_eq!(m.rowwise_min(), expected);
    }
}
