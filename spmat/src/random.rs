//! Random sparse factories
//!
//! `floor(size * density)` distinct positions are drawn uniformly, with
//! values uniform in `range`. The generator is passed in explicitly so
//! results are reproducible from a seed.

use std::ops::Range;

use hashbrown::HashSet;
use rand::Rng;

use crate::{builder::Triplet, CscMatrix, SparseVector};

/// Number of entries a `size`-element structure of the given density holds
fn target_nnz(size: usize, density: f64) -> usize {
    let density = density.clamp(0.0, 1.0);
    (size as f64 * density).floor() as usize
}

/// Random `rows x cols` matrix with `floor(rows * cols * density)` stored entries
pub fn sparse_matrix<R: Rng + ?Sized>(
    rows: usize,
    cols: usize,
    density: f64,
    range: Range<f64>,
    rng: &mut R,
) -> CscMatrix {
    let nnz = target_nnz(rows * cols, density);
    let mut visited = HashSet::with_capacity(nnz);
    let mut triplets: Vec<Triplet> = Vec::with_capacity(nnz);

    while triplets.len() < nnz {
        let position = (rng.gen_range(0..rows), rng.gen_range(0..cols));
        if visited.insert(position) {
            triplets.push((position.0, position.1, sample(&range, rng)));
        }
    }

    // Positions are distinct and in range, so a column-major sort is a valid layout
    triplets.sort_unstable_by_key(|&(row, col, _)| (col, row));
    let mut outer_starts = vec![0usize; cols + 1];
    for &(_, col, _) in &triplets {
        outer_starts[col + 1] += 1;
    }
    for col in 0..cols {
        outer_starts[col + 1] += outer_starts[col];
    }
    let (inner_indices, values) = triplets.into_iter().map(|(row, _, value)| (row, value)).unzip();
    CscMatrix::from_parts_unchecked(rows, cols, values, inner_indices, outer_starts)
}

/// Random vector of length `length` with `floor(length * density)` stored entries
pub fn sparse_vector<R: Rng + ?Sized>(
    length: usize,
    density: f64,
    range: Range<f64>,
    rng: &mut R,
) -> SparseVector {
    let nnz = target_nnz(length, density);
    let mut visited = HashSet::with_capacity(nnz);
    let mut entries = Vec::with_capacity(nnz);

    while entries.len() < nnz {
        let index = rng.gen_range(0..length);
        if visited.insert(index) {
            entries.push((index, sample(&range, rng)));
        }
    }

    entries.sort_unstable_by_key(|&(index, _)| index);
    let (indices, values) = entries.into_iter().unzip();
    SparseVector::from_parts_unchecked(length, indices, values)
}

/// Uniform sample from `range`, `range.start` when the range is empty
fn sample<R: Rng + ?Sized>(range: &Range<f64>, rng: &mut R) -> f64 {
    if range.is_empty() {
        return range.start;
    }
    rng.gen_range(range.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use spmat_core::{validate_csc, validate_sparse_indices};

    #[test]
    fn test_matrix_density_and_range() {
        let mut rng = StdRng::seed_from_u64(1);
        let m = sparse_matrix(10, 8, 0.25, 2.0..3.0, &mut rng);
        assert_eq!(m.shape(), (10, 8));
        assert_eq!(m.nnz(), 20);
        validate_csc(m.as_csc_ref()).unwrap();
        assert!(m.values().iter().all(|v| (2.0..3.0).contains(v)));
    }

    #[test]
    fn test_seed_reproducible() {
        let a = sparse_matrix(6, 6, 0.5, -1.0..1.0, &mut StdRng::seed_from_u64(99));
        let b = sparse_matrix(6, 6, 0.5, -1.0..1.0, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_full_and_empty_density() {
        let mut rng = StdRng::seed_from_u64(2);
        assert_eq!(sparse_matrix(3, 3, 1.0, 1.0..2.0, &mut rng).nnz(), 9);
        assert_eq!(sparse_matrix(3, 3, 0.0, 1.0..2.0, &mut rng).nnz(), 0);
        assert_eq!(sparse_matrix(0, 5, 0.5, 1.0..2.0, &mut rng).nnz(), 0);
        assert_eq!(sparse_vector(4, 2.0, 1.0..2.0, &mut rng).nnz(), 4);
    }

    #[test]
    fn test_vector() {
        let mut rng = StdRng::seed_from_u64(4);
        let v = sparse_vector(50, 0.1, 0.0..1.0, &mut rng);
        assert_eq!(v.len(), 50);
        assert_eq!(v.nnz(), 5);
        validate_sparse_indices(v.indices(), v.len()).unwrap();

        let constant = sparse_vector(5, 0.4, 7.0..7.0, &mut rng);
        assert_eq!(constant.values(), &[7.0, 7.0]);
    }
}
