//! Triplet to compressed sparse column construction
//!
//! Unordered `(row, col, value)` triplets are bucketed by column with a
//! counting sort, then each column bucket is sorted by row. The result is
//! the CSC triple `(values, inner_indices, outer_starts)`.

use spmat_core::{validation::check_position, CscParts, Result, SpmatError};

/// A `(row, col, value)` coordinate entry
pub type Triplet = (usize, usize, f64);

/// Incremental collector of triplets for a fixed `rows x cols` shape
///
/// Positions are bounds-checked on `push`; duplicates are detected in
/// [`build`](CompressedColumnBuilder::build).
#[derive(Debug, Clone)]
pub struct CompressedColumnBuilder {
    rows: usize,
    cols: usize,
    triplets: Vec<Triplet>,
}

impl CompressedColumnBuilder {
    /// Create an empty builder
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::with_capacity(rows, cols, 0)
    }

    /// Create an empty builder with room for `capacity` triplets
    pub fn with_capacity(rows: usize, cols: usize, capacity: usize) -> Self {
        Self {
            rows,
            cols,
            triplets: Vec::with_capacity(capacity),
        }
    }

    /// Add one entry
    pub fn push(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        check_position(row, col, self.rows, self.cols)?;
        self.triplets.push((row, col, value));
        Ok(())
    }

    /// Add every entry of `triplets`, stopping at the first invalid one
    pub fn extend<I: IntoIterator<Item = Triplet>>(&mut self, triplets: I) -> Result<()> {
        for (row, col, value) in triplets {
            self.push(row, col, value)?;
        }
        Ok(())
    }

    /// Number of collected triplets
    pub fn len(&self) -> usize {
        self.triplets.len()
    }

    /// Whether no triplets were collected
    pub fn is_empty(&self) -> bool {
        self.triplets.is_empty()
    }

    /// Compress the collected triplets
    pub fn build(self) -> Result<CscParts> {
        build_csc(&self.triplets, self.rows, self.cols)
    }
}

/// Build the CSC triple of a `rows x cols` matrix from unordered triplets
///
/// Fails with `OutOfRange` for a position outside the shape and with
/// `DuplicateEntry` when two triplets share a position. Stored values are
/// kept as given, including explicit zeros.
pub fn build_csc(triplets: &[Triplet], rows: usize, cols: usize) -> Result<CscParts> {
    // Count per column, shifted by one so the prefix sum yields starts
    let mut outer_starts = vec![0usize; cols + 1];
    for &(row, col, _) in triplets {
        check_position(row, col, rows, cols)?;
        outer_starts[col + 1] += 1;
    }
    for col in 0..cols {
        outer_starts[col + 1] += outer_starts[col];
    }

    let nnz = triplets.len();
    let mut entries = vec![(0usize, 0.0f64); nnz];
    let mut cursor = outer_starts[..cols].to_vec();
    for &(row, col, value) in triplets {
        entries[cursor[col]] = (row, value);
        cursor[col] += 1;
    }

    for col in 0..cols {
        let run = &mut entries[outer_starts[col]..outer_starts[col + 1]];
        run.sort_unstable_by_key(|&(row, _)| row);
        if let Some(pair) = run.windows(2).find(|pair| pair[0].0 == pair[1].0) {
            return Err(SpmatError::DuplicateEntry {
                row: pair[0].0,
                col,
            });
        }
    }

    let (inner_indices, values) = entries.into_iter().unzip();
    Ok(CscParts {
        rows,
        cols,
        values,
        inner_indices,
        outer_starts,
    })
}
