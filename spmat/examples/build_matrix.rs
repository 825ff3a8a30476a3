//! Build a sparse matrix from triplets and inspect its compressed layout

use spmat::{CompressedColumnBuilder, ConcatType, CscMatrix, Result, SparseConfig};
use std::time::Instant;

fn main() -> Result<()> {
    println!("Building a small matrix from unordered triplets...");

    let mut builder = CompressedColumnBuilder::new(3, 2);
    builder.extend([(0, 1, 3.0), (1, 0, 22.0), (2, 0, 7.0), (2, 1, 5.0)])?;
    let matrix = CscMatrix::try_from(builder.build()?)?;

    println!("{matrix}");
    println!("Compressed arrays:");
    println!("   values:        {:?}", matrix.values());
    println!("   inner_indices: {:?}", matrix.inner_indices());
    println!("   outer_starts:  {:?}", matrix.outer_starts());

    println!("\nPoint access:");
    for (row, col) in [(2, 1), (0, 0), (1, 0)] {
        println!("   matrix[{row}, {col}] = {}", matrix.get(row, col)?);
    }

    println!("\nLine extraction:");
    println!("   col 0 -> {:?}", matrix.col(0)?.to_dense());
    println!("   row 2 -> {:?}", matrix.row(2)?.to_dense());

    let stacked = matrix.concat(&matrix, ConcatType::Vertical)?;
    let wide = matrix.concat(&matrix, ConcatType::Horizontal)?;
    println!("\nVertical concat: {}x{}, nnz {}", stacked.rows(), stacked.cols(), stacked.nnz());
    println!("Horizontal concat: {}x{}, nnz {}", wide.rows(), wide.cols(), wide.nnz());

    // Dense round trip with the default tolerance
    let dense = matrix.to_dense();
    let back = CscMatrix::from_dense(&dense, 3, 2, &SparseConfig::default())?;
    println!("\nDense round trip equal: {}", back == matrix);

    // Larger build timing
    let size = 200_000;
    let triplets: Vec<_> = (0..size)
        .map(|i| ((i * 7919) % size, i % 1000, i as f64))
        .collect();
    let start = Instant::now();
    let large = CscMatrix::from_triplets(&triplets, size, 1000)?;
    println!(
        "\nBuilt {}x{} with {} entries in {:.3}ms",
        large.rows(),
        large.cols(),
        large.nnz(),
        start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(())
}
