//! Insert and overwrite entries of a sparse vector

use spmat::{Result, SparseVector};

fn main() -> Result<()> {
    let mut vector = SparseVector::from_entries([(0, 1.0), (3, 9.0), (5, 2.0), (19, 20.0)], 20)?;
    println!("Initial:\n{vector}");

    vector.set(9, 220.0)?;
    println!("After set(9, 220):");
    println!("   indices: {:?}", vector.indices());
    println!("   values:  {:?}", vector.values());

    // Writing zero keeps the entry stored
    vector.set(3, 0.0)?;
    println!("After set(3, 0): nnz = {}", vector.nnz());
    let stored_zeros = vector.count(|v| v == 0.0);
    println!("   stored zeros: {stored_zeros}");

    vector.replace(|v| if v > 10.0 { v / 10.0 } else { v });
    println!("After replace: {:?}", vector.values());

    println!("\nReductions over stored values:");
    println!("   sum  = {}", vector.sum());
    println!("   norm = {:.4}", vector.norm());
    if let Some(max) = vector.max() {
        println!("   max  = {max}");
    }

    match vector.set(20, 1.0) {
        Ok(()) => println!("unexpected success"),
        Err(err) => println!("\nOut of range write rejected: {err}"),
    }
    Ok(())
}
