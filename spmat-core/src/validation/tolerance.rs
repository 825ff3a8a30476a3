//! Tolerant element-wise array comparison

/// Compare two value arrays element-wise within an absolute tolerance
///
/// Arrays of different length are never equal. A pair is rejected only
/// when its absolute difference exceeds `tolerance`, so NaN positions
/// compare equal and an array always equals itself.
pub fn values_equal(a: &[f64], b: &[f64], tolerance: f64) -> bool {
    a.len() == b.len()
        && !a.iter().zip(b).any(|(&x, &y)| {
            let diff = if x > y { x - y } else { y - x };
            diff > tolerance
        })
}

/// Compare two index arrays exactly
pub fn indices_equal(a: &[usize], b: &[usize]) -> bool {
    a == b
}
