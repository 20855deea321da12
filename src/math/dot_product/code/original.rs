//! Reference implementation of the dot product.
//!
//! A plain sequential fold in strict index order. Its rounding behavior is the
//! reference every other kernel is compared against.

use super::Real;

/// Compute `Σ a[i] * b[i]` for `i` in `0..n`.
///
/// Accumulates left to right into a single accumulator, one multiply and one
/// add per element. Kept out of line so benchmarks time a real call.
///
/// # Panics
/// Panics if `n` exceeds the length of either input.
///
/// # Example
/// ```
/// use dot_scaling::math::dot_product::dot_product_original;
///
/// let a = [1.0, 2.0, 3.0];
/// let b = [4.0, 5.0, 6.0];
/// assert_eq!(dot_product_original(&a, &b, 3), 32.0);
/// ```
#[inline(never)]
pub fn dot_product_original<T: Real>(a: &[T], b: &[T], n: usize) -> T {
    assert!(
        n <= a.len() && n <= b.len(),
        "n = {} exceeds input lengths ({}, {})",
        n,
        a.len(),
        b.len()
    );

    a[..n]
        .iter()
        .zip(&b[..n])
        .fold(T::ZERO, |s, (&x, &y)| s + x * y)
}
