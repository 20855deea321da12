//! # Dot Product Kernel
//!
//! The dot product computes the sum of products of corresponding elements in
//! two vectors:
//!
//! `dot(a, b, n) = Σ a[i] * b[i]` for `i` in `0..n`
//!
//! ## Variants
//!
//! - **original**: compiler-generated sequential loop, the rounding reference
//! - **x86_64-asm**: hand-written scalar loop, one element per iteration
//! - **x86_64-sse2-asm**: hand-written packed loop, two f64 lanes per iteration
//! - **c-original**: the sequential loop built by the system C compiler
//!
//! The packed variant keeps two partial sums (even and odd indices), so its
//! rounding differs from the sequential variants in the last bits.

pub mod bench;
pub mod code;
pub mod test;
pub mod workload;

pub use code::*;
pub use workload::{Workload, WorkloadGenerator, VALUE_HIGH, VALUE_LOW};

/// Relative tolerance between a variant and the reference
pub const RELATIVE_TOLERANCE: f64 = 1e-9;

/// Sizes exercised by [`verify`], odd lengths included
pub const VERIFY_SIZES: [usize; 6] = [0, 1, 2, 8, 17, 1000];

/// Relative difference, falling back to absolute near zero
pub fn relative_error(value: f64, reference: f64) -> f64 {
    let diff = (value - reference).abs();
    if reference.abs() > 1e-12 {
        diff / reference.abs()
    } else {
        diff
    }
}

/// Check every available variant against the reference on random inputs.
pub fn verify(generator: &mut WorkloadGenerator) -> Result<(), String> {
    let variants = code::available_variants();
    let reference = variants
        .iter()
        .find(|v| v.name == REFERENCE_VARIANT)
        .ok_or("No 'original' variant found for reference")?;

    for &n in &VERIFY_SIZES {
        let w = generator.generate(n);
        let expected = (reference.function)(&w.a, &w.b, n);

        for variant in &variants {
            let result = (variant.function)(&w.a, &w.b, n);
            let error = relative_error(result, expected);
            if error > RELATIVE_TOLERANCE {
                return Err(format!(
                    "Variant '{}' failed verification at n = {}. Expected {}, got {}, relative error {:e}",
                    variant.name, n, expected, result, error
                ));
            }
        }
    }

    Ok(())
}
