//! Dot product implementations.
//!
//! This module contains all implementation variants of the dot product kernel.
//! Every variant shares the [`DotProductFn`] signature so the driver can swap
//! them freely.

pub mod c_impl;
mod original;
#[cfg(target_arch = "x86_64")]
mod x86_64_asm;
#[cfg(target_arch = "x86_64")]
mod x86_64_sse2_asm;

pub use c_impl::{dot_product_c_original, C_IMPL_AVAILABLE};
pub use original::dot_product_original;
#[cfg(target_arch = "x86_64")]
pub use x86_64_asm::dot_product_x86_64_asm;
#[cfg(target_arch = "x86_64")]
pub use x86_64_sse2_asm::dot_product_x86_64_sse2_asm;

use std::ops::{Add, Mul};

use crate::utils::VariantInfo;

/// Floating-point element type accepted by the generic reference kernel.
pub trait Real: Copy + Add<Output = Self> + Mul<Output = Self> {
    const ZERO: Self;
}

impl Real for f32 {
    const ZERO: Self = 0.0;
}

impl Real for f64 {
    const ZERO: Self = 0.0;
}

/// Kernel signature: borrowed inputs and the element count to use
pub type DotProductFn = fn(&[f64], &[f64], usize) -> f64;

/// Name of the reference variant other variants are checked against
pub const REFERENCE_VARIANT: &str = "original";

/// Get all available variants for the current target
pub fn available_variants() -> Vec<VariantInfo<DotProductFn>> {
    let mut variants: Vec<VariantInfo<DotProductFn>> = vec![VariantInfo {
        name: REFERENCE_VARIANT,
        description: "Compiler-generated sequential loop (strict index order)",
        function: dot_product_original::<f64>,
    }];

    #[cfg(target_arch = "x86_64")]
    {
        variants.push(VariantInfo {
            name: "x86_64-asm",
            description: "Hand-written scalar SSE2 loop, one element per iteration",
            function: dot_product_x86_64_asm,
        });
        variants.push(VariantInfo {
            name: "x86_64-sse2-asm",
            description: "Hand-written packed SSE2 loop, two f64 lanes per iteration",
            function: dot_product_x86_64_sse2_asm,
        });
    }

    if C_IMPL_AVAILABLE {
        variants.push(VariantInfo {
            name: "c-original",
            description: "C sequential loop built by the system C compiler",
            function: dot_product_c_original,
        });
    }

    variants
}

/// Look up a variant by name
pub fn find_variant(name: &str) -> Option<VariantInfo<DotProductFn>> {
    available_variants().into_iter().find(|v| v.name == name)
}
