//! Numeric kernels under benchmark.

pub mod dot_product;
