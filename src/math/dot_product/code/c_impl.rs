//! FFI binding for the C reference kernel.

#[cfg(c_implementation_active)]
mod ffi {
    use libc::size_t;
    use std::os::raw::c_double;

    extern "C" {
        pub fn dot_product_c_original(a: *const c_double, b: *const c_double, n: size_t)
            -> c_double;
    }
}

/// C reference loop compiled by the system C compiler.
///
/// # Panics
/// Panics if `n` exceeds the length of either input.
#[cfg(c_implementation_active)]
pub fn dot_product_c_original(a: &[f64], b: &[f64], n: usize) -> f64 {
    assert!(
        n <= a.len() && n <= b.len(),
        "n = {} exceeds input lengths ({}, {})",
        n,
        a.len(),
        b.len()
    );
    // SAFETY: the C loop reads exactly n elements from each pointer.
    unsafe { ffi::dot_product_c_original(a.as_ptr(), b.as_ptr(), n) }
}

/// Whether the C kernel was compiled into this build
#[cfg(c_implementation_active)]
pub const C_IMPL_AVAILABLE: bool = true;

#[cfg(not(c_implementation_active))]
pub const C_IMPL_AVAILABLE: bool = false;

#[cfg(not(c_implementation_active))]
pub fn dot_product_c_original(_a: &[f64], _b: &[f64], _n: usize) -> f64 {
    panic!("C kernel not compiled (requires GCC, MSVC or Apple Clang)")
}
