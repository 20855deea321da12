//! x86_64 SSE2 packed-double assembly implementation.
//!
//! Two f64 lanes per iteration. Lane 0 accumulates the even-indexed products,
//! lane 1 the odd-indexed ones; the lanes are added once after the loop.
//!
//! ```asm
//!     xorpd   acc, acc            ; [s0, s1] = [0, 0]
//!     test    pairs, pairs
//!     jz      3f
//! 2:  movupd  x, [a]              ; [a[i], a[i+1]]
//!     movupd  y, [b]              ; [b[i], b[i+1]]
//!     mulpd   x, y
//!     addpd   acc, x              ; [s0 + a[i]b[i], s1 + a[i+1]b[i+1]]
//!     add     a, 16
//!     add     b, 16
//!     sub     pairs, 2
//!     jnz     2b
//! 3:  movapd  x, acc
//!     unpckhpd x, x               ; [s1, s1]
//!     addsd   acc, x              ; s0 + s1
//! ```
//!
//! Loads are unaligned (`movupd`), so any `Vec<f64>` works. When `n` is odd the
//! last element is added after the horizontal sum.

use std::arch::asm;

/// Compute the dot product of the first `n` elements two lanes at a time.
///
/// # Panics
/// Panics if `n` exceeds the length of either input.
#[inline(never)]
pub fn dot_product_x86_64_sse2_asm(a: &[f64], b: &[f64], n: usize) -> f64 {
    assert!(
        n <= a.len() && n <= b.len(),
        "n = {} exceeds input lengths ({}, {})",
        n,
        a.len(),
        b.len()
    );

    let even = n & !1;
    let mut sum: f64;

    // SAFETY: the loop runs even / 2 times, reading a[0..even] and b[0..even],
    // both in bounds per the assertion above. Pointer and counter registers are
    // declared clobbered.
    unsafe {
        asm!(
            "xorpd {acc}, {acc}",
            "test {pairs}, {pairs}",
            "jz 3f",
            "2:",
            "movupd {x}, xmmword ptr [{a}]",
            "movupd {y}, xmmword ptr [{b}]",
            "mulpd {x}, {y}",
            "addpd {acc}, {x}",
            "add {a}, 16",
            "add {b}, 16",
            "sub {pairs}, 2",
            "jnz 2b",
            "3:",
            "movapd {x}, {acc}",
            "unpckhpd {x}, {x}",
            "addsd {acc}, {x}",
            a = inout(reg) a.as_ptr() => _,
            b = inout(reg) b.as_ptr() => _,
            pairs = inout(reg) even => _,
            acc = out(xmm_reg) sum,
            x = out(xmm_reg) _,
            y = out(xmm_reg) _,
            options(nostack, readonly),
        );
    }

    if even != n {
        sum += a[even] * b[even];
    }

    sum
}
