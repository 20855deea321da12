//! x86_64 scalar assembly implementation.
//!
//! One element per iteration with an explicit index register and an explicit
//! compare-and-branch loop:
//!
//! ```asm
//!     xorpd   acc, acc            ; s = 0
//!     xor     i, i                ; i = 0
//! 2:  cmp     i, n                ; while i < n
//!     jae     3f
//!     movsd   x, [a + 8*i]        ; x = a[i]
//!     mulsd   x, [b + 8*i]        ; x *= b[i]
//!     addsd   acc, x              ; s += x
//!     inc     i
//!     jmp     2b
//! 3:
//! ```
//!
//! The accumulation order is identical to the reference loop, so results
//! match it bit for bit.

use std::arch::asm;

/// Compute the dot product of the first `n` elements with a scalar SSE2 loop.
///
/// # Panics
/// Panics if `n` exceeds the length of either input.
#[inline(never)]
pub fn dot_product_x86_64_asm(a: &[f64], b: &[f64], n: usize) -> f64 {
    assert!(
        n <= a.len() && n <= b.len(),
        "n = {} exceeds input lengths ({}, {})",
        n,
        a.len(),
        b.len()
    );

    let sum: f64;

    // SAFETY: the loop reads a[0..n] and b[0..n], both in bounds per the
    // assertion above. Only the declared output registers are written.
    unsafe {
        asm!(
            "xorpd {acc}, {acc}",
            "xor {i}, {i}",
            "2:",
            "cmp {i}, {n}",
            "jae 3f",
            "movsd {x}, qword ptr [{a} + 8*{i}]",
            "mulsd {x}, qword ptr [{b} + 8*{i}]",
            "addsd {acc}, {x}",
            "inc {i}",
            "jmp 2b",
            "3:",
            a = in(reg) a.as_ptr(),
            b = in(reg) b.as_ptr(),
            n = in(reg) n,
            i = out(reg) _,
            acc = out(xmm_reg) sum,
            x = out(xmm_reg) _,
            options(nostack, readonly),
        );
    }

    sum
}
