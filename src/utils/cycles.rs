//! CPU cycle counter, used as the clock when the `cpu_cycles` feature is on.

/// Read the current CPU cycle counter.
///
/// On x86_64: RDTSC fenced with LFENCE on both sides so the kernel under test
/// cannot be reordered across the read.
/// On aarch64: CNTVCT_EL0, a fixed-frequency virtual timer readable from
/// userspace.
#[inline(always)]
pub fn read_cycles() -> u64 {
    #[cfg(target_arch = "x86_64")]
    {
        use core::arch::x86_64::{_mm_lfence, _rdtsc};
        // SAFETY: LFENCE and RDTSC are available on every x86_64 CPU.
        unsafe {
            _mm_lfence();
            let cycles = _rdtsc();
            _mm_lfence();
            cycles
        }
    }

    #[cfg(target_arch = "aarch64")]
    {
        let val: u64;
        // SAFETY: CNTVCT_EL0 is readable at EL0 on all supported OSes.
        unsafe {
            core::arch::asm!("mrs {}, cntvct_el0", out(reg) val, options(nomem, nostack));
        }
        val
    }

    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
        compile_error!("cpu_cycles feature requires x86_64 or aarch64");
    }
}
