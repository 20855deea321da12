//! Utility modules for timing, pinning, running and displaying benchmarks.

pub mod bench;
pub mod cpu_affinity;
pub mod runner;
pub mod timer;
pub mod tui;

#[cfg(feature = "cpu_cycles")]
pub mod cycles;

// Re-export commonly used items
pub use bench::{elapsed, now, summarize, unit_name, Summary};
pub use cpu_affinity::CpuPinGuard;
pub use timer::{PinStrategy, Timing, TimingConfig, Variant};

/// C compiler name detected at build time
pub const C_COMPILER_NAME: Option<&str> = option_env!("C_COMPILER_NAME");

/// Information about a kernel implementation variant.
/// Generic over F which is the function signature.
#[derive(Clone, Copy, Debug)]
pub struct VariantInfo<F> {
    /// Unique identifier for this variant (e.g., "original", "x86_64-sse2-asm")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// The specific implementation function
    pub function: F,
}
