//! Adaptive timing of a single kernel at a single input size.
//!
//! A variant is a closure that runs the kernel `iters` times back to back and
//! returns the elapsed ticks for the whole batch. This module:
//! - warms the variant up,
//! - grows the batch size until one batch takes at least `min_time`,
//! - times the calibrated batch once per repetition.
//!
//! Timing happens inside the closure so the `dyn FnMut` dispatch is paid once
//! per batch, not once per kernel call.

use std::hint::black_box;
use std::time::{Duration, Instant};

use super::cpu_affinity::CpuPinGuard;
use crate::error::ConfigError;

// ============================================================================
// Configuration
// ============================================================================

/// CPU pinning strategy during measurements
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PinStrategy {
    /// Pin once for the whole sweep
    #[default]
    Global,
    /// Pin around each timed repetition only
    PerRepetition,
    /// Never pin
    Off,
}

/// Configuration for timing measurements
#[derive(Clone, Debug)]
pub struct TimingConfig {
    /// Minimum wall-clock duration of one timed batch (default: 25ms)
    pub min_time: Duration,
    /// Upper bound on kernel calls per batch (default: 1e9)
    pub max_iterations: u64,
    /// Untimed kernel calls before calibration (default: 10)
    pub warmup_iterations: u64,
    /// CPU pinning strategy (default: Global)
    pub pin_strategy: PinStrategy,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            min_time: Duration::from_millis(25),
            max_iterations: 1_000_000_000,
            warmup_iterations: 10,
            pin_strategy: PinStrategy::default(),
        }
    }
}

impl TimingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        Ok(())
    }
}

/// Runs `iters` kernel calls and returns (elapsed ticks, last result).
pub type BatchFn<'a> = Box<dyn FnMut(u64) -> (u64, f64) + 'a>;

/// A variant to be measured
pub struct Variant<'a> {
    /// Unique name of the variant
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Timed batch runner
    pub run: BatchFn<'a>,
}

/// One timed batch
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timing {
    /// Kernel calls in the batch
    pub iterations: u64,
    /// Elapsed ticks for the whole batch
    pub ticks: u64,
    /// Result of the last call, kept observable
    pub result: f64,
}

impl Timing {
    /// Average ticks per kernel call
    pub fn per_call(&self) -> f64 {
        self.ticks as f64 / self.iterations.max(1) as f64
    }
}

// ============================================================================
// Measurement
// ============================================================================

/// Run the variant untimed to settle caches and branch predictors.
pub fn warmup(variant: &mut Variant, config: &TimingConfig) {
    if config.warmup_iterations > 0 {
        black_box((variant.run)(config.warmup_iterations));
    }
}

/// Find the batch size whose wall-clock duration reaches `config.min_time`.
///
/// Starts at one call and multiplies by `min_time * 1.4 / took`, at most 10x
/// and at least one more call per step, capped at `max_iterations`.
pub fn calibrate_iterations(variant: &mut Variant, config: &TimingConfig) -> u64 {
    let max = config.max_iterations.max(1);
    let target = config.min_time.as_secs_f64();
    let mut iters: u64 = 1;

    loop {
        let wall = Instant::now();
        black_box((variant.run)(iters));
        let took = wall.elapsed();

        if took >= config.min_time || iters >= max {
            return iters;
        }

        let multiplier = if took.is_zero() {
            10.0
        } else {
            (target * 1.4 / took.as_secs_f64()).min(10.0)
        };
        let next = (iters as f64 * multiplier).round() as u64;
        iters = next.max(iters + 1).min(max);
    }
}

/// Time `repetitions` batches of `iterations` calls each.
pub fn measure_repetitions(
    variant: &mut Variant,
    iterations: u64,
    repetitions: usize,
    config: &TimingConfig,
) -> Vec<Timing> {
    (0..repetitions)
        .map(|_| {
            let _pin = (config.pin_strategy == PinStrategy::PerRepetition).then(CpuPinGuard::new);
            let (ticks, result) = (variant.run)(iterations);
            Timing {
                iterations,
                ticks,
                result: black_box(result),
            }
        })
        .collect()
}

/// Warm up, calibrate, then time `repetitions` batches.
pub fn measure_variant(
    variant: &mut Variant,
    repetitions: usize,
    config: &TimingConfig,
) -> Vec<Timing> {
    warmup(variant, config);
    let iterations = calibrate_iterations(variant, config);
    measure_repetitions(variant, iterations, repetitions, config)
}
