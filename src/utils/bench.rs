//! Shared measurement helpers.
//!
//! By default measurements are wall-clock nanoseconds. With the `cpu_cycles`
//! feature they are raw CPU cycle counter ticks instead.

// ============================================================================
// Clock abstraction: cycles or time depending on feature flags
// ============================================================================

/// Start-of-interval stamp
#[cfg(feature = "cpu_cycles")]
pub type Stamp = u64;

#[cfg(not(feature = "cpu_cycles"))]
pub type Stamp = std::time::Instant;

/// Read the current stamp
#[cfg(feature = "cpu_cycles")]
#[inline(always)]
pub fn now() -> Stamp {
    crate::utils::cycles::read_cycles()
}

#[cfg(not(feature = "cpu_cycles"))]
#[inline(always)]
pub fn now() -> Stamp {
    std::time::Instant::now()
}

/// Ticks elapsed since `start`
#[cfg(feature = "cpu_cycles")]
#[inline(always)]
pub fn elapsed(start: Stamp) -> u64 {
    crate::utils::cycles::read_cycles().saturating_sub(start)
}

#[cfg(not(feature = "cpu_cycles"))]
#[inline(always)]
pub fn elapsed(start: Stamp) -> u64 {
    start.elapsed().as_nanos() as u64
}

/// Unit of the values returned by [`elapsed`]
#[cfg(feature = "cpu_cycles")]
pub const fn unit_name() -> &'static str {
    #[cfg(target_arch = "aarch64")]
    {
        "ticks"
    }
    #[cfg(not(target_arch = "aarch64"))]
    {
        "cycles"
    }
}

#[cfg(not(feature = "cpu_cycles"))]
pub const fn unit_name() -> &'static str {
    "ns"
}

// ============================================================================
// Statistics
// ============================================================================

/// Summary statistics over a set of per-call times.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Summary {
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    /// Sample standard deviation (n - 1 denominator), 0 for a single value
    pub std_dev: f64,
}

impl Summary {
    /// Coefficient of variation, 0 when the mean is 0
    pub fn cv(&self) -> f64 {
        if self.mean > 0.0 {
            self.std_dev / self.mean
        } else {
            0.0
        }
    }
}

/// Summarize `values`, or `None` if empty.
pub fn summarize(values: &[f64]) -> Option<Summary> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let len = sorted.len();
    let median = if len % 2 == 0 {
        (sorted[len / 2 - 1] + sorted[len / 2]) / 2.0
    } else {
        sorted[len / 2]
    };

    let mean = sorted.iter().sum::<f64>() / len as f64;
    let variance = sorted
        .iter()
        .map(|&v| {
            let diff = v - mean;
            diff * diff
        })
        .sum::<f64>()
        / (len - 1).max(1) as f64;

    Some(Summary {
        mean,
        median,
        min: sorted[0],
        max: sorted[len - 1],
        std_dev: variance.sqrt(),
    })
}
