//! Report model shared by the runner, the terminal table and JSON output.

use std::io::Write;

use serde::Serialize;

use crate::complexity::{ComplexityHint, ComplexityReport};
use crate::error::ReportError;
use crate::registry::SizeRange;
use crate::utils::bench::Summary;

/// One measured (size, time) observation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Sample {
    /// Elements per input vector
    pub size: usize,
    /// Zero-based repetition index at this size
    pub repetition: usize,
    /// Kernel calls in the timed batch
    pub iterations: u64,
    /// Average time per call, in the report unit
    pub time_per_call: f64,
    /// Kernel result from the batch's last call
    pub result: f64,
}

/// Aggregates over the repetitions of one size.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SizeSummary {
    pub size: usize,
    pub repetitions: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub std_dev: f64,
    pub cv: f64,
}

impl SizeSummary {
    pub fn new(size: usize, repetitions: usize, summary: &Summary) -> Self {
        Self {
            size,
            repetitions,
            mean: summary.mean,
            median: summary.median,
            min: summary.min,
            std_dev: summary.std_dev,
            cv: summary.cv(),
        }
    }
}

/// Everything measured for one kernel.
#[derive(Clone, Debug, Serialize)]
pub struct KernelReport {
    pub name: String,
    pub description: String,
    pub range: SizeRange,
    pub repetitions: usize,
    pub hint: ComplexityHint,
    /// In measurement order: sizes ascending, repetitions within a size
    pub samples: Vec<Sample>,
    pub summaries: Vec<SizeSummary>,
    pub complexity: ComplexityReport,
    /// Log-log slope of the per-size minimum times
    pub scaling_exponent: Option<f64>,
}

/// The (size, minimum time) points fed to the complexity fit
pub fn fit_points(summaries: &[SizeSummary]) -> Vec<(usize, f64)> {
    summaries.iter().map(|s| (s.size, s.min)).collect()
}

/// A registration dropped before any kernel call.
#[derive(Clone, Debug, Serialize)]
pub struct SkippedRegistration {
    pub name: String,
    pub reason: String,
}

/// The whole run.
#[derive(Clone, Debug, Serialize)]
pub struct SuiteReport {
    /// Unit of every time in the report ("ns" or "cycles")
    pub unit: String,
    pub seed: Option<u64>,
    pub kernels: Vec<KernelReport>,
    pub skipped: Vec<SkippedRegistration>,
}

impl SuiteReport {
    pub fn find(&self, name: &str) -> Option<&KernelReport> {
        self.kernels.iter().find(|k| k.name == name)
    }
}

/// Write the report as pretty JSON followed by a newline.
pub fn write_json<W: Write>(mut writer: W, report: &SuiteReport) -> Result<(), ReportError> {
    serde_json::to_writer_pretty(&mut writer, report)?;
    writeln!(writer)?;
    Ok(())
}
