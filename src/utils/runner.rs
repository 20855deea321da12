//! Size sweeps: drives each registration across its size range, collects
//! Samples and hands them to the complexity reporter. Also CSV export.

use std::io::Write;
use std::path::Path;

use tracing::{debug, info, warn};

use super::bench::{summarize, unit_name};
use super::cpu_affinity::CpuPinGuard;
use super::timer::{measure_variant, PinStrategy, TimingConfig};
use crate::complexity::{analyze, scaling_exponent};
use crate::error::{ConfigError, ReportError};
use crate::math::dot_product::bench::variant_for;
use crate::math::dot_product::WorkloadGenerator;
use crate::registry::{BenchmarkRegistry, Registration, SizeRange};
use crate::report::{
    fit_points, KernelReport, Sample, SizeSummary, SkippedRegistration, SuiteReport,
};

/// Options for a whole suite run.
#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    /// Substring a kernel name must contain to run
    pub filter: Option<String>,
    /// Fixed input seed; OS entropy when `None`
    pub seed: Option<u64>,
    /// Replaces every registration's repetition count
    pub repetitions: Option<usize>,
    /// Replaces every registration's size range
    pub range: Option<SizeRange>,
    pub timing: TimingConfig,
}

/// Measure one registration across its size range.
///
/// Inputs are generated once per size, outside the timed region, and dropped
/// when that size is done.
pub fn run_registration(
    registration: &Registration,
    generator: &mut WorkloadGenerator,
    timing: &TimingConfig,
) -> Result<KernelReport, ConfigError> {
    registration.validate()?;
    timing.validate()?;

    let name = registration.name();
    let sizes = registration.range.sizes();
    info!(
        kernel = name,
        sizes = sizes.len(),
        repetitions = registration.repetitions,
        "measuring kernel"
    );

    let mut samples = Vec::with_capacity(sizes.len() * registration.repetitions);
    let mut summaries = Vec::with_capacity(sizes.len());

    for &size in &sizes {
        let workload = generator.generate(size);
        let mut variant = variant_for(&registration.variant, &workload);
        let timings = measure_variant(&mut variant, registration.repetitions, timing);

        let per_call: Vec<f64> = timings.iter().map(|t| t.per_call()).collect();
        if let Some(summary) = summarize(&per_call) {
            debug!(
                kernel = name,
                size,
                iterations = timings[0].iterations,
                min = summary.min,
                cv = summary.cv(),
                "size done"
            );
            summaries.push(SizeSummary::new(size, timings.len(), &summary));
        }

        samples.extend(timings.iter().enumerate().map(|(repetition, t)| Sample {
            size,
            repetition,
            iterations: t.iterations,
            time_per_call: t.per_call(),
            result: t.result,
        }));
    }

    let points = fit_points(&summaries);
    let complexity = analyze(&points, registration.complexity);
    let exponent = scaling_exponent(&points);
    info!(kernel = name, verdict = ?complexity.complexity(), "kernel done");

    Ok(KernelReport {
        name: name.to_string(),
        description: registration.variant.description.to_string(),
        range: registration.range,
        repetitions: registration.repetitions,
        hint: registration.complexity,
        samples,
        summaries,
        complexity,
        scaling_exponent: exponent,
    })
}

/// Run every registration matching `options.filter`.
///
/// Overrides from `options` are applied first. Registrations that fail
/// validation are reported as skipped; the rest still run.
pub fn run_suite(registry: &BenchmarkRegistry, options: &RunOptions) -> SuiteReport {
    let mut generator = WorkloadGenerator::new(options.seed);
    let mut kernels = Vec::new();
    let mut skipped = Vec::new();

    let mut runnable = Vec::new();
    for registration in registry.matching(options.filter.as_deref()) {
        let mut registration = *registration;
        if let Some(repetitions) = options.repetitions {
            registration.repetitions = repetitions;
        }
        if let Some(range) = options.range {
            registration.range = range;
        }

        match registration.validate().and(options.timing.validate()) {
            Ok(()) => runnable.push(registration),
            Err(e) => {
                warn!(kernel = registration.name(), error = %e, "skipping registration");
                skipped.push(SkippedRegistration {
                    name: registration.name().to_string(),
                    reason: e.to_string(),
                });
            }
        }
    }

    let _pin = (options.timing.pin_strategy == PinStrategy::Global).then(CpuPinGuard::new);

    for registration in &runnable {
        match run_registration(registration, &mut generator, &options.timing) {
            Ok(report) => kernels.push(report),
            Err(e) => skipped.push(SkippedRegistration {
                name: registration.name().to_string(),
                reason: e.to_string(),
            }),
        }
    }

    SuiteReport {
        unit: unit_name().to_string(),
        seed: options.seed,
        kernels,
        skipped,
    }
}

/// Write one CSV row per Sample.
pub fn write_csv<W: Write>(mut writer: W, report: &SuiteReport) -> Result<(), ReportError> {
    writeln!(
        writer,
        "kernel,compiler,size,repetition,iterations,time_per_call,unit,result"
    )?;

    for kernel in &report.kernels {
        let compiler = if kernel.name.starts_with("c-") {
            crate::utils::C_COMPILER_NAME.unwrap_or("Unknown")
        } else {
            ""
        };

        for s in &kernel.samples {
            writeln!(
                writer,
                "{},{},{},{},{},{},{},{}",
                kernel.name,
                compiler,
                s.size,
                s.repetition,
                s.iterations,
                s.time_per_call,
                report.unit,
                s.result
            )?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// Export raw samples to a CSV file
pub fn export_csv<P: AsRef<Path>>(path: P, report: &SuiteReport) -> Result<(), ReportError> {
    let file = std::fs::File::create(path)?;
    write_csv(std::io::BufWriter::new(file), report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complexity::{Complexity, ComplexityHint};
    use crate::math::dot_product::find_variant;
    use std::time::Duration;

    fn quick_timing() -> TimingConfig {
        TimingConfig {
            min_time: Duration::from_millis(1),
            max_iterations: 100_000,
            warmup_iterations: 2,
            pin_strategy: PinStrategy::Off,
        }
    }

    fn small_registration() -> Registration {
        Registration::new(find_variant("original").unwrap())
            .range(SizeRange::new(8, 256, 2).unwrap())
            .repetitions(2)
    }

    #[test]
    fn test_samples_per_size_and_repetition() {
        let mut gen = WorkloadGenerator::seeded(1);
        let report = run_registration(&small_registration(), &mut gen, &quick_timing()).unwrap();

        assert_eq!(report.samples.len(), 6 * 2);
        assert_eq!(report.summaries.len(), 6);
        let sizes: Vec<_> = report.summaries.iter().map(|s| s.size).collect();
        assert_eq!(sizes, vec![8, 16, 32, 64, 128, 256]);
        assert!(report.samples.iter().all(|s| s.iterations >= 1));
        assert!(report.samples.iter().all(|s| s.result > 0.0));
    }

    #[test]
    fn test_invalid_registration_rejected_before_running() {
        let mut gen = WorkloadGenerator::seeded(1);
        let bad = small_registration().repetitions(0);
        assert_eq!(
            run_registration(&bad, &mut gen, &quick_timing()).unwrap_err(),
            ConfigError::ZeroRepetitions
        );
    }

    #[test]
    fn test_suite_skips_only_bad_registrations() {
        let mut registry = BenchmarkRegistry::new();
        registry.register(small_registration()).unwrap();
        let options = RunOptions {
            range: Some(SizeRange {
                start: 0,
                end: 8,
                multiplier: 2,
            }),
            timing: quick_timing(),
            ..RunOptions::default()
        };
        let report = run_suite(&registry, &options);
        assert!(report.kernels.is_empty());
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].name, "original");

        let options = RunOptions {
            filter: Some("orig".to_string()),
            seed: Some(4),
            timing: quick_timing(),
            ..RunOptions::default()
        };
        let report = run_suite(&registry, &options);
        assert_eq!(report.kernels.len(), 1);
        assert!(report.skipped.is_empty());
        assert_eq!(report.seed, Some(4));
    }

    #[test]
    fn test_overrides_apply() {
        let mut registry = BenchmarkRegistry::new();
        registry.register(small_registration()).unwrap();
        let options = RunOptions {
            repetitions: Some(1),
            range: Some(SizeRange::new(32, 128, 2).unwrap()),
            timing: quick_timing(),
            ..RunOptions::default()
        };
        let report = run_suite(&registry, &options);
        let kernel = report.find("original").unwrap();
        assert_eq!(kernel.repetitions, 1);
        assert_eq!(kernel.samples.len(), 3);
    }

    #[test]
    fn test_per_repetition_pinning_runs() {
        let mut registry = BenchmarkRegistry::new();
        registry.register(small_registration()).unwrap();
        let options = RunOptions {
            timing: TimingConfig {
                pin_strategy: PinStrategy::PerRepetition,
                ..quick_timing()
            },
            ..RunOptions::default()
        };
        let report = run_suite(&registry, &options);
        assert_eq!(report.find("original").unwrap().samples.len(), 12);
    }

    #[test]
    fn test_cost_grows_with_size() {
        // Averaged over repetitions, a 64x larger input never costs less
        let mut gen = WorkloadGenerator::seeded(3);
        let timing = TimingConfig {
            min_time: Duration::from_millis(5),
            ..quick_timing()
        };
        let registration = Registration::new(find_variant("original").unwrap())
            .range(SizeRange::new(1 << 10, 1 << 16, 64).unwrap())
            .repetitions(5);
        let report = run_registration(&registration, &mut gen, &timing).unwrap();

        let small = report.summaries.first().unwrap();
        let large = report.summaries.last().unwrap();
        assert_eq!((small.size, large.size), (1 << 10, 1 << 16));
        assert!(
            large.median >= small.median,
            "median at {} ({}) below median at {} ({})",
            large.size,
            large.median,
            small.size,
            small.median
        );
    }

    #[test]
    fn test_pinned_hint_is_reported() {
        let mut gen = WorkloadGenerator::seeded(8);
        let registration =
            small_registration().complexity(ComplexityHint::Pinned(Complexity::Linear));
        let report = run_registration(&registration, &mut gen, &quick_timing()).unwrap();
        assert_eq!(report.hint, ComplexityHint::Pinned(Complexity::Linear));
        assert!(matches!(
            report.complexity,
            crate::complexity::ComplexityReport::Asserted { .. }
                | crate::complexity::ComplexityReport::InsufficientSignal { .. }
        ));
    }

    #[test]
    fn test_csv_rows() {
        let mut gen = WorkloadGenerator::seeded(1);
        let kernel = run_registration(&small_registration(), &mut gen, &quick_timing()).unwrap();
        let report = SuiteReport {
            unit: unit_name().to_string(),
            seed: None,
            kernels: vec![kernel],
            skipped: Vec::new(),
        };

        let mut out = Vec::new();
        write_csv(&mut out, &report).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines[0],
            "kernel,compiler,size,repetition,iterations,time_per_call,unit,result"
        );
        assert_eq!(lines.len(), 1 + 12);
        assert!(lines[1].starts_with("original,,8,0,"));
    }
}
