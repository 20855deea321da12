//! Text User Interface (TUI) utilities.
//!
//! Human-readable output for the CLI.

use terminal_size::{terminal_size, Width};

use crate::complexity::ComplexityReport;
use crate::registry::BenchmarkRegistry;
use crate::report::{KernelReport, SuiteReport};

/// Get the current terminal width, constrained to a reasonable range
fn get_term_width() -> usize {
    if let Some((Width(w), _)) = terminal_size() {
        (w as usize).clamp(40, 200)
    } else {
        80
    }
}

/// Truncate string with ellipsis if it exceeds width (character-wise)
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut result: String = s.chars().take(width.saturating_sub(3)).collect();
        result.push_str("...");
        result
    }
}

/// Format a per-call time with a fitting scale
pub fn format_time(value: f64, unit: &str) -> String {
    if unit != "ns" {
        return format!("{:.1} {}", value, unit);
    }
    if value >= 1e9 {
        format!("{:.2} s", value / 1e9)
    } else if value >= 1e6 {
        format!("{:.2} ms", value / 1e6)
    } else if value >= 1e3 {
        format!("{:.2} us", value / 1e3)
    } else {
        format!("{:.2} ns", value)
    }
}

/// Name decorated with the C compiler for C variants
fn display_name(name: &str) -> String {
    match (name.starts_with("c-"), crate::utils::C_COMPILER_NAME) {
        (true, Some(c)) => format!("{} ({})", name, c),
        _ => name.to_string(),
    }
}

/// Print the application header
pub fn print_header() {
    let term_width = get_term_width().min(80);
    let title = " Dot Product Scaling Benchmarks ";
    let padding = term_width.saturating_sub(title.len() + 2) / 2;
    let right_padding = term_width.saturating_sub(padding + title.len());

    let border = "═".repeat(term_width);

    println!("╔{}╗", border);
    println!(
        "║{}{}{}║",
        " ".repeat(padding),
        title,
        " ".repeat(right_padding)
    );
    println!("╚{}╝", border);
    if let Some(cpus) = crate::utils::cpu_affinity::online_cpus() {
        println!("Run on {} CPUs", cpus);
    }
    println!();
}

/// Print one kernel: every sample, per-size aggregates, then the fit.
pub fn print_kernel_table(kernel: &KernelReport, unit: &str) {
    let term_width = get_term_width();
    let name_width = term_width.saturating_sub(52).clamp(20, 48);
    let table_width = name_width + 48;

    println!("  {}", display_name(&kernel.name));
    println!("  {}", truncate(&kernel.description, table_width));
    println!("  {}", "─".repeat(table_width));
    println!(
        "  {:<w$} {:>14} {:>14} {:>16}",
        "Benchmark",
        "Time",
        "Iterations",
        "CV",
        w = name_width
    );
    println!("  {}", "─".repeat(table_width));

    for summary in &kernel.summaries {
        for sample in kernel.samples.iter().filter(|s| s.size == summary.size) {
            let label = format!("{}/{}", kernel.name, sample.size);
            println!(
                "  {:<w$} {:>14} {:>14} {:>16}",
                truncate(&label, name_width),
                format_time(sample.time_per_call, unit),
                sample.iterations,
                "",
                w = name_width
            );
        }
        if summary.repetitions > 1 {
            let label = format!("{}/{}_mean", kernel.name, summary.size);
            println!(
                "  {:<w$} {:>14} {:>14} {:>15.2}%",
                truncate(&label, name_width),
                format_time(summary.mean, unit),
                "",
                summary.cv * 100.0,
                w = name_width
            );
            let label = format!("{}/{}_median", kernel.name, summary.size);
            println!(
                "  {:<w$} {:>14}",
                truncate(&label, name_width),
                format_time(summary.median, unit),
                w = name_width
            );
            let label = format!("{}/{}_stddev", kernel.name, summary.size);
            println!(
                "  {:<w$} {:>14}",
                truncate(&label, name_width),
                format_time(summary.std_dev, unit),
                w = name_width
            );
        }
    }

    println!("  {}", "─".repeat(table_width));
    print_complexity(kernel, unit, name_width);
    println!();
}

fn print_complexity(kernel: &KernelReport, unit: &str, name_width: usize) {
    let big_o = format!("{}_BigO", kernel.name);
    let rms = format!("{}_RMS", kernel.name);

    match &kernel.complexity {
        ComplexityReport::Classified { fit } => {
            println!(
                "  {:<w$} {:>14.4} {} ({})",
                truncate(&big_o, name_width),
                fit.coefficient,
                fit.complexity.label(),
                unit,
                w = name_width
            );
            println!(
                "  {:<w$} {:>13.0}%",
                truncate(&rms, name_width),
                fit.normalized_rms * 100.0,
                w = name_width
            );
        }
        ComplexityReport::Asserted { fit, consistent } => {
            println!(
                "  {:<w$} {:>14.4} {} ({}, asserted{})",
                truncate(&big_o, name_width),
                fit.coefficient,
                fit.complexity.label(),
                unit,
                if *consistent { "" } else { ", poor fit" },
                w = name_width
            );
            println!(
                "  {:<w$} {:>13.0}%",
                truncate(&rms, name_width),
                fit.normalized_rms * 100.0,
                w = name_width
            );
        }
        ComplexityReport::InsufficientSignal { reason, best_guess } => {
            println!(
                "  {:<w$} insufficient signal: {}",
                truncate(&big_o, name_width),
                reason,
                w = name_width
            );
            if let Some(fit) = best_guess {
                println!(
                    "  {:<w$} best guess {} at {:.0}% RMS",
                    "",
                    fit.complexity,
                    fit.normalized_rms * 100.0,
                    w = name_width
                );
            }
        }
    }

    if let Some(exponent) = kernel.scaling_exponent {
        println!(
            "  {:<w$} {:>14.2}",
            truncate(&format!("{}_exponent", kernel.name), name_width),
            exponent,
            w = name_width
        );
    }
}

/// Print the whole suite
pub fn print_suite(report: &SuiteReport) {
    for kernel in &report.kernels {
        print_kernel_table(kernel, &report.unit);
    }

    if !report.skipped.is_empty() {
        println!("Skipped registrations:");
        for skipped in &report.skipped {
            println!("  {:<20} {}", skipped.name, skipped.reason);
        }
        println!();
    }
}

/// Print the list of registered kernels
pub fn print_available_kernels(registry: &BenchmarkRegistry) {
    println!("Registered kernels:");
    println!();
    for r in registry.all() {
        println!(
            "  {:<20} {} x{} .. {} (x{} reps) - {}",
            display_name(r.name()),
            r.range.start,
            r.range.multiplier,
            r.range.end,
            r.repetitions,
            r.variant.description
        );
    }
}
