//! Asymptotic complexity fitting for (size, time) series.
//!
//! Each candidate curve `f` is fitted with a zero-intercept least squares
//! `t ≈ coef · f(n)`, where `coef = Σ t·f(n) / Σ f(n)²`. Fit quality is the
//! root-mean-square residual divided by the mean time, so it is comparable
//! across kernels and units.
//!
//! The least squares residual is dominated by the largest sizes, so a single
//! cache step there can make a higher-order curve look better. Classes are
//! therefore ranked by shape: the spread of `ln(t / f(n))` across sizes,
//! where every size weighs the same. A runner-up whose spread is close to the
//! winner's makes the verdict ambiguous.
//!
//! Noisy series never panic. When the data cannot support a verdict the
//! report says so instead of naming a class.

use serde::{Deserialize, Serialize};

/// Below this many distinct sizes no fit is attempted
pub const MIN_DISTINCT_SIZES: usize = 3;

/// Fits whose normalized RMS exceeds this are not trusted
pub const MAX_NORMALIZED_RMS: f64 = 0.25;

/// Auto verdicts need the runner-up's log spread to be at least this many
/// times the winner's
pub const AMBIGUITY_RATIO: f64 = 1.5;

/// A member of the complexity family, ordered by growth.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Constant,
    LogN,
    Linear,
    NLogN,
    Quadratic,
    Cubic,
}

impl Complexity {
    pub const ALL: [Complexity; 6] = [
        Complexity::Constant,
        Complexity::LogN,
        Complexity::Linear,
        Complexity::NLogN,
        Complexity::Quadratic,
        Complexity::Cubic,
    ];

    /// Value of the growth function at `n`
    pub fn eval(self, n: f64) -> f64 {
        match self {
            Complexity::Constant => 1.0,
            Complexity::LogN => n.log2(),
            Complexity::Linear => n,
            Complexity::NLogN => n * n.log2(),
            Complexity::Quadratic => n * n,
            Complexity::Cubic => n * n * n,
        }
    }

    /// Short label, e.g. `N` or `NlgN`
    pub fn label(self) -> &'static str {
        match self {
            Complexity::Constant => "(1)",
            Complexity::LogN => "lgN",
            Complexity::Linear => "N",
            Complexity::NLogN => "NlgN",
            Complexity::Quadratic => "N^2",
            Complexity::Cubic => "N^3",
        }
    }
}

impl std::fmt::Display for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "O({})", self.label())
    }
}

/// What the caller asks the reporter to do.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityHint {
    /// Pick the best-fitting member of the family
    #[default]
    Auto,
    /// Fit only this class and report its residual
    Pinned(Complexity),
}

/// One fitted curve.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Fit {
    pub complexity: Complexity,
    /// Time per unit of `f(n)`
    pub coefficient: f64,
    /// RMS residual divided by the mean time
    pub normalized_rms: f64,
    /// Standard deviation of `ln(t / f(n))`; `None` when a time or `f(n)` is
    /// not positive
    pub log_spread: Option<f64>,
}

impl Fit {
    fn spread_key(&self) -> f64 {
        self.log_spread.unwrap_or(f64::INFINITY)
    }
}

/// Outcome of complexity analysis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum ComplexityReport {
    /// Best fit chosen from the family
    Classified { fit: Fit },
    /// Caller-pinned class with its residual
    Asserted { fit: Fit, consistent: bool },
    /// Data too short, degenerate or noisy for a verdict
    InsufficientSignal {
        reason: String,
        best_guess: Option<Fit>,
    },
}

impl ComplexityReport {
    /// The fit behind the verdict, if any
    pub fn fit(&self) -> Option<&Fit> {
        match self {
            ComplexityReport::Classified { fit } | ComplexityReport::Asserted { fit, .. } => {
                Some(fit)
            }
            ComplexityReport::InsufficientSignal { best_guess, .. } => best_guess.as_ref(),
        }
    }

    /// Class named by the verdict; `None` when the signal was insufficient
    pub fn complexity(&self) -> Option<Complexity> {
        match self {
            ComplexityReport::Classified { fit } | ComplexityReport::Asserted { fit, .. } => {
                Some(fit.complexity)
            }
            ComplexityReport::InsufficientSignal { .. } => None,
        }
    }
}

/// Fit a single class. `None` if the curve is degenerate for these sizes
/// (e.g. `lg 1 = 0` everywhere) or the data is empty.
pub fn fit_curve(points: &[(usize, f64)], complexity: Complexity) -> Option<Fit> {
    if points.is_empty() {
        return None;
    }

    let (mut sum_tf, mut sum_ff, mut sum_t) = (0.0, 0.0, 0.0);
    for &(n, t) in points {
        let f = complexity.eval(n as f64);
        sum_tf += t * f;
        sum_ff += f * f;
        sum_t += t;
    }
    if sum_ff <= 0.0 || !sum_ff.is_finite() {
        return None;
    }

    let coefficient = sum_tf / sum_ff;
    let len = points.len() as f64;
    let mean = sum_t / len;
    if mean <= 0.0 {
        return None;
    }

    let rss: f64 = points
        .iter()
        .map(|&(n, t)| {
            let r = t - coefficient * complexity.eval(n as f64);
            r * r
        })
        .sum();
    let normalized_rms = (rss / len).sqrt() / mean;

    normalized_rms.is_finite().then_some(Fit {
        complexity,
        coefficient,
        normalized_rms,
        log_spread: log_spread(points, complexity),
    })
}

fn log_spread(points: &[(usize, f64)], complexity: Complexity) -> Option<f64> {
    let mut ratios = Vec::with_capacity(points.len());
    for &(n, t) in points {
        let f = complexity.eval(n as f64);
        if t <= 0.0 || f <= 0.0 || !t.is_finite() || !f.is_finite() {
            return None;
        }
        ratios.push(t.ln() - f.ln());
    }

    let len = ratios.len() as f64;
    let mean = ratios.iter().sum::<f64>() / len;
    let var = ratios.iter().map(|r| (r - mean) * (r - mean)).sum::<f64>() / len;
    Some(var.sqrt())
}

fn signal_problem(points: &[(usize, f64)]) -> Option<String> {
    if points.iter().any(|&(_, t)| !t.is_finite() || t < 0.0) {
        return Some("non-finite or negative time".to_string());
    }
    let mut sizes: Vec<usize> = points.iter().map(|&(n, _)| n).collect();
    sizes.sort_unstable();
    sizes.dedup();
    if sizes.len() < MIN_DISTINCT_SIZES {
        return Some(format!(
            "{} distinct sizes, need at least {}",
            sizes.len(),
            MIN_DISTINCT_SIZES
        ));
    }
    if points.iter().map(|&(_, t)| t).sum::<f64>() <= 0.0 {
        return Some("all times are zero".to_string());
    }
    None
}

/// Every class that can be fitted, best shape first.
///
/// Ties keep family order, so the lower-order class comes first.
pub fn ranked_fits(points: &[(usize, f64)]) -> Vec<Fit> {
    let mut fits: Vec<Fit> = Complexity::ALL
        .iter()
        .filter_map(|&c| fit_curve(points, c))
        .collect();
    fits.sort_by(|a, b| a.spread_key().total_cmp(&b.spread_key()));
    fits
}

/// Analyze `(size, time)` points according to `hint`.
pub fn analyze(points: &[(usize, f64)], hint: ComplexityHint) -> ComplexityReport {
    if let Some(reason) = signal_problem(points) {
        return ComplexityReport::InsufficientSignal {
            reason,
            best_guess: None,
        };
    }

    match hint {
        ComplexityHint::Pinned(complexity) => match fit_curve(points, complexity) {
            Some(fit) => ComplexityReport::Asserted {
                consistent: fit.normalized_rms <= MAX_NORMALIZED_RMS,
                fit,
            },
            None => ComplexityReport::InsufficientSignal {
                reason: format!("{} is degenerate for these sizes", complexity),
                best_guess: None,
            },
        },
        ComplexityHint::Auto => auto_verdict(&ranked_fits(points)),
    }
}

fn auto_verdict(ranked: &[Fit]) -> ComplexityReport {
    let Some(&best) = ranked.first() else {
        return ComplexityReport::InsufficientSignal {
            reason: "no class could be fitted".to_string(),
            best_guess: None,
        };
    };

    if let Some(&runner_up) = ranked.get(1) {
        if runner_up.spread_key() <= best.spread_key() * AMBIGUITY_RATIO {
            return ComplexityReport::InsufficientSignal {
                reason: format!(
                    "{} and {} fit almost equally well",
                    best.complexity, runner_up.complexity
                ),
                best_guess: Some(if runner_up.complexity < best.complexity {
                    runner_up
                } else {
                    best
                }),
            };
        }
    }

    if best.normalized_rms > MAX_NORMALIZED_RMS {
        return ComplexityReport::InsufficientSignal {
            reason: format!(
                "best fit {} leaves {:.0}% RMS error",
                best.complexity,
                best.normalized_rms * 100.0
            ),
            best_guess: Some(best),
        };
    }

    ComplexityReport::Classified { fit: best }
}

/// Slope of `ln t` against `ln n`: about 1 for linear cost, 2 for quadratic.
///
/// `None` with fewer than two distinct positive sizes or any non-positive time.
pub fn scaling_exponent(points: &[(usize, f64)]) -> Option<f64> {
    if points.len() < 2 || points.iter().any(|&(n, t)| n == 0 || t.is_nan() || t <= 0.0) {
        return None;
    }

    let logs: Vec<(f64, f64)> = points
        .iter()
        .map(|&(n, t)| ((n as f64).ln(), t.ln()))
        .collect();
    let len = logs.len() as f64;
    let mean_x = logs.iter().map(|p| p.0).sum::<f64>() / len;
    let mean_y = logs.iter().map(|p| p.1).sum::<f64>() / len;

    let (mut sxy, mut sxx) = (0.0, 0.0);
    for &(x, y) in &logs {
        sxy += (x - mean_x) * (y - mean_y);
        sxx += (x - mean_x) * (x - mean_x);
    }
    (sxx > 0.0).then(|| sxy / sxx)
}
