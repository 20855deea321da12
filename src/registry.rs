//! Benchmark registrations.
//!
//! A registration pairs one kernel variant with the sweep that drives it: the
//! geometric size range, the repetition count and the complexity hint handed
//! to the reporter. Registrations are validated when added and again before a
//! run, so a bad one is dropped without touching the others.

use serde::Serialize;
use tracing::warn;

use crate::complexity::{Complexity, ComplexityHint};
use crate::error::ConfigError;
use crate::math::dot_product::{available_variants, DotProductFn};
use crate::utils::VariantInfo;

/// Geometric size sweep: `start`, the powers of `multiplier` strictly between
/// `start` and `end`, then `end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SizeRange {
    pub start: usize,
    pub end: usize,
    pub multiplier: usize,
}

impl SizeRange {
    /// 8 to 2^18 elements, doubling
    pub const REFERENCE: SizeRange = SizeRange {
        start: 8,
        end: 1 << 18,
        multiplier: 2,
    };

    pub fn new(start: usize, end: usize, multiplier: usize) -> Result<Self, ConfigError> {
        let range = Self {
            start,
            end,
            multiplier,
        };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.start == 0 {
            return Err(ConfigError::ZeroStart);
        }
        if self.start > self.end {
            return Err(ConfigError::EmptyRange {
                start: self.start,
                end: self.end,
            });
        }
        if self.multiplier < 2 {
            return Err(ConfigError::MultiplierTooSmall(self.multiplier));
        }
        Ok(())
    }

    /// Sizes in increasing order, `end` included.
    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes = vec![self.start];

        let mut power: usize = 1;
        while power <= self.start {
            match power.checked_mul(self.multiplier) {
                Some(next) => power = next,
                None => break,
            }
        }
        while power > self.start && power < self.end {
            sizes.push(power);
            match power.checked_mul(self.multiplier) {
                Some(next) => power = next,
                None => break,
            }
        }

        if self.end != self.start {
            sizes.push(self.end);
        }
        sizes
    }
}

impl Default for SizeRange {
    fn default() -> Self {
        Self::REFERENCE
    }
}

/// One kernel variant plus the sweep that drives it.
#[derive(Clone, Copy, Debug)]
pub struct Registration {
    pub variant: VariantInfo<DotProductFn>,
    pub range: SizeRange,
    pub repetitions: usize,
    pub complexity: ComplexityHint,
}

impl Registration {
    /// Reference range, one repetition, best-fit complexity.
    pub fn new(variant: VariantInfo<DotProductFn>) -> Self {
        Self {
            variant,
            range: SizeRange::REFERENCE,
            repetitions: 1,
            complexity: ComplexityHint::Auto,
        }
    }

    pub fn range(mut self, range: SizeRange) -> Self {
        self.range = range;
        self
    }

    pub fn repetitions(mut self, repetitions: usize) -> Self {
        self.repetitions = repetitions;
        self
    }

    pub fn complexity(mut self, complexity: ComplexityHint) -> Self {
        self.complexity = complexity;
        self
    }

    pub fn name(&self) -> &'static str {
        self.variant.name
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.range.validate()?;
        if self.repetitions == 0 {
            return Err(ConfigError::ZeroRepetitions);
        }
        Ok(())
    }
}

/// All registered kernel sweeps, in registration order.
#[derive(Default)]
pub struct BenchmarkRegistry {
    registrations: Vec<Registration>,
}

impl BenchmarkRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a registration; rejected ones leave the registry unchanged.
    pub fn register(&mut self, registration: Registration) -> Result<(), ConfigError> {
        registration.validate()?;
        self.registrations.push(registration);
        Ok(())
    }

    pub fn all(&self) -> &[Registration] {
        &self.registrations
    }

    /// Find registration by kernel name
    pub fn find(&self, name: &str) -> Option<&Registration> {
        self.registrations.iter().find(|r| r.name() == name)
    }

    pub fn list_names(&self) -> Vec<&'static str> {
        self.registrations.iter().map(|r| r.name()).collect()
    }

    /// Registrations whose kernel name contains `filter` (all when `None`)
    pub fn matching(&self, filter: Option<&str>) -> Vec<&Registration> {
        self.registrations
            .iter()
            .filter(|r| filter.map_or(true, |f| r.name().contains(f)))
            .collect()
    }
}

/// Build the reference registry for every variant available on this target.
///
/// The packed SSE2 kernel runs three repetitions and is pinned to O(N); the
/// others run once and let the reporter pick the best fit.
pub fn build_registry() -> BenchmarkRegistry {
    let mut registry = BenchmarkRegistry::new();

    for variant in available_variants() {
        let registration = match variant.name {
            "x86_64-sse2-asm" => Registration::new(variant)
                .repetitions(3)
                .complexity(ComplexityHint::Pinned(Complexity::Linear)),
            _ => Registration::new(variant),
        };

        if let Err(e) = registry.register(registration) {
            warn!(kernel = variant.name, error = %e, "skipping registration");
        }
    }

    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_sizes() {
        let sizes = SizeRange::REFERENCE.sizes();
        assert_eq!(sizes.first(), Some(&8));
        assert_eq!(sizes.last(), Some(&(1 << 18)));
        assert_eq!(sizes.len(), 16);
        assert!(sizes.windows(2).all(|w| w[1] == w[0] * 2));
    }

    #[test]
    fn test_non_power_bounds() {
        let sizes = SizeRange::new(10, 100, 2).unwrap().sizes();
        assert_eq!(sizes, vec![10, 16, 32, 64, 100]);
    }

    #[test]
    fn test_single_size() {
        assert_eq!(SizeRange::new(64, 64, 2).unwrap().sizes(), vec![64]);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_huge_end_does_not_overflow() {
        let sizes = SizeRange::new(1 << 60, usize::MAX, 8).unwrap().sizes();
        assert_eq!(sizes.first(), Some(&(1 << 60)));
        assert_eq!(sizes.last(), Some(&usize::MAX));
    }

    #[test]
    fn test_range_errors() {
        assert_eq!(SizeRange::new(0, 8, 2), Err(ConfigError::ZeroStart));
        assert_eq!(
            SizeRange::new(16, 8, 2),
            Err(ConfigError::EmptyRange { start: 16, end: 8 })
        );
        assert_eq!(
            SizeRange::new(8, 16, 1),
            Err(ConfigError::MultiplierTooSmall(1))
        );
    }

    #[test]
    fn test_register_rejects_only_bad_registration() {
        let variants = available_variants();
        let mut registry = BenchmarkRegistry::new();

        let bad = Registration::new(variants[0]).repetitions(0);
        assert_eq!(registry.register(bad), Err(ConfigError::ZeroRepetitions));
        assert!(registry.all().is_empty());

        registry.register(Registration::new(variants[0])).unwrap();
        assert_eq!(registry.list_names(), vec!["original"]);
    }

    #[test]
    fn test_reference_configuration() {
        let registry = build_registry();
        let original = registry.find("original").unwrap();
        assert_eq!(original.repetitions, 1);
        assert_eq!(original.complexity, ComplexityHint::Auto);
        assert_eq!(original.range, SizeRange::REFERENCE);

        #[cfg(target_arch = "x86_64")]
        {
            let sse2 = registry.find("x86_64-sse2-asm").unwrap();
            assert_eq!(sse2.repetitions, 3);
            assert_eq!(sse2.complexity, ComplexityHint::Pinned(Complexity::Linear));
            assert!(registry.find("x86_64-asm").is_some());
        }
    }

    #[test]
    fn test_matching_filter() {
        let registry = build_registry();
        assert_eq!(registry.matching(None).len(), registry.all().len());
        let names: Vec<_> = registry
            .matching(Some("original"))
            .iter()
            .map(|r| r.name())
            .collect();
        assert!(names.contains(&"original"));
        assert!(registry.matching(Some("no-such-kernel")).is_empty());
    }
}
