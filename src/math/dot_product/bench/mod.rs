//! Timed batch closures for dot product variants.

use std::hint::black_box;

use super::code::DotProductFn;
use super::workload::Workload;
use crate::utils::bench::{elapsed, now};
use crate::utils::timer::Variant;
use crate::utils::VariantInfo;

/// Wrap a kernel and a borrowed workload into a timed batch runner.
///
/// Inputs go through `black_box` on every call so the kernel cannot be
/// hoisted out of the loop, and every result goes through `black_box` so the
/// call cannot be elided.
pub fn variant_for<'a>(info: &VariantInfo<DotProductFn>, workload: &'a Workload) -> Variant<'a> {
    let func = info.function;
    let a = workload.a.as_slice();
    let b = workload.b.as_slice();
    let n = workload.len();

    Variant {
        name: info.name,
        description: info.description,
        run: Box::new(move |iters| {
            let mut result = 0.0;
            let start = now();
            for _ in 0..iters {
                result = black_box(func(black_box(a), black_box(b), black_box(n)));
            }
            (elapsed(start), result)
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::dot_product::{available_variants, WorkloadGenerator};

    #[test]
    fn test_batch_returns_kernel_result() {
        let workload = Workload {
            a: vec![1.0, 2.0, 3.0, 4.0],
            b: vec![5.0, 6.0, 7.0, 8.0],
        };
        for info in available_variants() {
            let mut variant = variant_for(&info, &workload);
            let (_, result) = (variant.run)(5);
            assert_eq!(result, 70.0, "variant {}", info.name);
        }
    }

    #[test]
    fn test_zero_iterations_runs_nothing() {
        let workload = WorkloadGenerator::seeded(9).generate(16);
        let info = &available_variants()[0];
        let mut variant = variant_for(info, &workload);
        let (_, result) = (variant.run)(0);
        assert_eq!(result, 0.0);
    }
}
