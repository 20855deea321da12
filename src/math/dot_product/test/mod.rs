//! Correctness tests for dot product implementations.

#[cfg(test)]
mod tests {
    use crate::math::dot_product::code::*;
    use crate::math::dot_product::{relative_error, WorkloadGenerator, RELATIVE_TOLERANCE};

    fn assert_close(result: f64, expected: f64, msg: &str) {
        let error = relative_error(result, expected);
        assert!(
            error <= RELATIVE_TOLERANCE,
            "{}: expected {}, got {}, relative error {:e}",
            msg,
            expected,
            result,
            error
        );
    }

    /// Sum in strict index order, independent of any kernel
    fn naive(a: &[f64], b: &[f64], n: usize) -> f64 {
        let mut s = 0.0;
        for i in 0..n {
            s += a[i] * b[i];
        }
        s
    }

    #[test]
    fn test_known_value_scalar() {
        let a = [1.0, 2.0, 3.0];
        let b = [4.0, 5.0, 6.0];
        assert_eq!(dot_product_original(&a, &b, 3), 32.0);
        #[cfg(target_arch = "x86_64")]
        assert_eq!(dot_product_x86_64_asm(&a, &b, 3), 32.0);
    }

    #[test]
    fn test_known_value_even() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [5.0, 6.0, 7.0, 8.0];
        // 5 + 12 + 21 + 32
        for v in available_variants() {
            assert_eq!((v.function)(&a, &b, 4), 70.0, "variant {}", v.name);
        }
    }

    #[test]
    fn test_zero_length_ignores_contents() {
        let a = [f64::NAN, 3.0];
        let b = [f64::INFINITY, 2.0];
        for v in available_variants() {
            assert_eq!((v.function)(&a, &b, 0), 0.0, "variant {}", v.name);
            assert_eq!((v.function)(&[], &[], 0), 0.0, "variant {}", v.name);
        }
    }

    #[test]
    fn test_prefix_only() {
        // Elements past n must not contribute
        let a = [1.0, 1.0, 1.0, 1e300];
        let b = [2.0, 2.0, 2.0, 1e300];
        for v in available_variants() {
            assert_eq!((v.function)(&a, &b, 3), 6.0, "variant {}", v.name);
        }
    }

    #[test]
    fn test_equivalence_random() {
        let mut gen = WorkloadGenerator::from_entropy();
        for n in [0, 1, 2, 8, 17, 1000] {
            let w = gen.generate(n);
            let expected = naive(&w.a, &w.b, n);
            for v in available_variants() {
                let result = (v.function)(&w.a, &w.b, n);
                assert_close(result, expected, &format!("{} at n = {}", v.name, n));
            }
        }
    }

    #[test]
    fn test_sequential_variants_bit_exact() {
        let w = WorkloadGenerator::seeded(11).generate(4097);
        let expected = naive(&w.a, &w.b, w.len());
        assert_eq!(
            dot_product_original(&w.a, &w.b, w.len()).to_bits(),
            expected.to_bits()
        );
        #[cfg(target_arch = "x86_64")]
        assert_eq!(
            dot_product_x86_64_asm(&w.a, &w.b, w.len()).to_bits(),
            expected.to_bits()
        );
        if C_IMPL_AVAILABLE {
            assert_eq!(
                dot_product_c_original(&w.a, &w.b, w.len()).to_bits(),
                expected.to_bits()
            );
        }
    }

    #[test]
    #[cfg(target_arch = "x86_64")]
    fn test_packed_lane_order() {
        // Lane sums are (even indices) + (odd indices)
        let w = WorkloadGenerator::seeded(5).generate(64);
        let mut even = 0.0;
        let mut odd = 0.0;
        for i in (0..64).step_by(2) {
            even += w.a[i] * w.b[i];
            odd += w.a[i + 1] * w.b[i + 1];
        }
        let result = dot_product_x86_64_sse2_asm(&w.a, &w.b, 64);
        assert_eq!(result.to_bits(), (even + odd).to_bits());
    }

    #[test]
    #[cfg(target_arch = "x86_64")]
    fn test_packed_odd_remainder() {
        let a = [1.0, 2.0, 3.0];
        let b = [4.0, 5.0, 6.0];
        assert_eq!(dot_product_x86_64_sse2_asm(&a, &b, 3), 32.0);
        assert_eq!(dot_product_x86_64_sse2_asm(&a, &b, 1), 4.0);
    }

    #[test]
    #[cfg(target_arch = "x86_64")]
    fn test_unaligned_inputs() {
        // Offset by one element so the packed loads straddle 16-byte boundaries
        let w = WorkloadGenerator::seeded(2).generate(1001);
        let (a, b) = (&w.a[1..], &w.b[1..]);
        let expected = naive(a, b, 1000);
        assert_close(dot_product_x86_64_sse2_asm(a, b, 1000), expected, "unaligned");
    }

    #[test]
    fn test_repeatable() {
        let w = WorkloadGenerator::from_entropy().generate(513);
        for v in available_variants() {
            let first = (v.function)(&w.a, &w.b, w.len());
            for _ in 0..5 {
                assert_eq!(
                    (v.function)(&w.a, &w.b, w.len()).to_bits(),
                    first.to_bits(),
                    "variant {}",
                    v.name
                );
            }
        }
    }

    #[test]
    fn test_generic_reference_f32() {
        let a = [1.0f32, 2.0, 3.0];
        let b = [4.0f32, 5.0, 6.0];
        assert_eq!(dot_product_original(&a, &b, 3), 32.0f32);
    }

    #[test]
    #[should_panic(expected = "exceeds input lengths")]
    fn test_n_past_end_panics() {
        dot_product_original(&[1.0f64, 2.0], &[3.0, 4.0], 3);
    }

    #[test]
    fn test_verify_passes() {
        let mut gen = WorkloadGenerator::from_entropy();
        crate::math::dot_product::verify(&mut gen).unwrap();
    }

    #[test]
    fn test_find_variant() {
        assert!(find_variant(REFERENCE_VARIANT).is_some());
        assert!(find_variant("nope").is_none());
    }
}
