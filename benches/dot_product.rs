use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use dot_scaling::math::dot_product::{available_variants, WorkloadGenerator};
use dot_scaling::registry::SizeRange;

fn bench_dot_product(c: &mut Criterion) {
    let mut generator = WorkloadGenerator::seeded(42);
    let mut group = c.benchmark_group("dot_product");

    for size in SizeRange::REFERENCE.sizes() {
        let workload = generator.generate(size);
        group.throughput(Throughput::Elements(size as u64));

        for variant in available_variants() {
            let func = variant.function;
            group.bench_with_input(
                BenchmarkId::new(variant.name, size),
                &workload,
                |bencher, w| {
                    bencher.iter(|| func(black_box(&w.a), black_box(&w.b), black_box(w.len())))
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_dot_product);
criterion_main!(benches);
