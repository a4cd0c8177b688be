//! Benchmarks for evolution circuit construction
//!
//! Run with: cargo bench -p spinchain-evolution

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use spinchain_evolution::{EvolutionSpec, XyzEvolution};

fn bench_bound(c: &mut Criterion) {
    let mut group = c.benchmark_group("xyz_bound");

    for num_qubits in &[4_u32, 16, 64] {
        let spec = EvolutionSpec::new(*num_qubits)
            .with_coupling([1.0, 0.5, 0.25])
            .with_magnetic_field(0.3)
            .with_final_time(1.0)
            .with_trotter_num(20);
        group.bench_with_input(BenchmarkId::new("build", num_qubits), &spec, |b, spec| {
            b.iter(|| black_box(XyzEvolution::new(spec.clone()).unwrap()));
        });
    }

    group.finish();
}

fn bench_unbound(c: &mut Criterion) {
    let mut group = c.benchmark_group("xyz_unbound");

    for num_qubits in &[4_u32, 16, 64] {
        let spec = EvolutionSpec::new(*num_qubits).with_trotter_num(20);
        group.bench_with_input(BenchmarkId::new("build", num_qubits), &spec, |b, spec| {
            b.iter(|| black_box(XyzEvolution::new(spec.clone()).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_bound, bench_unbound);
criterion_main!(benches);
