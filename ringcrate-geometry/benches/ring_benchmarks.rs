//! Benchmarks for building tolerance rings at increasing tessellation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ringcrate_core::RingParams;
use ringcrate_geometry::{edges_geometry, RingOptions, ToleranceRing};

fn bench_ring_build(c: &mut Criterion) {
    let wave_counts = [12, 48, 192];
    let bore_segments = [32, 128];

    let mut group = c.benchmark_group("ring_build");

    for &waves in &wave_counts {
        for &segments in &bore_segments {
            let params = RingParams::new("TR-BENCH", 60.0, 20.0, 4.0, waves);
            let options = RingOptions { bore_segments: segments, ..Default::default() };
            group.bench_with_input(
                BenchmarkId::new("build", format!("w{}_b{}", waves, segments)),
                &(&params, &options),
                |b, &(params, options)| {
                    b.iter(|| ToleranceRing::build(black_box(params), black_box(options)))
                },
            );
        }
    }

    group.finish();
}

fn bench_edges(c: &mut Criterion) {
    let params = RingParams::new("TR-BENCH", 60.0, 20.0, 4.0, 192);
    let options = RingOptions { bore_segments: 256, extrude_steps: 8, ..Default::default() };
    let ring = ToleranceRing::build(&params, &options).unwrap();

    c.bench_function("edges_geometry", |b| {
        b.iter(|| edges_geometry(black_box(&ring.mesh), 1.0))
    });
}

criterion_group!(benches, bench_ring_build, bench_edges);
criterion_main!(benches);
