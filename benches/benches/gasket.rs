// Copyright 2025 the Apollonian Gasket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use apollonian_gasket::{Gasket, SeedSpec, Subdivision};
use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::Point;
use std::time::Duration;

fn fresh() -> Gasket {
    Gasket::new(SeedSpec::default()).unwrap()
}

fn grown(mode: Subdivision) -> Gasket {
    let mut gasket = fresh();
    gasket.subdivide(mode).unwrap();
    gasket
}

/// Row-major samples covering the boundary's bounding box, like a raster.
fn raster(side: usize) -> Vec<Point> {
    let scale = 2.1 / side as f64;
    (0..side)
        .flat_map(|row| {
            (0..side).map(move |col| {
                Point::new(
                    scale * col as f64 - 1.05,
                    1.05 - scale * row as f64,
                )
            })
        })
        .collect()
}

fn bench_subdivide_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("gasket/subdivide_depth");

    for depth in [4_u32, 6, 8] {
        let circles = grown(Subdivision::Depth(depth)).circle_count();
        group.throughput(Throughput::Elements(circles as u64));
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            b.iter_batched(
                fresh,
                |mut gasket| {
                    gasket.subdivide(Subdivision::Depth(depth)).unwrap();
                    black_box(gasket);
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_subdivide_ceiling(c: &mut Criterion) {
    let mut group = c.benchmark_group("gasket/subdivide_ceiling");

    for ceiling in [100.0_f64, 1_000.0, 10_000.0] {
        let mode = Subdivision::CurvatureCeiling(ceiling);
        let circles = grown(mode).circle_count();
        group.throughput(Throughput::Elements(circles as u64));
        group.bench_with_input(BenchmarkId::new("serial", ceiling), &mode, |b, &mode| {
            b.iter_batched(
                fresh,
                |mut gasket| {
                    gasket.subdivide(mode).unwrap();
                    black_box(gasket);
                },
                BatchSize::LargeInput,
            );
        });

        #[cfg(feature = "rayon")]
        group.bench_with_input(BenchmarkId::new("parallel", ceiling), &mode, |b, &mode| {
            b.iter_batched(
                fresh,
                |mut gasket| {
                    gasket.par_subdivide(mode).unwrap();
                    black_box(gasket);
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_shade_raster(c: &mut Criterion) {
    let mut group = c.benchmark_group("gasket/shade_raster");
    group.measurement_time(Duration::from_secs(5));

    // Hypothesis: per-sample cost grows with tree height, not with circle count.
    let side = 256;
    let samples = raster(side);
    group.throughput(Throughput::Elements(samples.len() as u64));

    for ceiling in [100.0_f64, 1_000.0, 10_000.0] {
        let gasket = grown(Subdivision::CurvatureCeiling(ceiling));
        group.bench_with_input(BenchmarkId::new("shade", ceiling), &gasket, |b, gasket| {
            b.iter(|| {
                let mut acc = 0_u64;
                for &p in &samples {
                    acc += u64::from(gasket.shade(black_box(p)));
                }
                black_box(acc)
            });
        });
        group.bench_with_input(BenchmarkId::new("locate", ceiling), &gasket, |b, gasket| {
            b.iter(|| {
                let mut acc = 0.0_f64;
                for &p in &samples {
                    acc += gasket.locate(black_box(p)).min(0.0);
                }
                black_box(acc)
            });
        });
    }

    group.finish();
}

fn bench_locate_brute_force(c: &mut Criterion) {
    let mut group = c.benchmark_group("gasket/brute_force");

    // Baseline for the tree walk: scan every circle for each sample.
    let gasket = grown(Subdivision::CurvatureCeiling(1_000.0));
    let circles: Vec<_> = gasket.circles().skip(1).copied().collect();
    let samples = raster(64);
    group.throughput(Throughput::Elements(samples.len() as u64));

    group.bench_function("tree", |b| {
        b.iter(|| {
            let mut acc = 0.0_f64;
            for &p in &samples {
                acc += gasket.locate(black_box(p)).min(0.0);
            }
            black_box(acc)
        });
    });
    group.bench_function("scan", |b| {
        b.iter(|| {
            let mut acc = 0.0_f64;
            for &p in &samples {
                let best = circles
                    .iter()
                    .map(|c| c.penetration(black_box(p)))
                    .fold(f64::INFINITY, f64::min);
                acc += best.min(0.0);
            }
            black_box(acc)
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_subdivide_depth,
    bench_subdivide_ceiling,
    bench_shade_raster,
    bench_locate_brute_force
);
criterion_main!(benches);
