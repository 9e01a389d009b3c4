//! Benchmarks for the filter/index pipeline and plot reconciliation
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use flowplot_rs::config::SurfaceLayout;
use flowplot_rs::pipeline::{filter_points, index_points, Filter, IndexMode, LineRange};
use flowplot_rs::plot::{PlotTree, Surface};
use flowplot_rs::FlowPoint;

/// A trace looping over a 40-line body
fn synthetic_trace(size: usize) -> Vec<FlowPoint> {
    (0..size)
        .map(|i| {
            let line = 10 + (i % 40) as u32;
            let enter = i as f64 * 0.01;
            FlowPoint::new(
                i as u64,
                enter,
                enter + 0.01,
                "bench.py",
                line,
                format!("    step_{}()", line),
                vec![],
            )
        })
        .collect()
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");
    let filter = Filter::lines([LineRange::new(15, 30)]);

    for size in [1_000, 10_000, 100_000].iter() {
        let points = synthetic_trace(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("line_range", size), &points, |b, points| {
            b.iter(|| filter_points(black_box(points), black_box(&filter)))
        });
    }

    group.finish();
}

fn bench_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("index");
    let points = synthetic_trace(10_000);
    group.throughput(Throughput::Elements(points.len() as u64));

    for mode in IndexMode::all() {
        group.bench_with_input(BenchmarkId::new("mode", mode.name()), mode, |b, mode| {
            b.iter(|| index_points(black_box(&points), *mode))
        });
    }

    group.finish();
}

fn bench_plot_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("plot_update");
    let points = synthetic_trace(5_000);
    let full = index_points(&points, IndexMode::Step);
    let narrow = index_points(
        &filter_points(&points, &Filter::lines([LineRange::new(15, 30)])),
        IndexMode::Step,
    );

    group.bench_function("toggle_filter", |b| {
        let mut tree = PlotTree::new(&Surface::standard(), &SurfaceLayout::default(), 700.0)
            .expect("standard surface");
        let mut now = 0.0;
        b.iter(|| {
            tree.update(black_box(&narrow), now);
            now += 1000.0;
            tree.tick(now);
            tree.update(black_box(&full), now);
            now += 1000.0;
            tree.tick(now);
        })
    });

    group.finish();
}

criterion_group!(benches, bench_filter, bench_index, bench_plot_update);
criterion_main!(benches);
