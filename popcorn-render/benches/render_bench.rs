use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use popcorn_core::{ColourMode, PlotVariant, Projection, ViewportController};
use popcorn_render::{render, Raster};

fn bench_render_levels(c: &mut Criterion) {
    let plot = PlotVariant::Normal;
    let mut viewport = ViewportController::new(640, 480);
    viewport.reset_view(&plot, 100);
    let mut raster = Raster::new(640, 480).expect("raster");

    let mut group = c.benchmark_group("render_normal_640x480");
    for levels in [100u32, 300, 1000] {
        group.bench_with_input(BenchmarkId::from_parameter(levels), &levels, |b, &levels| {
            b.iter(|| render(&mut raster, &viewport, &plot, levels, ColourMode::Value));
        });
    }
    group.finish();
}

fn bench_enumeration(c: &mut Criterion) {
    c.bench_function("ratios_rationals_1000", |b| {
        b.iter(|| PlotVariant::Rationals.ratios(1000).count());
    });
}

criterion_group!(benches, bench_render_levels, bench_enumeration);
criterion_main!(benches);
