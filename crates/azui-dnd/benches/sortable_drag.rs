//! Benchmarks for pointer-driven sorting.

use azui_core::math::Vec2;
use azui_dnd::SortableOptions;
use azui_test_utils::{GestureDriver, SortableFixture};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

fn fixture(items: usize, options: SortableOptions) -> SortableFixture {
    SortableFixture::builder()
        .viewport(items as f32 * 100.0 + 200.0, 600.0)
        .list(Vec2::ZERO, Vec2::new(items as f32 * 100.0 + 100.0, 100.0), items, options)
        .build()
}

/// Drag the first item across the whole row and back, then release.
fn bench_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("sortable_sweep");

    for size in [10, 50, 200] {
        let steps = size * 3;
        group.throughput(Throughput::Elements(steps as u64 * 2));
        for (mode, options) in [
            ("placeholder", SortableOptions::default()),
            ("marker", SortableOptions::default().placeholder(false)),
        ] {
            group.bench_with_input(BenchmarkId::new(mode, size), &size, |b, &size| {
                let mut f = fixture(size, options.clone());
                let mut driver = GestureDriver::new();
                let far = Vec2::new(size as f32 * 100.0 - 17.0, 50.0);
                b.iter(|| {
                    driver.press(&mut f.ctx, Vec2::new(50.0, 50.0));
                    driver.move_through(&mut f.ctx, black_box(far), steps);
                    driver.move_through(&mut f.ctx, Vec2::new(50.0, 50.0), steps);
                    driver.release(&mut f.ctx)
                });
            });
        }
    }

    group.finish();
}

/// A single pointer move that crosses into the next item.
fn bench_single_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("sortable_move");

    for size in [10, 100, 1000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut f = fixture(size, SortableOptions::default());
            let mut driver = GestureDriver::new();
            driver.press(&mut f.ctx, Vec2::new(50.0, 50.0));
            driver.move_to(&mut f.ctx, Vec2::new(60.0, 50.0));
            let mut forward = true;
            b.iter(|| {
                let x = if forward { 116.0 } else { 50.0 };
                forward = !forward;
                driver.move_to(&mut f.ctx, black_box(Vec2::new(x, 50.0)));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_sweep, bench_single_move);
criterion_main!(benches);
