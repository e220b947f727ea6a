//! Benchmarks for document mutation and layout.

use azui_core::geometry::Size;
use azui_dom::{Document, ElementId, Flow};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

fn build_row(items: usize) -> (Document, ElementId, Vec<ElementId>) {
    let mut doc = Document::new(Size::new(100_000.0, 600.0));
    let list = doc.create_element("div");
    doc.update_style(list, |s| {
        s.flow = Flow::Row;
        s.set_size(items as f32 * 50.0, 40.0);
    })
    .unwrap();
    doc.append_child(doc.root(), list).unwrap();

    let children = (0..items)
        .map(|_| {
            let el = doc.create_element("div");
            doc.update_style(el, |s| s.set_size(50.0, 40.0)).unwrap();
            doc.append_child(list, el).unwrap();
            el
        })
        .collect();
    doc.update_layout();
    (doc, list, children)
}

fn bench_swap_and_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("swap_and_layout");

    for size in [10, 100, 1000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let (mut doc, _list, items) = build_row(size);
            let first = items[0];
            let last = items[size - 1];
            b.iter(|| {
                doc.swap(black_box(first), black_box(last)).unwrap();
                doc.update_layout();
                doc.bounding_rect(first)
            });
        });
    }

    group.finish();
}

fn bench_hit_test(c: &mut Criterion) {
    let mut group = c.benchmark_group("hit_test");

    for size in [10, 100, 1000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let (doc, _list, _items) = build_row(size);
            let point = azui_core::math::Vec2::new(size as f32 * 25.0, 20.0);
            b.iter(|| doc.hit_test(black_box(point)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_swap_and_layout, bench_hit_test);
criterion_main!(benches);
