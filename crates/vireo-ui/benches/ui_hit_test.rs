//! Benchmarks for hit-testing, event routing and render export

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use vireo_core::geometry::Rect;
use vireo_core::math::Vec2;
use vireo_input::{InputEvent, MouseButton};
use vireo_ui::{Button, GuiContext, Page, ViewportId};

/// A grid of pages, each holding `per_page` buttons.
fn build(pages: usize, per_page: usize) -> GuiContext {
    let mut ui = GuiContext::new();
    for p in 0..pages {
        let x = (p % 10) as f32 * 110.0;
        let y = (p / 10) as f32 * 110.0;
        let page = ui.add_root(Page::new("").with_bounds(Rect::new(x, y, 100.0, 100.0)));
        for b in 0..per_page {
            let by = y + b as f32 * 22.0;
            ui.add_child(
                page,
                Button::new(format!("Button {}", b))
                    .with_bounds(Rect::new(x + 5.0, by, 90.0, 20.0)),
            );
        }
    }
    ui
}

fn bench_hit_test(c: &mut Criterion) {
    let mut group = c.benchmark_group("hit_test");

    for pages in [10, 50, 100] {
        let ui = build(pages, 10);
        group.throughput(Throughput::Elements(ui.widget_count() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(pages), &ui, |b, ui| {
            b.iter(|| ui.hit_test(ViewportId::MAIN, black_box(Vec2::new(50.0, 50.0))))
        });
    }

    group.finish();
}

fn bench_mouse_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("mouse_sweep");

    for pages in [10, 100] {
        let mut ui = build(pages, 10);
        let events: Vec<InputEvent> = (0..100)
            .map(|i| InputEvent::mouse_move(i as f32 * 10.0, i as f32 * 3.0))
            .chain([
                InputEvent::mouse_down(MouseButton::Left, 50.0, 10.0),
                InputEvent::mouse_up(MouseButton::Left, 50.0, 10.0),
            ])
            .collect();
        group.throughput(Throughput::Elements(events.len() as u64));
        group.bench_function(BenchmarkId::from_parameter(pages), |b| {
            b.iter(|| {
                for event in &events {
                    black_box(ui.handle_event(ViewportId::MAIN, event));
                }
            })
        });
    }

    group.finish();
}

fn bench_render_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_list");

    for pages in [10, 50, 100] {
        let ui = build(pages, 10);
        group.throughput(Throughput::Elements(ui.widget_count() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(pages), &ui, |b, ui| {
            b.iter(|| black_box(ui.render_list(ViewportId::MAIN)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_hit_test, bench_mouse_sweep, bench_render_list);
criterion_main!(benches);
