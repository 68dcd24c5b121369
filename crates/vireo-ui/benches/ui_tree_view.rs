//! Benchmarks for large tree views

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use vireo_core::geometry::Rect;
use vireo_ui::{ItemId, TreeView, Widget};

/// `branches` roots with `leaves` children each, all expanded.
fn build(branches: usize, leaves: usize) -> (TreeView, Vec<ItemId>) {
    let mut tree = TreeView::new().with_bounds(Rect::new(0.0, 0.0, 300.0, 600.0));
    let mut all = Vec::with_capacity(branches * (leaves + 1));
    for b in 0..branches {
        let Some(root) = tree.add_node(None, format!("Branch {}", b)) else {
            continue;
        };
        all.push(root);
        for l in 0..leaves {
            if let Some(leaf) = tree.add_node(Some(root), format!("Leaf {}.{}", b, l)) {
                all.push(leaf);
            }
        }
    }
    tree.expand_all();
    (tree, all)
}

fn bench_visible_items(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_visible_items");

    for branches in [10, 100, 500] {
        let (tree, all) = build(branches, 10);
        group.throughput(Throughput::Elements(all.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(branches), &tree, |b, tree| {
            b.iter(|| black_box(tree.get_visible_tree_items()))
        });
    }

    group.finish();
}

fn bench_render_info(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_render_info");

    for branches in [10, 100, 500] {
        let (mut tree, all) = build(branches, 10);
        // Scroll to the middle so culling has work on both sides.
        let middle = all[all.len() / 2];
        tree.ensure_visible(middle);
        group.throughput(Throughput::Elements(all.len() as u64));
        group.bench_function(BenchmarkId::from_parameter(branches), |b| {
            b.iter(|| black_box(tree.render_info()))
        });
    }

    group.finish();
}

fn bench_collapse_expand(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_collapse_expand");

    let (mut tree, _) = build(500, 10);
    group.bench_function("all", |b| {
        b.iter(|| {
            tree.collapse_all();
            tree.expand_all();
            black_box(tree.content_height())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_visible_items, bench_render_info, bench_collapse_expand);
criterion_main!(benches);
