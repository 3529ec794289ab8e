//! Insert and lookup benchmarks across bucket capacities.

use std::hint::black_box;

use bindex::BTree;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_10k");
    for capacity in [5usize, 11, 101] {
        group.bench_with_input(
            BenchmarkId::from_parameter(capacity),
            &capacity,
            |b, &capacity| {
                b.iter(|| {
                    let mut tree: BTree<u32, u32> = BTree::with_capacity(capacity).unwrap();
                    for key in 0..10_000u32 {
                        tree.insert(black_box(key), key).unwrap();
                    }
                    tree
                })
            },
        );
    }
    group.finish();
}

fn bench_find(c: &mut Criterion) {
    let mut tree: BTree<u32, u32> = BTree::with_capacity(11).unwrap();
    for key in 0..10_000u32 {
        tree.insert(key, key).unwrap();
    }

    c.bench_function("find_in_10k", |b| {
        b.iter(|| {
            for key in [0u32, 4_999, 9_999] {
                black_box(tree.find(black_box(&key)).unwrap());
            }
        })
    });
}

fn bench_dump_load(c: &mut Criterion) {
    let mut tree: BTree<u32, u32> = BTree::with_capacity(11).unwrap();
    for key in 0..1_000u32 {
        tree.insert(key, key).unwrap();
    }
    let doc = tree.dump().unwrap();

    c.bench_function("dump_1k", |b| b.iter(|| tree.dump().unwrap()));
    c.bench_function("load_1k", |b| {
        b.iter(|| BTree::<u32, u32>::load(black_box(&doc)).unwrap())
    });
}

criterion_group!(benches, bench_insert, bench_find, bench_dump_load);
criterion_main!(benches);
