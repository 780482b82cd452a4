//! Micro benchmarks for AVL and 2-3 tree insertion, traversal and teardown.
#![forbid(unsafe_code)]
#![allow(missing_docs)]

use algokit::tree::{AvlTree, Key, TwoThreeTree};
use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const INSERT_COUNTS: [usize; 3] = [1_024, 8_192, 32_768];

fn shuffled_keys(count: usize) -> Vec<Key> {
    let mut keys: Vec<Key> = (0..count as Key).collect();
    keys.shuffle(&mut ChaCha8Rng::seed_from_u64(0xBEEF_F00D));
    keys
}

fn micro_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("micro/tree_insert");
    group.sample_size(30);

    for count in INSERT_COUNTS {
        let random_keys = shuffled_keys(count);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("avl_random", count), &random_keys, |b, keys| {
            b.iter(|| {
                let tree: AvlTree = keys.iter().copied().collect();
                black_box(tree.height());
            });
        });
        group.bench_with_input(
            BenchmarkId::new("two_three_random", count),
            &random_keys,
            |b, keys| {
                b.iter(|| {
                    let tree: TwoThreeTree = keys.iter().copied().collect();
                    black_box(tree.height());
                });
            },
        );
        group.bench_with_input(BenchmarkId::new("avl_sequential", count), &count, |b, &n| {
            b.iter(|| {
                let tree: AvlTree = (0..n as Key).collect();
                black_box(tree.stats().rotations());
            });
        });
        group.bench_with_input(
            BenchmarkId::new("two_three_sequential", count),
            &count,
            |b, &n| {
                b.iter(|| {
                    let tree: TwoThreeTree = (0..n as Key).collect();
                    black_box(tree.stats().splits());
                });
            },
        );
    }
    group.finish();
}

fn micro_traverse_destroy(c: &mut Criterion) {
    let mut group = c.benchmark_group("micro/tree_walk");
    group.sample_size(30);

    let count = INSERT_COUNTS[INSERT_COUNTS.len() - 1];
    let keys = shuffled_keys(count);
    let avl: AvlTree = keys.iter().copied().collect();
    let two_three: TwoThreeTree = keys.iter().copied().collect();
    group.throughput(Throughput::Elements(count as u64));

    group.bench_function("avl_traverse", |b| b.iter(|| black_box(avl.traverse())));
    group.bench_function("two_three_traverse", |b| {
        b.iter(|| black_box(two_three.traverse()))
    });
    group.bench_function("avl_destroy", |b| {
        b.iter_batched(
            || avl.clone(),
            |mut tree| black_box(tree.destroy()),
            BatchSize::LargeInput,
        );
    });
    group.bench_function("two_three_destroy", |b| {
        b.iter_batched(
            || two_three.clone(),
            |mut tree| black_box(tree.destroy()),
            BatchSize::LargeInput,
        );
    });
    group.finish();
}

criterion_group!(benches, micro_insert, micro_traverse_destroy);
criterion_main!(benches);
