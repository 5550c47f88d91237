//! Throughput benchmarks for the block list.
//!
//! Run with: cargo bench -p nexus-blocklist

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use nexus_blocklist::{BlockList, MemoryBlock};

const BLOCKS: usize = 10_000;

fn block(i: usize) -> MemoryBlock {
    MemoryBlock::new(i * 64, 64)
}

fn filled(n: usize) -> BlockList {
    (0..n).map(block).collect()
}

// ============================================================================
// End operations (O(1))
// ============================================================================

fn bench_ends(c: &mut Criterion) {
    let mut group = c.benchmark_group("ends");
    group.throughput(Throughput::Elements(BLOCKS as u64));

    let mut list = BlockList::with_capacity(BLOCKS);

    group.bench_function("add_last", |b| {
        b.iter(|| {
            for i in 0..BLOCKS {
                black_box(list.add_last(block(i)));
            }
            list.clear();
        });
    });

    group.bench_function("add_first", |b| {
        b.iter(|| {
            for i in 0..BLOCKS {
                black_box(list.add_first(block(i)));
            }
            list.clear();
        });
    });

    group.bench_function("add_last_pop_first", |b| {
        b.iter(|| {
            for i in 0..BLOCKS {
                list.add_last(block(i));
                black_box(list.pop_first());
            }
        });
    });

    group.finish();
}

// ============================================================================
// Positional operations (O(index))
// ============================================================================

fn bench_positional(c: &mut Criterion) {
    let mut group = c.benchmark_group("positional");

    for depth in [16usize, 256, 4096] {
        let mut list = filled(depth);
        let middle = depth / 2;

        group.bench_with_input(BenchmarkId::new("block_at_middle", depth), &middle, |b, &i| {
            b.iter(|| black_box(list.block_at(i)));
        });

        group.bench_with_input(
            BenchmarkId::new("insert_remove_middle", depth),
            &middle,
            |b, &i| {
                b.iter(|| {
                    list.insert_at(i, block(depth)).unwrap();
                    black_box(list.remove_at(i).unwrap());
                });
            },
        );
    }

    group.finish();
}

// ============================================================================
// Search (O(n))
// ============================================================================

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    for depth in [16usize, 256, 4096] {
        let list = filled(depth);
        let last = block(depth - 1);
        let missing = MemoryBlock::new(usize::MAX, 1);

        group.bench_with_input(BenchmarkId::new("index_of_last", depth), &last, |b, target| {
            b.iter(|| black_box(list.index_of(target)));
        });

        group.bench_with_input(BenchmarkId::new("index_of_miss", depth), &missing, |b, target| {
            b.iter(|| black_box(list.index_of(target)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_ends, bench_positional, bench_search);
criterion_main!(benches);
