mod common;
use common::*;
use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use shard_core::prelude::*;
use std::thread;

fn bench_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("matching for 10k orders");
    group.throughput(Throughput::Elements(10_000));
    group.bench_function("match_order 10k crossing buys", |b| {
        b.iter_batched(
            || {
                let mut book = OrderBook::new();
                for i in 0..10_000u64 {
                    book.add_order(make_order(i, 1, Side::Sell, 1000 + (i % 500), 10, i));
                }
                book
            },
            |mut book| {
                for i in 10_000..20_000u64 {
                    book.match_order(make_order(i, 1, Side::Buy, 1500, 10, i));
                }
            },
            criterion::BatchSize::LargeInput,
        );
    });
    group.finish();
}

fn bench_shard_end_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("shard end-to-end throughput");
    group.throughput(Throughput::Elements(20_000));
    group.bench_function("producer -> ring -> worker, 20k orders", |b| {
        b.iter(|| {
            let (mut shard, producer) = EngineShard::new(0, 8192, Box::new(NullSink));
            shard.start();

            let feeder = thread::spawn(move || {
                for i in 0..20_000u64 {
                    let side = if i % 2 == 0 { Side::Sell } else { Side::Buy };
                    while producer.push(make_order(i, 1, side, 1000, 10, i)).is_err() {
                        thread::yield_now();
                    }
                }
            });
            feeder.join().unwrap();
            shard.stop();
        });
    });
    group.finish();
}

criterion_group!(benches, bench_matching, bench_shard_end_to_end);
criterion_main!(benches);
