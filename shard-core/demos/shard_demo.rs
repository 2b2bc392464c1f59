//! Synthetic-load harness mirroring the sharded-exchange prototype this
//! crate's design is built on: spin up `NUM_SHARDS` shards, dispatch a
//! million orders across 100 synthetic instruments, and report how long
//! dispatch took plus how many orders each shard matched. Purely
//! illustrative, not part of the library's public contract and not a
//! substitute for the real (out-of-scope) benchmark harness.

use shard_core::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

const NUM_SHARDS: usize = 4;
const NUM_SYMBOLS: u32 = 100;
const ORDERS_TO_SEND: u64 = 1_000_000;

#[derive(Clone)]
struct CountingSink {
    matched_quantity: Arc<AtomicU64>,
}

impl TradeSink for CountingSink {
    fn accept_batch(&mut self, trades: &[Trade]) {
        let total: u64 = trades.iter().map(|t| t.quantity as u64).sum();
        self.matched_quantity.fetch_add(total, Ordering::Relaxed);
    }
}

fn main() {
    println!("=== shard-core: multi-core sharded exchange demo ===");

    let config = EngineConfig::new(NUM_SHARDS, 100_000).expect("valid demo config");
    let counters: Vec<Arc<AtomicU64>> = (0..config.num_shards)
        .map(|_| Arc::new(AtomicU64::new(0)))
        .collect();
    let counters_for_build = counters.clone();

    let (mut shards, router) = build_engine(&config, move |core_id| {
        Box::new(CountingSink {
            matched_quantity: Arc::clone(&counters_for_build[core_id]),
        })
    });

    for shard in &mut shards {
        shard.start();
    }

    println!(
        "[system] {} shards running, dispatching {ORDERS_TO_SEND} orders...",
        config.num_shards
    );
    let start = Instant::now();

    for i in 0..ORDERS_TO_SEND {
        let order = Order::new(
            i,
            i as u32 % NUM_SYMBOLS,
            if i % 2 == 0 { Side::Buy } else { Side::Sell },
            100 + (i % 20),
            10,
            i,
        );
        router.dispatch(order).expect("demo orders are well-formed");
    }

    let elapsed = start.elapsed();
    println!(
        "[system] dispatched {ORDERS_TO_SEND} orders in {:.2?}",
        elapsed
    );

    println!("[system] shutting down shards...");
    for shard in &mut shards {
        shard.stop();
    }

    for (core_id, counter) in counters.iter().enumerate() {
        println!(
            "[core {core_id}] matched quantity: {}",
            counter.load(Ordering::Relaxed)
        );
    }
}
