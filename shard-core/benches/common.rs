use shard_core::prelude::*;

/// Quickly builds a limit order for benchmarking.
pub fn make_order(id: u64, symbol_id: u32, side: Side, price: u64, qty: u32, ts: u64) -> Order {
    Order::new(id, symbol_id, side, price, qty, ts)
}
