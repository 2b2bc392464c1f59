use shard_core::prelude::*;

/// Quickly builds a limit order for testing.
pub fn make_order(id: u64, symbol_id: u32, side: Side, price: u64, qty: u32, ts: u64) -> Order {
    Order::new(id, symbol_id, side, price, qty, ts)
}

/// Snapshot of the resting `(id, quantity)` pairs at one price level.
pub fn level_state(book: &OrderBook, side: Side, price: u64) -> Vec<(u64, u32)> {
    book.level_snapshot(side, price)
}
