use std::thread;

use crate::config::EngineConfig;
use crate::error::OrderValidationError;
use crate::order::Order;
use crate::ring::Producer;
use crate::shard::EngineShard;
use crate::sink::TradeSink;

/// Deterministic, lock-free routing of orders to shards by `symbol_id`.
///
/// `symbol_id mod num_shards` assigns each instrument to exactly one shard
/// for the life of the process, with no rebalancing. The router owns
/// one [`Producer`] per shard and applies spin backpressure when a target
/// ring is full; it never drops an order.
pub struct Router {
    producers: Vec<Producer<Order>>,
}

impl Router {
    /// Builds a router over an existing set of shard producers, one per
    /// shard index. `producers[i]` must be the producer half of shard `i`'s
    /// ring, as returned by [`EngineShard::new`].
    pub fn new(producers: Vec<Producer<Order>>) -> Self {
        assert!(!producers.is_empty(), "router needs at least one shard");
        Self { producers }
    }

    pub fn num_shards(&self) -> usize {
        self.producers.len()
    }

    /// The shard index that owns `symbol_id`. Stable for the life of the
    /// router.
    pub fn shard_for(&self, symbol_id: u32) -> usize {
        (symbol_id as usize) % self.producers.len()
    }

    /// Validates `order` and, if valid, pushes it onto its target shard's
    /// ring, spin-retrying (with a yield between attempts) until the push
    /// succeeds. Invalid orders are rejected at this boundary, logged, and
    /// never enter a ring.
    pub fn dispatch(&self, order: Order) -> Result<(), OrderValidationError> {
        order.validate()?;

        let idx = self.shard_for(order.symbol_id);
        let producer = &self.producers[idx];
        let mut pending = order;
        loop {
            match producer.push(pending) {
                Ok(()) => return Ok(()),
                Err(back) => {
                    pending = back;
                    thread::yield_now();
                }
            }
        }
    }
}

/// Builds `config.num_shards` shards and the router that feeds them,
/// constructing each shard's trade sink via `sink_factory(core_id)`. Shards
/// are returned in index order, matching [`Router::shard_for`]; callers are
/// responsible for calling `start()` on each shard before routing orders and
/// `stop()` on each when done.
pub fn build_engine(
    config: &EngineConfig,
    mut sink_factory: impl FnMut(usize) -> Box<dyn TradeSink>,
) -> (Vec<EngineShard>, Router) {
    let mut shards = Vec::with_capacity(config.num_shards);
    let mut producers = Vec::with_capacity(config.num_shards);

    for core_id in 0..config.num_shards {
        let shard_config = config.shard_config(core_id);
        let (shard, producer) =
            EngineShard::new(shard_config.core_id, shard_config.ring_capacity, sink_factory(core_id));
        shards.push(shard);
        producers.push(producer);
    }

    (shards, Router::new(producers))
}
