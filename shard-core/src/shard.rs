use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

use crate::book::OrderBook;
use crate::order::Order;
use crate::ring::{self, Consumer, Producer};
use crate::sink::TradeSink;

/// One independent execution context owning a disjoint subset of instruments.
///
/// A shard is fed by exactly one [`Producer`] (handed to the caller by
/// [`EngineShard::new`] so a [`crate::router::Router`] can dispatch into it)
/// and drains its [`Consumer`] end on a single dedicated worker thread. A
/// book is created lazily on first reference to a `symbol_id`; because
/// `symbol_id mod num_shards` gives each shard a disjoint instrument set, no
/// two shards ever touch the same book and the book map needs no locking.
pub struct EngineShard {
    core_id: usize,
    running: Arc<AtomicBool>,
    consumer: Option<Consumer<Order>>,
    sink: Option<Box<dyn TradeSink>>,
    worker: Option<JoinHandle<()>>,
}

impl EngineShard {
    /// Builds a shard with a fresh ring of `capacity` slots and an empty
    /// book map, returning the shard alongside the ring's producer half. The
    /// producer is the only way to feed this shard; callers typically hand
    /// it to a [`crate::router::Router`].
    pub fn new(core_id: usize, capacity: usize, sink: Box<dyn TradeSink>) -> (Self, Producer<Order>) {
        let (producer, consumer) = ring::channel(capacity);
        let shard = Self {
            core_id,
            running: Arc::new(AtomicBool::new(true)),
            consumer: Some(consumer),
            sink: Some(sink),
            worker: None,
        };
        (shard, producer)
    }

    pub fn core_id(&self) -> usize {
        self.core_id
    }

    /// Launches the worker thread. Callers invoke this once; a second call
    /// panics because the consumer and sink have already been moved out.
    pub fn start(&mut self) {
        let consumer = self
            .consumer
            .take()
            .expect("EngineShard::start called more than once");
        let mut sink = self
            .sink
            .take()
            .expect("EngineShard::start called more than once");
        let running = Arc::clone(&self.running);
        let core_id = self.core_id;

        let handle = thread::Builder::new()
            .name(format!("shard-{core_id}"))
            .spawn(move || {
                tracing::info!(core_id, "shard worker starting");
                let mut books: HashMap<u32, OrderBook> = HashMap::new();
                let mut process = |order: Order| {
                    if let Err(err) = order.validate() {
                        tracing::warn!(core_id, order_id = order.id, %err, "rejecting invalid order");
                        return;
                    }
                    let book = books.entry(order.symbol_id).or_default();
                    let trades = book.match_order(order);
                    if !trades.is_empty() {
                        sink.accept_batch(&trades);
                    }
                };

                loop {
                    match consumer.pop() {
                        Some(order) => process(order),
                        None => {
                            if !running.load(Ordering::Acquire) {
                                break;
                            }
                            thread::yield_now();
                        }
                    }
                }

                // The running flag may have flipped while an order was still
                // in flight between the producer's release store and this
                // thread's next pop; drain once more so a stop() never
                // stranded a queued order (the reference source's bug, fixed
                // here).
                while let Some(order) = consumer.pop() {
                    process(order);
                }

                tracing::info!(core_id, "shard worker stopped");
            })
            .expect("failed to spawn shard worker thread");

        self.worker = Some(handle);
    }

    /// Requests termination and blocks until the worker has drained the ring
    /// and exited. Callers invoke this once, after start().
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(handle) = self.worker.take() {
            handle.join().expect("shard worker thread panicked");
        }
    }
}

impl Drop for EngineShard {
    fn drop(&mut self) {
        if self.worker.is_some() {
            self.stop();
        }
    }
}
