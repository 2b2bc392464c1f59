//! A sharded, in-memory limit-order matching core.
//!
//! Order flow is routed by instrument to one of `N` independent worker
//! shards ([`shard::EngineShard`]); each shard owns a disjoint set of
//! instruments and matches incoming orders against a price-time-priority
//! [`book::OrderBook`]. A [`router::Router`] picks the target shard
//! deterministically (`symbol_id mod N`) and feeds it through a lock-free
//! [`ring`] buffer, so no two shards ever share mutable state and the
//! matching path never synchronizes across cores.

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

pub mod book;
pub mod config;
pub mod error;
pub mod order;
pub mod ring;
pub mod router;
pub mod shard;
pub mod sink;

pub mod prelude {
    pub use crate::book::OrderBook;
    pub use crate::config::{EngineConfig, ShardConfig, DEFAULT_ENGINE_CONFIG, HIGH_THROUGHPUT_ENGINE_CONFIG};
    pub use crate::error::{ConfigError, OrderValidationError};
    pub use crate::order::{Order, Side, Trade};
    pub use crate::ring::{self, Consumer, Producer};
    pub use crate::router::{build_engine, Router};
    pub use crate::shard::EngineShard;
    pub use crate::sink::{CollectingSink, NullSink, TradeSink};
}
